/// UIStore manages page-level state: which picker has focus, the help overlay, the
/// last committed values and the host-side validation message of each picker.
use crate::actions::{Action, PickerId};
use datepick_core::{PickerValue, Validator, first_validation_failure};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Snapshot handed to the renderer and key mapping
#[derive(Debug, Clone)]
pub struct UIState {
    /// Picker that receives keyboard input
    pub active_picker: PickerId,

    /// Pickers mounted on the page, in tab order
    pub pickers: Vec<PickerId>,

    /// Help overlay toggled with `?`
    pub show_help: bool,

    /// Last value each picker handed to its change listeners
    pub committed: BTreeMap<PickerId, PickerValue>,

    /// Message from the first failing host validator, kept until the value changes again
    pub validation: BTreeMap<PickerId, String>,

    /// Whether the application should exit
    pub should_exit: bool,
}

#[derive(Clone)]
pub struct UIStore {
    state: Arc<RwLock<UIState>>,
    validators: Arc<Vec<Validator>>,
}

impl UIStore {
    pub fn new(pickers: Vec<PickerId>, validators: Vec<Validator>) -> Self {
        let active_picker = pickers.first().copied().unwrap_or(PickerId::Primary);
        Self {
            state: Arc::new(RwLock::new(UIState {
                active_picker,
                pickers,
                show_help: false,
                committed: BTreeMap::new(),
                validation: BTreeMap::new(),
                should_exit: false,
            })),
            validators: Arc::new(validators),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> UIState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        match action {
            Action::FocusPicker(id) => {
                if state.pickers.contains(id) {
                    state.active_picker = *id;
                }
            }

            Action::ToggleHelp => {
                state.show_help = !state.show_help;
            }

            Action::ValueCommitted(id, value) => {
                match first_validation_failure(&self.validators, value) {
                    Some(message) => {
                        state.validation.insert(*id, message);
                    }
                    None => {
                        state.validation.remove(id);
                    }
                }
                state.committed.insert(*id, value.clone());
            }

            Action::Quit => {
                state.should_exit = true;
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    /// The picker after the active one, wrapping around
    pub fn next_picker(&self) -> PickerId {
        let state = self.get_state();
        let position = state
            .pickers
            .iter()
            .position(|id| *id == state.active_picker)
            .unwrap_or_default();
        state
            .pickers
            .get((position + 1) % state.pickers.len().max(1))
            .copied()
            .unwrap_or(state.active_picker)
    }

    /// Check if the application should exit
    pub fn should_exit(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .should_exit
    }
}

/// Validators the demo page attaches to every picker
pub fn demo_validators(today: chrono::NaiveDate, separator: String) -> Vec<Validator> {
    vec![
        Box::new(|value: &PickerValue| match value {
            PickerValue::Single(date) if date.is_empty() => Err("필수 입력 항목입니다.".to_string()),
            PickerValue::Range(start, end) if start.is_empty() || end.is_empty() => {
                Err("필수 입력 항목입니다.".to_string())
            }
            _ => Ok(()),
        }),
        Box::new(move |value: &PickerValue| {
            let latest = match value {
                PickerValue::Single(date) => date,
                PickerValue::Range(_, end) => end,
            };
            match datepick_core::utils::parse_bound(latest, &separator) {
                Ok(Some(date)) if date > today => Err("미래 날짜는 선택할 수 없습니다.".to_string()),
                _ => Ok(()),
            }
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn store() -> UIStore {
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        UIStore::new(
            vec![PickerId::Primary, PickerId::Secondary],
            demo_validators(today, "-".to_string()),
        )
    }

    fn range(start: &str, end: &str) -> PickerValue {
        PickerValue::Range(start.to_string(), end.to_string())
    }

    #[test]
    fn test_initial_state() {
        let state = store().get_state();
        assert_eq!(state.active_picker, PickerId::Primary);
        assert!(!state.show_help);
        assert!(!state.should_exit);
        assert!(state.committed.is_empty());
    }

    #[test]
    fn test_focus_cycles_pickers() {
        let store = store();
        assert_eq!(store.next_picker(), PickerId::Secondary);
        store.reduce(&Action::FocusPicker(PickerId::Secondary));
        assert_eq!(store.next_picker(), PickerId::Primary);
    }

    #[test]
    fn test_focus_ignores_unmounted_picker() {
        let store = UIStore::new(vec![PickerId::Primary], Vec::new());
        store.reduce(&Action::FocusPicker(PickerId::Secondary));
        assert_eq!(store.get_state().active_picker, PickerId::Primary);
        assert_eq!(store.next_picker(), PickerId::Primary);
    }

    #[test]
    fn test_validation_persists_until_value_changes() {
        let store = store();
        store.reduce(&Action::ValueCommitted(PickerId::Primary, range("", "")));
        assert_eq!(
            store.get_state().validation.get(&PickerId::Primary).map(String::as_str),
            Some("필수 입력 항목입니다.")
        );

        store.reduce(&Action::ToggleHelp);
        assert!(store.get_state().validation.contains_key(&PickerId::Primary));

        store.reduce(&Action::ValueCommitted(
            PickerId::Primary,
            range("2024-05-01", "2024-06-01"),
        ));
        assert_eq!(
            store.get_state().validation.get(&PickerId::Primary).map(String::as_str),
            Some("미래 날짜는 선택할 수 없습니다.")
        );

        store.reduce(&Action::ValueCommitted(
            PickerId::Primary,
            range("2024-05-01", "2024-05-03"),
        ));
        let state = store.get_state();
        assert!(state.validation.is_empty());
        assert_eq!(
            state.committed.get(&PickerId::Primary),
            Some(&range("2024-05-01", "2024-05-03"))
        );
    }

    #[test]
    fn test_quit() {
        let store = store();
        store.reduce(&Action::Quit);
        assert!(store.should_exit());
    }
}
