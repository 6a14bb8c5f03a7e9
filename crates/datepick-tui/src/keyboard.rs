/// Keyboard input handling and key mapping
use crate::actions::{Action, PickerAction, PickerId};
use crate::stores::{PickerStore, PickerView, UIStore};
use datepick_core::{CursorField, DropdownId, SelectorKey};
use ratatui::crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input and return the appropriate Action
pub fn handle_key_event(
    key_event: KeyEvent,
    ui_store: &UIStore,
    pickers: &[PickerStore],
) -> Option<Action> {
    let ui_state = ui_store.get_state();

    if ui_state.show_help {
        return match key_event.code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    let id = ui_state.active_picker;
    let picker = pickers.iter().find(|picker| picker.id() == id)?;

    // An open dropdown owns the keyboard until it closes
    if picker.has_open_dropdown() {
        return selector_key(key_event.code)
            .map(|key| Action::Picker(id, PickerAction::SelectorKey(key)));
    }

    let view = picker.get_state();

    if view.is_open() {
        return handle_open_picker_keys(key_event, id, &view);
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Tab => Some(Action::FocusPicker(ui_store.next_picker())),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('o') => {
            Some(Action::Picker(id, PickerAction::Open))
        }
        KeyCode::Char('x') | KeyCode::Delete => Some(Action::Picker(id, PickerAction::Clear)),
        _ => None,
    }
}

fn selector_key(code: KeyCode) -> Option<SelectorKey> {
    match code {
        KeyCode::Down | KeyCode::Char('j') => Some(SelectorKey::ArrowDown),
        KeyCode::Up | KeyCode::Char('k') => Some(SelectorKey::ArrowUp),
        KeyCode::Home => Some(SelectorKey::Home),
        KeyCode::End => Some(SelectorKey::End),
        KeyCode::Enter => Some(SelectorKey::Enter),
        KeyCode::Char(' ') => Some(SelectorKey::Space),
        KeyCode::Esc => Some(SelectorKey::Escape),
        _ => None,
    }
}

fn handle_open_picker_keys(key_event: KeyEvent, id: PickerId, view: &PickerView) -> Option<Action> {
    let side = view.focused_side;
    let action = match key_event.code {
        // Day focus (h/j/k/l or arrows)
        KeyCode::Left | KeyCode::Char('h') => PickerAction::MoveFocus(-1),
        KeyCode::Right | KeyCode::Char('l') => PickerAction::MoveFocus(1),
        KeyCode::Up | KeyCode::Char('k') => PickerAction::MoveFocus(-7),
        KeyCode::Down | KeyCode::Char('j') => PickerAction::MoveFocus(7),
        KeyCode::Enter | KeyCode::Char(' ') => PickerAction::SelectFocused,

        KeyCode::Tab | KeyCode::BackTab if view.range_mode => {
            PickerAction::FocusSide(side.opposite())
        }

        // Month navigation
        KeyCode::Char('[') | KeyCode::PageUp => PickerAction::StepMonth(side, -1),
        KeyCode::Char(']') | KeyCode::PageDown => PickerAction::StepMonth(side, 1),
        KeyCode::Char('{') => PickerAction::StepMonth(side, -12),
        KeyCode::Char('}') => PickerAction::StepMonth(side, 12),

        // Year/month lists
        KeyCode::Char('y') => {
            PickerAction::ToggleDropdown(DropdownId::new(side, CursorField::Year))
        }
        KeyCode::Char('m') => {
            PickerAction::ToggleDropdown(DropdownId::new(side, CursorField::Month))
        }

        // Presets 1-6
        KeyCode::Char(c @ '1'..='6') => PickerAction::Preset((c as u32 - '1' as u32) as usize),

        KeyCode::Char('a') => PickerAction::Accept,
        KeyCode::Char('x') => PickerAction::Clear,
        KeyCode::Esc => PickerAction::Cancel,

        KeyCode::Char('?') => return Some(Action::ToggleHelp),
        _ => return None,
    };
    Some(Action::Picker(id, action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::Dispatcher;
    use datepick_core::{FixedClock, PickerConfig, Side};
    use std::sync::Arc;

    fn setup(config: PickerConfig) -> (UIStore, Vec<PickerStore>) {
        let (dispatcher, _rx) = Dispatcher::new();
        let clock = Arc::new(FixedClock::ymd(2024, 5, 17).unwrap());
        let pickers = vec![
            PickerStore::with_clock(PickerId::Primary, config.clone(), dispatcher.clone(), clock.clone())
                .unwrap(),
            PickerStore::with_clock(PickerId::Secondary, config, dispatcher, clock).unwrap(),
        ];
        let ui = UIStore::new(vec![PickerId::Primary, PickerId::Secondary], Vec::new());
        (ui, pickers)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_closed_picker_keys() {
        let (ui, pickers) = setup(PickerConfig::default());
        assert!(matches!(
            handle_key_event(key(KeyCode::Enter), &ui, &pickers),
            Some(Action::Picker(PickerId::Primary, PickerAction::Open))
        ));
        assert!(matches!(
            handle_key_event(key(KeyCode::Tab), &ui, &pickers),
            Some(Action::FocusPicker(PickerId::Secondary))
        ));
        assert!(matches!(
            handle_key_event(key(KeyCode::Char('q')), &ui, &pickers),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_open_picker_keys() {
        let (ui, pickers) = setup(PickerConfig::default());
        pickers[0].reduce(&Action::Picker(PickerId::Primary, PickerAction::Open));
        assert!(matches!(
            handle_key_event(key(KeyCode::Esc), &ui, &pickers),
            Some(Action::Picker(_, PickerAction::Cancel))
        ));
        assert!(matches!(
            handle_key_event(key(KeyCode::Char('3')), &ui, &pickers),
            Some(Action::Picker(_, PickerAction::Preset(2)))
        ));
        assert!(matches!(
            handle_key_event(key(KeyCode::Tab), &ui, &pickers),
            Some(Action::Picker(_, PickerAction::FocusSide(Side::End)))
        ));
        assert!(matches!(
            handle_key_event(key(KeyCode::Char(']')), &ui, &pickers),
            Some(Action::Picker(_, PickerAction::StepMonth(Side::Start, 1)))
        ));
        assert!(handle_key_event(key(KeyCode::Char('7')), &ui, &pickers).is_none());
    }

    #[test]
    fn test_dropdown_captures_keys() {
        let (ui, pickers) = setup(PickerConfig::default());
        pickers[0].reduce(&Action::Picker(PickerId::Primary, PickerAction::Open));
        pickers[0].reduce(&Action::Picker(
            PickerId::Primary,
            PickerAction::ToggleDropdown(DropdownId::new(Side::Start, CursorField::Month)),
        ));
        assert!(matches!(
            handle_key_event(key(KeyCode::Down), &ui, &pickers),
            Some(Action::Picker(_, PickerAction::SelectorKey(SelectorKey::ArrowDown)))
        ));
        assert!(matches!(
            handle_key_event(key(KeyCode::Esc), &ui, &pickers),
            Some(Action::Picker(_, PickerAction::SelectorKey(SelectorKey::Escape)))
        ));
        assert!(handle_key_event(key(KeyCode::Char('a')), &ui, &pickers).is_none());
    }

    #[test]
    fn test_single_mode_has_no_side_switch() {
        let (ui, pickers) = setup(PickerConfig::single());
        pickers[0].reduce(&Action::Picker(PickerId::Primary, PickerAction::Open));
        assert!(handle_key_event(key(KeyCode::Tab), &ui, &pickers).is_none());
    }
}
