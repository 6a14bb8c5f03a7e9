/// PickerStore owns one picker instance plus the keyboard focus the terminal adds on
/// top of it (which calendar and which day the arrow keys are on).
use crate::actions::{Action, PickerAction, PickerId};
use crate::dispatcher::Dispatcher;
use chrono::{Datelike, Duration};
use datepick_core::utils::days_in_month;
use datepick_core::{
    CalendarGrid, Clock, CursorState, Deferred, DropdownId, NavDirection, PickerConfig,
    PickerPhase, PickerResult, PickerValue, Preset, RangeSelectionController, SelectorOutcome,
    Side, SystemClock,
};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Rows of a dropdown list visible at once
pub const SELECTOR_VISIBLE_ROWS: usize = 8;

struct PickerModel {
    controller: RangeSelectionController,
    focused_side: Side,
    focused_day: u32,
    option_scroll: HashMap<DropdownId, usize>,
}

/// An open year/month list, ready to draw
#[derive(Debug, Clone)]
pub struct DropdownView {
    pub id: DropdownId,
    pub options: Vec<i32>,
    pub focused: usize,
    pub scroll: usize,
}

/// Render-ready snapshot of a picker
#[derive(Debug, Clone)]
pub struct PickerView {
    pub id: PickerId,
    pub phase: PickerPhase,
    pub range_mode: bool,
    pub value: PickerValue,
    pub cursors: CursorState,
    pub start_grid: Option<CalendarGrid>,
    /// Absent in single-date mode
    pub end_grid: Option<CalendarGrid>,
    pub focused_side: Side,
    pub focused_day: u32,
    pub message: Option<String>,
    pub active_preset: Option<Preset>,
    pub dropdown: Option<DropdownView>,
    pub start_direction: NavDirection,
    pub end_direction: NavDirection,
}

impl PickerView {
    pub fn is_open(&self) -> bool {
        self.phase != PickerPhase::Closed
    }
}

/// Store for one picker instance
#[derive(Clone)]
pub struct PickerStore {
    id: PickerId,
    state: Arc<RwLock<PickerModel>>,
}

impl PickerStore {
    pub fn new(id: PickerId, config: PickerConfig, dispatcher: Dispatcher) -> PickerResult<Self> {
        Self::with_clock(id, config, dispatcher, Arc::new(SystemClock))
    }

    pub fn with_clock(
        id: PickerId,
        config: PickerConfig,
        dispatcher: Dispatcher,
        clock: Arc<dyn Clock>,
    ) -> PickerResult<Self> {
        let today = clock.today();
        let mut controller = RangeSelectionController::new(config, clock)?;
        controller.on_change(move |value| {
            dispatcher.dispatch(Action::ValueCommitted(id, value.clone()));
        });
        controller.on_update_set(move |value| {
            log::debug!("{:?} update-set {}", id, value);
        });
        Ok(Self {
            id,
            state: Arc::new(RwLock::new(PickerModel {
                controller,
                focused_side: Side::Start,
                focused_day: today.day(),
                option_scroll: HashMap::new(),
            })),
        })
    }

    pub fn id(&self) -> PickerId {
        self.id
    }

    fn read(&self) -> RwLockReadGuard<'_, PickerModel> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PickerModel> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> PickerView {
        let model = self.read();
        let controller = &model.controller;
        let cursors = controller.state();
        let range_mode = controller.is_range_mode();
        let dropdown = cursors.open_dropdown.map(|id| {
            let selector = controller.selector(id);
            DropdownView {
                id,
                options: selector.options().to_vec(),
                focused: selector.focused(),
                scroll: model.option_scroll.get(&id).copied().unwrap_or_default(),
            }
        });
        PickerView {
            id: self.id,
            phase: controller.phase(),
            range_mode,
            value: controller.value(),
            start_grid: controller.grid(Side::Start).ok(),
            end_grid: if range_mode {
                controller.grid(Side::End).ok()
            } else {
                None
            },
            focused_side: model.focused_side,
            focused_day: model.focused_day,
            message: controller.message().map(|m| m.text.clone()),
            active_preset: controller.active_preset(),
            dropdown,
            start_direction: cursors.direction(Side::Start),
            end_direction: cursors.direction(Side::End),
            cursors,
        }
    }

    pub fn is_open(&self) -> bool {
        self.read().controller.is_open()
    }

    pub fn has_open_dropdown(&self) -> bool {
        self.read().controller.state().open_dropdown.is_some()
    }

    /// Effects queued by the picker for after the next render
    pub fn take_deferred(&self) -> Vec<Deferred> {
        self.write().controller.take_deferred()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        match action {
            Action::Picker(id, picker_action) if *id == self.id => {
                let mut model = self.write();
                model.apply(self.id, picker_action);
            }
            Action::MessageExpired(id, token) if *id == self.id => {
                self.write().controller.expire_message(*token);
            }
            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    /// Drop pending deferred work when the host tears the picker down
    pub fn unmount(&self) {
        self.write().controller.unmount();
    }
}

impl PickerModel {
    fn apply(&mut self, id: PickerId, action: &PickerAction) {
        match action {
            PickerAction::Open => {
                self.controller.open();
                self.focused_side = Side::Start;
                let state = self.controller.state();
                self.focused_day = match state.selection.start {
                    Some(start) => start.day(),
                    None => self.today_day(),
                };
                self.clamp_focus();
            }
            PickerAction::Accept => {
                if let Err(e) = self.controller.accept() {
                    log::info!("{:?} accept refused: {}", id, e);
                }
            }
            PickerAction::Cancel => self.controller.cancel(),
            PickerAction::Clear => self.controller.clear(),
            PickerAction::FocusSide(side) => {
                if self.controller.is_range_mode() || *side == Side::Start {
                    self.focused_side = *side;
                    self.clamp_focus();
                }
            }
            PickerAction::MoveFocus(days) => self.move_focus(*days),
            PickerAction::SelectFocused => self.select_focused(id),
            PickerAction::StepMonth(side, delta) => {
                if let Err(e) = self.controller.step_month(*side, *delta) {
                    log::warn!("{:?}: {}", id, e);
                }
                self.clamp_focus();
            }
            PickerAction::ToggleDropdown(dropdown) => self.controller.toggle_dropdown(*dropdown),
            PickerAction::SelectorKey(key) => {
                if let SelectorOutcome::Committed(value) = self.controller.selector_key(*key) {
                    log::debug!("{:?} selector committed {}", id, value);
                    self.clamp_focus();
                }
            }
            PickerAction::Preset(index) => match self.controller.select_preset_index(*index) {
                Ok(true) => {
                    if let Some(end) = self.controller.selection().end {
                        self.focused_side = Side::End;
                        self.focused_day = end.day();
                    }
                }
                Ok(false) => {}
                Err(e) => log::info!("{:?} preset rejected: {}", id, e),
            },
            PickerAction::RevealOption(dropdown, index) => {
                let scroll = self.option_scroll.entry(*dropdown).or_default();
                if *index < *scroll {
                    *scroll = *index;
                } else if *index >= *scroll + SELECTOR_VISIBLE_ROWS {
                    *scroll = index + 1 - SELECTOR_VISIBLE_ROWS;
                }
            }
        }
    }

    fn today_day(&self) -> u32 {
        let today = self.controller.today();
        if self.controller.state().cursor(self.focused_side).contains(today) {
            today.day()
        } else {
            1
        }
    }

    /// Keep the focused day inside the month the focused calendar shows
    fn clamp_focus(&mut self) {
        let cursor = self.controller.state().cursor(self.focused_side);
        let last = days_in_month(cursor.year, cursor.month).unwrap_or(28);
        self.focused_day = self.focused_day.clamp(1, last);
    }

    fn move_focus(&mut self, days: i64) {
        if !self.controller.is_open() {
            return;
        }
        let side = self.focused_side;
        let cursor = self.controller.state().cursor(side);
        let Some(current) = cursor.date(self.focused_day) else {
            self.clamp_focus();
            return;
        };
        let target = current + Duration::days(days);
        if !cursor.contains(target) {
            let months = (target.year() - cursor.year) * 12 + target.month() as i32
                - cursor.month as i32;
            if let Err(e) = self.controller.step_month(side, months) {
                log::warn!("{}", e);
                return;
            }
        }
        self.focused_day = target.day();
    }

    fn select_focused(&mut self, id: PickerId) {
        let side = self.focused_side;
        let Ok(grid) = self.controller.grid(side) else {
            return;
        };
        let Some(cell) = grid
            .index_of_day(self.focused_day)
            .and_then(|index| grid.cell(index))
        else {
            return;
        };
        match self.controller.select_day(side, cell) {
            Ok(true) => {
                // after a start is picked, carry on with the end calendar
                if side == Side::Start && self.controller.is_range_mode() {
                    self.focused_side = Side::End;
                    self.clamp_focus();
                }
            }
            Ok(false) => log::debug!("{:?}: day {} is not selectable", id, self.focused_day),
            Err(e) => log::info!("{:?}: {}", id, e),
        }
    }
}
