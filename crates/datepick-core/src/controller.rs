/// RangeSelectionController drives a single picker instance: day clicks, presets,
/// max-range checks and the open → accept/cancel transaction around the committed
/// selection. Hosts render from `state()`/`grid()` and run `take_deferred()` after
/// every interaction.
use crate::calendar::{CalendarGrid, GridRequest, build_grid};
use crate::clock::{Clock, SystemClock};
use crate::config::PickerConfig;
use crate::deferred::{Deferred, DeferredQueue};
use crate::error::{PickerError, PickerResult};
use crate::models::{CursorField, DateCursor, DayCell, DropdownId, PickerValue, SelectionState, Side};
use crate::presets::Preset;
use crate::selector::{SelectorKey, SelectorOutcome, YearMonthSelector};
use crate::store::{CursorState, DateCursorStore};
use crate::utils::{format_bound, parse_bound};
use std::sync::Arc;
use std::time::Duration;

/// Lifecycle of the popup, derived from the open flag and the committed selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPhase {
    Closed,
    OpenEmpty,
    OpenPartial,
    OpenFull,
}

/// An error shown to the user until it expires or is replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    pub text: String,
    /// Matches the `Deferred::ExpireMessage` that will clear this message
    pub token: u64,
}

pub type ChangeListener = Box<dyn Fn(&PickerValue) + Send + Sync>;

pub struct RangeSelectionController {
    config: PickerConfig,
    store: DateCursorStore,
    /// Rollback point for `cancel`, taken on open and replaced on accept
    snapshot: SelectionState,
    is_open: bool,
    message: Option<TransientMessage>,
    next_token: u64,
    active_preset: Option<Preset>,
    selectors: [YearMonthSelector; 4],
    deferred: DeferredQueue,
    on_change: Vec<ChangeListener>,
    on_update_set: Vec<ChangeListener>,
}

impl RangeSelectionController {
    pub fn new(config: PickerConfig, clock: Arc<dyn Clock>) -> PickerResult<Self> {
        config.validate()?;
        let selectors = DropdownId::ALL.map(|id| YearMonthSelector::new(id, &config));
        Ok(Self {
            store: DateCursorStore::new(clock),
            snapshot: SelectionState::default(),
            is_open: false,
            message: None,
            next_token: 0,
            active_preset: None,
            selectors,
            deferred: DeferredQueue::new(),
            on_change: Vec::new(),
            on_update_set: Vec::new(),
            config,
        })
    }

    pub fn with_system_clock(config: PickerConfig) -> PickerResult<Self> {
        Self::new(config, Arc::new(SystemClock))
    }

    /// Register a listener fired on accept and clear, never on intermediate clicks
    pub fn on_change(&mut self, listener: impl Fn(&PickerValue) + Send + Sync + 'static) {
        self.on_change.push(Box::new(listener));
    }

    /// Same trigger and argument as `on_change`, for hosts that track form state separately
    pub fn on_update_set(&mut self, listener: impl Fn(&PickerValue) + Send + Sync + 'static) {
        self.on_update_set.push(Box::new(listener));
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn is_range_mode(&self) -> bool {
        self.config.range_mode
    }

    /// Snapshot of the live store. Always reflects every write made so far
    pub fn state(&self) -> CursorState {
        self.store.get_state()
    }

    pub fn selection(&self) -> SelectionState {
        self.store.state().selection
    }

    pub fn snapshot(&self) -> SelectionState {
        self.snapshot
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn phase(&self) -> PickerPhase {
        if !self.is_open {
            return PickerPhase::Closed;
        }
        let selection = self.selection();
        match (selection.start, selection.end) {
            (None, None) => PickerPhase::OpenEmpty,
            (Some(_), Some(_)) => PickerPhase::OpenFull,
            _ => PickerPhase::OpenPartial,
        }
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.store.today()
    }

    pub fn message(&self) -> Option<&TransientMessage> {
        self.message.as_ref()
    }

    pub fn active_preset(&self) -> Option<Preset> {
        self.active_preset
    }

    /// Start/end as the strings the host sees, so host validators can run against them
    pub fn bounds(&self) -> (String, String) {
        let selection = self.selection();
        let separator = &self.config.separator;
        (
            format_bound(selection.start, separator),
            format_bound(selection.end, separator),
        )
    }

    /// The committed selection in the shape handed to listeners
    pub fn value(&self) -> PickerValue {
        let (start, end) = self.bounds();
        if self.config.range_mode {
            PickerValue::Range(start, end)
        } else {
            PickerValue::Single(start)
        }
    }

    /// Grid for one calendar, derived from the current store state
    pub fn grid(&self, side: Side) -> PickerResult<CalendarGrid> {
        let state = self.store.state();
        build_grid(&GridRequest {
            cursor: state.cursor(side),
            side,
            selected: state.selected.get(side),
            bounds: state.selection,
            range_mode: self.config.range_mode,
            today: self.store.today(),
        })
    }

    /// Open the popup. The committed selection becomes the rollback point and both
    /// calendars jump to the months of their bounds.
    pub fn open(&mut self) {
        if self.is_open {
            return;
        }
        let selection = self.selection();
        self.snapshot = selection;
        self.store.replace_selection(selection);
        if let Some(start) = selection.start {
            self.store.show_month_of(Side::Start, start);
        }
        if let Some(end) = selection.end {
            self.store.show_month_of(Side::End, end);
        }
        self.store.close_all_dropdowns();
        self.dismiss_message();
        self.is_open = true;
        log::debug!("Picker opened in phase {:?}", self.phase());
    }

    /// Commit a clicked day. Returns `Ok(false)` for cells that cannot be selected.
    /// Selectability comes from the live grid, not from the kind the caller captured.
    pub fn select_day(&mut self, side: Side, cell: DayCell) -> PickerResult<bool> {
        if !self.is_open || !cell.kind.in_month() {
            return Ok(false);
        }
        let side = if self.config.range_mode {
            side
        } else {
            Side::Start
        };
        let grid = self.grid(side)?;
        let Some(live) = grid
            .index_of_day(cell.day)
            .and_then(|index| grid.cell(index))
        else {
            log::warn!("Day {} does not exist in the {:?} month", cell.day, side);
            return Ok(false);
        };
        if !live.kind.is_selectable() {
            log::debug!("{:?} day {} is {:?}", side, live.day, live.kind);
            return Ok(false);
        }
        let Some(date) = grid.cursor.date(live.day) else {
            return Ok(false);
        };

        self.store.set_selected(side, Some(date));
        self.store.commit(side, Some(date));
        self.active_preset = None;
        log::debug!("Selected {:?} = {}", side, date);

        if self.config.range_mode {
            self.validate_range(side)?;
        } else {
            self.accept()?;
        }
        Ok(true)
    }

    /// Check the live selection against `max_range`. When it is too long the bound on
    /// `just_set` is cleared and a transient message raised.
    pub fn validate_range(&mut self, just_set: Side) -> PickerResult<()> {
        let selection = self.store.state().selection;
        let max_range = self.config.max_range;
        if max_range > 0 {
            if let Some(span) = selection.span_days() {
                if span > max_range as i64 {
                    self.store.commit(just_set, None);
                    self.store.set_selected(just_set, None);
                    let err = PickerError::RangeExceeded { max_range };
                    log::warn!("Rejected {:?} bound: {} days > {}", just_set, span, max_range);
                    self.raise(&err);
                    return Err(err);
                }
            }
        }
        self.dismiss_message();
        Ok(())
    }

    /// Commit the transaction, notify listeners and close
    pub fn accept(&mut self) -> PickerResult<PickerValue> {
        if !self.is_open {
            return Ok(self.value());
        }
        let selection = self.selection();
        if self.config.range_mode && !selection.is_complete() {
            let err = PickerError::IncompleteRangeSelection;
            self.raise(&err);
            return Err(err);
        }
        self.snapshot = selection;
        let value = self.value();
        log::debug!("Accepted {}", value);
        self.emit(&value);
        self.close();
        Ok(value)
    }

    /// Roll back to the snapshot taken on open and close without notifying listeners
    pub fn cancel(&mut self) {
        self.store.replace_selection(self.snapshot);
        self.active_preset = None;
        self.dismiss_message();
        if self.is_open {
            log::debug!("Cancelled, restored {:?}", self.snapshot);
            self.close();
        }
    }

    /// Empty both bounds and notify listeners, open or not
    pub fn clear(&mut self) {
        self.store.replace_selection(SelectionState::default());
        self.snapshot = SelectionState::default();
        self.active_preset = None;
        self.dismiss_message();
        let value = self.value();
        log::debug!("Cleared selection");
        self.emit(&value);
    }

    pub fn select_preset_index(&mut self, index: usize) -> PickerResult<bool> {
        match Preset::from_index(index) {
            Some(preset) => self.select_preset(preset),
            None => {
                log::warn!("No preset at index {}", index);
                Ok(false)
            }
        }
    }

    /// Write a preset range straight into the selection. The popup stays open.
    pub fn select_preset(&mut self, preset: Preset) -> PickerResult<bool> {
        if !self.is_open || !self.config.range_mode {
            log::warn!("Preset {:?} ignored outside an open range picker", preset);
            return Ok(false);
        }
        let (start, end) = preset.range(self.store.today());
        self.store.replace_selection(SelectionState {
            start: Some(start),
            end: Some(end),
        });
        self.store.show_month_of(Side::Start, start);
        self.store.show_month_of(Side::End, end);
        self.active_preset = Some(preset);
        log::debug!("Preset {:?}: {} ~ {}", preset, start, end);

        if let Err(err) = self.validate_range(Side::End) {
            self.active_preset = None;
            return Err(err);
        }
        Ok(true)
    }

    /// Set one cursor field directly. Years must be inside the configured bounds
    pub fn set_cursor(&mut self, side: Side, field: CursorField, value: i32) -> PickerResult<()> {
        match field {
            CursorField::Year => self.config.year_in_bounds(value)?,
            CursorField::Month => {
                let current = self.store.state().cursor(side);
                let target = DateCursor::normalized(current.year, value as i64);
                self.config.year_in_bounds(target.year)?;
            }
        }
        self.store.set_cursor(side, field, value);
        Ok(())
    }

    /// Previous/next month arrows. Refuses to leave the configured year range
    pub fn step_month(&mut self, side: Side, delta: i32) -> PickerResult<()> {
        let target = self.store.state().cursor(side).shifted(delta as i64);
        self.config.year_in_bounds(target.year)?;
        self.store.step_month(side, delta);
        Ok(())
    }

    pub fn selector(&self, id: DropdownId) -> &YearMonthSelector {
        &self.selectors[selector_index(id)]
    }

    pub fn open_dropdown(&mut self, id: DropdownId) {
        self.selectors[selector_index(id)].open(&mut self.store, &mut self.deferred);
    }

    pub fn toggle_dropdown(&mut self, id: DropdownId) {
        self.selectors[selector_index(id)].toggle(&mut self.store, &mut self.deferred);
    }

    pub fn close_dropdowns(&mut self) {
        self.store.close_all_dropdowns();
    }

    /// Route a key to whichever dropdown is open
    pub fn selector_key(&mut self, key: SelectorKey) -> SelectorOutcome {
        let Some(id) = self.store.state().open_dropdown else {
            return SelectorOutcome::Ignored;
        };
        self.selectors[selector_index(id)].handle_key(key, &mut self.store, &mut self.deferred)
    }

    /// Click on an option of a dropdown list
    pub fn choose_option(&mut self, id: DropdownId, index: usize) -> SelectorOutcome {
        self.selectors[selector_index(id)].choose(index, &mut self.store)
    }

    /// Clear the message if `token` still identifies it. Returns whether it was cleared
    pub fn expire_message(&mut self, token: u64) -> bool {
        match &self.message {
            Some(message) if message.token == token => {
                self.message = None;
                true
            }
            _ => false,
        }
    }

    /// Everything queued for after the next render
    pub fn take_deferred(&mut self) -> Vec<Deferred> {
        self.deferred.drain()
    }

    /// Load an externally bound value without notifying listeners
    pub fn load_value(&mut self, value: &PickerValue) -> PickerResult<()> {
        let separator = self.config.separator.clone();
        let selection = match value {
            PickerValue::Single(date) => SelectionState {
                start: parse_bound(date, &separator)?,
                end: None,
            },
            PickerValue::Range(start, end) => SelectionState {
                start: parse_bound(start, &separator)?,
                end: if self.config.range_mode {
                    parse_bound(end, &separator)?
                } else {
                    None
                },
            },
        };
        self.store.replace_selection(selection);
        self.snapshot = selection;
        if let Some(start) = selection.start {
            self.store.show_month_of(Side::Start, start);
        }
        if let Some(end) = selection.end {
            self.store.show_month_of(Side::End, end);
        }
        Ok(())
    }

    /// Drop pending deferred work and reset the store. Listeners stay registered
    pub fn unmount(&mut self) {
        self.deferred.cancel_all();
        self.store.init();
        self.snapshot = SelectionState::default();
        self.message = None;
        self.active_preset = None;
        self.is_open = false;
    }

    fn close(&mut self) {
        self.store.close_all_dropdowns();
        self.is_open = false;
        self.deferred.push(Deferred::RestoreFocus);
    }

    fn emit(&self, value: &PickerValue) {
        for listener in &self.on_change {
            listener(value);
        }
        for listener in &self.on_update_set {
            listener(value);
        }
    }

    fn raise(&mut self, err: &PickerError) {
        self.next_token += 1;
        let token = self.next_token;
        self.message = Some(TransientMessage {
            text: err.to_string(),
            token,
        });
        self.deferred
            .cancel_where(|effect| matches!(effect, Deferred::ExpireMessage { .. }));
        self.deferred.push(Deferred::ExpireMessage {
            token,
            after: Duration::from_millis(self.config.message_timeout_ms),
        });
    }

    fn dismiss_message(&mut self) {
        if self.message.take().is_some() {
            self.deferred
                .cancel_where(|effect| matches!(effect, Deferred::ExpireMessage { .. }));
        }
    }
}

fn selector_index(id: DropdownId) -> usize {
    DropdownId::ALL
        .iter()
        .position(|candidate| *candidate == id)
        .unwrap_or_default()
}
