/// DateCursorStore holds the per-instance picker state: both calendar cursors with
/// their previous values, the per-side highlighted dates, the committed selection and
/// which year/month dropdown (if any) is open.
use crate::clock::Clock;
use crate::models::{CursorField, DateCursor, DropdownId, NavDirection, SelectionState, Side};
use chrono::NaiveDate;
use std::sync::Arc;

/// Snapshot of a store. Cheap to clone and safe to hand to renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorState {
    pub start: DateCursor,
    pub end: DateCursor,

    /// Value of `start` before its last mutation
    pub before_start: DateCursor,

    /// Value of `end` before its last mutation
    pub before_end: DateCursor,

    /// Date highlighted as selected on each calendar
    pub selected: SelectionState,

    /// The committed selection, the only value ever emitted to the host
    pub selection: SelectionState,

    /// At most one dropdown can be open, so this is a single optional id
    pub open_dropdown: Option<DropdownId>,
}

impl CursorState {
    fn fresh(today: NaiveDate) -> Self {
        let cursor = DateCursor::of(today);
        Self {
            start: cursor,
            end: cursor,
            before_start: cursor,
            before_end: cursor,
            selected: SelectionState::default(),
            selection: SelectionState::default(),
            open_dropdown: None,
        }
    }

    pub fn cursor(&self, side: Side) -> DateCursor {
        match side {
            Side::Start => self.start,
            Side::End => self.end,
        }
    }

    pub fn before(&self, side: Side) -> DateCursor {
        match side {
            Side::Start => self.before_start,
            Side::End => self.before_end,
        }
    }

    /// Which way the last cursor change on `side` moved
    pub fn direction(&self, side: Side) -> NavDirection {
        NavDirection::between(self.before(side), self.cursor(side))
    }

    pub fn is_dropdown_open(&self, side: Side, field: CursorField) -> bool {
        self.open_dropdown == Some(DropdownId::new(side, field))
    }
}

pub struct DateCursorStore {
    state: CursorState,
    clock: Arc<dyn Clock>,
}

impl DateCursorStore {
    /// A fresh store. Each picker instance builds its own; stores are never shared
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let state = CursorState::fresh(clock.today());
        Self { state, clock }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> CursorState {
        self.state.clone()
    }

    /// Borrow the live state without cloning
    pub fn state(&self) -> &CursorState {
        &self.state
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Set the year or month of one cursor. The previous cursor is kept in the
    /// matching `before_*` slot. Months outside 1..=12 roll into the adjacent year.
    pub fn set_cursor(&mut self, side: Side, field: CursorField, value: i32) {
        let current = self.state.cursor(side);
        let next = match field {
            CursorField::Year => DateCursor {
                year: value,
                month: current.month,
            },
            CursorField::Month => DateCursor::normalized(current.year, value as i64),
        };
        self.move_cursor(side, next);
    }

    /// Previous/next month arrows
    pub fn step_month(&mut self, side: Side, delta: i32) {
        let current = self.state.cursor(side);
        self.set_cursor(side, CursorField::Month, current.month as i32 + delta);
    }

    /// Point a cursor at the month containing `date` in one mutation
    pub fn show_month_of(&mut self, side: Side, date: NaiveDate) {
        self.move_cursor(side, DateCursor::of(date));
    }

    fn move_cursor(&mut self, side: Side, next: DateCursor) {
        let state = &mut self.state;
        match side {
            Side::Start => {
                state.before_start = state.start;
                state.start = next;
            }
            Side::End => {
                state.before_end = state.end;
                state.end = next;
            }
        }
        log::debug!("{:?} cursor -> {}-{:02}", side, next.year, next.month);
    }

    /// Highlight a date on one calendar
    pub fn set_selected(&mut self, side: Side, date: Option<NaiveDate>) {
        self.state.selected.set(side, date);
    }

    /// Write one bound of the committed selection
    pub fn commit(&mut self, side: Side, date: Option<NaiveDate>) {
        self.state.selection.set(side, date);
    }

    /// Replace the committed selection and mirror it into the per-side highlights
    pub fn replace_selection(&mut self, selection: SelectionState) {
        self.state.selection = selection;
        self.state.selected = selection;
    }

    /// Opening a dropdown closes every other one first. Closing only touches `side`/`field`
    pub fn set_dropdown(&mut self, side: Side, field: CursorField, open: bool) {
        let id = DropdownId::new(side, field);
        if open {
            self.close_all_dropdowns();
            self.state.open_dropdown = Some(id);
        } else if self.state.open_dropdown == Some(id) {
            self.state.open_dropdown = None;
        }
    }

    pub fn close_all_dropdowns(&mut self) {
        self.state.open_dropdown = None;
    }

    /// Reset both cursors to the current month and clear selection and dropdowns
    pub fn init(&mut self) {
        self.state = CursorState::fresh(self.clock.today());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn store() -> DateCursorStore {
        DateCursorStore::new(Arc::new(FixedClock::ymd(2024, 5, 17).unwrap()))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = store().get_state();
        assert_eq!(state.start, DateCursor { year: 2024, month: 5 });
        assert_eq!(state.end, state.start);
        assert!(state.selection.is_empty());
        assert_eq!(state.open_dropdown, None);
    }

    #[test]
    fn test_set_cursor_records_before() {
        let mut store = store();
        store.set_cursor(Side::Start, CursorField::Year, 2020);
        let state = store.get_state();
        assert_eq!(state.before_start, DateCursor { year: 2024, month: 5 });
        assert_eq!(state.start, DateCursor { year: 2020, month: 5 });
        assert_eq!(state.direction(Side::Start), NavDirection::Backward);
        // the other side is untouched
        assert_eq!(state.end, DateCursor { year: 2024, month: 5 });
        assert_eq!(state.direction(Side::End), NavDirection::Unchanged);
    }

    #[test]
    fn test_month_rolls_over() {
        let mut store = store();
        store.set_cursor(Side::End, CursorField::Month, 13);
        assert_eq!(store.state().end, DateCursor { year: 2025, month: 1 });
        assert_eq!(store.state().direction(Side::End), NavDirection::Forward);

        store.set_cursor(Side::End, CursorField::Month, 0);
        assert_eq!(store.state().end, DateCursor { year: 2024, month: 12 });
        assert_eq!(store.state().direction(Side::End), NavDirection::Backward);
    }

    #[test]
    fn test_step_month() {
        let mut store = store();
        for _ in 0..8 {
            store.step_month(Side::Start, 1);
        }
        assert_eq!(store.state().start, DateCursor { year: 2025, month: 1 });
        assert_eq!(store.state().before_start, DateCursor { year: 2024, month: 12 });
    }

    #[test]
    fn test_only_one_dropdown_open() {
        let mut store = store();
        store.set_dropdown(Side::Start, CursorField::Year, true);
        store.set_dropdown(Side::End, CursorField::Month, true);
        let state = store.get_state();
        assert!(!state.is_dropdown_open(Side::Start, CursorField::Year));
        assert!(state.is_dropdown_open(Side::End, CursorField::Month));

        // closing a dropdown that is not open leaves the open one alone
        store.set_dropdown(Side::Start, CursorField::Year, false);
        assert!(store.state().is_dropdown_open(Side::End, CursorField::Month));

        store.set_dropdown(Side::End, CursorField::Month, false);
        assert_eq!(store.state().open_dropdown, None);
    }

    #[test]
    fn test_init_resets_everything() {
        let mut store = store();
        store.set_cursor(Side::Start, CursorField::Year, 1999);
        store.commit(Side::Start, Some(date(1999, 5, 1)));
        store.set_selected(Side::Start, Some(date(1999, 5, 1)));
        store.set_dropdown(Side::Start, CursorField::Month, true);
        store.init();
        assert_eq!(store.get_state(), DateCursorStore::new(Arc::new(FixedClock::ymd(2024, 5, 17).unwrap())).get_state());
    }

    #[test]
    fn test_instances_are_isolated() {
        let mut first = store();
        let second = store();
        first.commit(Side::Start, Some(date(2024, 5, 1)));
        first.set_dropdown(Side::Start, CursorField::Year, true);
        assert!(second.state().selection.is_empty());
        assert_eq!(second.state().open_dropdown, None);
    }
}
