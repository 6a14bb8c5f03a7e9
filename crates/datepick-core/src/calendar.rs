/// Builds the fixed 6x7 month grid each calendar renders
use crate::error::PickerResult;
use crate::models::{DateCursor, DayCell, DayKind, SelectionState, Side};
use crate::utils::{days_in_month, first_of_month, last_of_previous_month};
use chrono::{Datelike, NaiveDate};

pub const WEEK_DAYS: usize = 7;
pub const GRID_ROWS: usize = 6;
pub const GRID_CELLS: usize = WEEK_DAYS * GRID_ROWS;

/// Weekday headers, Sunday first
pub const WEEKDAY_LABELS: [&str; WEEK_DAYS] = ["일", "월", "화", "수", "목", "금", "토"];

/// Everything the grid needs to know about one side of the picker
#[derive(Debug, Clone, Copy)]
pub struct GridRequest {
    pub cursor: DateCursor,
    pub side: Side,
    /// Date highlighted on this side's calendar
    pub selected: Option<NaiveDate>,
    /// Committed bounds. Range shading and disabling only ever look at these
    pub bounds: SelectionState,
    pub range_mode: bool,
    pub today: NaiveDate,
}

/// A month grid. Always exactly `GRID_CELLS` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub cursor: DateCursor,
    pub cells: Vec<DayCell>,
    /// Index of day 1 within `cells`
    pub start_weekday: usize,
    pub last_day: u32,
}

impl CalendarGrid {
    pub fn rows(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(WEEK_DAYS)
    }

    pub fn count(&self, kind: DayKind) -> usize {
        self.cells.iter().filter(|cell| cell.kind == kind).count()
    }

    /// Number of cells belonging to the rendered month, whatever their classification
    pub fn month_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.kind.in_month()).count()
    }

    /// Grid index of a day of the rendered month
    pub fn index_of_day(&self, day: u32) -> Option<usize> {
        (1..=self.last_day)
            .contains(&day)
            .then(|| self.start_weekday + day as usize - 1)
    }

    pub fn cell(&self, index: usize) -> Option<DayCell> {
        self.cells.get(index).copied()
    }
}

/// Produce the 42-cell grid for `request.cursor`: the tail of the previous month, every
/// day of the current month and the head of the next one.
pub fn build_grid(request: &GridRequest) -> PickerResult<CalendarGrid> {
    let DateCursor { year, month } = request.cursor;
    let first = first_of_month(year, month)?;
    let start_weekday = first.weekday().num_days_from_sunday() as usize;
    let last_day = days_in_month(year, month)?;
    let previous_last = last_of_previous_month(first).day();

    let mut cells = Vec::with_capacity(GRID_CELLS);
    for slot in 0..GRID_CELLS {
        let cell = if slot < start_weekday {
            DayCell {
                day: previous_last - (start_weekday - slot - 1) as u32,
                kind: DayKind::BeforeMonth,
            }
        } else if slot < start_weekday + last_day as usize {
            let day = (slot - start_weekday + 1) as u32;
            let date = first + chrono::Duration::days(day as i64 - 1);
            DayCell {
                day,
                kind: classify(date, request),
            }
        } else {
            DayCell {
                day: (slot - start_weekday - last_day as usize + 1) as u32,
                kind: DayKind::AfterMonth,
            }
        };
        cells.push(cell);
    }

    Ok(CalendarGrid {
        cursor: request.cursor,
        cells,
        start_weekday,
        last_day,
    })
}

/// selected > today > current, then range shading and out-of-order disabling
fn classify(date: NaiveDate, request: &GridRequest) -> DayKind {
    let kind = if request.selected == Some(date) {
        DayKind::Selected
    } else if date == request.today {
        DayKind::Today
    } else {
        DayKind::Current
    };
    if !request.range_mode || kind == DayKind::Selected {
        return kind;
    }

    let bounds = request.bounds;
    let mut kind = kind;
    if let (Some(start), Some(end)) = (bounds.start, bounds.end) {
        let (low, high) = if start <= end { (start, end) } else { (end, start) };
        if low <= date && date <= high {
            kind = DayKind::DateRange;
        }
    }

    let out_of_order = match request.side {
        Side::End => bounds.start.is_some_and(|start| date < start),
        Side::Start => bounds.end.is_some_and(|end| date > end),
    };
    if out_of_order {
        kind = DayKind::Disabled;
    }
    kind
}
