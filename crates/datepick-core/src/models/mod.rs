/// Plain data types shared by the grid builder, the store and the controller
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two calendars an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Start,
    End,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// The part of a cursor a year/month selector edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorField {
    Year,
    Month,
}

/// Identifies one of the four year/month dropdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropdownId {
    pub side: Side,
    pub field: CursorField,
}

impl DropdownId {
    pub const ALL: [DropdownId; 4] = [
        DropdownId::new(Side::Start, CursorField::Year),
        DropdownId::new(Side::Start, CursorField::Month),
        DropdownId::new(Side::End, CursorField::Year),
        DropdownId::new(Side::End, CursorField::Month),
    ];

    pub const fn new(side: Side, field: CursorField) -> Self {
        Self { side, field }
    }
}

/// The (year, month) a calendar is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateCursor {
    pub year: i32,
    /// Always within 1..=12
    pub month: u32,
}

impl DateCursor {
    /// Builds a cursor, rolling out-of-range months into the neighbouring years
    pub fn normalized(year: i32, month: i64) -> Self {
        let zero_based = year as i64 * 12 + (month - 1);
        Self {
            year: zero_based.div_euclid(12) as i32,
            month: (zero_based.rem_euclid(12) + 1) as u32,
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn shifted(self, months: i64) -> Self {
        Self::normalized(self.year, self.month as i64 + months)
    }

    /// The date of `day` within this month, if it exists
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Whether the last cursor change moved forward or backward in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Forward,
    Backward,
    Unchanged,
}

impl NavDirection {
    pub fn between(before: DateCursor, after: DateCursor) -> Self {
        match after.cmp(&before) {
            std::cmp::Ordering::Greater => Self::Forward,
            std::cmp::Ordering::Less => Self::Backward,
            std::cmp::Ordering::Equal => Self::Unchanged,
        }
    }
}

/// The committed selection. `None` is the empty string at the host boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl SelectionState {
    pub fn get(&self, side: Side) -> Option<NaiveDate> {
        match side {
            Side::Start => self.start,
            Side::End => self.end,
        }
    }

    pub fn set(&mut self, side: Side, date: Option<NaiveDate>) {
        match side {
            Side::Start => self.start = date,
            Side::End => self.end = date,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Inclusive number of days between the two bounds, order-independent
    pub fn span_days(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((end - start).num_days().abs() + 1),
            _ => None,
        }
    }
}

/// Classification of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayKind {
    BeforeMonth,
    Current,
    AfterMonth,
    Today,
    Selected,
    DateRange,
    Disabled,
}

impl DayKind {
    /// Cells a click may commit
    pub fn is_selectable(self) -> bool {
        matches!(self, Self::Current | Self::Today | Self::DateRange)
    }

    /// Cells that belong to the rendered month rather than its neighbours
    pub fn in_month(self) -> bool {
        !matches!(self, Self::BeforeMonth | Self::AfterMonth)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub kind: DayKind,
}

/// The value handed to `on_change`/`on_update_set` listeners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PickerValue {
    Single(String),
    Range(String, String),
}

impl PickerValue {
    pub fn empty(range_mode: bool) -> Self {
        if range_mode {
            Self::Range(String::new(), String::new())
        } else {
            Self::Single(String::new())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(date) => date.is_empty(),
            Self::Range(start, end) => start.is_empty() && end.is_empty(),
        }
    }
}

impl fmt::Display for PickerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(date) => write!(f, "{date}"),
            Self::Range(start, end) => write!(f, "{start} ~ {end}"),
        }
    }
}

/// Host-supplied field validator. Returns the message to show on failure
pub type Validator = Box<dyn Fn(&PickerValue) -> Result<(), String> + Send + Sync>;

/// Runs host validators in order and reports the first failure. The engine never calls
/// this on its own; hosts run it after a committed change.
pub fn first_validation_failure(validators: &[Validator], value: &PickerValue) -> Option<String> {
    validators
        .iter()
        .find_map(|validate| validate(value).err())
}
