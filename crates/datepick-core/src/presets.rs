/// Canned ranges offered beside the calendars, each computed relative to today
use chrono::{Datelike, Duration, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Today,
    Yesterday,
    /// The last 7 days including today
    Last7Days,
    /// The 7 days ending yesterday
    Previous7Days,
    MonthToDate,
    PreviousMonth,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Today,
        Preset::Yesterday,
        Preset::Last7Days,
        Preset::Previous7Days,
        Preset::MonthToDate,
        Preset::PreviousMonth,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|preset| *preset == self)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "오늘",
            Self::Yesterday => "어제",
            Self::Last7Days => "최근 7일",
            Self::Previous7Days => "지난 7일",
            Self::MonthToDate => "이번 달",
            Self::PreviousMonth => "지난 달",
        }
    }

    /// (start, end) for this preset, both inclusive
    pub fn range(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let yesterday = today - Duration::days(1);
        match self {
            Self::Today => (today, today),
            Self::Yesterday => (yesterday, yesterday),
            Self::Last7Days => (today - Duration::days(6), today),
            Self::Previous7Days => (today - Duration::days(7), yesterday),
            Self::MonthToDate => (today - Duration::days(today.day0() as i64), today),
            Self::PreviousMonth => {
                let last_of_previous = today - Duration::days(today.day() as i64);
                let first_of_previous =
                    last_of_previous - Duration::days(last_of_previous.day0() as i64);
                (first_of_previous, last_of_previous)
            }
        }
    }
}
