use thiserror::Error;

/// Every recoverable failure the picker engine can report. None of these leave the
/// store in an inconsistent state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    /// The span between start and end is longer than the configured `max_range`
    #[error("최대 선택기간 {max_range}일을 초과 하였습니다.")]
    RangeExceeded { max_range: u32 },

    /// Accept was pressed in range mode with fewer than two bounds
    #[error("날짜를 선택해주세요.")]
    IncompleteRangeSelection,

    #[error("'{input}' is not a date in YYYY{separator}MM{separator}DD form")]
    InvalidDate { input: String, separator: String },

    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u32),

    #[error("year {year} is outside the selectable range {min}..={max}")]
    YearOutOfBounds { year: i32, min: i32, max: i32 },

    #[error("invalid picker configuration: {0}")]
    InvalidConfig(String),
}

impl PickerError {
    /// Errors that should be shown to the user as a transient message
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RangeExceeded { .. } | Self::IncompleteRangeSelection
        )
    }
}

pub type PickerResult<T> = Result<T, PickerError>;
