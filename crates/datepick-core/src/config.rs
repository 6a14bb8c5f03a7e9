/// Default values for the picker settings. Each one can be overridden by an env var
/// of the same name (see `get_datepick_setting!`); the demo binary can also override
/// them from the command line. Only primitive types live here.
use crate::error::{PickerError, PickerResult};
use crate::get_datepick_setting;
use serde::{Deserialize, Serialize};

/// delimiter placed between year, month and day in emitted date strings
pub static DATEPICK_SEPARATOR: &'static str = "-";

/// first year offered by the year selector
pub static DATEPICK_MIN_YEAR: i32 = 1950;

/// last year offered by the year selector
pub static DATEPICK_MAX_YEAR: i32 = 2050;

/// maximum inclusive span in days between start and end. 0 disables the check
pub static DATEPICK_MAX_RANGE: u32 = 0;

/// pick a start and end date rather than a single date
pub static DATEPICK_RANGE_MODE: bool = true;

/// how long a transient error message stays visible
pub static DATEPICK_MESSAGE_TIMEOUT_MS: u64 = 3000;

/// Years a picker may be configured with. Dates stay four-digit `YYYY` strings and the
/// year selectors stay a few thousand entries long
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Settings for one picker instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub separator: String,
    pub min_year: i32,
    pub max_year: i32,
    pub max_range: u32,
    pub range_mode: bool,
    pub message_timeout_ms: u64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            separator: DATEPICK_SEPARATOR.to_string(),
            min_year: DATEPICK_MIN_YEAR,
            max_year: DATEPICK_MAX_YEAR,
            max_range: DATEPICK_MAX_RANGE,
            range_mode: DATEPICK_RANGE_MODE,
            message_timeout_ms: DATEPICK_MESSAGE_TIMEOUT_MS,
        }
    }
}

impl PickerConfig {
    /// Build a config from the compiled defaults overlaid with any env vars
    pub fn from_env() -> Self {
        Self {
            separator: get_datepick_setting!(DATEPICK_SEPARATOR),
            min_year: get_datepick_setting!(DATEPICK_MIN_YEAR, i32),
            max_year: get_datepick_setting!(DATEPICK_MAX_YEAR, i32),
            max_range: get_datepick_setting!(DATEPICK_MAX_RANGE, u32),
            range_mode: get_datepick_setting!(DATEPICK_RANGE_MODE, bool),
            message_timeout_ms: get_datepick_setting!(DATEPICK_MESSAGE_TIMEOUT_MS, u64),
        }
    }

    pub fn single() -> Self {
        Self {
            range_mode: false,
            ..Self::default()
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_max_range(mut self, max_range: u32) -> Self {
        self.max_range = max_range;
        self
    }

    pub fn with_year_bounds(mut self, min_year: i32, max_year: i32) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }

    pub fn validate(&self) -> PickerResult<()> {
        if self.separator.is_empty() {
            return Err(PickerError::InvalidConfig(
                "separator must not be empty".to_string(),
            ));
        }
        for year in [self.min_year, self.max_year] {
            if !SUPPORTED_YEARS.contains(&year) {
                return Err(PickerError::InvalidConfig(format!(
                    "year {} is outside {}..={}",
                    year,
                    SUPPORTED_YEARS.start(),
                    SUPPORTED_YEARS.end()
                )));
            }
        }
        if self.min_year > self.max_year {
            return Err(PickerError::InvalidConfig(format!(
                "min_year {} is after max_year {}",
                self.min_year, self.max_year
            )));
        }
        Ok(())
    }

    pub fn year_in_bounds(&self, year: i32) -> PickerResult<()> {
        if year < self.min_year || year > self.max_year {
            return Err(PickerError::YearOutOfBounds {
                year,
                min: self.min_year,
                max: self.max_year,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.separator, "-");
        assert_eq!(config.max_range, 0);
        assert!(config.range_mode);
        assert_eq!(config.message_timeout_ms, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: PickerConfig =
            serde_json::from_str(r#"{"separator": ".", "max_range": 31}"#).unwrap();
        assert_eq!(config.separator, ".");
        assert_eq!(config.max_range, 31);
        assert_eq!(config.min_year, DATEPICK_MIN_YEAR);
        assert!(config.range_mode);
    }

    #[test]
    fn test_validate_rejects_inverted_years() {
        let config = PickerConfig::default().with_year_bounds(2030, 2020);
        assert!(matches!(
            config.validate(),
            Err(PickerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unsupported_years() {
        for (min, max) in [(300000, 300001), (-2_000_000_000, 2_000_000_000), (0, 2000), (2000, 10000)] {
            let config = PickerConfig::default().with_year_bounds(min, max);
            assert!(
                matches!(config.validate(), Err(PickerError::InvalidConfig(_))),
                "{min}..={max} should be rejected"
            );
        }
        assert!(PickerConfig::default().with_year_bounds(1, 9999).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_separator() {
        let config = PickerConfig::default().with_separator("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_year_in_bounds() {
        let config = PickerConfig::default().with_year_bounds(2000, 2010);
        assert!(config.year_in_bounds(2005).is_ok());
        assert_eq!(
            config.year_in_bounds(1999),
            Err(PickerError::YearOutOfBounds {
                year: 1999,
                min: 2000,
                max: 2010
            })
        );
    }
}
