use crate::error::{PickerError, PickerResult};
use chrono::{Datelike, Duration, NaiveDate};

/// chrono format string for `YYYY{sep}MM{sep}DD`. A literal `%` in the separator is escaped
fn date_format(separator: &str) -> String {
    let sep = separator.replace('%', "%%");
    format!("%Y{sep}%m{sep}%d")
}

/// Render a date the way it is handed back to the host
pub fn format_date(date: NaiveDate, separator: &str) -> String {
    date.format(&date_format(separator)).to_string()
}

/// Same as `format_date` with `None` mapped to the empty string
pub fn format_bound(date: Option<NaiveDate>, separator: &str) -> String {
    date.map(|d| format_date(d, separator)).unwrap_or_default()
}

pub fn parse_date(input: &str, separator: &str) -> PickerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), &date_format(separator)).map_err(|_| {
        PickerError::InvalidDate {
            input: input.to_string(),
            separator: separator.to_string(),
        }
    })
}

/// The empty string is an unset bound, anything else must parse
pub fn parse_bound(input: &str, separator: &str) -> PickerResult<Option<NaiveDate>> {
    if input.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(input, separator).map(Some)
    }
}

pub fn first_of_month(year: i32, month: u32) -> PickerResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(PickerError::InvalidMonth(month))
}

/// Last day of the month before `first`
pub fn last_of_previous_month(first: NaiveDate) -> NaiveDate {
    first - Duration::days(1)
}

pub fn days_in_month(year: i32, month: u32) -> PickerResult<u32> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    Ok(last_of_previous_month(next).day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_pads_month_and_day() {
        assert_eq!(format_date(date(2024, 5, 1), "-"), "2024-05-01");
        assert_eq!(format_date(date(2024, 12, 31), "."), "2024.12.31");
        assert_eq!(format_date(date(2024, 1, 9), ""), "20240109");
    }

    #[test]
    fn test_format_escapes_percent_separator() {
        assert_eq!(format_date(date(2024, 5, 1), "%"), "2024%05%01");
        assert_eq!(parse_date("2024%05%01", "%").unwrap(), date(2024, 5, 1));
    }

    #[test]
    fn test_parse_with_custom_separator() {
        assert_eq!(parse_date("2024/02/29", "/").unwrap(), date(2024, 2, 29));
        assert!(parse_date("2023/02/29", "/").is_err());
        assert!(parse_date("2024-02-01", "/").is_err());
    }

    #[test]
    fn test_parse_bound_treats_blank_as_unset() {
        assert_eq!(parse_bound("", "-").unwrap(), None);
        assert_eq!(parse_bound("2024-05-10", "-").unwrap(), Some(date(2024, 5, 10)));
        assert!(matches!(
            parse_bound("yesterday", "-"),
            Err(PickerError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2100, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
        assert_eq!(days_in_month(2024, 4).unwrap(), 30);
        assert_eq!(days_in_month(2024, 12).unwrap(), 31);
        assert_eq!(days_in_month(2024, 13), Err(PickerError::InvalidMonth(13)));
    }
}
