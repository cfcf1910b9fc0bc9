//! # Temporal Text Parsing
//!
//! SQLite (and most text-protocol drivers) deliver DATE, TIME and TIMESTAMP
//! columns as ISO 8601 text. Temporal slots convert that text into the
//! fixed-width representations used by `OwnedValue`:
//!
//! | Type | Text format | Stored as |
//! |------|-------------|-----------|
//! | Date | `2024-01-15` | `i32` days since 1970-01-01 |
//! | Time | `13:45:30[.123456]` | `i64` microseconds since midnight |
//! | Timestamp | `2024-01-15T13:45:30[.123456]` or with a space | `i64` microseconds since epoch |
//!
//! The `format_*` functions are the inverse and are used by `Display`.
//!
//! ## Error Handling
//!
//! All parsers return `eyre::Result` with the offending input in the message:
//!
//! ```text
//! "invalid date format '2024/01/15': expected YYYY-MM-DD"
//! "invalid day 30 in date '2023-02-30': 2 has 28 days"
//! ```

use eyre::{bail, eyre, Result, WrapErr};

pub const MICROS_PER_SECOND: i64 = 1_000_000;
pub const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

pub fn parse_date(s: &str) -> Result<i32> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('-').collect();

    // A leading '-' would be a negative year; not supported in text form.
    if parts.len() != 3 || parts[0].is_empty() {
        bail!("invalid date format '{}': expected YYYY-MM-DD", s);
    }

    let year: i32 = parts[0]
        .parse()
        .wrap_err_with(|| format!("invalid year in date: '{}'", parts[0]))?;
    let month: u32 = parts[1]
        .parse()
        .wrap_err_with(|| format!("invalid month in date: '{}'", parts[1]))?;
    let day: u32 = parts[2]
        .parse()
        .wrap_err_with(|| format!("invalid day in date: '{}'", parts[2]))?;

    if !(1..=12).contains(&month) {
        bail!("invalid month {} in date '{}': must be 1-12", month, s);
    }

    let days_in_month = days_in_month(year, month);
    if day < 1 || day > days_in_month {
        bail!(
            "invalid day {} in date '{}': {} has {} days",
            day,
            s,
            month,
            days_in_month
        );
    }

    epoch_days(year, month, day)
}

pub fn parse_time(s: &str) -> Result<i64> {
    let s = s.trim();

    let (time_part, micros_part) = match s.find('.') {
        Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
        None => (s, None),
    };

    let parts: Vec<&str> = time_part.split(':').collect();
    if parts.len() != 3 {
        bail!("invalid time format '{}': expected HH:MM:SS", s);
    }

    let hour: u32 = parts[0]
        .parse()
        .wrap_err_with(|| format!("invalid hour in time: '{}'", parts[0]))?;
    let minute: u32 = parts[1]
        .parse()
        .wrap_err_with(|| format!("invalid minute in time: '{}'", parts[1]))?;
    let second: u32 = parts[2]
        .parse()
        .wrap_err_with(|| format!("invalid second in time: '{}'", parts[2]))?;

    if hour > 23 {
        bail!("invalid hour {} in time '{}': must be 0-23", hour, s);
    }
    if minute > 59 {
        bail!("invalid minute {} in time '{}': must be 0-59", minute, s);
    }
    if second > 59 {
        bail!("invalid second {} in time '{}': must be 0-59", second, s);
    }

    let base_micros =
        (hour as i64 * 3600 + minute as i64 * 60 + second as i64) * MICROS_PER_SECOND;

    let fractional_micros: i64 = match micros_part {
        Some(frac) => {
            if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
                bail!("invalid fractional seconds: '{}'", frac);
            }
            let padded = format!("{:0<6}", frac);
            padded[..6]
                .parse()
                .wrap_err_with(|| format!("invalid fractional seconds: '{}'", frac))?
        }
        None => 0,
    };

    Ok(base_micros + fractional_micros)
}

pub fn parse_timestamp(s: &str) -> Result<i64> {
    let s = s.trim();

    let (date_str, time_str) = if let Some(idx) = s.find('T') {
        (&s[..idx], &s[idx + 1..])
    } else if let Some(idx) = s.find(' ') {
        (&s[..idx], &s[idx + 1..])
    } else {
        bail!(
            "invalid timestamp format '{}': expected YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD HH:MM:SS",
            s
        );
    };

    let days = parse_date(date_str)?;
    let time_micros = parse_time(time_str)?;

    match days_to_micros(days).and_then(|m| m.checked_add(time_micros)) {
        Some(micros) => Ok(micros),
        None => bail!("timestamp out of range: '{}'", s),
    }
}

/// Microseconds since epoch at midnight of `days`, or `None` on overflow.
pub fn days_to_micros(days: i32) -> Option<i64> {
    (days as i64).checked_mul(MICROS_PER_DAY)
}

pub fn format_date(days_since_epoch: i32) -> String {
    let (year, month, day) = civil_from_days(days_since_epoch as i64);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

pub fn format_time(micros: i64) -> String {
    let total_seconds = micros / MICROS_PER_SECOND;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let micros_part = micros % MICROS_PER_SECOND;

    if micros_part == 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}:{:02}.{:06}", hours, minutes, seconds, micros_part)
    }
}

pub fn format_timestamp(micros: i64) -> String {
    let days = micros.div_euclid(MICROS_PER_DAY);
    let time_of_day = micros.rem_euclid(MICROS_PER_DAY);
    let (year, month, day) = civil_from_days(days);

    format!(
        "{:04}-{:02}-{:02} {}",
        year,
        month,
        day,
        format_time(time_of_day)
    )
}

/// Days since 1970-01-01 for a proleptic Gregorian calendar date.
pub fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    civil_ordinal(year as i64, month, day) - civil_ordinal(1970, 1, 1)
}

fn epoch_days(year: i32, month: u32, day: u32) -> Result<i32> {
    let days = days_from_civil(year, month, day);
    i32::try_from(days)
        .map_err(|_| eyre!("date out of range: year {} does not fit in DATE", year))
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

// Day count with years starting in March, so the leap day is the last day of the year.
fn civil_ordinal(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let m = if month <= 2 { month + 12 } else { month } as i64;
    365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400) + (153 * (m - 3) + 2) / 5
        + day as i64
        - 306
}

fn civil_from_days(days_since_epoch: i64) -> (i64, u32, u32) {
    let z = days_since_epoch + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_epoch() {
        assert_eq!(parse_date("1970-01-01").unwrap(), 0);
        assert_eq!(parse_date("1970-01-02").unwrap(), 1);
        assert_eq!(parse_date("1969-12-31").unwrap(), -1);
    }

    #[test]
    fn test_parse_date_leap_day() {
        assert_eq!(parse_date("2000-03-01").unwrap() - parse_date("2000-02-28").unwrap(), 2);
        assert!(parse_date("1900-02-29").is_err());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2024/01/15").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("2023-02-30").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_date_format_matches_parse() {
        for text in ["1953-09-02", "1986-06-26", "2000-02-29", "1899-12-31"] {
            assert_eq!(format_date(parse_date(text).unwrap()), text);
        }
    }

    #[test]
    fn test_days_from_civil_known_values() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(2000, 1, 1), 10_957);
        assert_eq!(days_from_civil(1953, 9, 2), -5965);
    }

    #[test]
    fn test_date_outside_i32_days_is_error() {
        assert!(parse_date("9999999-01-01").is_err());
        assert!(parse_date("2147483647-12-31").is_err());
        assert_eq!(days_from_civil(9_999_999, 1, 1), 3_651_705_107);
        assert_eq!(format_date(parse_date("5000000-01-01").unwrap()), "5000000-01-01");
    }

    #[test]
    fn test_timestamp_overflow_is_error() {
        let err = parse_timestamp("300000-01-01 00:00:00").unwrap_err();
        assert!(err.to_string().contains("out of range"), "{}", err);
        assert!(parse_timestamp("200000-01-01 00:00:00").is_ok());
        assert_eq!(days_to_micros(1), Some(MICROS_PER_DAY));
        assert_eq!(days_to_micros(i32::MAX), None);
    }

    #[test]
    fn test_parse_time_fractional() {
        assert_eq!(parse_time("00:00:01").unwrap(), MICROS_PER_SECOND);
        assert_eq!(parse_time("13:45:30.5").unwrap(), (13 * 3600 + 45 * 60 + 30) * MICROS_PER_SECOND + 500_000);
        assert!(parse_time("24:00:00").is_err());
        assert!(parse_time("12:00").is_err());
        assert!(parse_time("12:00:00.").is_err());
    }

    #[test]
    fn test_parse_timestamp_both_separators() {
        let t = parse_timestamp("2024-01-15T13:45:30").unwrap();
        let s = parse_timestamp("2024-01-15 13:45:30").unwrap();
        assert_eq!(t, s);
        assert_eq!(format_timestamp(t), "2024-01-15 13:45:30");
    }

    #[test]
    fn test_format_timestamp_before_epoch() {
        let ts = parse_timestamp("1969-12-31 23:59:59.25").unwrap();
        assert!(ts < 0);
        assert_eq!(format_timestamp(ts), "1969-12-31 23:59:59.250000");
    }
}
