//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct for feed timestamps.
//!
//! # Features
//!
//! - Zero external dependencies for date parsing
//! - RFC 822 formatting for `<pubDate>` / `<lastBuildDate>`
//! - Chronological ordering (derived field order is year → second)
//! - Conversion from Unix seconds for the system clock
//!
//! # Examples
//!
//! ```
//! use sitefeed::DateTimeUtc;
//!
//! let dt = DateTimeUtc::parse("2024-06-15T14:30:45Z").unwrap();
//! assert_eq!(dt.to_rfc822(), "Sat, 15 Jun 2024 14:30:45 +0000");
//!
//! // Dotted day-first dates, as written in page front matter
//! let dt = DateTimeUtc::parse("15.06.2024").unwrap();
//! assert_eq!(dt.to_rfc3339(), "2024-06-15T00:00:00Z");
//! ```

use serde::{Deserialize, Deserializer, de};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Reason a datetime failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("month is invalid: {0}")]
    Month(u8),
    #[error("day is invalid: {0}")]
    Day(u8),
    #[error("hour is invalid: {0}")]
    Hour(u8),
    #[error("minute is invalid: {0}")]
    Minute(u8),
    #[error("second is invalid: {0}")]
    Second(u8),
    #[error("unrecognized date format: `{0}`")]
    Format(String),
}

/// UTC datetime without timezone complexity.
///
/// Field order matters: the derived `Ord` compares year first and second
/// last, which is chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse from "YYYY-MM-DD", "YYYY-MM-DDTHH:MM:SSZ" or "DD.MM.YYYY".
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.trim().as_bytes();

        // Minimum: "YYYY-MM-DD" / "DD.MM.YYYY" (10 chars)
        if bytes.len() < 10 {
            return None;
        }

        if bytes[2] == b'.' {
            return Self::parse_dotted(bytes);
        }

        // Parse date part
        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        if bytes[7] != b'-' {
            return None;
        }
        let day = parse_u8(&bytes[8..10])?;

        // Check for time part (RFC3339, UTC only)
        let (hour, minute, second) = if bytes.len() == 20 && bytes[10] == b'T' && bytes[19] == b'Z'
        {
            if bytes[13] != b':' || bytes[16] != b':' {
                return None;
            }
            (
                parse_u8(&bytes[11..13])?,
                parse_u8(&bytes[14..16])?,
                parse_u8(&bytes[17..19])?,
            )
        } else if bytes.len() == 10 {
            (0, 0, 0)
        } else {
            return None;
        };

        let dt = Self::new(year, month, day, hour, minute, second);
        dt.validate().ok()?;
        Some(dt)
    }

    /// "DD.MM.YYYY"
    fn parse_dotted(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != 10 || bytes[5] != b'.' {
            return None;
        }
        let day = parse_u8(&bytes[0..2])?;
        let month = parse_u8(&bytes[3..5])?;
        let year = parse_u16(&bytes[6..10])?;

        let dt = Self::from_ymd(year, month, day);
        dt.validate().ok()?;
        Some(dt)
    }

    /// Convert seconds since the Unix epoch to a UTC calendar datetime.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_unix_secs(secs: u64) -> Self {
        let days = (secs / 86_400) as i64;
        let rem = secs % 86_400;

        // Civil-from-days (Howard Hinnant), era-based so it stays exact.
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
        let year = (yoe + era * 400 + i64::from(month <= 2)) as u16;

        Self::new(
            year,
            month,
            day,
            (rem / 3600) as u8,
            ((rem / 60) % 60) as u8,
            (rem % 60) as u8,
        )
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<(), DateError> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            return Err(DateError::Month(month));
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            return Err(DateError::Day(day));
        }
        if hour > 23 {
            return Err(DateError::Hour(hour));
        }
        if minute > 59 {
            return Err(DateError::Minute(minute));
        }
        if second > 59 {
            return Err(DateError::Second(second));
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as RFC 3339 (ISO 8601).
    ///
    /// Returns: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// Format as RFC 822 with a numeric UTC offset, as RSS 2.0 expects.
    ///
    /// Returns: `Sat, 15 Jun 2024 14:30:45 +0000`
    ///
    /// Expects a date that passes [`validate`](Self::validate); an
    /// out-of-range month is clamped rather than panicking.
    pub fn to_rfc822(self) -> String {
        const WEEKDAYS: [&str; 7] = ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"];
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];

        format!(
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} +0000",
            WEEKDAYS[self.weekday_index()],
            self.day,
            MONTHS[usize::from(self.month.clamp(1, 12)) - 1],
            self.year,
            self.hour,
            self.minute,
            self.second
        )
    }

    /// Zeller's congruence; 0 is Saturday.
    #[inline]
    #[allow(clippy::trivially_copy_pass_by_ref)]
    #[allow(clippy::cast_sign_loss)] // Result of % 7 is always 0-6
    fn weekday_index(&self) -> usize {
        let (y, m) = if self.month < 3 {
            (i32::from(self.year) - 1, i32::from(self.month) + 12)
        } else {
            (i32::from(self.year), i32::from(self.month))
        };
        let d = i32::from(self.day);
        ((d + (13 * (m + 1)) / 5 + y + y / 4 - y / 100 + y / 400) % 7) as usize
    }
}

impl fmt::Display for DateTimeUtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl FromStr for DateTimeUtc {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DateError::Format(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for DateTimeUtc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = DateTimeUtc::parse("2024-06-15").unwrap();
        assert_eq!(dt, DateTimeUtc::from_ymd(2024, 6, 15));
    }

    #[test]
    fn test_parse_with_time() {
        let dt = DateTimeUtc::parse("2024-06-15T14:30:45Z").unwrap();
        assert_eq!(dt, DateTimeUtc::new(2024, 6, 15, 14, 30, 45));
    }

    #[test]
    fn test_parse_dotted() {
        let dt = DateTimeUtc::parse("03.02.2023").unwrap();
        assert_eq!(dt, DateTimeUtc::from_ymd(2023, 2, 3));
        assert!(DateTimeUtc::parse("30.02.2023").is_none());
        assert!(DateTimeUtc::parse("3.2.2023").is_none());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(DateTimeUtc::parse("").is_none());
        assert!(DateTimeUtc::parse("invalid-date").is_none());
        assert!(DateTimeUtc::parse("2024-13-01").is_none());
        assert!(DateTimeUtc::parse("2024-06-15T14:30:45+02:00").is_none());
        assert!(DateTimeUtc::parse("2024-06-15 14:30").is_none());
    }

    #[test]
    fn test_from_str_error() {
        let err = "yesterday".parse::<DateTimeUtc>().unwrap_err();
        assert_eq!(err, DateError::Format("yesterday".to_string()));
    }

    #[test]
    fn test_deserialize() {
        let dt: DateTimeUtc = serde_json::from_str("\"2024-01-15T10:30:45Z\"").unwrap();
        assert_eq!(dt, DateTimeUtc::new(2024, 1, 15, 10, 30, 45));
        assert!(serde_json::from_str::<DateTimeUtc>("\"not a date\"").is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = DateTimeUtc::new(2023, 12, 31, 23, 59, 59);
        let b = DateTimeUtc::new(2024, 1, 1, 0, 0, 0);
        let c = DateTimeUtc::new(2024, 1, 1, 0, 0, 1);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(b.max(a), b);
    }

    #[test]
    fn test_validate_leap_year() {
        assert!(DateTimeUtc::new(2024, 2, 29, 12, 0, 0).validate().is_ok());
        assert!(DateTimeUtc::new(2000, 2, 29, 12, 0, 0).validate().is_ok());
        assert_eq!(
            DateTimeUtc::new(2023, 2, 29, 12, 0, 0).validate(),
            Err(DateError::Day(29))
        );
        assert!(DateTimeUtc::new(1900, 2, 29, 12, 0, 0).validate().is_err());
    }

    #[test]
    fn test_validate_time_bounds() {
        assert_eq!(
            DateTimeUtc::new(2024, 6, 15, 24, 0, 0).validate(),
            Err(DateError::Hour(24))
        );
        assert_eq!(
            DateTimeUtc::new(2024, 6, 15, 12, 60, 0).validate(),
            Err(DateError::Minute(60))
        );
        assert_eq!(
            DateTimeUtc::new(2024, 6, 15, 12, 30, 60).validate(),
            Err(DateError::Second(60))
        );
    }

    #[test]
    fn test_to_rfc822() {
        assert_eq!(
            DateTimeUtc::new(2024, 1, 15, 10, 30, 45).to_rfc822(),
            "Mon, 15 Jan 2024 10:30:45 +0000"
        );
        assert_eq!(
            DateTimeUtc::from_ymd(2000, 1, 1).to_rfc822(),
            "Sat, 01 Jan 2000 00:00:00 +0000"
        );
        assert_eq!(
            DateTimeUtc::from_ymd(2024, 2, 29).to_rfc822(),
            "Thu, 29 Feb 2024 00:00:00 +0000"
        );
    }

    #[test]
    fn test_to_rfc822_out_of_range_month() {
        let shown = DateTimeUtc::new(2024, 13, 1, 0, 0, 0).to_rfc822();
        assert!(shown.contains(" Dec 2024 "));
        let shown = DateTimeUtc::new(2024, 0, 1, 0, 0, 0).to_rfc822();
        assert!(shown.contains(" Jan 2024 "));
    }

    #[test]
    fn test_from_unix_secs() {
        assert_eq!(
            DateTimeUtc::from_unix_secs(0),
            DateTimeUtc::from_ymd(1970, 1, 1)
        );
        // 2024-02-29T12:34:56Z
        assert_eq!(
            DateTimeUtc::from_unix_secs(1_709_210_096),
            DateTimeUtc::new(2024, 2, 29, 12, 34, 56)
        );
        // 2000-03-01T00:00:00Z
        assert_eq!(
            DateTimeUtc::from_unix_secs(951_868_800),
            DateTimeUtc::from_ymd(2000, 3, 1)
        );
    }
}
