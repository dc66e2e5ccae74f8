//! Single-value calendar shift.
//!
//! The jitter engine only knows how to pick candidate patterns. Parsing a raw
//! string in one pattern, moving it by whole days, and rendering it back in
//! the same pattern is the job of a [`Shift`] implementation. A mismatch is an
//! explicit [`ShiftError::Mismatch`] so callers can move on to the next
//! candidate instead of guessing.
//!
//! [`CalendarShift`] is the default implementation, backed by chrono.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Timelike};
use serde::Serialize;

use crate::error::ShiftError;

// ── Patterns ────────────────────────────────────────────────────────────────

/// A textual encoding a date or timestamp may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Pattern {
    /// `YYYYMMDD`
    Date,
    /// `YYYYMMDDHHMMSS`
    WholeSecond,
    /// `YYYYMMDDHHMMSS.F` with 1 to 6 fractional digits.
    Fractional,
    /// `YYYYMMDDHHMMSS.F` followed by a UTC offset (`Z`, `+HHMM`, `+HH:MM`).
    FractionalWithOffset,
}

impl Pattern {
    /// strftime-style spelling, for diagnostics.
    pub fn format(self) -> &'static str {
        match self {
            Self::Date => "%Y%m%d",
            Self::WholeSecond => "%Y%m%d%H%M%S",
            Self::Fractional => "%Y%m%d%H%M%S.%f",
            Self::FractionalWithOffset => "%Y%m%d%H%M%S.%f%z",
        }
    }
}

/// Candidate order for `DA` fields.
pub const DATE_CASCADE: &[Pattern] = &[Pattern::Date];

/// Candidate order for `DT` fields. Most timestamps carry no offset, so the
/// plain fractional form is tried first.
pub const DATETIME_CASCADE: &[Pattern] = &[
    Pattern::Fractional,
    Pattern::FractionalWithOffset,
    Pattern::WholeSecond,
];

/// Candidate order when the value representation is not known.
pub const UNKNOWN_CASCADE: &[Pattern] = &[
    Pattern::Date,
    Pattern::WholeSecond,
    Pattern::Fractional,
    Pattern::FractionalWithOffset,
];

// ── Shift trait ─────────────────────────────────────────────────────────────

/// Shift one raw value by `days` whole days, keeping `pattern`.
pub trait Shift {
    /// Returns the shifted value rendered in `pattern`, or
    /// [`ShiftError::Mismatch`] when `raw` is not written in `pattern`.
    fn shift(&self, raw: &str, days: i64, pattern: Pattern) -> Result<String, ShiftError>;
}

impl<S: Shift + ?Sized> Shift for &S {
    fn shift(&self, raw: &str, days: i64, pattern: Pattern) -> Result<String, ShiftError> {
        (**self).shift(raw, days, pattern)
    }
}

/// Calendar arithmetic on chrono types.
///
/// The whole input must match the pattern. Fractional seconds are read with
/// 1 to 6 digits and always written with 6. Offsets are kept as written and
/// the shift applies to wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarShift;

impl Shift for CalendarShift {
    fn shift(&self, raw: &str, days: i64, pattern: Pattern) -> Result<String, ShiftError> {
        let delta = TimeDelta::try_days(days);
        let out_of_range = ShiftError::OutOfRange { days };

        match pattern {
            Pattern::Date => {
                if !is_digits(raw, 8) {
                    return Err(ShiftError::Mismatch(pattern));
                }
                let date = NaiveDate::parse_from_str(raw, pattern.format())
                    .map_err(|_| ShiftError::Mismatch(pattern))?;
                let shifted = delta
                    .and_then(|d| date.checked_add_signed(d))
                    .ok_or(out_of_range)?;
                Ok(shifted.format("%Y%m%d").to_string())
            }
            Pattern::WholeSecond => {
                let dt = parse_whole_second(raw).ok_or(ShiftError::Mismatch(pattern))?;
                let shifted = delta
                    .and_then(|d| dt.checked_add_signed(d))
                    .ok_or(out_of_range)?;
                Ok(shifted.format("%Y%m%d%H%M%S").to_string())
            }
            Pattern::Fractional => {
                let (dt, rest) = parse_fractional(raw).ok_or(ShiftError::Mismatch(pattern))?;
                if !rest.is_empty() {
                    return Err(ShiftError::Mismatch(pattern));
                }
                let shifted = delta
                    .and_then(|d| dt.checked_add_signed(d))
                    .ok_or(out_of_range)?;
                Ok(shifted.format("%Y%m%d%H%M%S%.6f").to_string())
            }
            Pattern::FractionalWithOffset => {
                let dt = parse_fractional_with_offset(raw).ok_or(ShiftError::Mismatch(pattern))?;
                let shifted = delta
                    .and_then(|d| dt.checked_add_signed(d))
                    .ok_or(out_of_range)?;
                Ok(shifted.format("%Y%m%d%H%M%S%.6f%z").to_string())
            }
        }
    }
}

// ── Parsing helpers ─────────────────────────────────────────────────────────

/// chrono tolerates padding and short fields in numeric items, so the digit
/// shape is checked before it sees the input.
fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse `YYYYMMDDHHMMSS`. Second 60 is rejected: a leap second cannot be
/// carried through day arithmetic.
fn parse_whole_second(s: &str) -> Option<NaiveDateTime> {
    if !is_digits(s, 14) {
        return None;
    }
    let dt = NaiveDateTime::parse_from_str(s, Pattern::WholeSecond.format()).ok()?;
    (dt.nanosecond() < 1_000_000_000).then_some(dt)
}

/// Parse `YYYYMMDDHHMMSS.F...` and return the remainder after the fraction.
fn parse_fractional(s: &str) -> Option<(NaiveDateTime, &str)> {
    let (head, tail) = s.split_once('.')?;
    let dt = parse_whole_second(head)?;

    let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > 6 {
        return None;
    }
    let (fraction, rest) = tail.split_at(digits);
    let micros: u32 = fraction.parse().ok()?;
    let micros = micros * 10u32.pow((6 - digits) as u32);

    Some((dt.with_nanosecond(micros * 1_000)?, rest))
}

fn parse_fractional_with_offset(s: &str) -> Option<DateTime<FixedOffset>> {
    let (naive, rest) = parse_fractional(s)?;
    let offset = parse_utc_offset(rest)?;
    offset.from_local_datetime(&naive).single()
}

/// Parse `Z`, `+HHMM`, `-HHMM`, `+HH:MM` or `-HH:MM`.
fn parse_utc_offset(s: &str) -> Option<FixedOffset> {
    if s.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }

    let sign = match s.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let body = &s[1..];
    if !body.is_ascii() {
        return None;
    }
    let (hh, mm) = match body.len() {
        4 => (&body[..2], &body[2..]),
        5 if body.as_bytes()[2] == b':' => (&body[..2], &body[3..]),
        _ => return None,
    };
    if !hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = hh.parse().ok()?;
    let minutes: i32 = mm.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(raw: &str, days: i64, pattern: Pattern) -> Result<String, ShiftError> {
        CalendarShift.shift(raw, days, pattern)
    }

    // ── Date ────────────────────────────────────────────────────────────

    #[test]
    fn test_date_forward() {
        assert_eq!(shift("20200101", 10, Pattern::Date).unwrap(), "20200111");
    }

    #[test]
    fn test_date_backward_across_year() {
        assert_eq!(shift("20200101", -10, Pattern::Date).unwrap(), "20191222");
    }

    #[test]
    fn test_date_across_leap_day() {
        assert_eq!(shift("20200228", 1, Pattern::Date).unwrap(), "20200229");
        assert_eq!(shift("20190228", 1, Pattern::Date).unwrap(), "20190301");
    }

    #[test]
    fn test_date_rejects_timestamp() {
        assert_eq!(
            shift("20200101120000", 1, Pattern::Date),
            Err(ShiftError::Mismatch(Pattern::Date))
        );
    }

    #[test]
    fn test_date_rejects_garbage() {
        assert_eq!(
            shift("not-a-date", 1, Pattern::Date),
            Err(ShiftError::Mismatch(Pattern::Date))
        );
    }

    #[test]
    fn test_date_rejects_whitespace() {
        for raw in ["2020 0101", " 20200101", "20200101 "] {
            assert_eq!(
                shift(raw, 1, Pattern::Date),
                Err(ShiftError::Mismatch(Pattern::Date)),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_date_rejects_short_fields() {
        assert_eq!(
            shift("2020111", 1, Pattern::Date),
            Err(ShiftError::Mismatch(Pattern::Date))
        );
        assert_eq!(
            shift("+2020101", 1, Pattern::Date),
            Err(ShiftError::Mismatch(Pattern::Date))
        );
    }

    // ── WholeSecond ─────────────────────────────────────────────────────

    #[test]
    fn test_whole_second_forward() {
        assert_eq!(
            shift("20200101120000", 1, Pattern::WholeSecond).unwrap(),
            "20200102120000"
        );
    }

    #[test]
    fn test_whole_second_rejects_fraction() {
        assert_eq!(
            shift("20200101120000.000000", 1, Pattern::WholeSecond),
            Err(ShiftError::Mismatch(Pattern::WholeSecond))
        );
    }

    #[test]
    fn test_whole_second_rejects_date_only() {
        assert!(shift("20200101", 1, Pattern::WholeSecond).is_err());
    }

    #[test]
    fn test_whole_second_rejects_whitespace_and_short_fields() {
        for raw in [" 20200101120000", "20200101 120000", "2020010112000"] {
            assert_eq!(
                shift(raw, 1, Pattern::WholeSecond),
                Err(ShiftError::Mismatch(Pattern::WholeSecond)),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_leap_second_rejected() {
        assert_eq!(
            shift("20201231235960", 1, Pattern::WholeSecond),
            Err(ShiftError::Mismatch(Pattern::WholeSecond))
        );
        assert_eq!(
            shift("20201231235960.0", 1, Pattern::Fractional),
            Err(ShiftError::Mismatch(Pattern::Fractional))
        );
        assert_eq!(
            shift("20201231235960.0+0100", 1, Pattern::FractionalWithOffset),
            Err(ShiftError::Mismatch(Pattern::FractionalWithOffset))
        );
    }

    // ── Fractional ──────────────────────────────────────────────────────

    #[test]
    fn test_fractional_preserves_precision() {
        assert_eq!(
            shift("20200101120000.000000", 1, Pattern::Fractional).unwrap(),
            "20200102120000.000000"
        );
        assert_eq!(
            shift("20200101235959.123456", 1, Pattern::Fractional).unwrap(),
            "20200102235959.123456"
        );
    }

    #[test]
    fn test_fractional_short_fraction_renders_six_digits() {
        assert_eq!(
            shift("20200101120000.5", 1, Pattern::Fractional).unwrap(),
            "20200102120000.500000"
        );
    }

    #[test]
    fn test_fractional_requires_fraction() {
        assert_eq!(
            shift("20200101120000", 1, Pattern::Fractional),
            Err(ShiftError::Mismatch(Pattern::Fractional))
        );
    }

    #[test]
    fn test_fractional_rejects_offset() {
        assert!(shift("20200101120000.000000+0100", 1, Pattern::Fractional).is_err());
    }

    #[test]
    fn test_fractional_head_must_be_fourteen_digits() {
        assert!(shift(" 20200101120000.5", 1, Pattern::Fractional).is_err());
        assert!(shift("2020010112000.5", 1, Pattern::Fractional).is_err());
    }

    #[test]
    fn test_fractional_rejects_seven_digits() {
        assert!(shift("20200101120000.1234567", 1, Pattern::Fractional).is_err());
    }

    // ── FractionalWithOffset ────────────────────────────────────────────

    #[test]
    fn test_offset_kept_as_written() {
        assert_eq!(
            shift("20200101120000.000000+0100", 1, Pattern::FractionalWithOffset).unwrap(),
            "20200102120000.000000+0100"
        );
        assert_eq!(
            shift("20200101120000.25-0530", -1, Pattern::FractionalWithOffset).unwrap(),
            "20191231120000.250000-0530"
        );
    }

    #[test]
    fn test_offset_colon_and_zulu_forms() {
        assert_eq!(
            shift("20200101120000.0+01:00", 1, Pattern::FractionalWithOffset).unwrap(),
            "20200102120000.000000+0100"
        );
        assert_eq!(
            shift("20200101120000.0Z", 1, Pattern::FractionalWithOffset).unwrap(),
            "20200102120000.000000+0000"
        );
    }

    #[test]
    fn test_offset_required() {
        assert!(shift("20200101120000.000000", 1, Pattern::FractionalWithOffset).is_err());
    }

    #[test]
    fn test_offset_out_of_bounds_rejected() {
        assert!(shift("20200101120000.0+2500", 1, Pattern::FractionalWithOffset).is_err());
        assert!(shift("20200101120000.0+0160", 1, Pattern::FractionalWithOffset).is_err());
    }

    // ── Range ───────────────────────────────────────────────────────────

    #[test]
    fn test_shift_past_calendar_range_is_out_of_range() {
        assert_eq!(
            shift("20200101", 1_000_000_000, Pattern::Date),
            Err(ShiftError::OutOfRange {
                days: 1_000_000_000
            })
        );
    }

    #[test]
    fn test_huge_offset_does_not_panic() {
        assert!(matches!(
            shift("20200101", i64::MAX, Pattern::Date),
            Err(ShiftError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_pattern_formats() {
        assert_eq!(Pattern::Date.format(), "%Y%m%d");
        assert_eq!(Pattern::FractionalWithOffset.format(), "%Y%m%d%H%M%S.%f%z");
    }
}
