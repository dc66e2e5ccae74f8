//! Jitter action options.
//!
//! An action is configured with a flat string map. Two keys matter:
//! `days` (base offset, default 1) and `years` (added as `years * 365`, no
//! leap-year correction). Both can arrive as an `extras` string such as
//! `"days=10 years=1"`.

use std::collections::HashMap;

use serde::Serialize;

/// Day offset used when no `days` option is given.
pub const DEFAULT_DAYS: i64 = 1;

/// Days counted per year of `years`.
pub const DAYS_PER_YEAR: i64 = 365;

/// Typed form of the jitter options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JitterOptions {
    pub days: i64,
    pub years: Option<i64>,
}

impl Default for JitterOptions {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            years: None,
        }
    }
}

impl JitterOptions {
    /// Read `days` and `years` from an option map. Missing or unparsable
    /// `days` falls back to [`DEFAULT_DAYS`]; unparsable `years` is ignored.
    pub fn from_map(options: &HashMap<String, String>) -> Self {
        let days = match options.get("days") {
            Some(raw) => raw.trim().parse::<i64>().unwrap_or_else(|_| {
                tracing::warn!(days = %raw, "unparsable days option, using {DEFAULT_DAYS}");
                DEFAULT_DAYS
            }),
            None => DEFAULT_DAYS,
        };

        let years = options.get("years").and_then(|raw| match raw.trim().parse::<i64>() {
            Ok(years) => Some(years),
            Err(_) => {
                tracing::warn!(years = %raw, "unparsable years option, ignoring");
                None
            }
        });

        Self { days, years }
    }

    /// Read options from an `extras` string (see [`parse_extras`]).
    pub fn from_extras(extras: &str) -> Self {
        Self::from_map(&parse_extras(extras))
    }

    /// The total day offset: `days + years * 365`, saturating at the `i64`
    /// bounds.
    pub fn offset(&self) -> i64 {
        let from_years = self.years.map_or(0, |y| y.saturating_mul(DAYS_PER_YEAR));
        self.days.saturating_add(from_years)
    }
}

/// Resolve an option map to a signed day offset.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use date_jitter::options::resolve_offset;
///
/// let mut opts = HashMap::new();
/// opts.insert("days".to_string(), "-3".to_string());
/// opts.insert("years".to_string(), "1".to_string());
/// assert_eq!(resolve_offset(&opts), 362);
/// ```
pub fn resolve_offset(options: &HashMap<String, String>) -> i64 {
    JitterOptions::from_map(options).offset()
}

/// Split an `extras` string into `key=value` pairs.
///
/// Tokens are whitespace separated. Tokens without `=` or with an empty key
/// are skipped; a repeated key keeps its last value.
pub fn parse_extras(extras: &str) -> HashMap<String, String> {
    extras
        .split_whitespace()
        .filter_map(|token| {
            let (key, value) = token.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}
