//! Format-preserving date jitter for one record field.
//!
//! [`Jitter::apply`] reads a field's value, shifts every date or timestamp in
//! it by a fixed number of days, and hands back the new value in the encoding
//! the field already uses. It never fails: values it cannot read are logged
//! and either kept as they were (collection elements) or reported as `None`
//! (scalar values).
//!
//! # Pipeline
//!
//! 1. Absent or empty values are returned unchanged.
//! 2. A string that looks like `[a, b]` is unwrapped into a collection. If the
//!    literal does not parse, the string is treated as a single value.
//! 3. Each value is run through the candidate patterns for the field's VR,
//!    first match wins:
//!    - `DA`: `%Y%m%d`
//!    - `DT`: `%Y%m%d%H%M%S.%f`, `%Y%m%d%H%M%S.%f%z`, `%Y%m%d%H%M%S`
//!    - other: `%Y%m%d`, `%Y%m%d%H%M%S`, `%Y%m%d%H%M%S.%f`, `%Y%m%d%H%M%S.%f%z`
//! 4. Collections are rendered with the [`RenderPolicy`] (by default a
//!    single `\`-joined string).

use crate::error::{JitterError, Result, ShiftError};
use crate::field::{Field, FieldValue, RenderPolicy, ValueRepresentation};
use crate::literal;
use crate::shift::{
    CalendarShift, Pattern, Shift, DATETIME_CASCADE, DATE_CASCADE, UNKNOWN_CASCADE,
};

/// Shape of a field value once list literals have been unwrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Scalar(String),
    Sequence(Vec<String>),
}

/// Candidate patterns tried for a value representation, in order.
pub fn candidate_patterns(vr: ValueRepresentation) -> &'static [Pattern] {
    match vr {
        ValueRepresentation::Date => DATE_CASCADE,
        ValueRepresentation::DateTime => DATETIME_CASCADE,
        ValueRepresentation::Unknown => UNKNOWN_CASCADE,
    }
}

/// Jitter `field` by `offset` days with the default calendar arithmetic and
/// rendering policy.
///
/// Returns the original value when it is absent or empty, the jittered value
/// otherwise, and `None` when a single value could not be jittered.
///
/// # Examples
///
/// ```
/// use date_jitter::{jitter, Field, FieldValue, ValueRepresentation};
///
/// let field = Field::text("StudyDate", ValueRepresentation::Date, "20200101");
/// assert_eq!(jitter(&field, 10), Some(FieldValue::from("20200111")));
///
/// let field = Field::multi("AcquisitionDate", ValueRepresentation::Date, ["20200101", "20200103"]);
/// assert_eq!(jitter(&field, 5), Some(FieldValue::from("20200106\\20200108")));
/// ```
pub fn jitter(field: &Field, offset: i64) -> Option<FieldValue> {
    Jitter::<CalendarShift>::default().apply(field, offset)
}

/// A configured jitter engine.
///
/// Holds the shift primitive and the rendering policy; has no per-call state,
/// so one engine can serve any number of fields, from any number of threads
/// when `S` allows it.
#[derive(Debug, Clone, Default)]
pub struct Jitter<S = CalendarShift> {
    shift: S,
    policy: RenderPolicy,
}

impl<S: Shift> Jitter<S> {
    pub fn new(shift: S) -> Self {
        Self {
            shift,
            policy: RenderPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RenderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RenderPolicy {
        &self.policy
    }

    /// Jitter one field. See [`jitter`] for the outcome contract.
    pub fn apply(&self, field: &Field, offset: i64) -> Option<FieldValue> {
        let Some(original) = field.value.as_ref().filter(|v| !v.is_empty()) else {
            let skipped = JitterError::EmptyValue {
                field: field.name.clone(),
            };
            tracing::debug!(field = %field.name, "{skipped}, skipping jitter");
            return field.value.clone();
        };

        let result = match normalize(field, original) {
            Value::Sequence(values) => Some(self.jitter_sequence(field, values, offset)),
            Value::Scalar(raw) => self.jitter_scalar(field, raw, offset),
        };

        tracing::debug!(field = %field.name, result = ?result, "jitter returning value");
        result
    }

    fn jitter_scalar(&self, field: &Field, raw: String, offset: i64) -> Option<FieldValue> {
        match self.shift_one(field, &raw, offset) {
            Ok(shifted) => Some(FieldValue::Text(shifted)),
            Err(_) => {
                let err = unjitterable(field, &raw);
                tracing::warn!(field = %field.name, value = %raw, vr = %field.vr, "{err}");
                None
            }
        }
    }

    fn jitter_sequence(&self, field: &Field, values: Vec<String>, offset: i64) -> FieldValue {
        tracing::info!(
            field = %field.name,
            count = values.len(),
            "processing {} dates for multi-value field {}",
            values.len(),
            field.name
        );

        let jittered: Vec<String> = values
            .into_iter()
            .map(|raw| match self.shift_one(field, &raw, offset) {
                Ok(shifted) => shifted,
                Err(_) => {
                    let err = unjitterable(field, &raw);
                    tracing::warn!(
                        field = %field.name,
                        value = %raw,
                        vr = %field.vr,
                        "{err}, keeping original"
                    );
                    raw
                }
            })
            .collect();

        tracing::debug!(
            field = %field.name,
            "completed jittering {} dates",
            jittered.len()
        );
        self.policy.render(jittered)
    }

    /// Run the candidate cascade for one raw value. An empty result counts
    /// as a failure.
    fn shift_one(&self, field: &Field, raw: &str, offset: i64) -> Result<String> {
        for &pattern in candidate_patterns(field.vr) {
            match self.shift.shift(raw, offset, pattern) {
                Ok(shifted) if shifted.is_empty() => break,
                Ok(shifted) => return Ok(shifted),
                Err(ShiftError::Mismatch(_)) => {
                    let miss = JitterError::FormatMismatch {
                        value: raw.to_string(),
                        pattern,
                    };
                    tracing::warn!(value = %raw, format = pattern.format(), "{miss}");
                }
                Err(other) => {
                    let err = JitterError::UnexpectedShift {
                        field: field.name.clone(),
                        value: raw.to_string(),
                        reason: other.to_string(),
                    };
                    tracing::error!(field = %field.name, value = %raw, "{err}");
                    return Err(err);
                }
            }
        }
        Err(unjitterable(field, raw))
    }
}

fn unjitterable(field: &Field, raw: &str) -> JitterError {
    JitterError::Unjitterable {
        field: field.name.clone(),
        value: raw.to_string(),
        vr: field.vr,
    }
}

/// Classify a non-empty field value, unwrapping list literals.
fn normalize(field: &Field, value: &FieldValue) -> Value {
    match value {
        FieldValue::Multi(values) => Value::Sequence(values.clone()),
        FieldValue::Text(s) if literal::looks_like_list(s) => match literal::parse_list(s) {
            Ok(values) => Value::Sequence(values),
            Err(e) => {
                let err = JitterError::MalformedCollectionLiteral {
                    field: field.name.clone(),
                    reason: e.to_string(),
                };
                tracing::warn!(field = %field.name, value = %s, "{err}, treating as single value");
                Value::Scalar(s.clone())
            }
        },
        FieldValue::Text(s) => Value::Scalar(s.clone()),
    }
}
