//! Error types for date-jitter operations.
//!
//! None of these escape [`crate::jitter`]: the engine logs them and degrades
//! to "leave unchanged" or "absent". They exist so the pieces underneath the
//! engine can report typed failures.

use thiserror::Error;

use crate::field::ValueRepresentation;
use crate::shift::Pattern;

/// Why a single jitter step did not produce a shifted value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JitterError {
    #[error("field {field} has no value")]
    EmptyValue { field: String },

    #[error("failed to parse string as list for field {field}: {reason}")]
    MalformedCollectionLiteral { field: String, reason: String },

    #[error("value '{value}' does not match format {}", .pattern.format())]
    FormatMismatch { value: String, pattern: Pattern },

    #[error("unexpected error jittering '{value}' in field {field}: {reason}")]
    UnexpectedShift {
        field: String,
        value: String,
        reason: String,
    },

    #[error("jitter not supported for field {field} with value '{value}' and VR={vr}")]
    Unjitterable {
        field: String,
        value: String,
        vr: ValueRepresentation,
    },
}

/// Failure of the single-value shift primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShiftError {
    /// The raw value is not written in the candidate pattern.
    #[error("value does not match {}", .0.format())]
    Mismatch(Pattern),

    /// The value parsed but the shifted instant cannot be represented.
    #[error("shifting by {days} days leaves the representable calendar range")]
    OutOfRange { days: i64 },

    /// Any other failure reported by a [`crate::shift::Shift`] implementation.
    #[error("{0}")]
    Other(String),
}

/// Failure to read a bracketed list literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("not a bracketed list")]
    NotBracketed,

    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),

    #[error("empty element at byte {0}")]
    EmptyElement(usize),

    #[error("unexpected character '{found}' at byte {at}")]
    UnexpectedChar { found: char, at: usize },

    #[error("malformed token '{0}'")]
    MalformedToken(String),
}

pub type Result<T> = std::result::Result<T, JitterError>;
