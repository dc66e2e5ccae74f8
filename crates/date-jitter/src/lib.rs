//! # date-jitter
//!
//! Format-preserving date jitter for de-identifying structured medical
//! records.
//!
//! Dates and timestamps in DICOM-style fields are moved by a fixed number of
//! days. Relative offsets between values survive ("scan 2 was 14 days after
//! scan 1"), the calendar anchor does not. Each value is written back in the
//! encoding it arrived in, and values that cannot be read are logged and
//! left alone instead of failing the record.
//!
//! ## Modules
//!
//! - [`options`] — `days` / `years` option map → day offset
//! - [`field`] — field model: value representation, value shapes, rendering policy
//! - [`literal`] — unwrapping of `"[a, b]"` strings into collections
//! - [`shift`] — single-value calendar shift and its candidate patterns
//! - [`jitter`] — the jitter engine
//! - [`error`] — Error types

pub mod error;
pub mod field;
pub mod jitter;
pub mod literal;
pub mod options;
pub mod shift;

pub use error::{JitterError, LiteralError, ShiftError};
pub use field::{
    CollectionRendering, Field, FieldValue, RenderPolicy, ValueRepresentation,
    MULTI_VALUE_SEPARATOR,
};
pub use jitter::{candidate_patterns, jitter, Jitter};
pub use options::{parse_extras, resolve_offset, JitterOptions};
pub use shift::{CalendarShift, Pattern, Shift};
