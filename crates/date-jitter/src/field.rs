//! The record field model the jitter engine reads from.
//!
//! A [`Field`] is a detached view of one record element: its name (used only
//! for diagnostics), its value representation, and its current value. Writing
//! the jittered value back into the record is the caller's job.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// The multi-value separator used by DICOM string encodings.
pub const MULTI_VALUE_SEPARATOR: char = '\\';

/// Encoding family of a field, as far as date jitter is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueRepresentation {
    /// `DA`: calendar date, `YYYYMMDD`.
    Date,
    /// `DT`: timestamp, `YYYYMMDDHHMMSS.FFFFFF&ZZXX`.
    DateTime,
    /// Anything else. Jittered with the generic format cascade.
    #[default]
    Unknown,
}

impl ValueRepresentation {
    /// Map a DICOM VR code to a representation. Unrecognized codes are
    /// [`ValueRepresentation::Unknown`].
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "DA" => Self::Date,
            "DT" => Self::DateTime,
            _ => Self::Unknown,
        }
    }

    /// The DICOM VR code, or `"UN"` for unknown.
    pub fn code(self) -> &'static str {
        match self {
            Self::Date => "DA",
            Self::DateTime => "DT",
            Self::Unknown => "UN",
        }
    }
}

impl FromStr for ValueRepresentation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

impl fmt::Display for ValueRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for ValueRepresentation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A field value as the record model hands it over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A single string. May be the bracketed rendering of a list.
    Text(String),
    /// An ordered multi-value container.
    Multi(Vec<String>),
}

impl FieldValue {
    /// `true` for an empty string or an empty container.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Multi(values) => values.is_empty(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Multi(values) => write!(f, "{values:?}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

/// One record element handed to the jitter engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub vr: ValueRepresentation,
    pub value: Option<FieldValue>,
}

impl Field {
    pub fn new(
        name: impl Into<String>,
        vr: ValueRepresentation,
        value: Option<FieldValue>,
    ) -> Self {
        Self {
            name: name.into(),
            vr,
            value,
        }
    }

    /// A field holding a single string value.
    pub fn text(name: impl Into<String>, vr: ValueRepresentation, value: &str) -> Self {
        Self::new(name, vr, Some(FieldValue::from(value)))
    }

    /// A field holding an ordered collection of values.
    pub fn multi<I, T>(name: impl Into<String>, vr: ValueRepresentation, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(name, vr, Some(FieldValue::Multi(values)))
    }
}

/// How a jittered collection is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CollectionRendering {
    /// One string, elements joined by the policy separator.
    #[default]
    Joined,
    /// A [`FieldValue::Multi`] with the elements kept apart.
    Multi,
}

/// Re-serialization rules for jittered collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderPolicy {
    pub separator: char,
    pub collections: CollectionRendering,
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self {
            separator: MULTI_VALUE_SEPARATOR,
            collections: CollectionRendering::Joined,
        }
    }
}

impl RenderPolicy {
    pub fn render(&self, values: Vec<String>) -> FieldValue {
        match self.collections {
            CollectionRendering::Joined => {
                let mut buf = [0u8; 4];
                let sep: &str = self.separator.encode_utf8(&mut buf);
                FieldValue::Text(values.join(sep))
            }
            CollectionRendering::Multi => FieldValue::Multi(values),
        }
    }
}
