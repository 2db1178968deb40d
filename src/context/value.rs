//! Typed values
//!
//! A value is stored as a one-character type tag followed by its canonical
//! text: `S` text, `N` number, `B` boolean (`TRUE`/`FALSE`), `D` date-time
//! (`YYYY-MM-DD HH24:MI:SS`). Reading the original type back means parsing the
//! tag, which [`TypedValue::decode`] does.

use crate::error::TrackError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text form of date-time values
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueTag {
    Text,
    Number,
    Boolean,
    DateTime,
}

impl ValueTag {
    pub fn as_char(self) -> char {
        match self {
            ValueTag::Text => 'S',
            ValueTag::Number => 'N',
            ValueTag::Boolean => 'B',
            ValueTag::DateTime => 'D',
        }
    }

    pub fn from_char(tag: char) -> Option<Self> {
        match tag {
            'S' => Some(ValueTag::Text),
            'N' => Some(ValueTag::Number),
            'B' => Some(ValueTag::Boolean),
            'D' => Some(ValueTag::DateTime),
            _ => None,
        }
    }
}

/// A value attached to a frame under a name
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
}

impl TypedValue {
    pub fn tag(&self) -> ValueTag {
        match self {
            TypedValue::Text(_) => ValueTag::Text,
            TypedValue::Number(_) => ValueTag::Number,
            TypedValue::Boolean(_) => ValueTag::Boolean,
            TypedValue::DateTime(_) => ValueTag::DateTime,
        }
    }

    /// Tag followed by the canonical text form.
    pub fn encode(&self) -> String {
        let mut encoded = String::new();
        encoded.push(self.tag().as_char());
        match self {
            TypedValue::Text(text) => encoded.push_str(text),
            TypedValue::Number(number) => encoded.push_str(&number.to_string()),
            TypedValue::Boolean(true) => encoded.push_str("TRUE"),
            TypedValue::Boolean(false) => encoded.push_str("FALSE"),
            TypedValue::DateTime(at) => encoded.push_str(&at.format(DATE_FORMAT).to_string()),
        }
        encoded
    }

    pub fn decode(encoded: &str) -> Result<Self, TrackError> {
        let mut chars = encoded.chars();
        let tag = chars
            .next()
            .ok_or_else(|| TrackError::Decode("empty value".to_string()))?;
        let tag = ValueTag::from_char(tag)
            .ok_or_else(|| TrackError::Decode(format!("unknown type tag '{}'", tag)))?;
        let payload = chars.as_str();

        match tag {
            ValueTag::Text => Ok(TypedValue::Text(payload.to_string())),
            ValueTag::Number => payload
                .parse::<f64>()
                .map(TypedValue::Number)
                .map_err(|e| TrackError::Decode(format!("invalid number '{}': {}", payload, e))),
            ValueTag::Boolean => match payload {
                "TRUE" => Ok(TypedValue::Boolean(true)),
                "FALSE" => Ok(TypedValue::Boolean(false)),
                other => Err(TrackError::Decode(format!("invalid boolean '{}'", other))),
            },
            ValueTag::DateTime => NaiveDateTime::parse_from_str(payload, DATE_FORMAT)
                .map(TypedValue::DateTime)
                .map_err(|e| TrackError::Decode(format!("invalid date '{}': {}", payload, e))),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::Text(value.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::Text(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Number(value)
    }
}

impl From<i32> for TypedValue {
    fn from(value: i32) -> Self {
        TypedValue::Number(f64::from(value))
    }
}

impl From<u32> for TypedValue {
    fn from(value: u32) -> Self {
        TypedValue::Number(f64::from(value))
    }
}

/// Magnitudes above 2^53 round to the nearest representable `f64`.
impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        TypedValue::Number(value as f64)
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::Boolean(value)
    }
}

impl From<NaiveDateTime> for TypedValue {
    fn from(value: NaiveDateTime) -> Self {
        TypedValue::DateTime(value)
    }
}
