//! Base types for the contents of an IES table.

use derive_more::derive::Display;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Declared type of an IES column.
///
/// [`ColumnType::Text`] and [`ColumnType::TextAlt`] share an identical on-disk
/// and decoded representation; the game appears to use the distinction for
/// scripting hints only.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ColumnType {
    /// A 4 byte float value, `0` on disk
    Number,
    /// A length prefixed obfuscated string, `1` on disk
    Text,
    /// Stored and decoded exactly like [`ColumnType::Text`], `2` on disk
    TextAlt,
}

impl ColumnType {
    /// Whether values of this column decode as text
    pub fn is_text(&self) -> bool {
        matches!(self, ColumnType::Text | ColumnType::TextAlt)
    }
}

/// One column descriptor from the column block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ColumnDef {
    /// Primary label
    pub name: String,
    /// Secondary label, usually a scripting alias of [`ColumnDef::name`]
    pub name2: String,
    /// Declared type of the column's values
    pub kind: ColumnType,
    /// Declared ordinal, only used to sort columns within their type group
    pub position: u16,
    /// Carried through from disk but not interpreted
    pub unknown: u32,
}

/// A single decoded cell value.
#[derive(Display, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// A number whose float representation carried no fractional part
    #[display("{_0}")]
    Number(i64),
    /// A number with a fractional part
    #[display("{_0}")]
    Float(f32),
    /// A text value; the empty string is how IES stores "no value"
    #[display("{_0}")]
    Text(String),
}

impl From<f32> for Value {
    /// Collapse a stored float to an integer when it is exactly integral.
    fn from(raw: f32) -> Self {
        // i64::MAX as f32 rounds up to 2^63, so the strict upper bound
        // excludes exactly the magnitudes an i64 cannot hold.
        if raw.is_finite()
            && raw == raw.trunc()
            && raw >= i64::MIN as f32
            && raw < i64::MAX as f32
        {
            Value::Number(raw as i64)
        } else {
            Value::Float(raw)
        }
    }
}
