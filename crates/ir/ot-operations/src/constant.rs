//! Compile-time constant values
//!
//! An operation's constant is `Option<ConstantValue>`: `None` means the value
//! is not known at compile time, `Some(ConstantValue::Null)` means it is known
//! to be the null/default value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Constant value computed by the binder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstantValue {
    /// Known null or default reference
    Null,
    /// Boolean
    Bool(bool),
    /// Character
    Char(char),
    /// Signed integer of any width
    Int(i64),
    /// Unsigned integer that does not fit a signed one
    UInt(u64),
    /// Floating point value
    Float(f64),
    /// String
    String(Arc<str>),
}

impl ConstantValue {
    /// Whether this is the known-null constant
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Boolean payload
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer payload, widening unsigned values that fit
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::UInt(value) => i64::try_from(*value).ok(),
            Self::Char(value) => Some(i64::from(u32::from(*value))),
            _ => None,
        }
    }

    /// Floating point payload
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// String payload
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Char(value) => write!(f, "{value:?}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::UInt(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<bool> for ConstantValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConstantValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ConstantValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for ConstantValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for ConstantValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<char> for ConstantValue {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<&str> for ConstantValue {
    fn from(value: &str) -> Self {
        Self::String(Arc::from(value))
    }
}
