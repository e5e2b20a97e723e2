//! Preference value types
//!
//! Defines the tagged value variant used uniformly by the cache. A key's
//! kind is fixed for its lifetime; there is no implicit coercion between
//! kinds.

use heapless::String;

/// Maximum text value length in bytes
pub const MAX_TEXT_LEN: usize = 63;

/// Value kind discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// 32-bit signed integer
    Int,
    /// 32-bit floating point
    Float,
    /// Boolean
    Bool,
    /// Text (max 63 bytes)
    Text,
}

/// Preference value (union of supported kinds)
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
    /// Boolean
    Bool(bool),
    /// Text value (max 63 bytes)
    Text(String<MAX_TEXT_LEN>),
}

impl Value {
    /// Get the kind discriminant for this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Build a text value from a string slice
    ///
    /// Input longer than [`MAX_TEXT_LEN`] bytes is rejected and yields an
    /// empty text value.
    pub fn text(s: &str) -> Self {
        let mut out = String::new();
        out.push_str(s).ok();
        Value::Text(out)
    }

    /// Extract as integer
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Value::Int`]. Requesting the wrong kind
    /// is a programmer error, not a recoverable condition.
    pub fn as_int(&self) -> i32 {
        match self {
            Value::Int(v) => *v,
            _ => panic!("value kind mismatch: expected Int"),
        }
    }

    /// Extract as float
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Value::Float`].
    pub fn as_float(&self) -> f32 {
        match self {
            Value::Float(v) => *v,
            _ => panic!("value kind mismatch: expected Float"),
        }
    }

    /// Extract as boolean
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Value::Bool`].
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(v) => *v,
            _ => panic!("value kind mismatch: expected Bool"),
        }
    }

    /// Extract as text
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Value::Text`].
    pub fn as_text(&self) -> &str {
        match self {
            Value::Text(v) => v.as_str(),
            _ => panic!("value kind mismatch: expected Text"),
        }
    }
}
