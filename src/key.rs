//! Preference key declarations
//!
//! A [`PrefKey`] captures a preference's kind, namespace, key name, and
//! default value. Namespace and key name lengths are validated in `const`
//! constructors, so a key declared in a `const` or `static` turns a length
//! violation into a compile-time error.

use crate::value::{Value, ValueKind, MAX_TEXT_LEN};
use heapless::String;

/// Maximum namespace length in bytes (NVS limit)
pub const MAX_NAMESPACE_LEN: usize = 15;

/// Maximum key name length in bytes (NVS limit)
pub const MAX_KEY_NAME_LEN: usize = 15;

/// Const-constructible default value representation
///
/// Text defaults are held as `&'static str` so keys can be declared in
/// `const` context; [`PrefKey::default_value`] materializes the bounded
/// string.
#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyDefault {
    Int(i32),
    Float(f32),
    Bool(bool),
    Text(&'static str),
}

/// Preference key definition
///
/// Identifies one stored value by (namespace, name) and carries its kind
/// and default. Keys are normally declared as `const`:
///
/// ```
/// use nvcache::PrefKey;
///
/// const BOOT_COUNT: PrefKey = PrefKey::int("system", "boot_count", 0);
/// const NET_SSID: PrefKey = PrefKey::text("network", "ssid", "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrefKey {
    /// Namespace name (max 15 bytes)
    pub namespace: &'static str,
    /// Key name within the namespace (max 15 bytes)
    pub name: &'static str,
    /// Default value
    default: KeyDefault,
}

impl PrefKey {
    const fn validate(namespace: &'static str, name: &'static str) {
        assert!(
            namespace.len() <= MAX_NAMESPACE_LEN,
            "namespace must be 15 bytes or less"
        );
        assert!(
            name.len() <= MAX_KEY_NAME_LEN,
            "key name must be 15 bytes or less"
        );
    }

    /// Declare an integer key with the given default
    pub const fn int(namespace: &'static str, name: &'static str, default: i32) -> Self {
        Self::validate(namespace, name);
        Self {
            namespace,
            name,
            default: KeyDefault::Int(default),
        }
    }

    /// Declare a float key with the given default
    pub const fn float(namespace: &'static str, name: &'static str, default: f32) -> Self {
        Self::validate(namespace, name);
        Self {
            namespace,
            name,
            default: KeyDefault::Float(default),
        }
    }

    /// Declare a boolean key with the given default
    pub const fn boolean(namespace: &'static str, name: &'static str, default: bool) -> Self {
        Self::validate(namespace, name);
        Self {
            namespace,
            name,
            default: KeyDefault::Bool(default),
        }
    }

    /// Declare a text key with the given default
    pub const fn text(namespace: &'static str, name: &'static str, default: &'static str) -> Self {
        Self::validate(namespace, name);
        assert!(
            default.len() <= MAX_TEXT_LEN,
            "text default must be 63 bytes or less"
        );
        Self {
            namespace,
            name,
            default: KeyDefault::Text(default),
        }
    }

    /// Get this key's value kind
    pub fn kind(&self) -> ValueKind {
        match self.default {
            KeyDefault::Int(_) => ValueKind::Int,
            KeyDefault::Float(_) => ValueKind::Float,
            KeyDefault::Bool(_) => ValueKind::Bool,
            KeyDefault::Text(_) => ValueKind::Text,
        }
    }

    /// Materialize this key's default value
    pub fn default_value(&self) -> Value {
        match self.default {
            KeyDefault::Int(v) => Value::Int(v),
            KeyDefault::Float(v) => Value::Float(v),
            KeyDefault::Bool(v) => Value::Bool(v),
            KeyDefault::Text(s) => {
                // Length validated at construction
                let mut out = String::new();
                out.push_str(s).ok();
                Value::Text(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNT: PrefKey = PrefKey::int("app", "count", 7);
    const RATIO: PrefKey = PrefKey::float("app", "ratio", 0.5);
    const ENABLED: PrefKey = PrefKey::boolean("app", "enabled", true);
    const SSID: PrefKey = PrefKey::text("network", "ssid", "default-ap");

    #[test]
    fn test_key_kind() {
        assert_eq!(COUNT.kind(), ValueKind::Int);
        assert_eq!(RATIO.kind(), ValueKind::Float);
        assert_eq!(ENABLED.kind(), ValueKind::Bool);
        assert_eq!(SSID.kind(), ValueKind::Text);
    }

    #[test]
    fn test_key_default_value() {
        assert_eq!(COUNT.default_value(), Value::Int(7));
        assert_eq!(RATIO.default_value(), Value::Float(0.5));
        assert_eq!(ENABLED.default_value(), Value::Bool(true));
        assert_eq!(SSID.default_value(), Value::text("default-ap"));
    }

    #[test]
    fn test_key_identity_fields() {
        assert_eq!(SSID.namespace, "network");
        assert_eq!(SSID.name, "ssid");
    }

    #[test]
    fn test_max_length_names_accepted() {
        let key = PrefKey::int("fifteen_bytes__", "fifteen_bytes__", 0);
        assert_eq!(key.namespace.len(), MAX_NAMESPACE_LEN);
        assert_eq!(key.name.len(), MAX_KEY_NAME_LEN);
    }
}
