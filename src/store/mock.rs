//! Mock store implementation for testing
//!
//! Provides an in-memory namespaced key-value store for unit tests.
//! Supports:
//! - Open/close session counting (namespace grouping validation)
//! - Typed read counting (lazy-load validation)
//! - Refusal injection for opens, removes, and clears, for testing
//!   commit/reset retry behavior
//! - Raw content inspection without going through the cache

use crate::key::{MAX_KEY_NAME_LEN, MAX_NAMESPACE_LEN};
use crate::store::StoreAdapter;
use crate::value::{Value, MAX_TEXT_LEN};
use heapless::{FnvIndexMap, String};

/// Maximum number of namespaces in the mock store
const MAX_NAMESPACES: usize = 8;

/// Maximum number of keys per namespace in the mock store
const MAX_KEYS_PER_NAMESPACE: usize = 16;

type NsName = String<MAX_NAMESPACE_LEN>;
type KeyName = String<MAX_KEY_NAME_LEN>;
type KvMap = FnvIndexMap<KeyName, Value, MAX_KEYS_PER_NAMESPACE>;

fn bounded<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    out.push_str(s).ok();
    out
}

/// In-memory store for host testing
///
/// # Example
///
/// ```
/// use nvcache::{MockStore, StoreAdapter};
///
/// let mut store = MockStore::new();
///
/// // Read-only open of an absent namespace fails without creating it
/// assert!(!store.open("app", true));
///
/// // Read-write open creates the namespace
/// assert!(store.open("app", false));
/// assert!(store.put_int("count", 5));
/// store.close();
///
/// assert_eq!(store.open_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    /// Namespace name -> key-value map
    namespaces: FnvIndexMap<NsName, KvMap, MAX_NAMESPACES>,
    /// Currently open namespace and its read-only flag
    open: Option<(NsName, bool)>,
    /// Successful open operations
    open_count: u32,
    /// Open operations attempted, successful or not
    open_attempt_count: u32,
    /// Close operations on an open namespace
    close_count: u32,
    /// Typed get operations served
    read_count: u32,
    /// When set, read-write opens are refused
    refuse_writes: bool,
    /// When set, remove operations fail
    refuse_removes: bool,
    /// When set, clear operations fail
    refuse_clears: bool,
}

impl MockStore {
    /// Create an empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful opens so far
    pub fn open_count(&self) -> u32 {
        self.open_count
    }

    /// Number of open attempts so far, including refused ones
    pub fn open_attempt_count(&self) -> u32 {
        self.open_attempt_count
    }

    /// Number of closes of an open namespace so far
    pub fn close_count(&self) -> u32 {
        self.close_count
    }

    /// Number of typed reads served so far
    pub fn read_count(&self) -> u32 {
        self.read_count
    }

    /// Refuse read-write opens (for testing commit retry behavior)
    pub fn refuse_writes(&mut self, refuse: bool) {
        self.refuse_writes = refuse;
    }

    /// Make remove operations fail (for testing commit retry behavior)
    pub fn refuse_removes(&mut self, refuse: bool) {
        self.refuse_removes = refuse;
    }

    /// Make clear operations fail (for testing reset failure reporting)
    pub fn refuse_clears(&mut self, refuse: bool) {
        self.refuse_clears = refuse;
    }

    /// Check whether a namespace exists (for test verification)
    pub fn namespace_exists(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(&bounded::<MAX_NAMESPACE_LEN>(namespace))
    }

    /// Read a stored value directly (for test verification)
    pub fn raw_get(&self, namespace: &str, key: &str) -> Option<&Value> {
        self.namespaces
            .get(&bounded::<MAX_NAMESPACE_LEN>(namespace))?
            .get(&bounded::<MAX_KEY_NAME_LEN>(key))
    }

    /// Number of keys stored in a namespace (for test verification)
    pub fn key_count(&self, namespace: &str) -> usize {
        self.namespaces
            .get(&bounded::<MAX_NAMESPACE_LEN>(namespace))
            .map(|kv| kv.len())
            .unwrap_or(0)
    }

    fn open_map(&mut self) -> Option<&mut KvMap> {
        let (ns, _) = self.open.as_ref()?;
        self.namespaces.get_mut(ns)
    }

    fn get_value(&mut self, key: &str) -> Option<Value> {
        self.read_count += 1;
        let map = self.open_map()?;
        map.get(&bounded::<MAX_KEY_NAME_LEN>(key)).cloned()
    }

    fn put_value(&mut self, key: &str, value: Value) -> bool {
        if matches!(self.open, Some((_, true)) | None) {
            return false;
        }
        let Some(map) = self.open_map() else {
            return false;
        };
        map.insert(bounded::<MAX_KEY_NAME_LEN>(key), value).is_ok()
    }
}

impl StoreAdapter for MockStore {
    fn open(&mut self, namespace: &str, read_only: bool) -> bool {
        debug_assert!(self.open.is_none(), "namespace already open");
        self.open_attempt_count += 1;

        let ns = bounded::<MAX_NAMESPACE_LEN>(namespace);
        if read_only {
            if !self.namespaces.contains_key(&ns) {
                return false;
            }
        } else {
            if self.refuse_writes {
                return false;
            }
            if !self.namespaces.contains_key(&ns)
                && self.namespaces.insert(ns.clone(), KvMap::new()).is_err()
            {
                return false;
            }
        }

        self.open = Some((ns, read_only));
        self.open_count += 1;
        true
    }

    fn close(&mut self) {
        if self.open.take().is_some() {
            self.close_count += 1;
        }
    }

    fn key_exists(&mut self, key: &str) -> bool {
        self.open_map()
            .map(|map| map.contains_key(&bounded::<MAX_KEY_NAME_LEN>(key)))
            .unwrap_or(false)
    }

    fn get_int(&mut self, key: &str, default: i32) -> i32 {
        match self.get_value(key) {
            Some(Value::Int(v)) => v,
            _ => default,
        }
    }

    fn get_float(&mut self, key: &str, default: f32) -> f32 {
        match self.get_value(key) {
            Some(Value::Float(v)) => v,
            _ => default,
        }
    }

    fn get_bool(&mut self, key: &str, default: bool) -> bool {
        match self.get_value(key) {
            Some(Value::Bool(v)) => v,
            _ => default,
        }
    }

    fn get_text(&mut self, key: &str, default: &str) -> String<MAX_TEXT_LEN> {
        match self.get_value(key) {
            Some(Value::Text(v)) => v,
            _ => bounded::<MAX_TEXT_LEN>(default),
        }
    }

    fn put_int(&mut self, key: &str, value: i32) -> bool {
        self.put_value(key, Value::Int(value))
    }

    fn put_float(&mut self, key: &str, value: f32) -> bool {
        self.put_value(key, Value::Float(value))
    }

    fn put_bool(&mut self, key: &str, value: bool) -> bool {
        self.put_value(key, Value::Bool(value))
    }

    fn put_text(&mut self, key: &str, value: &str) -> bool {
        self.put_value(key, Value::text(value))
    }

    fn remove(&mut self, key: &str) -> bool {
        if matches!(self.open, Some((_, true)) | None) || self.refuse_removes {
            return false;
        }
        if let Some(map) = self.open_map() {
            map.remove(&bounded::<MAX_KEY_NAME_LEN>(key));
        }
        // Removing an absent key is not an error
        true
    }

    fn clear(&mut self) -> bool {
        if matches!(self.open, Some((_, true)) | None) || self.refuse_clears {
            return false;
        }
        if let Some(map) = self.open_map() {
            map.clear();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_open_absent_namespace() {
        let mut store = MockStore::new();
        assert!(!store.open("missing", true));
        assert!(!store.namespace_exists("missing"));
        assert_eq!(store.open_count(), 0);
    }

    #[test]
    fn test_read_write_open_creates_namespace() {
        let mut store = MockStore::new();
        assert!(store.open("app", false));
        store.close();
        assert!(store.namespace_exists("app"));
        assert_eq!(store.open_count(), 1);
        assert_eq!(store.close_count(), 1);
    }

    #[test]
    fn test_put_get_round_trip() {
        let mut store = MockStore::new();
        store.open("app", false);
        assert!(store.put_int("count", 5));
        assert!(store.put_text("name", "rover"));
        assert_eq!(store.get_int("count", 0), 5);
        assert_eq!(store.get_text("name", "").as_str(), "rover");
        store.close();
    }

    #[test]
    fn test_get_absent_returns_default() {
        let mut store = MockStore::new();
        store.open("app", false);
        assert!(!store.key_exists("missing"));
        assert_eq!(store.get_int("missing", 42), 42);
        store.close();
    }

    #[test]
    fn test_put_refused_on_read_only_open() {
        let mut store = MockStore::new();
        store.open("app", false);
        store.put_int("count", 1);
        store.close();

        store.open("app", true);
        assert!(!store.put_int("count", 2));
        store.close();

        assert_eq!(store.raw_get("app", "count"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = MockStore::new();
        store.open("app", false);
        store.put_int("count", 1);
        assert!(store.remove("count"));
        assert!(store.remove("count"));
        assert!(!store.key_exists("count"));
        store.close();
    }

    #[test]
    fn test_clear_empties_namespace() {
        let mut store = MockStore::new();
        store.open("app", false);
        store.put_int("a", 1);
        store.put_int("b", 2);
        assert!(store.clear());
        store.close();
        assert_eq!(store.key_count("app"), 0);
        assert!(store.namespace_exists("app"));
    }

    #[test]
    fn test_refuse_writes_blocks_rw_open() {
        let mut store = MockStore::new();
        store.refuse_writes(true);
        assert!(!store.open("app", false));
        store.refuse_writes(false);
        assert!(store.open("app", false));
        store.close();
        assert_eq!(store.open_count(), 1);
        assert_eq!(store.open_attempt_count(), 2);
    }

    #[test]
    fn test_refuse_removes_fails_without_deleting() {
        let mut store = MockStore::new();
        store.open("app", false);
        store.put_int("count", 1);
        store.refuse_removes(true);
        assert!(!store.remove("count"));
        assert_eq!(store.raw_get("app", "count"), Some(&Value::Int(1)));
        store.refuse_removes(false);
        assert!(store.remove("count"));
        store.close();
        assert!(store.raw_get("app", "count").is_none());
    }

    #[test]
    fn test_refuse_clears_fails_without_deleting() {
        let mut store = MockStore::new();
        store.open("app", false);
        store.put_int("count", 1);
        store.refuse_clears(true);
        assert!(!store.clear());
        store.close();
        assert_eq!(store.key_count("app"), 1);
    }
}
