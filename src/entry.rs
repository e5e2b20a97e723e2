//! Per-key cache entries
//!
//! Each registered key owns one [`CacheEntry`] tracking the in-RAM value,
//! the last-known stored value, and load/dirty state.
//!
//! State tracked per entry:
//! - `current`: authoritative in-RAM value
//! - `persisted`: last value known to exist in the store; `None` means no
//!   value is currently stored under this key (distinct from "never loaded",
//!   which is the absence of [`EntryFlags::INITIALIZED`])
//! - `INITIALIZED`: a load attempt has been made for this key
//! - `DIRTY`: `current` differs from the comparison baseline (persisted
//!   value if known, else the key default)

use crate::value::Value;
use bitflags::bitflags;

bitflags! {
    /// Cache entry state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EntryFlags: u8 {
        /// A load attempt has been made for this entry
        const INITIALIZED = 0b0001;
        /// RAM value differs from the comparison baseline
        const DIRTY = 0b0010;
    }
}

/// Cache entry for a single preference key
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Current cached value (in RAM)
    pub current: Value,
    /// Last-known stored value; `None` = key absent from the store
    pub persisted: Option<Value>,
    /// Entry state flags
    flags: EntryFlags,
}

impl CacheEntry {
    /// Create a fresh entry seeded with the key default
    ///
    /// The entry starts uninitialized and clean; the first read runs the
    /// lazy-load path before `current` is served.
    pub fn new(default: Value) -> Self {
        Self {
            current: default,
            persisted: None,
            flags: EntryFlags::empty(),
        }
    }

    /// Check whether a load attempt has been made for this entry
    pub fn is_initialized(&self) -> bool {
        self.flags.contains(EntryFlags::INITIALIZED)
    }

    /// Check whether the RAM value needs saving
    pub fn is_dirty(&self) -> bool {
        self.flags.contains(EntryFlags::DIRTY)
    }

    /// Mark the entry as loaded
    pub fn mark_initialized(&mut self) {
        self.flags.insert(EntryFlags::INITIALIZED);
    }

    /// Set or clear the dirty flag
    pub fn set_dirty(&mut self, dirty: bool) {
        self.flags.set(EntryFlags::DIRTY, dirty);
    }

    /// Recompute the dirty flag after `current` changed
    ///
    /// Baseline is the persisted value when one is known, else the key
    /// default: on a fresh device "clean" means "committing would be a
    /// no-op".
    pub fn recompute_dirty(&mut self, default: &Value) {
        let baseline = self.persisted.as_ref().unwrap_or(default);
        let dirty = self.current != *baseline;
        self.set_dirty(dirty);
    }

    /// Return the entry to its unloaded state
    ///
    /// Clears flags and the persisted value; `current` is left untouched
    /// and becomes authoritative again only after the next lazy load.
    pub fn reset(&mut self) {
        self.persisted = None;
        self.flags = EntryFlags::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_new_is_clean() {
        let entry = CacheEntry::new(Value::Int(0));
        assert!(!entry.is_initialized());
        assert!(!entry.is_dirty());
        assert!(entry.persisted.is_none());
        assert_eq!(entry.current, Value::Int(0));
    }

    #[test]
    fn test_recompute_dirty_against_default() {
        let mut entry = CacheEntry::new(Value::Int(0));
        entry.mark_initialized();

        entry.current = Value::Int(5);
        entry.recompute_dirty(&Value::Int(0));
        assert!(entry.is_dirty());

        entry.current = Value::Int(0);
        entry.recompute_dirty(&Value::Int(0));
        assert!(!entry.is_dirty());
    }

    #[test]
    fn test_recompute_dirty_against_persisted() {
        let mut entry = CacheEntry::new(Value::Int(0));
        entry.mark_initialized();
        entry.persisted = Some(Value::Int(5));

        // Matches persisted, differs from default: clean
        entry.current = Value::Int(5);
        entry.recompute_dirty(&Value::Int(0));
        assert!(!entry.is_dirty());

        // Matches default, differs from persisted: dirty
        entry.current = Value::Int(0);
        entry.recompute_dirty(&Value::Int(0));
        assert!(entry.is_dirty());
    }

    #[test]
    fn test_reset_clears_state_keeps_current() {
        let mut entry = CacheEntry::new(Value::Int(0));
        entry.mark_initialized();
        entry.current = Value::Int(9);
        entry.persisted = Some(Value::Int(9));
        entry.set_dirty(true);

        entry.reset();
        assert!(!entry.is_initialized());
        assert!(!entry.is_dirty());
        assert!(entry.persisted.is_none());
        assert_eq!(entry.current, Value::Int(9));
    }
}
