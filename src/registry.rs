//! Fixed-capacity key registry
//!
//! Arena-style table mapping registration-order handles to cache entries
//! and to the static metadata (namespace, key name) that commit,
//! enumeration, and reset need when operating without per-key type context.
//!
//! Handles are assigned at first use, are stable for the life of the
//! registry, and are never reused. Capacity is fixed at build time;
//! exceeding it is reported as an explicit error rather than aliasing a
//! slot.

use crate::entry::CacheEntry;
use crate::error::CacheError;
use crate::key::{PrefKey, MAX_KEY_NAME_LEN, MAX_NAMESPACE_LEN};
use heapless::Vec;

/// Maximum number of registered keys
pub const MAX_KEYS: usize = 64;

/// Stable handle for a registered key (registration-order index)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyId(u16);

impl KeyId {
    /// Get the registration-order index
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Static metadata recorded at registration
#[derive(Debug, Clone, Copy)]
pub struct KeyMetadata {
    /// Namespace name (max 15 bytes)
    pub namespace: &'static str,
    /// Key name within the namespace (max 15 bytes)
    pub name: &'static str,
}

/// One registry slot: metadata plus entry storage
#[derive(Debug)]
struct Slot {
    meta: KeyMetadata,
    entry: CacheEntry,
}

/// Fixed-capacity registry of cache entries
#[derive(Debug)]
pub struct Registry {
    slots: Vec<Slot, MAX_KEYS>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Look up the handle for a (namespace, name) pair, if registered
    pub fn lookup(&self, namespace: &str, name: &str) -> Option<KeyId> {
        self.slots
            .iter()
            .position(|s| s.meta.namespace == namespace && s.meta.name == name)
            .map(|i| KeyId(i as u16))
    }

    /// Register a key, returning its stable handle
    ///
    /// Idempotent: a key already registered returns its existing handle.
    /// The entry is seeded with the key default, uninitialized and clean.
    pub fn register(&mut self, key: &PrefKey) -> Result<KeyId, CacheError> {
        if key.namespace.len() > MAX_NAMESPACE_LEN || key.name.len() > MAX_KEY_NAME_LEN {
            return Err(CacheError::NameTooLong);
        }

        if let Some(id) = self.lookup(key.namespace, key.name) {
            return Ok(id);
        }

        let slot = Slot {
            meta: KeyMetadata {
                namespace: key.namespace,
                name: key.name,
            },
            entry: CacheEntry::new(key.default_value()),
        };
        self.slots.push(slot).map_err(|_| CacheError::RegistryFull)?;
        Ok(KeyId((self.slots.len() - 1) as u16))
    }

    /// Get the metadata for a handle
    pub fn meta(&self, id: KeyId) -> &KeyMetadata {
        &self.slots[id.index()].meta
    }

    /// Get the entry for a handle
    pub fn entry(&self, id: KeyId) -> &CacheEntry {
        &self.slots[id.index()].entry
    }

    /// Get the entry for a handle, mutably
    pub fn entry_mut(&mut self, id: KeyId) -> &mut CacheEntry {
        &mut self.slots[id.index()].entry
    }

    /// Get metadata and a mutable entry for a registration-order index
    ///
    /// Used by the batch commit and reset loops, which need the namespace
    /// while mutating the entry.
    pub fn slot_mut(&mut self, index: usize) -> (KeyMetadata, &mut CacheEntry) {
        let slot = &mut self.slots[index];
        (slot.meta, &mut slot.entry)
    }

    /// Iterate (handle, metadata, entry) triples in registration order
    pub fn iter(&self) -> impl Iterator<Item = (KeyId, &KeyMetadata, &CacheEntry)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, s)| (KeyId(i as u16), &s.meta, &s.entry))
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no keys are registered
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
