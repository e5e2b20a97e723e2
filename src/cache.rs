//! Write-back cache manager
//!
//! [`PrefCache`] is the operations layer over the registry and the store
//! adapter: lazy load on first access, in-memory writes with dirty
//! recomputation, single-key commit with default elision, batch commit
//! grouped by namespace, enumeration, and factory reset.
//!
//! The cache is an explicit context object owning its entry table; multiple
//! independent caches can coexist (useful for testing). All operations are
//! synchronous and run to completion on the caller's thread; at most one
//! namespace is open at a time by open/close sequencing.

use crate::error::CacheError;
use crate::key::PrefKey;
use crate::registry::{KeyId, Registry, MAX_KEYS};
use crate::store::StoreAdapter;
use crate::value::{Value, MAX_TEXT_LEN};
use heapless::String;

/// Snapshot of one registered key's state, exposed by enumeration
///
/// Deliberately excludes the value: callers needing it must go through the
/// typed read path so lazy loading and kind checks apply.
#[derive(Debug, Clone, Copy)]
pub struct EntryInfo {
    /// Namespace name
    pub namespace: &'static str,
    /// Key name within the namespace
    pub name: &'static str,
    /// Stable registry handle
    pub id: KeyId,
    /// Whether a load attempt has been made
    pub initialized: bool,
    /// Whether the RAM value needs saving
    pub dirty: bool,
}

/// Write-back preference cache over a namespaced non-volatile store
///
/// # Example
///
/// ```
/// use nvcache::{MockStore, PrefCache, PrefKey, Value};
///
/// const BOOT_COUNT: PrefKey = PrefKey::int("system", "boot_count", 0);
///
/// let mut cache = PrefCache::new(MockStore::new());
///
/// // Fresh store: reads yield the declared default
/// assert_eq!(cache.get(&BOOT_COUNT).unwrap(), Value::Int(0));
///
/// // Writes stay in RAM until committed
/// cache.set(&BOOT_COUNT, Value::Int(1)).unwrap();
/// assert!(cache.is_dirty(&BOOT_COUNT).unwrap());
/// assert!(cache.commit(&BOOT_COUNT).unwrap());
/// assert!(!cache.is_dirty(&BOOT_COUNT).unwrap());
/// ```
pub struct PrefCache<S: StoreAdapter> {
    store: S,
    registry: Registry,
}

impl<S: StoreAdapter> PrefCache<S> {
    /// Create a cache over the given store adapter
    pub fn new(store: S) -> Self {
        Self {
            store,
            registry: Registry::new(),
        }
    }

    /// Read a key's current value, loading from the store on first access
    ///
    /// Initialized entries are served from RAM with no store access.
    /// Otherwise the key's namespace is opened read-only: an absent
    /// namespace or key yields the declared default with nothing persisted,
    /// and never creates storage structures.
    pub fn get(&mut self, key: &PrefKey) -> Result<Value, CacheError> {
        let id = self.registry.register(key)?;
        self.ensure_loaded(id, key);
        Ok(self.registry.entry(id).current.clone())
    }

    /// Read an integer key
    ///
    /// # Panics
    ///
    /// Panics if the key was not declared as an integer.
    pub fn get_int(&mut self, key: &PrefKey) -> Result<i32, CacheError> {
        Ok(self.get(key)?.as_int())
    }

    /// Read a float key
    ///
    /// # Panics
    ///
    /// Panics if the key was not declared as a float.
    pub fn get_float(&mut self, key: &PrefKey) -> Result<f32, CacheError> {
        Ok(self.get(key)?.as_float())
    }

    /// Read a boolean key
    ///
    /// # Panics
    ///
    /// Panics if the key was not declared as a boolean.
    pub fn get_bool(&mut self, key: &PrefKey) -> Result<bool, CacheError> {
        Ok(self.get(key)?.as_bool())
    }

    /// Read a text key
    ///
    /// # Panics
    ///
    /// Panics if the key was not declared as text.
    pub fn get_text(&mut self, key: &PrefKey) -> Result<String<MAX_TEXT_LEN>, CacheError> {
        match self.get(key)? {
            Value::Text(s) => Ok(s),
            _ => panic!("value kind mismatch: expected Text"),
        }
    }

    /// Write a key's value in RAM and recompute its dirty flag
    ///
    /// Ensures the entry is loaded first so the dirty baseline is correct,
    /// then compares the new value against the persisted value when one is
    /// known, else against the key default. No store write happens here.
    ///
    /// # Panics
    ///
    /// Panics if the value's kind does not match the key's declared kind.
    pub fn set(&mut self, key: &PrefKey, value: Value) -> Result<(), CacheError> {
        assert!(
            value.kind() == key.kind(),
            "value kind mismatch for key {}/{}",
            key.namespace,
            key.name
        );

        let id = self.registry.register(key)?;
        self.ensure_loaded(id, key);

        let default = key.default_value();
        let entry = self.registry.entry_mut(id);
        entry.current = value;
        entry.recompute_dirty(&default);
        Ok(())
    }

    /// Check whether a key's current value differs from its default
    ///
    /// Independent of dirty and store state; loads the entry first if
    /// needed so the comparison reflects what a read would return.
    pub fn is_modified(&mut self, key: &PrefKey) -> Result<bool, CacheError> {
        let id = self.registry.register(key)?;
        self.ensure_loaded(id, key);
        Ok(self.registry.entry(id).current != key.default_value())
    }

    /// Check whether a key has unsaved changes
    pub fn is_dirty(&mut self, key: &PrefKey) -> Result<bool, CacheError> {
        let id = self.registry.register(key)?;
        self.ensure_loaded(id, key);
        Ok(self.registry.entry(id).is_dirty())
    }

    /// Persist one key if it is dirty
    ///
    /// A value equal to the key default is removed from the store instead
    /// of written, so defaults never occupy space. Returns `Ok(false)` when
    /// the read-write open, the put, or the remove fails; the dirty flag
    /// stays set so a later commit retries.
    pub fn commit(&mut self, key: &PrefKey) -> Result<bool, CacheError> {
        let id = self.registry.register(key)?;
        {
            let entry = self.registry.entry(id);
            if !entry.is_initialized() || !entry.is_dirty() {
                return Ok(true);
            }
        }

        if !self.store.open(key.namespace, false) {
            #[cfg(feature = "defmt")]
            defmt::warn!("commit: cannot open namespace {=str}", key.namespace);
            return Ok(false);
        }

        let current = self.registry.entry(id).current.clone();
        if current == key.default_value() {
            if !self.store.remove(key.name) {
                self.store.close();
                return Ok(false);
            }
            self.registry.entry_mut(id).persisted = None;
        } else {
            if !put_value(&mut self.store, key.name, &current) {
                self.store.close();
                return Ok(false);
            }
            self.registry.entry_mut(id).persisted = Some(current);
        }
        self.store.close();

        self.registry.entry_mut(id).set_dirty(false);
        Ok(true)
    }

    /// Persist every dirty entry in one pass
    ///
    /// Entries are visited in registration order; consecutive entries in
    /// the same namespace share one open/close session, and a namespace is
    /// reopened if it reappears non-contiguously. Register same-namespace
    /// keys consecutively to minimize sessions.
    ///
    /// Unlike [`commit`](Self::commit), this path always writes the current
    /// value (no default elision) since per-key default context is not
    /// available from registry metadata alone.
    ///
    /// Returns `false` if any namespace could not be opened read-write or
    /// any put failed; affected entries keep their dirty flag for retry.
    pub fn commit_all(&mut self) -> bool {
        let mut all_ok = true;
        let mut open_ns: Option<&'static str> = None;
        let mut failed: heapless::Vec<&'static str, MAX_KEYS> = heapless::Vec::new();
        #[cfg(feature = "defmt")]
        let mut written: u32 = 0;

        for i in 0..self.registry.len() {
            let (meta, entry) = self.registry.slot_mut(i);
            if !entry.is_initialized() || !entry.is_dirty() {
                continue;
            }

            if open_ns != Some(meta.namespace) {
                if failed.contains(&meta.namespace) {
                    // Whole namespace skipped for this pass, even if it
                    // reappears non-contiguously
                    continue;
                }
                if open_ns.take().is_some() {
                    self.store.close();
                }
                if !self.store.open(meta.namespace, false) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("commit_all: cannot open namespace {=str}", meta.namespace);
                    // Cannot overflow: at most one namespace per registered key
                    failed.push(meta.namespace).ok();
                    all_ok = false;
                    continue;
                }
                open_ns = Some(meta.namespace);
            }

            if put_value(&mut self.store, meta.name, &entry.current) {
                entry.persisted = Some(entry.current.clone());
                entry.set_dirty(false);
                #[cfg(feature = "defmt")]
                {
                    written += 1;
                }
            } else {
                all_ok = false;
            }
        }

        if open_ns.is_some() {
            self.store.close();
        }

        #[cfg(feature = "defmt")]
        defmt::info!("commit_all: wrote {} entries", written);

        all_ok
    }

    /// Factory reset: clear every backing namespace and unload all entries
    ///
    /// Namespaces are cleared grouped by adjacency as in
    /// [`commit_all`](Self::commit_all). Every entry returns to the
    /// unloaded state regardless of store outcome, so subsequent reads
    /// re-run the lazy-load path and observe defaults. Returns `false` if
    /// any namespace could not be opened or cleared; such a namespace
    /// retains its stored values and the next load will observe them.
    pub fn reset_all(&mut self) -> bool {
        let mut all_ok = true;
        let mut last_ns: Option<&'static str> = None;

        for i in 0..self.registry.len() {
            let (meta, entry) = self.registry.slot_mut(i);

            if last_ns != Some(meta.namespace) {
                if self.store.open(meta.namespace, false) {
                    if !self.store.clear() {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("reset_all: clear failed for {=str}", meta.namespace);
                        all_ok = false;
                    }
                    self.store.close();
                } else {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("reset_all: cannot open namespace {=str}", meta.namespace);
                    all_ok = false;
                }
                last_ns = Some(meta.namespace);
            }

            entry.reset();
        }

        all_ok
    }

    /// Enumerate registered keys in registration order
    ///
    /// Exposes identity and state flags only, never the value. Safe to call
    /// at any time, including before any key has been read.
    pub fn entries(&self) -> impl Iterator<Item = EntryInfo> + '_ {
        self.registry.iter().map(|(id, meta, entry)| EntryInfo {
            namespace: meta.namespace,
            name: meta.name,
            id,
            initialized: entry.is_initialized(),
            dirty: entry.is_dirty(),
        })
    }

    /// Enumerate registered keys in one namespace, in registration order
    pub fn entries_in<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = EntryInfo> + 'a {
        self.entries().filter(move |e| e.namespace == namespace)
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Check if no keys are registered
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Borrow the underlying store adapter
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Borrow the underlying store adapter mutably
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the cache, returning the store adapter
    pub fn into_store(self) -> S {
        self.store
    }

    /// Run the lazy-load path for an entry if no load attempt was made yet
    fn ensure_loaded(&mut self, id: KeyId, key: &PrefKey) {
        if self.registry.entry(id).is_initialized() {
            return;
        }

        let mut stored = None;
        if self.store.open(key.namespace, true) {
            if self.store.key_exists(key.name) {
                stored = Some(get_value(&mut self.store, key));
            }
            self.store.close();
        }

        let entry = self.registry.entry_mut(id);
        match stored {
            Some(value) => {
                entry.current = value.clone();
                entry.persisted = Some(value);
            }
            None => {
                entry.current = key.default_value();
                entry.persisted = None;
            }
        }
        // Freshly loaded entries are clean by construction; the dirty flag
        // was already clear by the uninitialized-entry invariant.
        entry.mark_initialized();
    }
}

/// Read a key's value from the open namespace via its typed get
fn get_value<S: StoreAdapter>(store: &mut S, key: &PrefKey) -> Value {
    match key.default_value() {
        Value::Int(d) => Value::Int(store.get_int(key.name, d)),
        Value::Float(d) => Value::Float(store.get_float(key.name, d)),
        Value::Bool(d) => Value::Bool(store.get_bool(key.name, d)),
        Value::Text(d) => Value::Text(store.get_text(key.name, d.as_str())),
    }
}

/// Write a value to the open namespace via its typed put
fn put_value<S: StoreAdapter>(store: &mut S, name: &str, value: &Value) -> bool {
    match value {
        Value::Int(v) => store.put_int(name, *v),
        Value::Float(v) => store.put_float(name, *v),
        Value::Bool(v) => store.put_bool(name, *v),
        Value::Text(v) => store.put_text(name, v.as_str()),
    }
}
