//! nvcache - Write-back preference cache over non-volatile key-value storage
//!
//! This crate layers an in-memory write-back cache over a byte-limited,
//! page-erasable key-value store of the kind found on microcontrollers
//! (NVS-style namespaced partitions). It minimizes flash wear by writing
//! only what changed, batching writes per namespace session, and eliding
//! values equal to their declared defaults.
//!
//! # Design Principles
//!
//! - **Pure no_std**: no heap, all storage bounded via `heapless`
//! - **Trait abstractions**: the storage backend is injected via
//!   [`StoreAdapter`], so the cache is testable on host with [`MockStore`]
//! - **Lazy loading**: the store is consulted once per key, on first access
//! - **Explicit commits**: writes stay in RAM until the caller commits
//!
//! # Modules
//!
//! - [`value`]: tagged value variant and kind discriminant
//! - [`key`]: preference key declarations with length validation
//! - [`entry`]: per-key cache entries with load/dirty state
//! - [`registry`]: fixed-capacity table of entries with stable handles
//! - [`cache`]: the cache manager (load, set, commit, enumerate, reset)
//! - [`store`]: storage backend trait and in-memory mock
//! - [`error`]: cache error types
//!
//! # Example
//!
//! ```
//! use nvcache::{MockStore, PrefCache, PrefKey, Value};
//!
//! const WIFI_SSID: PrefKey = PrefKey::text("network", "ssid", "");
//! const WIFI_CHANNEL: PrefKey = PrefKey::int("network", "channel", 1);
//!
//! let mut cache = PrefCache::new(MockStore::new());
//!
//! cache.set(&WIFI_SSID, Value::text("basecamp")).unwrap();
//! cache.set(&WIFI_CHANNEL, Value::Int(6)).unwrap();
//!
//! // One namespace session for both writes
//! assert!(cache.commit_all());
//! ```

#![no_std]

pub mod cache;
pub mod entry;
pub mod error;
pub mod key;
pub mod registry;
pub mod store;
pub mod value;

pub use cache::{EntryInfo, PrefCache};
pub use entry::{CacheEntry, EntryFlags};
pub use error::CacheError;
pub use key::{PrefKey, MAX_KEY_NAME_LEN, MAX_NAMESPACE_LEN};
pub use registry::{KeyId, KeyMetadata, Registry, MAX_KEYS};
pub use store::{MockStore, StoreAdapter};
pub use value::{Value, ValueKind, MAX_TEXT_LEN};
