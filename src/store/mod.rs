//! Storage backend abstraction
//!
//! The cache talks to persistent storage through the [`StoreAdapter`]
//! trait, which models a namespaced non-volatile key-value store (NVS-style
//! partitions on microcontroller flash). Operations address the currently
//! open namespace; at most one namespace is open at a time, and a commit is
//! atomic per open/close cycle.

pub mod mock;

pub use mock::MockStore;

use crate::value::MAX_TEXT_LEN;
use heapless::String;

/// Namespaced non-volatile key-value store interface
///
/// # Contracts
///
/// - `open(ns, true)` on an absent namespace returns `false` and must not
///   create any storage structures; `open(ns, false)` creates the
///   namespace if needed and returns `false` only on storage failure.
/// - All other operations address the namespace opened by the last
///   successful `open`; calling them without an open namespace is a usage
///   error the adapter may ignore or reject.
/// - `remove` of an absent key is not an error.
pub trait StoreAdapter {
    /// Open a namespace for access; read-only opens never create it
    fn open(&mut self, namespace: &str, read_only: bool) -> bool;

    /// Close the currently open namespace
    fn close(&mut self);

    /// Check whether a key exists in the open namespace
    ///
    /// Callers must use this before a typed get to distinguish "absent"
    /// from "stored as the default".
    fn key_exists(&mut self, key: &str) -> bool;

    /// Read an integer, returning `default` if the key is absent
    fn get_int(&mut self, key: &str, default: i32) -> i32;

    /// Read a float, returning `default` if the key is absent
    fn get_float(&mut self, key: &str, default: f32) -> f32;

    /// Read a boolean, returning `default` if the key is absent
    fn get_bool(&mut self, key: &str, default: bool) -> bool;

    /// Read a text value, returning `default` if the key is absent
    fn get_text(&mut self, key: &str, default: &str) -> String<MAX_TEXT_LEN>;

    /// Write an integer; returns `false` on storage failure
    fn put_int(&mut self, key: &str, value: i32) -> bool;

    /// Write a float; returns `false` on storage failure
    fn put_float(&mut self, key: &str, value: f32) -> bool;

    /// Write a boolean; returns `false` on storage failure
    fn put_bool(&mut self, key: &str, value: bool) -> bool;

    /// Write a text value; returns `false` on storage failure
    fn put_text(&mut self, key: &str, value: &str) -> bool;

    /// Remove a key from the open namespace (idempotent)
    fn remove(&mut self, key: &str) -> bool;

    /// Remove every key in the open namespace
    fn clear(&mut self) -> bool;
}
