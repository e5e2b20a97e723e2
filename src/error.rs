//! Cache error types

/// Errors from cache registration
///
/// Store-level failures are deliberately not represented here: a failed
/// namespace open or put leaves the affected entries dirty and is reported
/// as a boolean, so the next commit retries. Value kind mismatches are
/// programmer errors and fail fast instead of returning an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// Registry is full (more keys than the configured maximum)
    RegistryFull,
    /// Namespace or key name exceeds the 15-byte limit
    NameTooLong,
}

impl core::fmt::Display for CacheError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CacheError::RegistryFull => write!(f, "key registry full"),
            CacheError::NameTooLong => write!(f, "namespace or key name too long"),
        }
    }
}
