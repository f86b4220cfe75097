//! Validator storage.
//!
//! Retains the most recently issued entity tag per request URI. The cache
//! layer records every issued validator here and drops the record once a
//! route stops producing a representation; the record is never consulted to
//! decide freshness, which is always recomputed from the candidate
//! response. Entries expire after their route's `max-age`, so a record
//! never outlives the freshness lifetime the route advertises.

use std::num::NonZeroUsize;
use std::sync::{RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};

use lru::LruCache;
use tracing::warn;

/// A stored validator entry with its expiry deadline.
#[derive(Debug, Clone)]
struct StoredValidator {
    token: String,
    expires_at: Instant,
}

/// Storage interface for per-URI validators.
///
/// Consistency is last-writer-wins per URI; callers never observe a token
/// older than its route's freshness lifetime.
pub trait ValidatorStore: Send + Sync {
    /// Returns the unexpired validator token stored for a URI, if any.
    fn get(&self, uri: &str) -> Option<String>;

    /// Stores a validator token for a URI, replacing any existing entry.
    fn put(&self, uri: &str, token: &str, ttl: Duration);

    /// Removes the entry for a URI.
    fn invalidate(&self, uri: &str);
}

/// Bounded in-memory validator store.
///
/// LRU-evicted, with per-entry TTL checked on read. Safe for concurrent
/// use from any number of request tasks.
pub struct MemoryValidatorStore {
    entries: RwLock<LruCache<String, StoredValidator>>,
}

impl MemoryValidatorStore {
    /// Creates a store retaining at most `capacity` entries.
    ///
    /// A zero capacity is clamped to one entry.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Returns the number of retained entries, expired ones included.
    pub fn len(&self) -> usize {
        self.write_guard().len()
    }

    /// Returns true if no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // LruCache::get reorders internally, so even reads take the write lock.
    fn write_guard(&self) -> RwLockWriteGuard<'_, LruCache<String, StoredValidator>> {
        match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    lock_kind = "rwlock.write",
                    result = "poisoned_recovered",
                    "Recovered from poisoned validator store lock"
                );
                poisoned.into_inner()
            }
        }
    }
}

impl ValidatorStore for MemoryValidatorStore {
    fn get(&self, uri: &str) -> Option<String> {
        let mut entries = self.write_guard();
        match entries.get(uri) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.token.clone()),
            Some(_) => {
                entries.pop(uri);
                None
            }
            None => None,
        }
    }

    fn put(&self, uri: &str, token: &str, ttl: Duration) {
        let entry = StoredValidator {
            token: token.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.write_guard().put(uri.to_string(), entry);
    }

    fn invalidate(&self, uri: &str) {
        self.write_guard().pop(uri);
    }
}
