//! Entity-tag computation.
//!
//! An entity tag is the strong validator for a specific response
//! representation. It is a SHA-256 fingerprint over the serialized payload
//! bytes plus the route's canonical `Cache-Control` string, truncated to
//! 128 bits and rendered as an opaque quoted token. Including the directive
//! string means the same payload served under a different cache policy gets
//! a different tag.

use std::fmt;

use sha2::{Digest, Sha256};

use super::directives::CacheDirectives;

/// Number of digest bytes kept in the rendered token (128 bits).
const TAG_BYTES: usize = 16;

/// A strong entity tag for a response representation.
///
/// # Examples
///
/// ```
/// use coursebook_api::cache::{CacheDirectives, EntityTag};
///
/// let directives = CacheDirectives::default();
/// let tag = EntityTag::compute(b"[{\"id\":\"c1\"}]", &directives);
///
/// assert!(tag.as_str().starts_with('"'));
/// assert_eq!(tag, EntityTag::compute(b"[{\"id\":\"c1\"}]", &directives));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTag(String);

impl EntityTag {
    /// Computes the entity tag for a payload under the given directives.
    ///
    /// Deterministic: equal byte sequences under equal directives always
    /// yield equal tags; any byte difference yields a different tag with
    /// overwhelming probability.
    pub fn compute(payload: &[u8], directives: &CacheDirectives) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(payload);
        // NUL separator keeps payload/directive boundaries unambiguous
        hasher.update([0u8]);
        hasher.update(directives.header_value().as_bytes());
        let digest = hasher.finalize();

        Self(format!("\"{}\"", hex::encode(&digest[..TAG_BYTES])))
    }

    /// Returns the quoted token, as sent in the `ETag` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if a client-supplied token matches this tag byte-exact.
    pub fn matches(&self, supplied: &str) -> bool {
        self.0 == supplied
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
