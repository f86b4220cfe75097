//! Cache-Control directive sets.
//!
//! A [`CacheDirectives`] value is built once at startup (globally from
//! configuration, or per entity type in the catalog) and rendered into the
//! `Cache-Control` header on every response for its routes. The rendered
//! string also feeds the entity-tag fingerprint, so two routes with
//! different cache policies never share a validator for the same bytes.

use std::fmt;

/// Where a response may be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLocation {
    /// Only the requesting client may cache the response.
    Private,
    /// Shared caches (proxies, CDNs) may cache the response.
    Public,
}

impl CacheLocation {
    /// Parses a location from a configuration string.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "private" => Some(CacheLocation::Private),
            "public" => Some(CacheLocation::Public),
            _ => None,
        }
    }

    /// Returns the directive token for this location.
    pub fn as_str(self) -> &'static str {
        match self {
            CacheLocation::Private => "private",
            CacheLocation::Public => "public",
        }
    }
}

impl fmt::Display for CacheLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable set of cache-control directives for a route.
///
/// # Examples
///
/// ```
/// use coursebook_api::cache::{CacheDirectives, CacheLocation};
///
/// let directives = CacheDirectives::new(240, CacheLocation::Private).with_must_revalidate();
/// assert_eq!(directives.header_value(), "private, max-age=240, must-revalidate");
///
/// assert_eq!(CacheDirectives::no_store().header_value(), "no-store");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDirectives {
    max_age_seconds: u32,
    location: CacheLocation,
    must_revalidate: bool,
    no_store: bool,
}

impl CacheDirectives {
    /// Creates directives with the given freshness lifetime and location.
    pub fn new(max_age_seconds: u32, location: CacheLocation) -> Self {
        Self {
            max_age_seconds,
            location,
            must_revalidate: false,
            no_store: false,
        }
    }

    /// Creates directives that forbid caching entirely.
    ///
    /// Responses carry `Cache-Control: no-store` and no validator.
    pub fn no_store() -> Self {
        Self {
            max_age_seconds: 0,
            location: CacheLocation::Private,
            must_revalidate: false,
            no_store: true,
        }
    }

    /// Requires intermediary caches to revalidate once the response is stale.
    pub fn with_must_revalidate(mut self) -> Self {
        self.must_revalidate = true;
        self
    }

    /// Returns the freshness lifetime in seconds.
    pub fn max_age_seconds(&self) -> u32 {
        self.max_age_seconds
    }

    /// Returns where the response may be cached.
    pub fn location(&self) -> CacheLocation {
        self.location
    }

    /// Returns whether stale responses must be revalidated.
    pub fn must_revalidate(&self) -> bool {
        self.must_revalidate
    }

    /// Returns whether caching is forbidden.
    pub fn is_no_store(&self) -> bool {
        self.no_store
    }

    /// Renders the `Cache-Control` header value.
    ///
    /// The output is canonical: directive order is fixed, so equal directive
    /// sets always render byte-identically. The fingerprint in
    /// [`EntityTag`](super::EntityTag) relies on this.
    pub fn header_value(&self) -> String {
        if self.no_store {
            return "no-store".to_string();
        }

        let mut value = format!("{}, max-age={}", self.location, self.max_age_seconds);
        if self.must_revalidate {
            value.push_str(", must-revalidate");
        }
        value
    }
}

impl Default for CacheDirectives {
    /// Private, `max-age=60`, revalidation required.
    fn default() -> Self {
        Self::new(60, CacheLocation::Private).with_must_revalidate()
    }
}
