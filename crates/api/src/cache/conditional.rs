//! Conditional request handling.
//!
//! Extracts the client's `If-None-Match` token and decides, purely from
//! `(supplied token, computed tag)`, whether the response can short-circuit
//! to `304 Not Modified` or must carry the full body.

use axum::http::{HeaderMap, header};

use super::etag::EntityTag;

/// Extracted conditional headers from a request.
#[derive(Debug, Default)]
pub struct ConditionalHeaders {
    /// If-None-Match header value (the client's previously issued validator).
    if_none_match: Option<String>,
}

impl ConditionalHeaders {
    /// Creates a new ConditionalHeaders from a HeaderMap.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let if_none_match = headers
            .get(header::IF_NONE_MATCH)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .map(String::from);

        Self { if_none_match }
    }

    /// Returns the If-None-Match header value.
    pub fn if_none_match(&self) -> Option<&str> {
        self.if_none_match.as_deref()
    }
}

/// Outcome of comparing a supplied validator against the computed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalOutcome {
    /// The representation is unchanged; emit 304 with no body.
    Fresh,
    /// The representation changed (or no token was supplied); emit the
    /// full body and the new validator.
    Stale,
}

/// Decides the conditional outcome for a request.
///
/// Pure function: the supplied token must match the computed tag byte-exact
/// for the response to be [`Fresh`](ConditionalOutcome::Fresh). A missing
/// token is always [`Stale`](ConditionalOutcome::Stale).
pub fn coordinate(supplied: Option<&str>, computed: &EntityTag) -> ConditionalOutcome {
    match supplied {
        Some(token) if computed.matches(token) => ConditionalOutcome::Fresh,
        _ => ConditionalOutcome::Stale,
    }
}
