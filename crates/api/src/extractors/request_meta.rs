//! Per-request metadata.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use uuid::Uuid;

/// Header carrying the request identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation metadata extracted from an incoming request.
///
/// The trace id comes from the `x-request-id` header when the request-id
/// middleware (or the client) supplied one, otherwise a fresh UUID is
/// minted so error payloads always correlate with a log line. The
/// instance is the request path, used as the problem payload's
/// `instance` member.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// Trace identifier for log correlation.
    pub trace_id: String,
    /// The request path.
    pub instance: String,
}

impl RequestMeta {
    /// Reads metadata out of request parts.
    pub fn from_parts(parts: &Parts) -> Self {
        let trace_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            trace_id,
            instance: parts.uri.path().to_string(),
        }
    }
}

impl<S> FromRequestParts<S> for RequestMeta
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_uses_request_id_header() {
        let (parts, _) = Request::builder()
            .uri("/authors?page=2")
            .header(REQUEST_ID_HEADER, "trace-abc")
            .body(())
            .unwrap()
            .into_parts();
        let meta = RequestMeta::from_parts(&parts);

        assert_eq!(meta.trace_id, "trace-abc");
        assert_eq!(meta.instance, "/authors");
    }

    #[test]
    fn test_mints_uuid_without_header() {
        let (parts, _) = Request::builder()
            .uri("/courses/c1")
            .body(())
            .unwrap()
            .into_parts();
        let meta = RequestMeta::from_parts(&parts);

        assert!(Uuid::parse_str(&meta.trace_id).is_ok());
        assert_eq!(meta.instance, "/courses/c1");
    }
}
