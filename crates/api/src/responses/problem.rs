//! Problem-details responses.
//!
//! Builds RFC-style `application/problem+json` payloads for request
//! failures: a stable problem-type URI, a human title, the numeric status,
//! a detail string, the request path, the trace id, and (for field
//! validation failures) the complete list of offending names.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Base URI for problem types.
const PROBLEM_TYPE_BASE: &str = "https://coursebook.dev/problems";

/// Media type for problem payloads.
pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// A structured problem payload.
#[derive(Debug)]
pub struct ProblemDetails {
    type_slug: &'static str,
    title: String,
    status: StatusCode,
    detail: String,
    instance: Option<String>,
    trace_id: Option<String>,
    invalid_fields: Option<Vec<String>>,
}

impl ProblemDetails {
    /// Creates a problem payload.
    ///
    /// `type_slug` is appended to the stable problem-type base URI.
    pub fn new(
        type_slug: &'static str,
        title: impl Into<String>,
        status: StatusCode,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            type_slug,
            title: title.into(),
            status,
            detail: detail.into(),
            instance: None,
            trace_id: None,
            invalid_fields: None,
        }
    }

    /// Sets the request path the problem occurred on.
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Sets the trace identifier for log correlation.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Attaches the complete list of invalid field names.
    pub fn with_invalid_fields(mut self, fields: Vec<String>) -> Self {
        self.invalid_fields = Some(fields);
        self
    }

    /// Returns the HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Renders the JSON body.
    pub fn body(&self) -> serde_json::Value {
        let mut body = json!({
            "type": format!("{}/{}", PROBLEM_TYPE_BASE, self.type_slug),
            "title": self.title,
            "status": self.status.as_u16(),
            "detail": self.detail,
        });

        if let Some(instance) = &self.instance {
            body["instance"] = json!(instance);
        }
        if let Some(trace_id) = &self.trace_id {
            body["traceId"] = json!(trace_id);
        }
        if let Some(fields) = &self.invalid_fields {
            body["invalidFields"] = json!(fields);
        }

        body
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body().to_string()).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_minimal() {
        let problem = ProblemDetails::new(
            "not-found",
            "The requested entity does not exist.",
            StatusCode::NOT_FOUND,
            "Entity courses/c9 was not found.",
        );
        let body = problem.body();

        assert_eq!(body["type"], "https://coursebook.dev/problems/not-found");
        assert_eq!(body["status"], 404);
        assert!(body.get("instance").is_none());
        assert!(body.get("invalidFields").is_none());
    }

    #[test]
    fn test_body_full() {
        let problem = ProblemDetails::new(
            "unknown-shape-field",
            "One or more requested fields are invalid.",
            StatusCode::UNPROCESSABLE_ENTITY,
            "The following fields are not valid for 'courses': bogus.",
        )
        .with_instance("/courses")
        .with_trace_id("trace-42")
        .with_invalid_fields(vec!["bogus".to_string()]);
        let body = problem.body();

        assert_eq!(body["status"], 422);
        assert_eq!(body["instance"], "/courses");
        assert_eq!(body["traceId"], "trace-42");
        assert_eq!(body["invalidFields"], json!(["bogus"]));
    }

    #[test]
    fn test_into_response_content_type() {
        let response = ProblemDetails::new(
            "malformed-query",
            "The query string could not be parsed.",
            StatusCode::BAD_REQUEST,
            "page must be a positive integer",
        )
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            PROBLEM_CONTENT_TYPE
        );
    }
}
