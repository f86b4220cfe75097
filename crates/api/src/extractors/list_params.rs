//! List query parameters.
//!
//! Raw query-string parameters for list routes, plus parsing into typed
//! sort keys, shape fields, and a validated page window. Parsing is
//! mechanical only: whether the named fields exist on the entity is the
//! catalog's call, made later against the full set of requested names.

use serde::Deserialize;

use crate::catalog::SortKey;
use crate::error::ApiErrorKind;

/// Raw list-route query parameters, exactly as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListParams {
    /// Comma-separated sort expression; `-` prefix flips direction.
    pub sort: Option<String>,
    /// Comma-separated field projection.
    pub fields: Option<String>,
    /// Case-insensitive substring filter over string-valued fields.
    pub q: Option<String>,
    /// 1-based page number.
    pub page: Option<String>,
    /// Page size, capped by server configuration.
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

/// Parsed and validated list parameters.
#[derive(Debug, Clone)]
pub struct ListParams {
    /// Client sort keys in request order; empty means "use the default".
    pub sort_keys: Vec<SortKey>,
    /// Requested shape fields; empty means "full payload".
    pub shape_fields: Vec<String>,
    /// Substring filter, if any.
    pub filter: Option<String>,
    /// 1-based page number.
    pub page: usize,
    /// Effective page size after capping.
    pub page_size: usize,
    /// The raw sort expression, for echoing into page links.
    pub raw_sort: Option<String>,
    /// The raw fields expression, for echoing into page links.
    pub raw_fields: Option<String>,
}

impl ListParams {
    /// Parses raw parameters against the server's page-size policy.
    ///
    /// `page` and `pageSize` must be positive integers; a `pageSize` above
    /// `max_page_size` is silently capped rather than rejected.
    pub fn parse(
        raw: &RawListParams,
        default_page_size: usize,
        max_page_size: usize,
    ) -> Result<Self, ApiErrorKind> {
        let page = match &raw.page {
            Some(value) => parse_positive(value, "page")?,
            None => 1,
        };
        let page_size = match &raw.page_size {
            Some(value) => parse_positive(value, "pageSize")?.min(max_page_size),
            None => default_page_size,
        };

        let sort_keys = match &raw.sort {
            Some(expr) => parse_sort_keys(expr)?,
            None => Vec::new(),
        };
        let shape_fields = match &raw.fields {
            Some(expr) => split_names(expr),
            None => Vec::new(),
        };

        Ok(Self {
            sort_keys,
            shape_fields,
            filter: raw.q.as_ref().map(|q| q.trim().to_string()).filter(|q| !q.is_empty()),
            page,
            page_size,
            raw_sort: raw.sort.clone(),
            raw_fields: raw.fields.clone(),
        })
    }

    /// Zero-based offset of the first entity on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }
}

fn parse_positive(value: &str, name: &str) -> Result<usize, ApiErrorKind> {
    match value.trim().parse::<usize>() {
        Ok(parsed) if parsed >= 1 => Ok(parsed),
        _ => Err(ApiErrorKind::MalformedQuery {
            message: format!("{name} must be a positive integer"),
        }),
    }
}

/// Splits a comma-separated sort expression into client sort keys.
///
/// A leading `-` on a name flips that key to descending. Blank segments
/// are skipped; a bare `-` is malformed.
pub fn parse_sort_keys(expr: &str) -> Result<Vec<SortKey>, ApiErrorKind> {
    let mut keys = Vec::new();
    for segment in expr.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if let Some(name) = segment.strip_prefix('-') {
            let name = name.trim();
            if name.is_empty() {
                return Err(ApiErrorKind::MalformedQuery {
                    message: "sort segment '-' names no field".to_string(),
                });
            }
            keys.push(SortKey::descending(name));
        } else {
            keys.push(SortKey::ascending(segment));
        }
    }
    Ok(keys)
}

fn split_names(expr: &str) -> Vec<String> {
    expr.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursebook_store::Direction;

    fn raw(query: &[(&str, &str)]) -> RawListParams {
        let mut params = RawListParams::default();
        for (key, value) in query {
            match *key {
                "sort" => params.sort = Some(value.to_string()),
                "fields" => params.fields = Some(value.to_string()),
                "q" => params.q = Some(value.to_string()),
                "page" => params.page = Some(value.to_string()),
                "pageSize" => params.page_size = Some(value.to_string()),
                other => panic!("unknown test param {other}"),
            }
        }
        params
    }

    #[test]
    fn test_defaults() {
        let params = ListParams::parse(&raw(&[]), 10, 20).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 10);
        assert!(params.sort_keys.is_empty());
        assert!(params.shape_fields.is_empty());
        assert!(params.filter.is_none());
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_page_size_capped_not_rejected() {
        let params = ListParams::parse(&raw(&[("pageSize", "500")]), 10, 20).unwrap();
        assert_eq!(params.page_size, 20);
    }

    #[test]
    fn test_offset_for_later_page() {
        let params = ListParams::parse(&raw(&[("page", "3"), ("pageSize", "5")]), 10, 20).unwrap();
        assert_eq!(params.offset(), 10);
    }

    #[test]
    fn test_zero_page_is_malformed() {
        let err = ListParams::parse(&raw(&[("page", "0")]), 10, 20).unwrap_err();
        assert!(matches!(err, ApiErrorKind::MalformedQuery { .. }));
    }

    #[test]
    fn test_non_numeric_page_size_is_malformed() {
        let err = ListParams::parse(&raw(&[("pageSize", "lots")]), 10, 20).unwrap_err();
        assert!(matches!(err, ApiErrorKind::MalformedQuery { .. }));
    }

    #[test]
    fn test_sort_expression_with_descending_prefix() {
        let keys = parse_sort_keys("-name, id").unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].field, "name");
        assert_eq!(keys[0].direction, Direction::Descending);
        assert_eq!(keys[1].field, "id");
        assert_eq!(keys[1].direction, Direction::Ascending);
    }

    #[test]
    fn test_bare_dash_is_malformed() {
        assert!(parse_sort_keys("name,-").is_err());
    }

    #[test]
    fn test_blank_segments_skipped() {
        let keys = parse_sort_keys("name,,").unwrap();
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_fields_split_and_trimmed() {
        let params =
            ListParams::parse(&raw(&[("fields", " title , id ,")]), 10, 20).unwrap();
        assert_eq!(params.shape_fields, vec!["title", "id"]);
    }

    #[test]
    fn test_blank_filter_dropped() {
        let params = ListParams::parse(&raw(&[("q", "   ")]), 10, 20).unwrap();
        assert!(params.filter.is_none());
    }
}
