//! Pagination metadata.
//!
//! List responses carry an `X-Pagination` header: a JSON document with the
//! total match count, the page window, and absolute previous/next page
//! links that echo the request's sort, shape, and filter parameters.

use serde::Serialize;
use url::Url;

/// Response header carrying pagination metadata.
pub const PAGINATION_HEADER: &str = "x-pagination";

/// Pagination metadata for a list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    total_count: u64,
    page_size: usize,
    current_page: usize,
    total_pages: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_page_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_page_link: Option<String>,
}

impl PaginationMeta {
    /// Creates metadata for a page window over `total_count` matches.
    pub fn new(total_count: u64, current_page: usize, page_size: usize) -> Self {
        let total_pages = total_count.div_ceil(page_size.max(1) as u64);
        Self {
            total_count,
            page_size,
            current_page,
            total_pages,
            previous_page_link: None,
            next_page_link: None,
        }
    }

    /// Returns true if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns true if a next page exists.
    pub fn has_next(&self) -> bool {
        (self.current_page as u64) < self.total_pages
    }

    /// Sets the previous-page link.
    pub fn with_previous_link(mut self, link: impl Into<String>) -> Self {
        self.previous_page_link = Some(link.into());
        self
    }

    /// Sets the next-page link.
    pub fn with_next_link(mut self, link: impl Into<String>) -> Self {
        self.next_page_link = Some(link.into());
        self
    }

    /// Returns the total number of pages.
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Renders the header value.
    pub fn header_value(&self) -> String {
        // PaginationMeta serializes infallibly (strings and integers only)
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Builds absolute page links for one list request.
#[derive(Debug)]
pub struct PageLinkBuilder<'a> {
    base_url: &'a str,
    entity_type: &'a str,
    page_size: usize,
    sort: Option<&'a str>,
    fields: Option<&'a str>,
    filter: Option<&'a str>,
}

impl<'a> PageLinkBuilder<'a> {
    /// Creates a link builder for an entity type's list route.
    pub fn new(base_url: &'a str, entity_type: &'a str, page_size: usize) -> Self {
        Self {
            base_url,
            entity_type,
            page_size,
            sort: None,
            fields: None,
            filter: None,
        }
    }

    /// Echoes the request's raw sort expression.
    pub fn with_sort(mut self, sort: Option<&'a str>) -> Self {
        self.sort = sort;
        self
    }

    /// Echoes the request's raw fields expression.
    pub fn with_fields(mut self, fields: Option<&'a str>) -> Self {
        self.fields = fields;
        self
    }

    /// Echoes the request's text filter.
    pub fn with_filter(mut self, filter: Option<&'a str>) -> Self {
        self.filter = filter;
        self
    }

    /// Builds the absolute link for a page number.
    ///
    /// Returns `None` if the configured base URL does not parse.
    pub fn link_for(&self, page: usize) -> Option<String> {
        let mut url = Url::parse(self.base_url).ok()?;
        url.set_path(self.entity_type);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("pageSize", &self.page_size.to_string());
            if let Some(sort) = self.sort {
                pairs.append_pair("sort", sort);
            }
            if let Some(fields) = self.fields {
                pairs.append_pair("fields", fields);
            }
            if let Some(filter) = self.filter {
                pairs.append_pair("q", filter);
            }
        }
        Some(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PaginationMeta::new(21, 1, 10).total_pages(), 3);
        assert_eq!(PaginationMeta::new(20, 1, 10).total_pages(), 2);
        assert_eq!(PaginationMeta::new(0, 1, 10).total_pages(), 0);
    }

    #[test]
    fn test_has_previous_and_next() {
        let first = PaginationMeta::new(30, 1, 10);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let middle = PaginationMeta::new(30, 2, 10);
        assert!(middle.has_previous());
        assert!(middle.has_next());

        let last = PaginationMeta::new(30, 3, 10);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn test_header_value_camel_case() {
        let meta = PaginationMeta::new(12, 2, 10)
            .with_previous_link("http://localhost:8080/authors?page=1&pageSize=10");
        let value: serde_json::Value = serde_json::from_str(&meta.header_value()).unwrap();

        assert_eq!(value["totalCount"], 12);
        assert_eq!(value["pageSize"], 10);
        assert_eq!(value["currentPage"], 2);
        assert_eq!(value["totalPages"], 2);
        assert!(value["previousPageLink"].is_string());
        assert!(value.get("nextPageLink").is_none());
    }

    #[test]
    fn test_link_builder_minimal() {
        let link = PageLinkBuilder::new("http://localhost:8080", "authors", 10)
            .link_for(2)
            .unwrap();
        assert_eq!(link, "http://localhost:8080/authors?page=2&pageSize=10");
    }

    #[test]
    fn test_link_builder_echoes_parameters() {
        let link = PageLinkBuilder::new("http://localhost:8080", "authors", 10)
            .with_sort(Some("-name"))
            .with_fields(Some("firstName,lastName"))
            .with_filter(Some("rum"))
            .link_for(1)
            .unwrap();

        assert!(link.contains("sort=-name"));
        assert!(link.contains("fields=firstName%2ClastName"));
        assert!(link.contains("q=rum"));
    }

    #[test]
    fn test_link_builder_invalid_base() {
        assert!(PageLinkBuilder::new("not a url", "authors", 10)
            .link_for(1)
            .is_none());
    }
}
