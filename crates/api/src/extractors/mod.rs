//! Request extractors: list query parameters and correlation metadata.

pub mod list_params;
pub mod request_meta;

pub use list_params::{ListParams, RawListParams, parse_sort_keys};
pub use request_meta::{REQUEST_ID_HEADER, RequestMeta};
