//! Response construction: problem payloads, field shaping, pagination.

pub mod pagination;
pub mod problem;
pub mod shaping;

pub use pagination::{PAGINATION_HEADER, PageLinkBuilder, PaginationMeta};
pub use problem::{PROBLEM_CONTENT_TYPE, ProblemDetails};
pub use shaping::apply_shape;
