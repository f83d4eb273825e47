//! # Domain Value Objects
//!
//! - **Pagination** / **Page**: Offset paging and a page of results
//! - **GunListQuery**: Filter, sort field and order for the gun list

mod gun_query;
mod pagination;

pub use gun_query::{
    escape_like, parse_optional, GunFilter, GunListQuery, GunSortField, ListQueryError, SortOrder,
};
pub use pagination::{Page, Pagination};
