//! # Domain Layer
//!
//! Core business types of the gun store, independent of HTTP and SQL.
//!
//! ## Structure
//!
//! - **entities**: `User`, `Session`, `Gun` and their repository traits
//! - **value_objects**: Pagination and the gun list query (filter, sort, order)
//!
//! Repository traits define the data access contracts; the infrastructure
//! layer implements them.

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
