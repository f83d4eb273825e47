//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **UserRepository** - Registered API users
//! - **SessionRepository** - Refresh token sessions
//! - **GunRepository** - Gun inventory with filtered, paginated listing
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgGunRepository, PgUserRepository};
//!
//! fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let gun_repo = PgGunRepository::new(pool);
//! }
//! ```

pub mod gun_repository;
pub mod session_repository;
pub mod user_repository;

pub use gun_repository::PgGunRepository;
pub use session_repository::PgSessionRepository;
pub use user_repository::PgUserRepository;
