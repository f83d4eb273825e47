//! # Domain Entities
//!
//! - **User**: Account with email and Argon2 password hash
//! - **Session**: Server-side record of a refresh token
//! - **Gun**: An inventory item
//!
//! Each entity has an associated repository trait defining data access
//! operations. The traits are implemented in the infrastructure layer.

mod gun;
mod session;
mod user;

pub use gun::{Gun, GunChanges, GunRepository, NewGun};
pub use session::{Session, SessionRepository};
pub use user::{normalize_email, NewUser, User, UserRepository};

#[cfg(test)]
pub use gun::MockGunRepository;
#[cfg(test)]
pub use session::MockSessionRepository;
#[cfg(test)]
pub use user::MockUserRepository;
