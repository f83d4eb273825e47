//! # Gun Store Library
//!
//! A REST API for a gun store inventory:
//! - JWT authentication with rotating refresh sessions
//! - Gun CRUD with filtering, sorting and pagination
//! - PostgreSQL storage via sqlx
//! - Prometheus metrics and structured logging
//!
//! ## Architecture
//!
//! - **Domain Layer**: Entities, value objects and repository traits
//! - **Application Layer**: Services and DTOs
//! - **Infrastructure Layer**: PostgreSQL repositories, migrations, metrics
//! - **Presentation Layer**: axum routes, handlers, extractors and middleware
//!
//! ## Module Structure
//!
//! ```text
//! gun_store/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, repository traits
//! +-- application/    Services and DTOs
//! +-- infrastructure/ Database, repositories, metrics
//! +-- presentation/   HTTP routes, handlers, middleware
//! +-- shared/         Errors and validation helpers
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
