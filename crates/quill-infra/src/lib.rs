//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`, plus the
//! ambient wiring: configuration, telemetry and the application state.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL persistence via SeaORM
//!
//! Without `postgres` only the in-memory repositories are available.

pub mod config;
pub mod memory;
pub mod state;
pub mod telemetry;

#[cfg(feature = "postgres")]
pub mod database;

pub use config::{AppConfig, DatabaseConfig};
pub use memory::{
    InMemoryArticleRepository, InMemoryRepository, InMemoryRoleStore, in_memory_repositories,
};
pub use state::AppState;
pub use telemetry::{TelemetryConfig, init_telemetry};

#[cfg(feature = "postgres")]
pub use database::postgres_repositories;
