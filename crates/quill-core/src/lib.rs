//! # Quill Core
//!
//! The domain layer of the Quill publishing backend: entities, the ports the
//! infrastructure must implement, and the services holding the article
//! lifecycle and approval workflow.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod reading;
pub mod services;

pub use error::{DomainError, RepoError};
pub use services::Services;
