//! # Quill Shared
//!
//! Request and response payloads shared by the service layer and whatever
//! transport sits in front of it.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, PageResponse};
