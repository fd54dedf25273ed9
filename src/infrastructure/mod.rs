//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - reqwest-based vehicle API client
//! - Tokio runtime bridge for async operations

pub mod api;
pub mod runtime;
