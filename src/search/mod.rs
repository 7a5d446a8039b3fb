//! Search client module
//!
//! The client owns the immutable configuration and exposes the plain,
//! detailed, and context search entry points.

mod client;
mod models;

pub use client::SearchClient;
pub use models::*;
