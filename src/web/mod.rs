//! Web server module
//!
//! HTTP API for listing and invoking the registered search functions.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
