//! Agent function surface
//!
//! Search entry points wrapped as named, described functions that a host
//! agent framework can list and invoke with JSON arguments.

mod registry;
mod traits;
mod web_search;

pub use registry::FunctionRegistry;
pub use traits::*;
pub use web_search::{WebSearch, WebSearchContext, WebSearchDetailed};
