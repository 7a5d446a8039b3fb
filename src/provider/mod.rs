//! Search provider module
//!
//! Defines the provider trait the search client talks to, and the Tavily
//! implementation of it.

mod tavily;
mod traits;

pub use tavily::TavilyProvider;
pub use traits::*;
