//! Result types and token-budget limiting
//!
//! Defines the provider records, their cleaned projection, and the envelope
//! that gets rendered.

mod budget;
mod types;

pub use budget::{
    limit_to_token_budget, result_len, serialized_len, take_within_budget, take_within_budget_by,
};
pub use types::*;
