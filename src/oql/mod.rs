//! Query generation module.
//!
//! - [`token`] - token types for query text generation
//! - [`context`] - the per-prefix accumulator the acceptance rules write into
//! - [`builder`] - deterministic rendering of a context into one query string

pub mod builder;
pub mod context;
pub mod token;

pub use builder::{build_query, parse_select_list};
pub use context::{ContextError, OqlContext, OrderTerm};
pub use token::{Token, TokenStream};
