//! Pagination Module
//!
//! Turns the page-at-a-time list queries of a node into complete record sequences.
//!
//! - `engine`: the [`PageSource`] strategy trait, the request/response pagination traits
//!   and [`fetch_all`], which drives a source to completion.
//! - `progress`: counts pages and records against the advertised total.
//! - `types`: the errors that abort a traversal.

/// Pagination strategy traits and the traversal loop
pub mod engine;
/// Counted progress of a traversal
pub mod progress;
/// Traversal errors
mod types;

pub use engine::{PageSource, PagedResponse, Paginated, fetch_all};
pub use types::PaginationError;
