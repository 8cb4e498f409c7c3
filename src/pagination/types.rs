use crate::query::QueryError;

/// Errors that abort a paginated traversal. Records already received are dropped.
#[derive(Debug, thiserror::Error)]
pub enum PaginationError {
	#[error("Failed to get page {page} of {query}: {source}")]
	PageFetch {
		query: &'static str,
		/// 1-based index of the failed page
		page: usize,
		#[source]
		source: QueryError,
	},

	#[error(
		"Page {page} of {query} was empty after {retrieved} of {total} advertised records"
	)]
	Stalled {
		query: &'static str,
		page: usize,
		retrieved: usize,
		total: u64,
	},

	#[error("Page limit for {query} must be greater than zero")]
	ZeroLimit { query: &'static str },
}
