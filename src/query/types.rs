//! Error and configuration types for the gRPC query client

use std::time::Duration;

/// Node queried when no `--node` is given.
pub const DEFAULT_NODE: &str = "quicksilver.grpc.kjnodes.com:11190";

/// Tuning for the query client.
#[derive(Debug, Clone)]
pub struct QueryConfig {
	/// Page size for every paginated query except accounts
	pub page_limit: u64,
	/// Page size for the accounts query, whose entries are much larger
	pub account_page_limit: u64,
	/// Deadline for a single page request
	pub request_timeout: Duration,
	/// Deadline for establishing the connection
	pub connect_timeout: Duration,
}

impl Default for QueryConfig {
	fn default() -> Self {
		Self {
			page_limit: 1000,
			account_page_limit: 500,
			request_timeout: Duration::from_secs(30),
			connect_timeout: Duration::from_secs(10),
		}
	}
}

impl QueryConfig {
	/// Use the same page size for every query.
	pub fn with_page_limit(mut self, limit: u64) -> Self {
		self.page_limit = limit;
		self.account_page_limit = limit;
		self
	}

	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}
}

/// Error types for a single query against the node
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
	#[error("Invalid node endpoint {endpoint}: {source}")]
	InvalidEndpoint {
		endpoint: String,
		#[source]
		source: tonic::transport::Error,
	},

	#[error("Transport error: {0}")]
	Transport(#[from] tonic::transport::Error),

	#[error("gRPC status: {0}")]
	Status(#[from] tonic::Status),
}
