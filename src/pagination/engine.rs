//! Offset pagination engine.
//!
//! [`fetch_all`] drives a [`PageSource`] until the number of received records reaches
//! the total advertised by the first response. Pages are requested strictly one after
//! another since each request carries the offset advanced past the previous page.

use crate::events::{EventDispatcher, ReportEvent};
use crate::pagination::PaginationError;
use crate::pagination::progress::PageProgress;
use crate::query::QueryError;
use crate::query::proto::PageRequest;

use async_trait::async_trait;

/// Upper bound for the up-front allocation sized from an advertised total.
const MAX_PREALLOCATED_RECORDS: usize = 100_000;

/// A request carrying offset pagination controls.
pub trait Paginated {
	fn page_request(&self) -> Option<&PageRequest>;

	/// Pagination controls, created with defaults if the request has none.
	fn page_request_mut(&mut self) -> &mut PageRequest;

	fn limit(&self) -> u64 {
		self.page_request().map_or(0, |page| page.limit)
	}

	/// Move the offset past the page that was just received.
	fn advance(&mut self, limit: u64) {
		let page = self.page_request_mut();
		page.offset = page.offset.saturating_add(limit);
	}
}

/// A response that may advertise the total number of records of the query.
pub trait PagedResponse {
	fn total(&self) -> Option<u64>;
}

/// One paginated query: how to send a page request and how to pull the records out
/// of its response.
#[async_trait]
pub trait PageSource: Send {
	type Request: Paginated + Send + Sync;
	type Response: PagedResponse + Send;
	type Record: Send;

	/// Name of the queried collection for logs and errors
	fn name(&self) -> &'static str;

	/// Issue a single page request.
	async fn send(&mut self, request: &Self::Request) -> Result<Self::Response, QueryError>;

	/// Project the records out of a page response.
	fn extract(&self, response: Self::Response) -> Vec<Self::Record>;
}

/// Fetch every record of a paginated query.
///
/// The first response decides the total. Without one, the first page is the whole
/// result. Any failed page aborts the traversal and nothing fetched so far is
/// returned. A page that comes back empty before the total is reached fails with
/// [`PaginationError::Stalled`].
pub async fn fetch_all<S>(
	source: &mut S,
	mut request: S::Request,
	events: &mut EventDispatcher,
) -> Result<Vec<S::Record>, PaginationError>
where
	S: PageSource + ?Sized,
{
	let query = source.name();
	let limit = request.limit();
	if limit == 0 {
		return Err(PaginationError::ZeroLimit { query });
	}
	events.dispatch(ReportEvent::TraversalStarted { query, limit });

	let response = source
		.send(&request)
		.await
		.map_err(|err| PaginationError::PageFetch {
			query,
			page: 1,
			source: err,
		})?;
	let total = response.total();
	let records = source.extract(response);

	let mut progress = PageProgress::first_page(records.len(), total);
	let mut result = Vec::with_capacity(preallocation(total, records.len()));
	events.dispatch(page_fetched(query, &progress, records.len()));
	result.extend(records);

	while progress.needs_more() {
		let page = progress.next_page();
		request.advance(limit);

		let response = source
			.send(&request)
			.await
			.map_err(|err| PaginationError::PageFetch {
				query,
				page,
				source: err,
			})?;
		let records = source.extract(response);
		if records.is_empty() {
			return Err(PaginationError::Stalled {
				query,
				page,
				retrieved: progress.retrieved(),
				total: progress.total().unwrap_or_default(),
			});
		}

		progress.record_page(records.len());
		events.dispatch(page_fetched(query, &progress, records.len()));
		result.extend(records);
	}

	events.dispatch(ReportEvent::TraversalCompleted {
		query,
		pages: progress.pages(),
		records: result.len(),
	});
	Ok(result)
}

fn preallocation(total: Option<u64>, first_page: usize) -> usize {
	match total {
		Some(total) => usize::try_from(total)
			.unwrap_or(usize::MAX)
			.max(first_page)
			.min(MAX_PREALLOCATED_RECORDS),
		None => first_page,
	}
}

fn page_fetched(query: &'static str, progress: &PageProgress, records: usize) -> ReportEvent {
	ReportEvent::PageFetched {
		query,
		page: progress.pages(),
		records,
		retrieved: progress.retrieved(),
		total: progress.total(),
	}
}
