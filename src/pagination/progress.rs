//! Progress tracking for a paginated traversal.
//!
//! `PageProgress` counts pages and records against the total advertised by the first
//! response, and decides whether another page has to be requested.

/// Counted progress of one traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageProgress {
	/// Pages received so far
	pages: usize,
	/// Records received so far, across all pages
	retrieved: usize,
	/// Total advertised by the first response, if any
	total: Option<u64>,
}

impl PageProgress {
	/// Progress after the first page.
	pub fn first_page(records: usize, total: Option<u64>) -> Self {
		Self {
			pages: 1,
			retrieved: records,
			total,
		}
	}

	/// Record another received page.
	pub fn record_page(&mut self, records: usize) {
		self.pages += 1;
		self.retrieved += records;
	}

	/// True while fewer records were received than the advertised total.
	///
	/// Without a total the first page is the whole result.
	pub fn needs_more(&self) -> bool {
		match self.total {
			Some(total) => (self.retrieved as u64) < total,
			None => false,
		}
	}

	/// 1-based index of the page that would be requested next.
	pub fn next_page(&self) -> usize {
		self.pages + 1
	}

	pub fn pages(&self) -> usize {
		self.pages
	}

	pub fn retrieved(&self) -> usize {
		self.retrieved
	}

	pub fn total(&self) -> Option<u64> {
		self.total
	}
}
