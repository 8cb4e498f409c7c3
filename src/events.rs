//! Event system for report generation.
//!
//! This module defines the progress events emitted while a report is built, the handler
//! trait that consumes them, and the dispatcher that fans each event out to every
//! registered handler. The pagination engine and the report service receive the
//! dispatcher explicitly, so progress narration never goes through global state.
//!
//! The default handler, [`TracingEventHandler`], forwards every event to `tracing`.

use tracing::{debug, info};

/// Events that occur while a report is being built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
	/// A report command started
	ReportStarted { report: &'static str },
	/// A paginated traversal is about to issue its first request
	TraversalStarted { query: &'static str, limit: u64 },
	/// One page was received
	PageFetched {
		query: &'static str,
		page: usize,
		records: usize,
		retrieved: usize,
		total: Option<u64>,
	},
	/// A paginated traversal returned all records
	TraversalCompleted {
		query: &'static str,
		pages: usize,
		records: usize,
	},
	/// Delegations of one validator are being fetched and grouped
	ValidatorStarted { validator: String },
	/// Records were filtered or decoded down to the rows of a report
	RecordsSelected {
		report: &'static str,
		selected: usize,
		total: usize,
	},
	/// A report finished with the given number of rows
	ReportCompleted { report: &'static str, rows: usize },
}

/// Trait for handling report events.
pub trait ReportEventHandler: Send {
	/// Handle a report event.
	fn handle(&mut self, event: &ReportEvent);

	/// Get the name of this handler for diagnostics.
	fn name(&self) -> &'static str;
}

/// Event dispatcher that manages multiple event handlers.
///
/// Handlers are called in the order they are registered.
#[derive(Default)]
pub struct EventDispatcher {
	handlers: Vec<Box<dyn ReportEventHandler>>,
}

impl EventDispatcher {
	/// Create a new, empty event dispatcher.
	pub fn new() -> Self {
		Self::default()
	}

	/// Dispatcher with the tracing handler registered.
	pub fn with_tracing() -> Self {
		let mut dispatcher = Self::new();
		dispatcher.register_handler(Box::new(TracingEventHandler));
		dispatcher
	}

	pub fn register_handler(&mut self, handler: Box<dyn ReportEventHandler>) {
		debug!("Registered report event handler {}", handler.name());
		self.handlers.push(handler);
	}

	/// Dispatch an event to all registered handlers.
	pub fn dispatch(&mut self, event: ReportEvent) {
		for handler in &mut self.handlers {
			handler.handle(&event);
		}
	}
}

/// Writes every event to the `tracing` subscriber.
pub struct TracingEventHandler;

impl ReportEventHandler for TracingEventHandler {
	fn handle(&mut self, event: &ReportEvent) {
		match event {
			ReportEvent::ReportStarted { report } => info!("Building {} report", report),
			ReportEvent::TraversalStarted { query, limit } => {
				info!("Getting all {} (page limit {})", query, limit)
			}
			ReportEvent::PageFetched {
				query,
				page,
				records,
				retrieved,
				total,
			} => match total {
				Some(total) => debug!(
					"Fetched page {} of {}: {} records ({}/{})",
					page, query, records, retrieved, total
				),
				None => debug!(
					"Fetched page {} of {}: {} records (no total advertised)",
					page, query, records
				),
			},
			ReportEvent::TraversalCompleted {
				query,
				pages,
				records,
			} => info!("Retrieved {} {} in {} pages", records, query, pages),
			ReportEvent::ValidatorStarted { validator } => {
				info!("Getting delegations for validator: {}", validator)
			}
			ReportEvent::RecordsSelected {
				report,
				selected,
				total,
			} => info!("Selected {} of {} records for {}", selected, total, report),
			ReportEvent::ReportCompleted { report, rows } => {
				info!("Found {} rows for {}", rows, report)
			}
		}
	}

	fn name(&self) -> &'static str {
		"tracing"
	}
}
