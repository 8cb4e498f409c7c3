use crate::pagination::PaginationError;
use crate::report::delegations::MalformedDelegation;
use crate::report::vesting::VestingDecodeError;

/// The reports this tool can build, one per command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
	PendingStakingReceipts,
	ChannelsStatuses,
	VestingAccounts,
	ValidatorsDelegators,
}

impl ReportKind {
	/// Command name of the report, also used in logs.
	pub fn name(&self) -> &'static str {
		match self {
			ReportKind::PendingStakingReceipts => "pending-staking-receipts",
			ReportKind::ChannelsStatuses => "channels-statuses",
			ReportKind::VestingAccounts => "vesting-accounts",
			ReportKind::ValidatorsDelegators => "validators-delegators",
		}
	}
}

/// Error types for report generation
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
	#[error("Pagination error: {0}")]
	Pagination(#[from] PaginationError),

	#[error("Failed to get zones: {0}")]
	Zones(#[source] PaginationError),

	#[error("Failed to get receipts for chain {chain_id}: {source}")]
	Receipts {
		chain_id: String,
		#[source]
		source: PaginationError,
	},

	#[error("Failed to get delegations for validator {validator}: {source}")]
	Delegations {
		validator: String,
		#[source]
		source: PaginationError,
	},

	#[error("Failed to extract vesting accounts: {0}")]
	Vesting(#[from] VestingDecodeError),

	#[error("Malformed delegation: {0}")]
	Delegation(#[from] MalformedDelegation),
}
