//! Report service and integration point for the query client.
//!
//! `ReportService` turns the raw record sequences returned by a [`ChainQuery`] into
//! report tables. It owns the event dispatcher and hands it to every traversal, so all
//! progress of a command goes through the same handlers.
//!
//! The service is responsible for:
//! - running the traversals a report needs, one after another
//! - filtering, decoding or aggregating the retrieved records
//! - returning a [`ReportTable`] that the output layer can serialize
//!
//! Any error aborts the whole report; there is no partial table.

use crate::events::{EventDispatcher, ReportEvent};
use crate::output::CsvReport;
use crate::query::proto::{Any, DelegationResponse, IdentifiedChannel, Receipt, Validator};
use crate::report::ReportError;
use crate::report::channels::{ChannelStatus, ChannelStatuses};
use crate::report::delegations::{
	DelegationRecord, ValidatorDelegator, ValidatorsDelegators, aggregate,
};
use crate::report::receipts::{PendingReceipts, pending_receipts};
use crate::report::types::ReportKind;
use crate::report::vesting::{VestingAccount, VestingAccounts, extract_vesting_accounts};

use async_trait::async_trait;

/// Complete record sets a node can be asked for.
///
/// Every method runs full paginated traversals and reports progress through `events`.
#[async_trait]
pub trait ChainQuery: Send {
	async fn all_accounts(&mut self, events: &mut EventDispatcher) -> Result<Vec<Any>, ReportError>;

	async fn all_channels(
		&mut self,
		events: &mut EventDispatcher,
	) -> Result<Vec<IdentifiedChannel>, ReportError>;

	/// Receipts of every registered zone, in zone order.
	async fn all_receipts(&mut self, events: &mut EventDispatcher) -> Result<Vec<Receipt>, ReportError>;

	async fn all_validators(
		&mut self,
		events: &mut EventDispatcher,
	) -> Result<Vec<Validator>, ReportError>;

	async fn validator_delegations(
		&mut self,
		validator: &str,
		events: &mut EventDispatcher,
	) -> Result<Vec<DelegationResponse>, ReportError>;
}

/// A finished report, ready to be written
#[derive(Debug, Clone)]
pub enum ReportTable {
	PendingReceipts(PendingReceipts),
	ChannelStatuses(ChannelStatuses),
	VestingAccounts(VestingAccounts),
	ValidatorsDelegators(ValidatorsDelegators),
}

impl ReportTable {
	fn as_csv(&self) -> &dyn CsvReport {
		match self {
			ReportTable::PendingReceipts(table) => table,
			ReportTable::ChannelStatuses(table) => table,
			ReportTable::VestingAccounts(table) => table,
			ReportTable::ValidatorsDelegators(table) => table,
		}
	}
}

impl CsvReport for ReportTable {
	fn headers(&self) -> Vec<&'static str> {
		self.as_csv().headers()
	}

	fn rows(&self) -> Vec<Vec<String>> {
		self.as_csv().rows()
	}
}

/// Builds report tables from a query client
pub struct ReportService<C: ChainQuery> {
	client: C,
	events: EventDispatcher,
}

impl<C: ChainQuery> ReportService<C> {
	pub fn new(client: C, events: EventDispatcher) -> Self {
		Self { client, events }
	}

	/// Build the table of one report.
	pub async fn build(&mut self, kind: ReportKind) -> Result<ReportTable, ReportError> {
		let report = kind.name();
		self.events.dispatch(ReportEvent::ReportStarted { report });

		let table = match kind {
			ReportKind::PendingStakingReceipts => {
				ReportTable::PendingReceipts(PendingReceipts(self.pending_staking_receipts().await?))
			}
			ReportKind::ChannelsStatuses => {
				ReportTable::ChannelStatuses(ChannelStatuses(self.channel_statuses().await?))
			}
			ReportKind::VestingAccounts => {
				ReportTable::VestingAccounts(VestingAccounts(self.vesting_accounts().await?))
			}
			ReportKind::ValidatorsDelegators => ReportTable::ValidatorsDelegators(
				ValidatorsDelegators(self.validators_and_delegators().await?),
			),
		};

		self.events.dispatch(ReportEvent::ReportCompleted {
			report,
			rows: table.rows().len(),
		});
		Ok(table)
	}

	/// Receipts of all zones whose completion time is missing or zero.
	pub async fn pending_staking_receipts(&mut self) -> Result<Vec<Receipt>, ReportError> {
		let receipts = self.client.all_receipts(&mut self.events).await?;
		let total = receipts.len();

		let pending = pending_receipts(receipts);
		self.events.dispatch(ReportEvent::RecordsSelected {
			report: ReportKind::PendingStakingReceipts.name(),
			selected: pending.len(),
			total,
		});
		Ok(pending)
	}

	pub async fn channel_statuses(&mut self) -> Result<Vec<ChannelStatus>, ReportError> {
		let channels = self.client.all_channels(&mut self.events).await?;
		Ok(channels.into_iter().map(ChannelStatus::from).collect())
	}

	/// All accounts of a vesting kind; other accounts are skipped.
	pub async fn vesting_accounts(&mut self) -> Result<Vec<VestingAccount>, ReportError> {
		let accounts = self.client.all_accounts(&mut self.events).await?;

		let vesting = extract_vesting_accounts(&accounts)?;
		self.events.dispatch(ReportEvent::RecordsSelected {
			report: ReportKind::VestingAccounts.name(),
			selected: vesting.len(),
			total: accounts.len(),
		});
		Ok(vesting)
	}

	/// Delegations of every validator grouped per delegator, in validator order.
	pub async fn validators_and_delegators(&mut self) -> Result<Vec<ValidatorDelegator>, ReportError> {
		let validators = self.client.all_validators(&mut self.events).await?;

		let mut rows = Vec::new();
		for validator in validators {
			let address = validator.operator_address;
			self.events.dispatch(ReportEvent::ValidatorStarted {
				validator: address.clone(),
			});

			let delegations = self
				.client
				.validator_delegations(&address, &mut self.events)
				.await?;
			let records = delegations
				.into_iter()
				.map(DelegationRecord::try_from)
				.collect::<Result<Vec<_>, _>>()?;
			rows.extend(aggregate(records));
		}
		Ok(rows)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::events::tests::RecordingHandler;
	use crate::pagination::PaginationError;
	use crate::query::QueryError;
	use crate::query::proto::{ChannelState, Timestamp};
	use crate::report::channels::tests::channel;
	use crate::report::delegations::tests::{amount_of, delegation_response};
	use crate::report::receipts::tests::receipt;
	use crate::report::vesting::tests::{periodic_any, plain_account_any};
	use crate::report::vesting::{PERIODIC_VESTING_ACCOUNT, VestingDecodeError};

	use bigdecimal::BigDecimal;
	use bigdecimal::num_bigint::BigInt;
	use std::collections::HashMap;

	/// In-memory node
	#[derive(Default)]
	struct FakeChain {
		accounts: Vec<Any>,
		channels: Vec<IdentifiedChannel>,
		receipts: Vec<Receipt>,
		validators: Vec<Validator>,
		delegations: HashMap<String, Vec<DelegationResponse>>,
		failing_validator: Option<String>,
		queried_validators: Vec<String>,
	}

	impl FakeChain {
		fn with_validator(mut self, address: &str, delegations: Vec<DelegationResponse>) -> Self {
			self.validators.push(Validator {
				operator_address: address.to_string(),
				..Default::default()
			});
			self.delegations.insert(address.to_string(), delegations);
			self
		}
	}

	#[async_trait]
	impl ChainQuery for FakeChain {
		async fn all_accounts(&mut self, _: &mut EventDispatcher) -> Result<Vec<Any>, ReportError> {
			Ok(self.accounts.clone())
		}

		async fn all_channels(
			&mut self,
			_: &mut EventDispatcher,
		) -> Result<Vec<IdentifiedChannel>, ReportError> {
			Ok(self.channels.clone())
		}

		async fn all_receipts(&mut self, _: &mut EventDispatcher) -> Result<Vec<Receipt>, ReportError> {
			Ok(self.receipts.clone())
		}

		async fn all_validators(
			&mut self,
			_: &mut EventDispatcher,
		) -> Result<Vec<Validator>, ReportError> {
			Ok(self.validators.clone())
		}

		async fn validator_delegations(
			&mut self,
			validator: &str,
			_: &mut EventDispatcher,
		) -> Result<Vec<DelegationResponse>, ReportError> {
			self.queried_validators.push(validator.to_string());
			if self.failing_validator.as_deref() == Some(validator) {
				return Err(ReportError::Delegations {
					validator: validator.to_string(),
					source: PaginationError::PageFetch {
						query: "delegations",
						page: 3,
						source: QueryError::Status(tonic::Status::deadline_exceeded("slow node")),
					},
				});
			}
			Ok(self.delegations.get(validator).cloned().unwrap_or_default())
		}
	}

	fn service(chain: FakeChain) -> ReportService<FakeChain> {
		ReportService::new(chain, EventDispatcher::new())
	}

	#[tokio::test]
	async fn pending_receipts_report_filters_completed() {
		let chain = FakeChain {
			receipts: vec![
				receipt("a", None),
				receipt(
					"b",
					Some(Timestamp {
						seconds: 1_700_000_000,
						nanos: 0,
					}),
				),
				receipt("c", Some(Timestamp::default())),
			],
			..Default::default()
		};

		let table = service(chain)
			.build(ReportKind::PendingStakingReceipts)
			.await
			.unwrap();

		let txhashes: Vec<String> = table.rows().into_iter().map(|row| row[2].clone()).collect();
		assert_eq!(txhashes, vec!["a", "c"]);
	}

	#[tokio::test]
	async fn channel_report_has_one_row_per_channel() {
		let chain = FakeChain {
			channels: vec![
				channel("channel-0", ChannelState::Open),
				channel("channel-1", ChannelState::Closed),
			],
			..Default::default()
		};

		let table = service(chain)
			.build(ReportKind::ChannelsStatuses)
			.await
			.unwrap();

		assert!(matches!(table, ReportTable::ChannelStatuses(_)));
		assert_eq!(table.rows().len(), 2);
	}

	#[tokio::test]
	async fn vesting_report_skips_plain_accounts() {
		let chain = FakeChain {
			accounts: vec![
				plain_account_any("quick1plain"),
				periodic_any("quick1vesting"),
			],
			..Default::default()
		};

		let accounts = service(chain).vesting_accounts().await.unwrap();

		assert_eq!(accounts.len(), 1);
		assert_eq!(accounts[0].address(), "quick1vesting");
	}

	#[tokio::test]
	async fn vesting_report_fails_on_corrupt_account() {
		let chain = FakeChain {
			accounts: vec![Any {
				type_url: PERIODIC_VESTING_ACCOUNT.to_string(),
				value: vec![0x1a, 0x05],
			}],
			..Default::default()
		};

		let err = service(chain)
			.build(ReportKind::VestingAccounts)
			.await
			.unwrap_err();

		assert!(matches!(
			err,
			ReportError::Vesting(VestingDecodeError::Decode { .. })
		));
	}

	#[tokio::test]
	async fn delegations_are_grouped_per_validator() {
		let chain = FakeChain::default()
			.with_validator(
				"quickvaloper1a",
				vec![
					delegation_response("quickvaloper1a", "quick1d1", 10, "uqck", "100"),
					delegation_response("quickvaloper1a", "quick1d2", 1, "uqck", "7"),
					delegation_response("quickvaloper1a", "quick1d1", 5, "uqck", "50"),
				],
			)
			.with_validator("quickvaloper1empty", Vec::new())
			.with_validator(
				"quickvaloper1b",
				vec![delegation_response("quickvaloper1b", "quick1d1", 2, "uqck", "20")],
			);

		let rows = service(chain).validators_and_delegators().await.unwrap();

		let keys: Vec<(&str, &str)> = rows
			.iter()
			.map(|row| (row.validator_address.as_str(), row.delegator_address.as_str()))
			.collect();
		assert_eq!(
			keys,
			vec![
				("quickvaloper1a", "quick1d1"),
				("quickvaloper1a", "quick1d2"),
				("quickvaloper1b", "quick1d1"),
			]
		);
		assert_eq!(rows[0].total_shares, BigDecimal::from(15));
		assert_eq!(amount_of(&rows[0], "uqck"), BigInt::from(150));
	}

	#[tokio::test]
	async fn failing_validator_aborts_the_report() {
		let mut chain = FakeChain::default()
			.with_validator("quickvaloper1a", Vec::new())
			.with_validator("quickvaloper1b", Vec::new())
			.with_validator("quickvaloper1c", Vec::new());
		chain.failing_validator = Some("quickvaloper1b".to_string());

		let mut service = service(chain);
		let err = service
			.build(ReportKind::ValidatorsDelegators)
			.await
			.unwrap_err();

		assert!(err.to_string().contains("quickvaloper1b"));
		assert_eq!(
			service.client.queried_validators,
			vec!["quickvaloper1a", "quickvaloper1b"]
		);
	}

	#[tokio::test]
	async fn build_reports_start_and_completion() {
		let recorder = RecordingHandler::default();
		let chain = FakeChain {
			channels: vec![channel("channel-0", ChannelState::Open)],
			..Default::default()
		};
		let mut service = ReportService::new(chain, recorder.dispatcher());

		service.build(ReportKind::ChannelsStatuses).await.unwrap();

		assert_eq!(
			recorder.recorded(),
			vec![
				ReportEvent::ReportStarted {
					report: "channels-statuses"
				},
				ReportEvent::ReportCompleted {
					report: "channels-statuses",
					rows: 1
				},
			]
		);
	}
}
