//! Delegation grouping for the validator/delegator report.
//!
//! A validator may hold several delegation entries for the same delegator. [`aggregate`]
//! folds them into one row per (validator, delegator) pair, summing the shares and the
//! balance of every denomination with arbitrary precision.

use crate::output::CsvReport;
use crate::query::proto::DelegationResponse;
use crate::utils::{bracketed, format_legacy_dec};
use crate::utils::format::LEGACY_DEC_PRECISION;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, ParseBigDecimalError, Zero};
use std::collections::HashMap;
use std::str::FromStr;

/// Errors converting a wire delegation into a [`DelegationRecord`]
#[derive(Debug, thiserror::Error)]
pub enum MalformedDelegation {
	#[error("delegation entry without delegation")]
	MissingDelegation,

	#[error("delegation of {delegator} without balance")]
	MissingBalance { delegator: String },

	#[error("invalid shares {shares:?} for {delegator}: {source}")]
	Shares {
		delegator: String,
		shares: String,
		#[source]
		source: ParseBigDecimalError,
	},

	#[error("invalid amount {amount:?} for {delegator}")]
	Amount { delegator: String, amount: String },
}

/// One delegation entry of a validator
#[derive(Debug, Clone, PartialEq)]
pub struct DelegationRecord {
	pub validator_address: String,
	pub delegator_address: String,
	pub shares: BigDecimal,
	pub denom: String,
	pub amount: BigInt,
}

impl TryFrom<DelegationResponse> for DelegationRecord {
	type Error = MalformedDelegation;

	fn try_from(response: DelegationResponse) -> Result<Self, Self::Error> {
		let delegation = response
			.delegation
			.ok_or(MalformedDelegation::MissingDelegation)?;
		let balance = response
			.balance
			.ok_or_else(|| MalformedDelegation::MissingBalance {
				delegator: delegation.delegator_address.clone(),
			})?;

		let shares = parse_legacy_dec(&delegation.shares).map_err(|source| {
			MalformedDelegation::Shares {
				delegator: delegation.delegator_address.clone(),
				shares: delegation.shares.clone(),
				source,
			}
		})?;
		let amount = BigInt::from_str(&balance.amount).map_err(|_| MalformedDelegation::Amount {
			delegator: delegation.delegator_address.clone(),
			amount: balance.amount.clone(),
		})?;

		Ok(Self {
			validator_address: delegation.validator_address,
			delegator_address: delegation.delegator_address,
			shares,
			denom: balance.denom,
			amount,
		})
	}
}

/// Parse a `LegacyDec` as sent on the wire.
///
/// The gRPC encoding is the integer scaled by 10^18 without a decimal point. A value
/// that already carries a point is taken as is.
pub fn parse_legacy_dec(raw: &str) -> Result<BigDecimal, ParseBigDecimalError> {
	let value = BigDecimal::from_str(raw)?;
	if raw.contains('.') {
		return Ok(value);
	}
	let (digits, exponent) = value.into_bigint_and_exponent();
	Ok(BigDecimal::new(digits, exponent + LEGACY_DEC_PRECISION))
}

/// Aggregated delegations of one delegator to one validator
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorDelegator {
	pub validator_address: String,
	pub delegator_address: String,
	/// Summed balance per denomination, in first-seen order
	pub delegations: Vec<(String, BigInt)>,
	pub total_shares: BigDecimal,
}

impl ValidatorDelegator {
	fn new(validator_address: String, delegator_address: String) -> Self {
		Self {
			validator_address,
			delegator_address,
			delegations: Vec::new(),
			total_shares: BigDecimal::zero(),
		}
	}

	fn add(&mut self, shares: BigDecimal, denom: String, amount: BigInt) {
		self.total_shares += shares;
		match self.delegations.iter_mut().find(|(known, _)| *known == denom) {
			Some((_, total)) => *total += amount,
			None => self.delegations.push((denom, amount)),
		}
	}

	fn row(&self) -> Vec<String> {
		let delegations = bracketed(
			self.delegations
				.iter()
				.map(|(denom, amount)| format!("{{{},{}}}", denom, amount)),
		);
		vec![
			self.validator_address.clone(),
			self.delegator_address.clone(),
			delegations,
			format_legacy_dec(&self.total_shares),
		]
	}
}

/// Group delegation records by (validator, delegator).
///
/// Rows come out in the order their key was first seen.
pub fn aggregate<I>(records: I) -> Vec<ValidatorDelegator>
where
	I: IntoIterator<Item = DelegationRecord>,
{
	let mut rows: Vec<ValidatorDelegator> = Vec::new();
	let mut index: HashMap<(String, String), usize> = HashMap::new();

	for record in records {
		let key = (
			record.validator_address.clone(),
			record.delegator_address.clone(),
		);
		let position = *index.entry(key).or_insert_with(|| {
			rows.push(ValidatorDelegator::new(
				record.validator_address,
				record.delegator_address,
			));
			rows.len() - 1
		});
		rows[position].add(record.shares, record.denom, record.amount);
	}

	rows
}

/// Table of the `validators-delegators` report
#[derive(Debug, Clone, Default)]
pub struct ValidatorsDelegators(pub Vec<ValidatorDelegator>);

impl CsvReport for ValidatorsDelegators {
	fn headers(&self) -> Vec<&'static str> {
		vec![
			"ValidatorAddress",
			"DelegatorAddress",
			"Delegations",
			"TotalShares",
		]
	}

	fn rows(&self) -> Vec<Vec<String>> {
		self.0.iter().map(ValidatorDelegator::row).collect()
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::query::proto::{Coin, Delegation};

	fn record(validator: &str, delegator: &str, shares: &str, denom: &str, amount: u64) -> DelegationRecord {
		DelegationRecord {
			validator_address: validator.to_string(),
			delegator_address: delegator.to_string(),
			shares: BigDecimal::from_str(shares).unwrap(),
			denom: denom.to_string(),
			amount: BigInt::from(amount),
		}
	}

	/// Wire delegation with shares scaled by 10^18 the way the node sends them.
	pub(crate) fn delegation_response(
		validator: &str,
		delegator: &str,
		whole_shares: u64,
		denom: &str,
		amount: &str,
	) -> DelegationResponse {
		DelegationResponse {
			delegation: Some(Delegation {
				delegator_address: delegator.to_string(),
				validator_address: validator.to_string(),
				shares: format!("{}000000000000000000", whole_shares),
			}),
			balance: Some(Coin::new(denom, amount)),
		}
	}

	/// Summed amount of a denomination, zero when never delegated.
	pub(crate) fn amount_of(row: &ValidatorDelegator, denom: &str) -> BigInt {
		row.delegations
			.iter()
			.find(|(known, _)| known == denom)
			.map_or_else(BigInt::zero, |(_, amount)| amount.clone())
	}

	#[test]
	fn same_delegator_entries_are_summed() {
		let rows = aggregate(vec![
			record("V", "D1", "10", "uatom", 100),
			record("V", "D1", "5", "uatom", 50),
		]);

		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].validator_address, "V");
		assert_eq!(rows[0].delegator_address, "D1");
		assert_eq!(rows[0].total_shares, BigDecimal::from(15));
		assert_eq!(rows[0].delegations, vec![("uatom".to_string(), BigInt::from(150))]);
	}

	#[test]
	fn empty_input_gives_no_rows() {
		assert!(aggregate(Vec::new()).is_empty());
	}

	#[test]
	fn one_row_per_delegator_in_first_seen_order() {
		let rows = aggregate(vec![
			record("V", "D2", "1.5", "uqck", 1),
			record("V", "D1", "2.25", "uqck", 2),
			record("V", "D2", "0.5", "uatom", 3),
			record("V", "D1", "0.75", "uqck", 4),
			record("V", "D3", "0", "uqck", 0),
		]);

		let delegators: Vec<&str> = rows
			.iter()
			.map(|row| row.delegator_address.as_str())
			.collect();
		assert_eq!(delegators, vec!["D2", "D1", "D3"]);

		assert_eq!(rows[0].total_shares, BigDecimal::from(2));
		assert_eq!(amount_of(&rows[0], "uqck"), BigInt::from(1));
		assert_eq!(amount_of(&rows[0], "uatom"), BigInt::from(3));
		assert_eq!(rows[1].total_shares, BigDecimal::from(3));
		assert_eq!(amount_of(&rows[1], "uqck"), BigInt::from(6));
		assert_eq!(amount_of(&rows[1], "uatom"), BigInt::zero());
	}

	#[test]
	fn validators_are_never_merged() {
		let rows = aggregate(vec![
			record("V1", "D", "1", "uqck", 10),
			record("V2", "D", "1", "uqck", 20),
			record("V1", "D", "1", "uqck", 30),
		]);

		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].validator_address, "V1");
		assert_eq!(amount_of(&rows[0], "uqck"), BigInt::from(40));
		assert_eq!(rows[1].validator_address, "V2");
		assert_eq!(amount_of(&rows[1], "uqck"), BigInt::from(20));
	}

	#[test]
	fn amounts_beyond_u64_do_not_overflow() {
		let huge = "340282366920938463463374607431768211455";
		let records = vec![
			DelegationRecord::try_from(delegation_response("V", "D", 1, "aevmos", huge)).unwrap(),
			DelegationRecord::try_from(delegation_response("V", "D", 1, "aevmos", huge)).unwrap(),
		];

		let rows = aggregate(records);

		assert_eq!(
			amount_of(&rows[0], "aevmos").to_string(),
			"680564733841876926926749214863536422910"
		);
	}

	#[test]
	fn shares_repeatedly_added_stay_exact() {
		let records = (0..1000).map(|_| record("V", "D", "0.1", "uqck", 1));
		let rows = aggregate(records);
		assert_eq!(rows[0].total_shares, BigDecimal::from(100));
	}

	#[test]
	fn wire_shares_are_scaled() {
		assert_eq!(
			parse_legacy_dec("15000000000000000000").unwrap(),
			BigDecimal::from(15)
		);
		assert_eq!(
			parse_legacy_dec("1").unwrap(),
			BigDecimal::from_str("0.000000000000000001").unwrap()
		);
		assert_eq!(
			parse_legacy_dec("2.5").unwrap(),
			BigDecimal::from_str("2.5").unwrap()
		);
		assert!(parse_legacy_dec("abc").is_err());
	}

	#[test]
	fn malformed_wire_delegations_are_rejected() {
		let missing = DelegationResponse {
			delegation: None,
			balance: Some(Coin::new("uqck", 1)),
		};
		assert!(matches!(
			DelegationRecord::try_from(missing),
			Err(MalformedDelegation::MissingDelegation)
		));

		let mut no_balance = delegation_response("V", "D", 1, "uqck", "1");
		no_balance.balance = None;
		assert!(matches!(
			DelegationRecord::try_from(no_balance),
			Err(MalformedDelegation::MissingBalance { .. })
		));

		let bad_amount = delegation_response("V", "D", 1, "uqck", "1.5");
		assert!(matches!(
			DelegationRecord::try_from(bad_amount),
			Err(MalformedDelegation::Amount { .. })
		));
	}

	#[test]
	fn rows_render_delegations_and_shares() {
		let rows = ValidatorsDelegators(aggregate(vec![
			record("V", "D1", "10", "uatom", 100),
			record("V", "D1", "5", "uqck", 50),
		]))
		.rows();

		assert_eq!(
			rows,
			vec![vec![
				"V".to_string(),
				"D1".to_string(),
				"[{uatom,100},{uqck,50}]".to_string(),
				"15.000000000000000000".to_string(),
			]]
		);
	}
}
