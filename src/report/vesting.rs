//! Vesting account decoding.
//!
//! Accounts arrive as `Any` envelopes. The type URL decides which of the four vesting
//! account kinds the payload holds; anything else is reported as
//! [`VestingDecodeError::NotApplicable`] so callers can skip ordinary accounts while
//! still failing on a vesting payload that does not parse.

use crate::output::CsvReport;
use crate::query::proto::{
	Any, BaseVestingAccount, Coin, ContinuousVestingAccount, DelayedVestingAccount, Period,
	PeriodicVestingAccount, PermanentLockedAccount,
};
use crate::utils::format_coins;

use itertools::Itertools;
use prost::Message;

pub const DELAYED_VESTING_ACCOUNT: &str = "/cosmos.vesting.v1beta1.DelayedVestingAccount";
pub const CONTINUOUS_VESTING_ACCOUNT: &str = "/cosmos.vesting.v1beta1.ContinuousVestingAccount";
pub const PERIODIC_VESTING_ACCOUNT: &str = "/cosmos.vesting.v1beta1.PeriodicVestingAccount";
pub const PERMANENT_LOCKED_ACCOUNT: &str = "/cosmos.vesting.v1beta1.PermanentLockedAccount";

const NOT_APPLICABLE: &str = "N/A";

/// The four vesting account kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VestingKind {
	Delayed,
	Continuous,
	Periodic,
	PermanentLocked,
}

impl VestingKind {
	/// Exact match on the type URL of an `Any` envelope.
	pub fn from_type_url(type_url: &str) -> Option<Self> {
		match type_url {
			DELAYED_VESTING_ACCOUNT => Some(VestingKind::Delayed),
			CONTINUOUS_VESTING_ACCOUNT => Some(VestingKind::Continuous),
			PERIODIC_VESTING_ACCOUNT => Some(VestingKind::Periodic),
			PERMANENT_LOCKED_ACCOUNT => Some(VestingKind::PermanentLocked),
			_ => None,
		}
	}

	pub fn type_url(&self) -> &'static str {
		match self {
			VestingKind::Delayed => DELAYED_VESTING_ACCOUNT,
			VestingKind::Continuous => CONTINUOUS_VESTING_ACCOUNT,
			VestingKind::Periodic => PERIODIC_VESTING_ACCOUNT,
			VestingKind::PermanentLocked => PERMANENT_LOCKED_ACCOUNT,
		}
	}

	/// Name written to the `AccountType` column
	pub fn name(&self) -> &'static str {
		match self {
			VestingKind::Delayed => "Delayed",
			VestingKind::Continuous => "Continuous",
			VestingKind::Periodic => "Periodic",
			VestingKind::PermanentLocked => "PermanentLocked",
		}
	}
}

/// Error types for vesting account decoding
#[derive(Debug, thiserror::Error)]
pub enum VestingDecodeError {
	#[error("Not a vesting account: {type_url}")]
	NotApplicable { type_url: String },

	#[error("Failed to decode {type_url}: {source}")]
	Decode {
		type_url: &'static str,
		#[source]
		source: prost::DecodeError,
	},
}

/// A decoded vesting account, exactly one kind per value
#[derive(Debug, Clone, PartialEq)]
pub enum VestingAccount {
	Delayed(DelayedVestingAccount),
	Continuous(ContinuousVestingAccount),
	Periodic(PeriodicVestingAccount),
	PermanentLocked(PermanentLockedAccount),
}

impl VestingAccount {
	/// Decode a payload according to its type URL.
	pub fn decode(type_url: &str, payload: &[u8]) -> Result<Self, VestingDecodeError> {
		let kind =
			VestingKind::from_type_url(type_url).ok_or_else(|| VestingDecodeError::NotApplicable {
				type_url: type_url.to_string(),
			})?;

		let decoded = match kind {
			VestingKind::Delayed => DelayedVestingAccount::decode(payload).map(Self::Delayed),
			VestingKind::Continuous => {
				ContinuousVestingAccount::decode(payload).map(Self::Continuous)
			}
			VestingKind::Periodic => PeriodicVestingAccount::decode(payload).map(Self::Periodic),
			VestingKind::PermanentLocked => {
				PermanentLockedAccount::decode(payload).map(Self::PermanentLocked)
			}
		};

		decoded.map_err(|source| VestingDecodeError::Decode {
			type_url: kind.type_url(),
			source,
		})
	}

	pub fn from_any(account: &Any) -> Result<Self, VestingDecodeError> {
		Self::decode(&account.type_url, &account.value)
	}

	pub fn kind(&self) -> VestingKind {
		match self {
			VestingAccount::Delayed(_) => VestingKind::Delayed,
			VestingAccount::Continuous(_) => VestingKind::Continuous,
			VestingAccount::Periodic(_) => VestingKind::Periodic,
			VestingAccount::PermanentLocked(_) => VestingKind::PermanentLocked,
		}
	}

	pub fn base(&self) -> Option<&BaseVestingAccount> {
		match self {
			VestingAccount::Delayed(account) => account.base_vesting_account.as_ref(),
			VestingAccount::Continuous(account) => account.base_vesting_account.as_ref(),
			VestingAccount::Periodic(account) => account.base_vesting_account.as_ref(),
			VestingAccount::PermanentLocked(account) => account.base_vesting_account.as_ref(),
		}
	}

	pub fn address(&self) -> &str {
		self.base()
			.and_then(|base| base.base_account.as_ref())
			.map_or("", |account| account.address.as_str())
	}

	fn row(&self) -> Vec<String> {
		let base = self.base();
		let coins = |select: fn(&BaseVestingAccount) -> &Vec<Coin>| {
			base.map(|base| format_coins(select(base)))
				.unwrap_or_default()
		};
		let base_end_time = || base.map_or(0, |base| base.end_time).to_string();

		let (end_time, start_time, periods) = match self {
			VestingAccount::Delayed(_) => (
				base_end_time(),
				NOT_APPLICABLE.to_string(),
				NOT_APPLICABLE.to_string(),
			),
			VestingAccount::Continuous(account) => (
				base_end_time(),
				account.start_time.to_string(),
				NOT_APPLICABLE.to_string(),
			),
			VestingAccount::Periodic(account) => (
				base_end_time(),
				account.start_time.to_string(),
				format_periods(&account.vesting_periods),
			),
			VestingAccount::PermanentLocked(_) => (
				NOT_APPLICABLE.to_string(),
				NOT_APPLICABLE.to_string(),
				NOT_APPLICABLE.to_string(),
			),
		};

		vec![
			self.kind().name().to_string(),
			self.address().to_string(),
			coins(|base| &base.original_vesting),
			coins(|base| &base.delegated_free),
			coins(|base| &base.delegated_vesting),
			end_time,
			start_time,
			periods,
		]
	}
}

fn format_periods(periods: &[Period]) -> String {
	periods
		.iter()
		.map(|period| {
			format!(
				"{{length: {}, amount: {}}}",
				period.length,
				format_coins(&period.amount)
			)
		})
		.join("; ")
}

/// Decode every vesting account, skipping accounts of any other type.
///
/// The first vesting payload that fails to decode aborts the whole pass.
pub fn extract_vesting_accounts(accounts: &[Any]) -> Result<Vec<VestingAccount>, VestingDecodeError> {
	let mut vesting_accounts = Vec::with_capacity(accounts.len());
	for account in accounts {
		match VestingAccount::from_any(account) {
			Ok(vesting_account) => vesting_accounts.push(vesting_account),
			Err(VestingDecodeError::NotApplicable { .. }) => continue,
			Err(err) => return Err(err),
		}
	}
	Ok(vesting_accounts)
}

/// Table of the `vesting-accounts` report
#[derive(Debug, Clone, Default)]
pub struct VestingAccounts(pub Vec<VestingAccount>);

impl CsvReport for VestingAccounts {
	fn headers(&self) -> Vec<&'static str> {
		vec![
			"AccountType",
			"Address",
			"OriginalVesting",
			"DelegatedFree",
			"DelegatedVesting",
			"EndTime",
			"StartTime",
			"Periods",
		]
	}

	fn rows(&self) -> Vec<Vec<String>> {
		self.0.iter().map(VestingAccount::row).collect()
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::query::proto::BaseAccount;

	pub(crate) fn base(address: &str) -> Option<BaseVestingAccount> {
		Some(BaseVestingAccount {
			base_account: Some(BaseAccount {
				address: address.to_string(),
				..Default::default()
			}),
			original_vesting: vec![Coin::new("uqck", 1000)],
			delegated_free: vec![],
			delegated_vesting: vec![Coin::new("uqck", 400)],
			end_time: 1_700_000_000,
		})
	}

	pub(crate) fn periodic_any(address: &str) -> Any {
		let account = PeriodicVestingAccount {
			base_vesting_account: base(address),
			start_time: 1_600_000_000,
			vesting_periods: vec![
				Period {
					length: 3600,
					amount: vec![Coin::new("uqck", 600)],
				},
				Period {
					length: 7200,
					amount: vec![Coin::new("uqck", 400)],
				},
			],
		};
		Any {
			type_url: PERIODIC_VESTING_ACCOUNT.to_string(),
			value: account.encode_to_vec(),
		}
	}

	pub(crate) fn plain_account_any(address: &str) -> Any {
		let account = BaseAccount {
			address: address.to_string(),
			account_number: 7,
			..Default::default()
		};
		Any {
			type_url: "/cosmos.auth.v1beta1.BaseAccount".to_string(),
			value: account.encode_to_vec(),
		}
	}

	#[test]
	fn decodes_each_vesting_kind() {
		let payloads = [
			(
				DELAYED_VESTING_ACCOUNT,
				DelayedVestingAccount {
					base_vesting_account: base("quick1delayed"),
				}
				.encode_to_vec(),
			),
			(
				CONTINUOUS_VESTING_ACCOUNT,
				ContinuousVestingAccount {
					base_vesting_account: base("quick1continuous"),
					start_time: 1_600_000_000,
				}
				.encode_to_vec(),
			),
			(PERIODIC_VESTING_ACCOUNT, periodic_any("quick1periodic").value),
			(
				PERMANENT_LOCKED_ACCOUNT,
				PermanentLockedAccount {
					base_vesting_account: base("quick1locked"),
				}
				.encode_to_vec(),
			),
		];

		for (type_url, payload) in payloads {
			let account = VestingAccount::decode(type_url, &payload).unwrap();
			assert_eq!(account.kind().type_url(), type_url);
			assert_eq!(
				VestingKind::from_type_url(type_url),
				Some(account.kind())
			);
			assert!(account.address().starts_with("quick1"));
		}
	}

	#[test]
	fn continuous_keeps_start_time() {
		let payload = ContinuousVestingAccount {
			base_vesting_account: base("quick1continuous"),
			start_time: 42,
		}
		.encode_to_vec();

		match VestingAccount::decode(CONTINUOUS_VESTING_ACCOUNT, &payload).unwrap() {
			VestingAccount::Continuous(account) => assert_eq!(account.start_time, 42),
			other => panic!("decoded as {:?}", other.kind()),
		}
	}

	#[test]
	fn unknown_type_is_not_applicable() {
		let err = VestingAccount::decode("/cosmos.auth.v1beta1.ModuleAccount", &[0xff, 0x01])
			.unwrap_err();
		assert!(matches!(err, VestingDecodeError::NotApplicable { .. }));

		let err = VestingAccount::decode("/cosmos.vesting.v1beta1.delayedvestingaccount", &[])
			.unwrap_err();
		assert!(matches!(err, VestingDecodeError::NotApplicable { .. }));
	}

	#[test]
	fn corrupt_payload_is_a_decode_error() {
		// Field 1, length-delimited, claims 255 bytes that are not there.
		let err = VestingAccount::decode(DELAYED_VESTING_ACCOUNT, &[0x0a, 0xff, 0x01]).unwrap_err();
		match err {
			VestingDecodeError::Decode { type_url, .. } => {
				assert_eq!(type_url, DELAYED_VESTING_ACCOUNT)
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn extraction_skips_other_accounts() {
		let accounts = vec![
			plain_account_any("quick1plain"),
			periodic_any("quick1periodic"),
			plain_account_any("quick1other"),
		];

		let vesting = extract_vesting_accounts(&accounts).unwrap();
		assert_eq!(vesting.len(), 1);
		assert_eq!(vesting[0].address(), "quick1periodic");
	}

	#[test]
	fn extraction_aborts_on_corrupt_vesting_payload() {
		let accounts = vec![
			periodic_any("quick1periodic"),
			Any {
				type_url: PERMANENT_LOCKED_ACCOUNT.to_string(),
				value: vec![0x0a, 0xff, 0x01],
			},
		];

		let err = extract_vesting_accounts(&accounts).unwrap_err();
		assert!(matches!(err, VestingDecodeError::Decode { .. }));
	}

	#[test]
	fn rows_mark_fields_that_do_not_apply() {
		let delayed = VestingAccount::Delayed(DelayedVestingAccount {
			base_vesting_account: base("quick1delayed"),
		});
		let locked = VestingAccount::PermanentLocked(PermanentLockedAccount {
			base_vesting_account: base("quick1locked"),
		});
		let periodic = VestingAccount::from_any(&periodic_any("quick1periodic")).unwrap();

		let rows = VestingAccounts(vec![delayed, locked, periodic]).rows();

		assert_eq!(
			rows[0],
			vec![
				"Delayed",
				"quick1delayed",
				"1000uqck",
				"",
				"400uqck",
				"1700000000",
				"N/A",
				"N/A"
			]
		);
		assert_eq!(&rows[1][5..], &["N/A", "N/A", "N/A"]);
		assert_eq!(rows[2][6], "1600000000");
		assert_eq!(
			rows[2][7],
			"{length: 3600, amount: 600uqck}; {length: 7200, amount: 400uqck}"
		);
	}
}
