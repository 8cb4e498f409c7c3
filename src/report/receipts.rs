use crate::output::CsvReport;
use crate::query::proto::{Receipt, Timestamp};
use crate::utils::{bracketed, format_timestamp};

/// Seconds of Go's zero `time.Time` (0001-01-01T00:00:00Z) relative to the Unix epoch.
const GO_ZERO_TIME_SECONDS: i64 = -62_135_596_800;

/// A timestamp that was set but carries no time.
///
/// Both Go's zero time and the Unix epoch count; a node reporting either has not
/// completed the receipt.
fn is_zero(timestamp: &Timestamp) -> bool {
	timestamp.nanos == 0 && (timestamp.seconds == 0 || timestamp.seconds == GO_ZERO_TIME_SECONDS)
}

/// A receipt is pending until it carries a non-zero completion time.
pub fn is_pending(receipt: &Receipt) -> bool {
	receipt.completed.as_ref().is_none_or(is_zero)
}

pub fn pending_receipts(receipts: Vec<Receipt>) -> Vec<Receipt> {
	receipts.into_iter().filter(is_pending).collect()
}

/// Table of the `pending-staking-receipts` report
#[derive(Debug, Clone, Default)]
pub struct PendingReceipts(pub Vec<Receipt>);

impl CsvReport for PendingReceipts {
	fn headers(&self) -> Vec<&'static str> {
		vec!["ChainId", "Sender", "Txhash", "Coins", "FirstSeen", "Completed"]
	}

	fn rows(&self) -> Vec<Vec<String>> {
		self.0
			.iter()
			.map(|receipt| {
				vec![
					receipt.chain_id.clone(),
					receipt.sender.clone(),
					receipt.txhash.clone(),
					bracketed(
						receipt
							.amount
							.iter()
							.map(|coin| format!("{},{}", coin.denom, coin.amount)),
					),
					format_timestamp(receipt.first_seen.as_ref()),
					format_timestamp(receipt.completed.as_ref()),
				]
			})
			.collect()
	}
}
