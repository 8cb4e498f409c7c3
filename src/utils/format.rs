use crate::query::proto::{Coin, Timestamp};

use bigdecimal::{BigDecimal, Signed};
use chrono::{DateTime, SecondsFormat};
use itertools::Itertools;

/// Fractional digits of a Cosmos SDK `LegacyDec`.
pub const LEGACY_DEC_PRECISION: i64 = 18;

/// Render coins the way the SDK prints a coin set: `100uatom,25uqck`.
pub fn format_coins(coins: &[Coin]) -> String {
	coins
		.iter()
		.map(|coin| format!("{}{}", coin.amount, coin.denom))
		.join(",")
}

/// Join already formatted items with `,` inside square brackets.
pub fn bracketed<I>(items: I) -> String
where
	I: IntoIterator,
	I::Item: std::fmt::Display,
{
	format!("[{}]", items.into_iter().join(","))
}

/// RFC 3339 rendering of a protobuf timestamp, `null` when absent.
pub fn format_timestamp(timestamp: Option<&Timestamp>) -> String {
	let Some(timestamp) = timestamp else {
		return "null".to_string();
	};

	u32::try_from(timestamp.nanos)
		.ok()
		.and_then(|nanos| DateTime::from_timestamp(timestamp.seconds, nanos))
		.map(|time| time.to_rfc3339_opts(SecondsFormat::AutoSi, true))
		.unwrap_or_else(|| format!("{}.{:09}", timestamp.seconds, timestamp.nanos))
}

/// Render a decimal with exactly 18 fractional digits, like `LegacyDec::String`.
pub fn format_legacy_dec(value: &BigDecimal) -> String {
	let (digits, _) = value
		.with_scale(LEGACY_DEC_PRECISION)
		.into_bigint_and_exponent();
	let sign = if digits.is_negative() { "-" } else { "" };

	let precision = LEGACY_DEC_PRECISION as usize;
	let digits = format!("{:0>width$}", digits.abs().to_string(), width = precision + 1);
	let (integer, fraction) = digits.split_at(digits.len() - precision);
	format!("{}{}.{}", sign, integer, fraction)
}
