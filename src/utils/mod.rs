//!
//! Utility module for report rendering.
//!
//! Re-exports formatting helpers shared by the report tables.
/// Coin, timestamp and decimal formatting
pub mod format;

pub use format::{bracketed, format_coins, format_legacy_dec, format_timestamp};
