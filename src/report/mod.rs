//! Report module for the Quicksilver dumper
//!
//! This module turns complete record sets into report tables: pending staking
//! receipts, IBC channel statuses, vesting accounts and delegations grouped per
//! validator and delegator.

/// IBC channel projection
pub mod channels;
/// Delegation records and their aggregation
pub mod delegations;
/// Receipt completion filter
pub mod receipts;
/// Report service and the `ChainQuery` seam
pub mod service;
/// Report kinds and errors
mod types;
/// Vesting account decoding
pub mod vesting;

pub use service::{ChainQuery, ReportService, ReportTable};
pub use types::*;
