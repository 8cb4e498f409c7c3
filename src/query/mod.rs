//! Query integration module for a Quicksilver node
//!
//! This module provides the gRPC client and the protobuf messages used to query the
//! auth, staking, IBC channel and interchain-staking services of a node. Every list
//! query is paginated through [`crate::pagination::fetch_all`].

/// gRPC client for the node query services
mod client;
/// Protobuf message definitions
pub mod proto;
/// Error and configuration types
mod types;

pub use client::QuicksilverQueryClient;
pub use types::*;
