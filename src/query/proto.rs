//! Protobuf messages for the Cosmos SDK, IBC and Quicksilver query services.
//!
//! Only the fields the reports read are declared. Unknown fields on the wire are
//! skipped by `prost`, so the messages stay compatible with newer node versions.

/// `google.protobuf.Any`
#[derive(Clone, PartialEq, prost::Message)]
pub struct Any {
	#[prost(string, tag = "1")]
	pub type_url: String,
	#[prost(bytes = "vec", tag = "2")]
	pub value: Vec<u8>,
}

/// `google.protobuf.Timestamp`
#[derive(Clone, Copy, PartialEq, Eq, prost::Message)]
pub struct Timestamp {
	#[prost(int64, tag = "1")]
	pub seconds: i64,
	#[prost(int32, tag = "2")]
	pub nanos: i32,
}

/// `cosmos.base.query.v1beta1.PageRequest`
#[derive(Clone, PartialEq, prost::Message)]
pub struct PageRequest {
	#[prost(bytes = "vec", tag = "1")]
	pub key: Vec<u8>,
	#[prost(uint64, tag = "2")]
	pub offset: u64,
	#[prost(uint64, tag = "3")]
	pub limit: u64,
	#[prost(bool, tag = "4")]
	pub count_total: bool,
	#[prost(bool, tag = "5")]
	pub reverse: bool,
}

impl PageRequest {
	/// First page of an offset query that asks the node to count the total.
	pub fn first(limit: u64) -> Self {
		Self {
			limit,
			count_total: true,
			..Default::default()
		}
	}
}

/// `cosmos.base.query.v1beta1.PageResponse`
#[derive(Clone, PartialEq, prost::Message)]
pub struct PageResponse {
	#[prost(bytes = "vec", tag = "1")]
	pub next_key: Vec<u8>,
	#[prost(uint64, tag = "2")]
	pub total: u64,
}

/// `cosmos.base.v1beta1.Coin`. The amount is an integer encoded as a decimal string.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct Coin {
	#[prost(string, tag = "1")]
	pub denom: String,
	#[prost(string, tag = "2")]
	pub amount: String,
}

impl Coin {
	pub fn new(denom: impl Into<String>, amount: impl ToString) -> Self {
		Self {
			denom: denom.into(),
			amount: amount.to_string(),
		}
	}
}

// cosmos.auth.v1beta1

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryAccountsRequest {
	#[prost(message, optional, tag = "1")]
	pub pagination: Option<PageRequest>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryAccountsResponse {
	#[prost(message, repeated, tag = "1")]
	pub accounts: Vec<Any>,
	#[prost(message, optional, tag = "2")]
	pub pagination: Option<PageResponse>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BaseAccount {
	#[prost(string, tag = "1")]
	pub address: String,
	#[prost(message, optional, tag = "2")]
	pub pub_key: Option<Any>,
	#[prost(uint64, tag = "3")]
	pub account_number: u64,
	#[prost(uint64, tag = "4")]
	pub sequence: u64,
}

// cosmos.vesting.v1beta1

#[derive(Clone, PartialEq, prost::Message)]
pub struct BaseVestingAccount {
	#[prost(message, optional, tag = "1")]
	pub base_account: Option<BaseAccount>,
	#[prost(message, repeated, tag = "2")]
	pub original_vesting: Vec<Coin>,
	#[prost(message, repeated, tag = "3")]
	pub delegated_free: Vec<Coin>,
	#[prost(message, repeated, tag = "4")]
	pub delegated_vesting: Vec<Coin>,
	#[prost(int64, tag = "5")]
	pub end_time: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DelayedVestingAccount {
	#[prost(message, optional, tag = "1")]
	pub base_vesting_account: Option<BaseVestingAccount>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ContinuousVestingAccount {
	#[prost(message, optional, tag = "1")]
	pub base_vesting_account: Option<BaseVestingAccount>,
	#[prost(int64, tag = "2")]
	pub start_time: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Period {
	#[prost(int64, tag = "1")]
	pub length: i64,
	#[prost(message, repeated, tag = "2")]
	pub amount: Vec<Coin>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PeriodicVestingAccount {
	#[prost(message, optional, tag = "1")]
	pub base_vesting_account: Option<BaseVestingAccount>,
	#[prost(int64, tag = "2")]
	pub start_time: i64,
	#[prost(message, repeated, tag = "3")]
	pub vesting_periods: Vec<Period>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PermanentLockedAccount {
	#[prost(message, optional, tag = "1")]
	pub base_vesting_account: Option<BaseVestingAccount>,
}

// cosmos.staking.v1beta1

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryValidatorsRequest {
	/// Bond status filter, empty for all validators.
	#[prost(string, tag = "1")]
	pub status: String,
	#[prost(message, optional, tag = "2")]
	pub pagination: Option<PageRequest>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryValidatorsResponse {
	#[prost(message, repeated, tag = "1")]
	pub validators: Vec<Validator>,
	#[prost(message, optional, tag = "2")]
	pub pagination: Option<PageResponse>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Validator {
	#[prost(string, tag = "1")]
	pub operator_address: String,
	#[prost(bool, tag = "3")]
	pub jailed: bool,
	#[prost(int32, tag = "4")]
	pub status: i32,
	#[prost(string, tag = "5")]
	pub tokens: String,
	#[prost(string, tag = "6")]
	pub delegator_shares: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryValidatorDelegationsRequest {
	#[prost(string, tag = "1")]
	pub validator_addr: String,
	#[prost(message, optional, tag = "2")]
	pub pagination: Option<PageRequest>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryValidatorDelegationsResponse {
	#[prost(message, repeated, tag = "1")]
	pub delegation_responses: Vec<DelegationResponse>,
	#[prost(message, optional, tag = "2")]
	pub pagination: Option<PageResponse>,
}

/// Shares are a `LegacyDec`: an integer string scaled by 10^18.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Delegation {
	#[prost(string, tag = "1")]
	pub delegator_address: String,
	#[prost(string, tag = "2")]
	pub validator_address: String,
	#[prost(string, tag = "3")]
	pub shares: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DelegationResponse {
	#[prost(message, optional, tag = "1")]
	pub delegation: Option<Delegation>,
	#[prost(message, optional, tag = "2")]
	pub balance: Option<Coin>,
}

// ibc.core.channel.v1

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryChannelsRequest {
	#[prost(message, optional, tag = "1")]
	pub pagination: Option<PageRequest>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryChannelsResponse {
	#[prost(message, repeated, tag = "1")]
	pub channels: Vec<IdentifiedChannel>,
	#[prost(message, optional, tag = "2")]
	pub pagination: Option<PageResponse>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct IdentifiedChannel {
	#[prost(enumeration = "ChannelState", tag = "1")]
	pub state: i32,
	#[prost(int32, tag = "2")]
	pub ordering: i32,
	#[prost(message, optional, tag = "3")]
	pub counterparty: Option<Counterparty>,
	#[prost(string, repeated, tag = "4")]
	pub connection_hops: Vec<String>,
	#[prost(string, tag = "5")]
	pub version: String,
	#[prost(string, tag = "6")]
	pub port_id: String,
	#[prost(string, tag = "7")]
	pub channel_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Counterparty {
	#[prost(string, tag = "1")]
	pub port_id: String,
	#[prost(string, tag = "2")]
	pub channel_id: String,
}

/// `ibc.core.channel.v1.State`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ChannelState {
	UninitializedUnspecified = 0,
	Init = 1,
	Tryopen = 2,
	Open = 3,
	Closed = 4,
	Flushing = 5,
	Flushcomplete = 6,
}

impl ChannelState {
	/// Name of the value as written in the protobuf definition.
	pub fn as_str_name(&self) -> &'static str {
		match self {
			ChannelState::UninitializedUnspecified => "STATE_UNINITIALIZED_UNSPECIFIED",
			ChannelState::Init => "STATE_INIT",
			ChannelState::Tryopen => "STATE_TRYOPEN",
			ChannelState::Open => "STATE_OPEN",
			ChannelState::Closed => "STATE_CLOSED",
			ChannelState::Flushing => "STATE_FLUSHING",
			ChannelState::Flushcomplete => "STATE_FLUSHCOMPLETE",
		}
	}
}

// quicksilver.interchainstaking.v1

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryZonesInfoRequest {
	#[prost(message, optional, tag = "1")]
	pub pagination: Option<PageRequest>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryZonesInfoResponse {
	#[prost(message, repeated, tag = "1")]
	pub zones: Vec<Zone>,
	#[prost(message, optional, tag = "2")]
	pub pagination: Option<PageResponse>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Zone {
	#[prost(string, tag = "1")]
	pub connection_id: String,
	#[prost(string, tag = "2")]
	pub chain_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryReceiptsRequest {
	#[prost(string, tag = "1")]
	pub chain_id: String,
	#[prost(message, optional, tag = "2")]
	pub pagination: Option<PageRequest>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryReceiptsResponse {
	#[prost(message, repeated, tag = "1")]
	pub receipts: Vec<Receipt>,
	#[prost(message, optional, tag = "2")]
	pub pagination: Option<PageResponse>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Receipt {
	#[prost(string, tag = "1")]
	pub chain_id: String,
	#[prost(string, tag = "2")]
	pub sender: String,
	#[prost(string, tag = "3")]
	pub txhash: String,
	#[prost(message, repeated, tag = "4")]
	pub amount: Vec<Coin>,
	#[prost(message, optional, tag = "5")]
	pub first_seen: Option<Timestamp>,
	#[prost(message, optional, tag = "6")]
	pub completed: Option<Timestamp>,
}

/// Implements the pagination traits for every message that carries a
/// `pagination` field.
macro_rules! paginated {
	(requests: $($req:ty),* ; responses: $($resp:ty),* $(,)?) => {
		$(
			impl crate::pagination::Paginated for $req {
				fn page_request(&self) -> Option<&PageRequest> {
					self.pagination.as_ref()
				}

				fn page_request_mut(&mut self) -> &mut PageRequest {
					self.pagination.get_or_insert_with(PageRequest::default)
				}
			}
		)*
		$(
			impl crate::pagination::PagedResponse for $resp {
				fn total(&self) -> Option<u64> {
					self.pagination.as_ref().map(|page| page.total)
				}
			}
		)*
	};
}

paginated! {
	requests:
		QueryAccountsRequest,
		QueryValidatorsRequest,
		QueryValidatorDelegationsRequest,
		QueryChannelsRequest,
		QueryZonesInfoRequest,
		QueryReceiptsRequest;
	responses:
		QueryAccountsResponse,
		QueryValidatorsResponse,
		QueryValidatorDelegationsResponse,
		QueryChannelsResponse,
		QueryZonesInfoResponse,
		QueryReceiptsResponse,
}
