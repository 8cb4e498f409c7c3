//! gRPC client for the query services of a Quicksilver node.
//!
//! Requests are sent as plain unary calls with a prost codec, so only the messages
//! in [`super::proto`] are needed and no generated service stubs. Every list query
//! goes through [`fetch_all`].

use super::proto::*;
use super::types::*;
use crate::events::EventDispatcher;
use crate::pagination::{PageSource, PagedResponse, Paginated, PaginationError, fetch_all};
use crate::report::{ChainQuery, ReportError};

use async_trait::async_trait;
use std::marker::PhantomData;
use tonic::client::Grpc;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, info};

const ACCOUNTS: &str = "/cosmos.auth.v1beta1.Query/Accounts";
const VALIDATORS: &str = "/cosmos.staking.v1beta1.Query/Validators";
const VALIDATOR_DELEGATIONS: &str = "/cosmos.staking.v1beta1.Query/ValidatorDelegations";
const CHANNELS: &str = "/ibc.core.channel.v1.Query/Channels";
const ZONE_INFOS: &str = "/quicksilver.interchainstaking.v1.Query/ZoneInfos";
const RECEIPTS: &str = "/quicksilver.interchainstaking.v1.Query/Receipts";

/// Query client bound to one node
#[derive(Clone)]
pub struct QuicksilverQueryClient {
	grpc: Grpc<Channel>,
	config: QueryConfig,
}

impl QuicksilverQueryClient {
	/// Connect to a node.
	///
	/// # Arguments
	/// * `node` - `host:port` of the gRPC endpoint, optionally with a scheme.
	/// * `config` - Page sizes and deadlines.
	///
	/// # Errors
	/// Returns `QueryError` if the endpoint is malformed or cannot be reached.
	pub async fn connect(node: &str, config: QueryConfig) -> Result<Self, QueryError> {
		let endpoint = if node.contains("://") {
			node.to_string()
		} else {
			format!("http://{}", node)
		};

		let channel = Endpoint::from_shared(endpoint.clone())
			.map_err(|source| QueryError::InvalidEndpoint {
				endpoint: endpoint.clone(),
				source,
			})?
			.timeout(config.request_timeout)
			.connect_timeout(config.connect_timeout)
			.connect()
			.await?;

		info!("Connected to node {}", endpoint);
		Ok(Self {
			grpc: Grpc::new(channel),
			config,
		})
	}

	/// Run a full traversal of one paginated query.
	async fn collect<Req, Resp, Rec, F>(
		&self,
		name: &'static str,
		path: &'static str,
		request: Req,
		extract: F,
		events: &mut EventDispatcher,
	) -> Result<Vec<Rec>, PaginationError>
	where
		Req: prost::Message + Paginated + Clone + Send + Sync + 'static,
		Resp: prost::Message + PagedResponse + Default + Send + Sync + 'static,
		Rec: Send,
		F: Fn(Resp) -> Vec<Rec> + Send + Sync,
	{
		let mut pages = GrpcPages {
			grpc: self.grpc.clone(),
			name,
			path,
			extract,
			_messages: PhantomData,
		};
		fetch_all(&mut pages, request, events).await
	}

	async fn zones(&self, events: &mut EventDispatcher) -> Result<Vec<Zone>, PaginationError> {
		let request = QueryZonesInfoRequest {
			pagination: Some(PageRequest::first(self.config.page_limit)),
		};
		self.collect("zones", ZONE_INFOS, request, |response: QueryZonesInfoResponse| response.zones, events)
			.await
	}
}

/// One paginated gRPC method
struct GrpcPages<Req, Resp, F> {
	grpc: Grpc<Channel>,
	name: &'static str,
	path: &'static str,
	extract: F,
	_messages: PhantomData<fn(Req) -> Resp>,
}

#[async_trait]
impl<Req, Resp, Rec, F> PageSource for GrpcPages<Req, Resp, F>
where
	Req: prost::Message + Paginated + Clone + Send + Sync + 'static,
	Resp: prost::Message + PagedResponse + Default + Send + Sync + 'static,
	Rec: Send,
	F: Fn(Resp) -> Vec<Rec> + Send + Sync,
{
	type Request = Req;
	type Response = Resp;
	type Record = Rec;

	fn name(&self) -> &'static str {
		self.name
	}

	async fn send(&mut self, request: &Req) -> Result<Resp, QueryError> {
		if let Some(page) = request.page_request() {
			debug!(
				"Requesting {} offset={} limit={}",
				self.path, page.offset, page.limit
			);
		}

		self.grpc.ready().await?;
		let response = self
			.grpc
			.unary(
				tonic::Request::new(request.clone()),
				PathAndQuery::from_static(self.path),
				ProstCodec::<Req, Resp>::default(),
			)
			.await?;
		Ok(response.into_inner())
	}

	fn extract(&self, response: Resp) -> Vec<Rec> {
		(self.extract)(response)
	}
}

#[async_trait]
impl ChainQuery for QuicksilverQueryClient {
	async fn all_accounts(&mut self, events: &mut EventDispatcher) -> Result<Vec<Any>, ReportError> {
		let request = QueryAccountsRequest {
			pagination: Some(PageRequest::first(self.config.account_page_limit)),
		};
		let accounts = self
			.collect("accounts", ACCOUNTS, request, |response: QueryAccountsResponse| response.accounts, events)
			.await?;
		Ok(accounts)
	}

	async fn all_channels(
		&mut self,
		events: &mut EventDispatcher,
	) -> Result<Vec<IdentifiedChannel>, ReportError> {
		let request = QueryChannelsRequest {
			pagination: Some(PageRequest::first(self.config.page_limit)),
		};
		let channels = self
			.collect("channels", CHANNELS, request, |response: QueryChannelsResponse| response.channels, events)
			.await?;
		Ok(channels)
	}

	async fn all_receipts(&mut self, events: &mut EventDispatcher) -> Result<Vec<Receipt>, ReportError> {
		let zones = self.zones(events).await.map_err(ReportError::Zones)?;
		info!("Fetching receipts of {} zones", zones.len());

		let mut receipts = Vec::new();
		for zone in zones {
			let request = QueryReceiptsRequest {
				chain_id: zone.chain_id.clone(),
				pagination: Some(PageRequest::first(self.config.page_limit)),
			};
			let zone_receipts = self
				.collect("receipts", RECEIPTS, request, |response: QueryReceiptsResponse| response.receipts, events)
				.await
				.map_err(|source| ReportError::Receipts {
					chain_id: zone.chain_id,
					source,
				})?;
			receipts.extend(zone_receipts);
		}
		Ok(receipts)
	}

	async fn all_validators(
		&mut self,
		events: &mut EventDispatcher,
	) -> Result<Vec<Validator>, ReportError> {
		let request = QueryValidatorsRequest {
			status: String::new(),
			pagination: Some(PageRequest::first(self.config.page_limit)),
		};
		let validators = self
			.collect("validators", VALIDATORS, request, |response: QueryValidatorsResponse| response.validators, events)
			.await?;
		Ok(validators)
	}

	async fn validator_delegations(
		&mut self,
		validator: &str,
		events: &mut EventDispatcher,
	) -> Result<Vec<DelegationResponse>, ReportError> {
		let request = QueryValidatorDelegationsRequest {
			validator_addr: validator.to_string(),
			pagination: Some(PageRequest::first(self.config.page_limit)),
		};
		self.collect(
			"delegations",
			VALIDATOR_DELEGATIONS,
			request,
			|response: QueryValidatorDelegationsResponse| response.delegation_responses,
			events,
		)
		.await
		.map_err(|source| ReportError::Delegations {
			validator: validator.to_string(),
			source,
		})
	}
}
