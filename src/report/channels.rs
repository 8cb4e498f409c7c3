use crate::output::CsvReport;
use crate::query::proto::{ChannelState, IdentifiedChannel};

/// Flattened state of one IBC channel and its counterparty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelStatus {
	pub source_channel_id: String,
	pub source_port_id: String,
	pub counterparty_channel_id: String,
	pub counterparty_port_id: String,
	pub state: String,
}

impl From<IdentifiedChannel> for ChannelStatus {
	fn from(channel: IdentifiedChannel) -> Self {
		// Unknown states keep their number rather than collapsing to the default.
		let state = ChannelState::try_from(channel.state)
			.map(|state| state.as_str_name().to_string())
			.unwrap_or_else(|_| channel.state.to_string());
		let counterparty = channel.counterparty.unwrap_or_default();

		Self {
			source_channel_id: channel.channel_id,
			source_port_id: channel.port_id,
			counterparty_channel_id: counterparty.channel_id,
			counterparty_port_id: counterparty.port_id,
			state,
		}
	}
}

/// Table of the `channels-statuses` report
#[derive(Debug, Clone, Default)]
pub struct ChannelStatuses(pub Vec<ChannelStatus>);

impl CsvReport for ChannelStatuses {
	fn headers(&self) -> Vec<&'static str> {
		vec![
			"SourceChannelId",
			"SourcePortId",
			"CounterpartyChannelId",
			"CounterpartyPortId",
			"State",
		]
	}

	fn rows(&self) -> Vec<Vec<String>> {
		self.0
			.iter()
			.map(|status| {
				vec![
					status.source_channel_id.clone(),
					status.source_port_id.clone(),
					status.counterparty_channel_id.clone(),
					status.counterparty_port_id.clone(),
					status.state.clone(),
				]
			})
			.collect()
	}
}
