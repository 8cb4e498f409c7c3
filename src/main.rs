mod events;
mod output;
mod pagination;
mod query;
mod report;
mod utils;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

use crate::events::EventDispatcher;
use crate::query::{DEFAULT_NODE, QueryConfig, QuicksilverQueryClient};
use crate::report::{ReportKind, ReportService, ReportTable};

/// Dump Quicksilver chain state into CSV reports.
#[derive(Debug, Parser)]
#[command(name = "quicksilver-dumper", version, about)]
struct Args {
	/// gRPC endpoint of the node, `host:port`
	#[arg(long, global = true, default_value = DEFAULT_NODE)]
	node: String,

	#[arg(long, global = true, value_enum, default_value_t = Format::Csv)]
	format: Format,

	/// Output file, `<command>.csv` when omitted
	#[arg(long, global = true)]
	output: Option<PathBuf>,

	/// Page size for every paginated query
	#[arg(long, global = true)]
	page_limit: Option<u64>,

	/// Deadline for a single page request, in seconds
	#[arg(long, global = true, default_value_t = 30)]
	timeout_secs: u64,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
	/// Receipts of every zone that have not completed yet
	PendingStakingReceipts,
	/// State of every IBC channel
	ChannelsStatuses,
	/// Every vesting account with its schedule
	VestingAccounts,
	/// Delegations grouped per validator and delegator
	ValidatorsDelegators,
}

impl From<Command> for ReportKind {
	fn from(command: Command) -> Self {
		match command {
			Command::PendingStakingReceipts => ReportKind::PendingStakingReceipts,
			Command::ChannelsStatuses => ReportKind::ChannelsStatuses,
			Command::VestingAccounts => ReportKind::VestingAccounts,
			Command::ValidatorsDelegators => ReportKind::ValidatorsDelegators,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
	Csv,
}

impl Args {
	fn query_config(&self) -> QueryConfig {
		let config = QueryConfig::default()
			.with_request_timeout(Duration::from_secs(self.timeout_secs));
		match self.page_limit {
			Some(limit) => config.with_page_limit(limit),
			None => config,
		}
	}

	fn output_path(&self) -> PathBuf {
		let kind = ReportKind::from(self.command);
		self.output
			.clone()
			.unwrap_or_else(|| PathBuf::from(format!("{}.csv", kind.name())))
	}
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env()
				.add_directive(tracing::Level::INFO.into()),
		)
		.with_target(false)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_file(false)
		.with_line_number(false)
		.init();

	let args = Args::parse();

	// Only the queries are interruptible; once the table exists it is written out.
	let table = tokio::select! {
		result = build_report(&args) => result,
		_ = tokio::signal::ctrl_c() => {
			error!("Interrupted, no report written");
			std::process::exit(130);
		}
	};

	let result = match table {
		Ok(table) => write_report(&args, &table).await,
		Err(e) => Err(e),
	};
	if let Err(e) = result {
		error!("{:#}", e);
		std::process::exit(1);
	}
}

async fn build_report(args: &Args) -> anyhow::Result<ReportTable> {
	let kind = ReportKind::from(args.command);
	info!("Building {} report from {}", kind.name(), args.node);

	let client = QuicksilverQueryClient::connect(&args.node, args.query_config())
		.await
		.with_context(|| format!("Failed to connect to {}", args.node))?;

	let mut service = ReportService::new(client, EventDispatcher::with_tracing());
	service
		.build(kind)
		.await
		.with_context(|| format!("Failed to build {} report", kind.name()))
}

async fn write_report(args: &Args, table: &ReportTable) -> anyhow::Result<()> {
	let kind = ReportKind::from(args.command);
	let path = args.output_path();

	match args.format {
		Format::Csv => {
			output::write_csv(table, &path)
				.await
				.with_context(|| format!("Failed to write {}", path.display()))?;
		}
	}

	info!("Report {} written to {}", kind.name(), path.display());
	Ok(())
}
