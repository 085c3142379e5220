use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use color_eyre::eyre;
use serde::Serialize;
use time::OffsetDateTime;
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;

use logchain_domain::{Anchor, TimeWindow, timestamp};
use logchain_service::{ChainResult, ChainService};

#[derive(Debug, Parser)]
#[command(
	version = logchain_cli::VERSION,
	rename_all = "kebab",
	styles = logchain_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Start of the anchor search window (RFC 3339).
	#[arg(long, value_name = "TIME", value_parser = parse_timestamp)]
	pub from: OffsetDateTime,
	/// End of the anchor search window (RFC 3339).
	#[arg(long, value_name = "TIME", value_parser = parse_timestamp)]
	pub to: OffsetDateTime,
	/// Indent the printed reports.
	#[arg(long)]
	pub pretty: bool,
	#[command(subcommand)]
	pub target: Target,
}

#[derive(Debug, Subcommand)]
pub enum Target {
	/// Chains started by rule engine statements.
	Rule {
		#[arg(required = true, value_name = "NAME")]
		names: Vec<String>,
	},
	/// Chains that created or updated model objects.
	Object {
		#[arg(required = true, value_name = "ID")]
		ids: Vec<String>,
	},
}
impl Target {
	pub fn anchors(&self) -> Vec<Anchor> {
		match self {
			Self::Rule { names } => names.iter().cloned().map(Anchor::Rule).collect(),
			Self::Object { ids } => ids.iter().cloned().map(Anchor::Object).collect(),
		}
	}
}

/// One printed line: the anchor that was asked for and what resolving it produced.
#[derive(Debug, Serialize)]
pub struct ChainReport {
	pub anchor: Anchor,
	pub result: ChainResult,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = logchain_config::load(&args.config)?;

	init_tracing(&config)?;

	let window = TimeWindow::new(args.from, args.to)?;
	let anchors = args.target.anchors();
	let service = Arc::new(ChainService::new(config));
	let mut tasks = JoinSet::new();

	tracing::info!(anchors = anchors.len(), "Resolving chains.");

	for (index, anchor) in anchors.into_iter().enumerate() {
		let service = service.clone();

		tasks.spawn(async move {
			let result = service.get_chain(&anchor, window).await;

			(index, ChainReport { anchor, result })
		});
	}

	let mut reports = Vec::with_capacity(tasks.len());

	while let Some(joined) = tasks.join_next().await {
		reports.push(joined?);
	}

	reports.sort_by_key(|(index, _)| *index);

	for (_, report) in reports {
		println!("{}", render(&report, args.pretty)?);
	}

	Ok(())
}

pub fn render(report: &ChainReport, pretty: bool) -> serde_json::Result<String> {
	if pretty { serde_json::to_string_pretty(report) } else { serde_json::to_string(report) }
}

fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, String> {
	timestamp::parse(raw).map_err(|err| err.to_string())
}

// Logs go to stderr so stdout carries only reports.
fn init_tracing(config: &logchain_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init()
		.map_err(|err| eyre::eyre!(err))?;

	Ok(())
}
