use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = logchain::Args::parse();
	logchain::run(args).await
}
