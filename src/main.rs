use clap::Parser;
use bindiff::config::Cli;
use bindiff::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(&cli)?;

    bindiff::logging::init(&config.log_level);
    tracing::debug!(version = bindiff::VERSION, store = ?config.store_dir, "starting");

    bindiff::commands::run(cli.command, &config)?;

    Ok(())
}
