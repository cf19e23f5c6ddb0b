mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "vetscan-cli")]
#[command(about = "Veterinary clinic listing scraper")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search one location and print the clinics found as JSON
    Search {
        /// Free-text location, e.g. "Nasr City, Cairo"
        location: String,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
        /// Include scroll and per-node extraction diagnostics
        #[arg(long)]
        report: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("vetscan-cli ready; run `vetscan-cli search <location>`");
        return Ok(());
    };

    let config = vetscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Search {
            location,
            pretty,
            report,
        } => search::run_search(&config, &location, pretty, report).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
