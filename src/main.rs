//! Scenario-driven browser verification CLI
//!
//! This CLI tool drives a headless browser through declarative YAML scenarios
//! against an already-running web application and captures verification
//! screenshots.

use clap::Parser;
use verifier::{cli, commands::Commands, common};

#[derive(Parser)]
#[command(name = "verifier", about = "Scenario-driven browser verification CLI")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    common::logging::init_cli();

    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
