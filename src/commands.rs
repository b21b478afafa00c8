//! CLI command definitions
//!
//! Defines the clap commands for the verifier CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run a verification scenario against a live target
    Run {
        /// Path to the YAML scenario file
        scenario: PathBuf,

        /// Override the scenario's target base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Override the screenshot output path
        #[arg(long)]
        screenshot: Option<PathBuf>,

        /// Run the browser with a visible window
        #[arg(long)]
        headful: bool,

        /// Skip the target readiness probe
        #[arg(long)]
        no_wait: bool,

        /// Verbose output
        #[arg(long, short)]
        verbose: bool,
    },

    /// Parse and validate a scenario without launching a browser
    Check {
        /// Path to the YAML scenario file
        scenario: PathBuf,

        /// Print every step
        #[arg(long, short)]
        verbose: bool,
    },

    /// Check the local environment: browser binary and target reachability
    Doctor {
        /// Target URL to probe once for reachability
        #[arg(long)]
        target: Option<String>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
}
