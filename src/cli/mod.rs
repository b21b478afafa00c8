//! CLI command handling
//!
//! Dispatches CLI commands and formats output.

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::{ReadinessConfig, BROWSER_BINARIES};
use crate::common::{Config, Error, Result};
use crate::runner::{self, RunOptions};
use crate::scenario::Scenario;

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            scenario,
            base_url,
            screenshot,
            headful,
            no_wait,
            verbose,
        } => {
            let config = Config::load()?;
            let opts = RunOptions {
                base_url,
                screenshot,
                headful,
                skip_readiness: no_wait,
                verbose,
            };

            let report = runner::run_scenario(&scenario, &config, &opts).await?;

            if !report.passed {
                return Err(Error::ScenarioFailed {
                    name: report.name,
                    step: report.steps_run,
                    reason: report
                        .error
                        .unwrap_or_else(|| "unknown failure".to_string()),
                });
            }
            Ok(())
        }

        Commands::Check { scenario, verbose } => {
            let parsed = Scenario::load(&scenario)?;

            println!("{} {}", "Scenario OK:".green().bold(), parsed.name);
            if let Some(desc) = &parsed.description {
                println!("  {}", desc.dimmed());
            }
            println!("  target: {}", parsed.base_url);
            println!("  steps: {}", parsed.steps.len());
            if let Some(path) = parsed.screenshot_path() {
                println!("  screenshot: {}", path.display());
            }

            if verbose {
                for (i, step) in parsed.steps.iter().enumerate() {
                    println!("  {:>3}. {}", i + 1, step.describe());
                }
            }
            Ok(())
        }

        Commands::Doctor { target, json } => doctor(target, json).await,
    }
}

/// Environment check: browser binary on this machine, target reachability
async fn doctor(target: Option<String>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let browser = config.browser_binary();

    let target_reachable = match &target {
        Some(url) => Some(probe_once(url).await),
        None => None,
    };

    if json {
        let payload = serde_json::json!({
            "browser": browser.as_ref().map(|p| p.display().to_string()),
            "target": target,
            "target_reachable": target_reachable,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("\n{}", "Environment:".cyan());
        match &browser {
            Some(path) => println!(
                "  {} browser: {}",
                "✓".green(),
                path.display().to_string().dimmed()
            ),
            None => println!(
                "  {} browser: not found (searched: {})",
                "✗".red(),
                BROWSER_BINARIES.join(", ")
            ),
        }
        match (&target, target_reachable) {
            (Some(url), Some(true)) => println!("  {} target: {}", "✓".green(), url.dimmed()),
            (Some(url), Some(false)) => {
                println!("  {} target: {} not reachable", "✗".red(), url)
            }
            _ => {}
        }
    }

    if browser.is_none() {
        return Err(Error::browser_not_found(BROWSER_BINARIES));
    }
    if let (Some(url), Some(false)) = (&target, target_reachable) {
        return Err(Error::TargetUnreachable {
            url: url.clone(),
            attempts: 1,
        });
    }
    Ok(())
}

async fn probe_once(url: &str) -> bool {
    let probe = ReadinessConfig {
        max_attempts: 1,
        interval_ms: 0,
    };
    runner::wait_for_target(url, &probe).await.is_ok()
}
