//! Scenario execution
//!
//! Probes the target, launches the browser, executes the steps strictly in
//! order, and reports the result. The browser session is released on every
//! exit path, so no browser process outlives a run.

mod readiness;

pub use readiness::wait_for_target;

use std::path::{Path, PathBuf};
use std::time::Duration;

use colored::Colorize;

use crate::browser::{actions, BrowserSession};
use crate::common::{Config, Error, Result};
use crate::scenario::{Scenario, Step};

/// Result of a scenario run
#[derive(Debug)]
pub struct RunReport {
    pub name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub steps_total: usize,
    /// The verified artifact; `None` when the run failed, even if an earlier
    /// screenshot step had already written a file
    pub screenshot: Option<PathBuf>,
    pub error: Option<String>,
}

/// Options controlling a single run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub base_url: Option<String>,
    pub screenshot: Option<PathBuf>,
    pub headful: bool,
    pub skip_readiness: bool,
    pub verbose: bool,
}

/// Run a verification scenario from a YAML file
pub async fn run_scenario(path: &Path, config: &Config, opts: &RunOptions) -> Result<RunReport> {
    let mut scenario = Scenario::load(path)?;

    if let Some(url) = &opts.base_url {
        scenario.base_url = url.clone();
    }
    if let Some(target) = &opts.screenshot {
        scenario.retarget_screenshots(target);
    }

    let steps_total = scenario.steps.len();

    println!(
        "\n{} {}",
        "Running Scenario:".blue().bold(),
        scenario.name.white().bold()
    );

    if let Some(desc) = &scenario.description {
        println!("  {}", desc.dimmed());
    }
    if opts.verbose {
        println!("  {}", format!("target: {}", scenario.base_url).dimmed());
        println!("  {}", format!("steps: {steps_total}").dimmed());
    }

    if opts.skip_readiness {
        tracing::debug!(url = %scenario.base_url, "readiness probe skipped");
    } else {
        println!("\n{}", "Waiting for target...".cyan());
        wait_for_target(&scenario.base_url, &config.readiness).await?;
        println!("  {} {}", "✓".green(), scenario.base_url.dimmed());
    }

    println!("\n{}", "Launching browser...".cyan());
    let session = BrowserSession::launch(config, opts.headful).await?;
    println!("  {} Browser ready", "✓".green());

    println!("\n{}", "Steps:".cyan());

    // The session must be closed on every path below, so the first failure
    // is collected instead of returned early.
    let mut screenshot = None;
    let mut failure: Option<(usize, Error)> = None;

    if let Err(e) = session.goto(&scenario.base_url, &config.timeouts).await {
        println!("  {} goto {}: {}", "✗".red(), scenario.base_url, e);
        failure = Some((0, e));
    } else {
        println!("  {} goto {}", "✓".green(), scenario.base_url.dimmed());

        for (i, step) in scenario.steps.iter().enumerate() {
            let step_num = i + 1;
            match execute_step(&session, step, config).await {
                Ok(shot) => {
                    if let Some(path) = shot {
                        screenshot = Some(path);
                    }
                    println!(
                        "  {} Step {}: {}",
                        "✓".green(),
                        step_num,
                        step.describe().dimmed()
                    );
                }
                Err(e) => {
                    println!("  {} Step {}: {}", "✗".red(), step_num, e);
                    failure = Some((step_num, e));
                    break;
                }
            }
        }
    }

    session.close().await;

    match failure {
        Some((step_num, e)) => Ok(RunReport {
            name: scenario.name,
            passed: false,
            steps_run: step_num,
            steps_total,
            screenshot: None,
            error: Some(e.to_string()),
        }),
        None => {
            println!("\n{} {}", "✓".green().bold(), "Scenario Passed".green().bold());
            if let Some(path) = &screenshot {
                println!("  screenshot: {}", path.display());
            }
            println!();

            Ok(RunReport {
                name: scenario.name,
                passed: true,
                steps_run: steps_total,
                steps_total,
                screenshot,
                error: None,
            })
        }
    }
}

/// Execute a single step; screenshot steps report the written path
async fn execute_step(
    session: &BrowserSession,
    step: &Step,
    config: &Config,
) -> Result<Option<PathBuf>> {
    let page = session.page();
    let timeouts = &config.timeouts;

    match step {
        Step::Click { locator } => actions::click(page, locator, timeouts).await.map(|_| None),
        Step::Fill { locator, value } => actions::fill(page, locator, value, timeouts)
            .await
            .map(|_| None),
        Step::Select { locator, option } => actions::select(page, locator, option, timeouts)
            .await
            .map(|_| None),
        Step::Wait { millis } => {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
            Ok(None)
        }
        Step::Screenshot { path } => session.screenshot(path, timeouts).await.map(Some),
    }
}
