//! Error types for the verifier CLI
//!
//! Error messages name the scenario, step, and locator involved, so a failed
//! run can be traced back to the line of the scenario that caused it.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the verifier CLI
#[derive(Error, Debug)]
pub enum Error {
    // === Scenario Errors ===
    #[error("Failed to read scenario '{path}': {error}")]
    ScenarioRead { path: String, error: String },

    #[error("Failed to parse scenario: {0}")]
    ScenarioParse(String),

    #[error("Invalid scenario: {0}")]
    ScenarioInvalid(String),

    #[error("Scenario '{name}' failed at step {step}: {reason}")]
    ScenarioFailed {
        name: String,
        step: usize,
        reason: String,
    },

    // === Browser Errors ===
    #[error("No browser binary found. Searched: {searched}. Install Chrome or Chromium, or set 'browser.path' in the config file")]
    BrowserNotFound { searched: String },

    #[error("Browser failed to launch: {0}")]
    BrowserLaunch(String),

    // === Target/Navigation Errors ===
    #[error("Target '{url}' not reachable after {attempts} attempts")]
    TargetUnreachable { url: String, attempts: u32 },

    #[error("Navigation to '{url}' failed: {reason}")]
    Navigation { url: String, reason: String },

    // === Locator Errors ===
    #[error("Locator matched no element: {0}")]
    LocatorNotFound(String),

    #[error("Locator matched {count} elements, expected exactly one: {locator}")]
    LocatorAmbiguous { locator: String, count: usize },

    #[error("Select {locator} has no {option}")]
    OptionNotFound { locator: String, option: String },

    // === Action Errors ===
    #[error("Action '{action}' timed out after {secs} seconds")]
    ActionTimeout { action: String, secs: u64 },

    #[error("Failed to capture screenshot '{path}': {error}")]
    Screenshot { path: String, error: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Protocol Errors ===
    #[error("Browser protocol error: {0}")]
    Cdp(String),
}

impl Error {
    /// Create a browser not found error with the searched binary names
    pub fn browser_not_found<S: AsRef<str>>(names: &[S]) -> Self {
        Self::BrowserNotFound {
            searched: names
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Create a navigation error
    pub fn navigation(url: &str, reason: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a screenshot error for a target path
    pub fn screenshot(path: &std::path::Path, error: impl Into<String>) -> Self {
        Self::Screenshot {
            path: path.display().to_string(),
            error: error.into(),
        }
    }
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        Self::Cdp(e.to_string())
    }
}
