//! Configuration file handling

use serde::Deserialize;
use std::path::PathBuf;

use super::paths::config_path;
use super::Result;

/// Browser binaries searched on PATH, in order, when no explicit path is set
pub const BROWSER_BINARIES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Browser process settings
    #[serde(default)]
    pub browser: BrowserSettings,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Target readiness probe settings
    #[serde(default)]
    pub readiness: ReadinessConfig,
}

/// Browser process settings
#[derive(Debug, Deserialize)]
pub struct BrowserSettings {
    /// Explicit path to a Chrome/Chromium binary
    pub path: Option<PathBuf>,

    /// Extra command-line arguments for the browser process
    #[serde(default)]
    pub args: Vec<String>,

    /// Run without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Viewport width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Viewport height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            path: None,
            args: Vec::new(),
            headless: default_headless(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_headless() -> bool {
    true
}
fn default_width() -> u32 {
    1280
}
fn default_height() -> u32 {
    720
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Timeout for the initial navigation to the target
    #[serde(default = "default_navigation")]
    pub navigation_secs: u64,

    /// Timeout for a single UI action
    #[serde(default = "default_action")]
    pub action_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation_secs: default_navigation(),
            action_secs: default_action(),
        }
    }
}

fn default_navigation() -> u64 {
    30
}
fn default_action() -> u64 {
    10
}

/// Readiness probe settings
///
/// The target application is polled before the browser launches, so a run
/// against a server that is still booting waits instead of failing on the
/// first navigation.
#[derive(Debug, Deserialize, Clone)]
pub struct ReadinessConfig {
    /// How many times the target URL is probed before giving up
    #[serde(default = "default_attempts")]
    pub max_attempts: u32,

    /// Delay between probes in milliseconds
    #[serde(default = "default_interval")]
    pub interval_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_attempts(),
            interval_ms: default_interval(),
        }
    }
}

fn default_attempts() -> u32 {
    20
}
fn default_interval() -> u64 {
    500
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    super::Error::FileRead {
                        path: path.display().to_string(),
                        error: e.to_string(),
                    }
                })?;
                return toml::from_str(&content)
                    .map_err(|e| super::Error::ConfigParse(e.to_string()));
            }
        }
        Ok(Self::default())
    }

    /// Find the browser binary to launch
    ///
    /// An explicit `browser.path` wins; otherwise well-known binary names
    /// are searched on PATH
    pub fn browser_binary(&self) -> Option<PathBuf> {
        if let Some(path) = &self.browser.path {
            return Some(path.clone());
        }
        BROWSER_BINARIES
            .iter()
            .find_map(|name| which::which(name).ok())
    }
}
