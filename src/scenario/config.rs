//! Scenario configuration types
//!
//! Defines the data structures for deserializing YAML scenarios.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::common::{Error, Result};

/// A complete verification scenario loaded from a YAML file
#[derive(Deserialize, Debug)]
pub struct Scenario {
    /// Name of the scenario
    pub name: String,
    /// Optional description of what the scenario verifies
    pub description: Option<String>,
    /// Base URL of the target application (must already be listening)
    pub base_url: String,
    /// The ordered steps to execute
    pub steps: Vec<Step>,
}

/// A single UI step in the execution flow
#[derive(Deserialize, Debug)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Click an element
    Click {
        /// How to find the element
        locator: Locator,
    },
    /// Clear an input and type a value into it
    Fill {
        /// How to find the input
        locator: Locator,
        /// The text to type
        value: String,
    },
    /// Choose an option in a select element
    Select {
        /// How to find the select element
        locator: Locator,
        /// Which option to choose
        option: SelectOption,
    },
    /// Pause for a fixed duration
    Wait {
        /// Duration in milliseconds
        millis: u64,
    },
    /// Capture a screenshot of the current viewport
    Screenshot {
        /// Where to write the PNG (overwritten if present)
        path: PathBuf,
    },
}

/// How to resolve a UI element against the live page
///
/// Locators are resolved fresh at each step; nothing is cached between
/// steps. A locator that matches zero or several elements is an error.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Locator {
    /// Element of tag `kind` whose visible text matches `text`.
    ///
    /// Exact (trimmed) matches are preferred; substring matches are the
    /// fallback. When `index` is given it picks that match instead of
    /// requiring a unique one.
    Text {
        #[serde(default = "default_kind")]
        kind: String,
        text: String,
        index: Option<usize>,
    },
    /// Input element with this exact placeholder attribute
    Placeholder { text: String },
    /// Raw CSS selector
    Css { selector: String },
    /// The nth element of a tag kind, in document order (0-based)
    Nth { kind: String, index: usize },
}

fn default_kind() -> String {
    "button".to_string()
}

/// Which option to choose in a select element
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum SelectOption {
    /// Option at this position (0-based)
    Index { index: usize },
    /// Option with this `value` attribute
    Value { value: String },
    /// Option with this visible label
    Label { label: String },
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Text { kind, text, index } => match index {
                Some(i) => write!(f, "{kind} \"{text}\" [{i}]"),
                None => write!(f, "{kind} \"{text}\""),
            },
            Locator::Placeholder { text } => write!(f, "input[placeholder=\"{text}\"]"),
            Locator::Css { selector } => write!(f, "css \"{selector}\""),
            Locator::Nth { kind, index } => write!(f, "{kind}[{index}]"),
        }
    }
}

impl fmt::Display for SelectOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectOption::Index { index } => write!(f, "option index {index}"),
            SelectOption::Value { value } => write!(f, "option value \"{value}\""),
            SelectOption::Label { label } => write!(f, "option label \"{label}\""),
        }
    }
}

impl Scenario {
    /// Load a scenario from a YAML file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ScenarioRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        let scenario: Scenario =
            serde_yaml::from_str(&content).map_err(|e| Error::ScenarioParse(e.to_string()))?;

        scenario.validate()?;
        Ok(scenario)
    }

    /// Structural checks that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(Error::ScenarioInvalid("scenario has no steps".to_string()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::ScenarioInvalid(format!(
                "base_url '{}' must be an http(s) URL",
                self.base_url
            )));
        }

        for (i, step) in self.steps.iter().enumerate() {
            if let Step::Screenshot { path } = step {
                if path.as_os_str().is_empty() {
                    return Err(Error::ScenarioInvalid(format!(
                        "step {}: screenshot path is empty",
                        i + 1
                    )));
                }
            }
        }

        Ok(())
    }

    /// Path of the artifact the scenario will produce, if any
    ///
    /// The last screenshot step wins; earlier screenshots are intermediate.
    pub fn screenshot_path(&self) -> Option<&Path> {
        self.steps.iter().rev().find_map(|step| match step {
            Step::Screenshot { path } => Some(path.as_path()),
            _ => None,
        })
    }

    /// Redirect every screenshot step to `target` (CLI override)
    pub fn retarget_screenshots(&mut self, target: &Path) {
        for step in &mut self.steps {
            if let Step::Screenshot { path } = step {
                *path = target.to_path_buf();
            }
        }
    }
}

impl Step {
    /// Short action name used in progress output and errors
    pub fn action_name(&self) -> &'static str {
        match self {
            Step::Click { .. } => "click",
            Step::Fill { .. } => "fill",
            Step::Select { .. } => "select",
            Step::Wait { .. } => "wait",
            Step::Screenshot { .. } => "screenshot",
        }
    }

    /// One-line human description of the step
    pub fn describe(&self) -> String {
        match self {
            Step::Click { locator } => format!("click {locator}"),
            Step::Fill { locator, value } => format!("fill {locator} = \"{value}\""),
            Step::Select { locator, option } => format!("select {option} in {locator}"),
            Step::Wait { millis } => format!("wait {millis}ms"),
            Step::Screenshot { path } => format!("screenshot {}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
name: smoke
base_url: http://localhost:3000
steps:
  - action: click
    locator: { by: text, text: "Admin" }
"#;

    #[test]
    fn test_parse_minimal_scenario() {
        let scenario: Scenario = serde_yaml::from_str(MINIMAL).unwrap();
        assert_eq!(scenario.name, "smoke");
        assert_eq!(scenario.base_url, "http://localhost:3000");
        assert_eq!(scenario.steps.len(), 1);

        match &scenario.steps[0] {
            Step::Click {
                locator: Locator::Text { kind, text, index },
            } => {
                assert_eq!(kind, "button");
                assert_eq!(text, "Admin");
                assert!(index.is_none());
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn test_parse_every_step_form() {
        let yaml = r#"
name: all-steps
base_url: http://localhost:5173
steps:
  - action: click
    locator: { by: css, selector: "#login" }
  - action: fill
    locator: { by: placeholder, text: "Team A Name" }
    value: "India"
  - action: select
    locator: { by: nth, kind: select, index: 0 }
    option: { index: 1 }
  - action: select
    locator: { by: nth, kind: select, index: 1 }
    option: { value: "2" }
  - action: select
    locator: { by: nth, kind: select, index: 2 }
    option: { label: "Starc" }
  - action: wait
    millis: 250
  - action: screenshot
    path: out/shot.png
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.steps.len(), 7);

        assert!(matches!(
            scenario.steps[2],
            Step::Select {
                option: SelectOption::Index { index: 1 },
                ..
            }
        ));
        assert!(matches!(
            &scenario.steps[3],
            Step::Select {
                option: SelectOption::Value { value },
                ..
            } if value == "2"
        ));
        assert!(matches!(
            &scenario.steps[4],
            Step::Select {
                option: SelectOption::Label { label },
                ..
            } if label == "Starc"
        ));
    }

    #[test]
    fn test_parse_text_locator_with_index() {
        let yaml = r#"
name: indexed
base_url: http://localhost:5173
steps:
  - action: click
    locator: { by: text, text: "Add", index: 1 }
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        match &scenario.steps[0] {
            Step::Click {
                locator: Locator::Text { index, .. },
            } => assert_eq!(*index, Some(1)),
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn test_reject_unknown_action() {
        let yaml = r#"
name: bad
base_url: http://localhost:3000
steps:
  - action: hover
    locator: { by: text, text: "Admin" }
"#;
        assert!(serde_yaml::from_str::<Scenario>(yaml).is_err());
    }

    #[test]
    fn test_reject_unknown_locator_kind() {
        let yaml = r#"
name: bad
base_url: http://localhost:3000
steps:
  - action: click
    locator: { by: xpath, selector: "//button" }
"#;
        assert!(serde_yaml::from_str::<Scenario>(yaml).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_steps() {
        let scenario = Scenario {
            name: "empty".to_string(),
            description: None,
            base_url: "http://localhost:3000".to_string(),
            steps: Vec::new(),
        };
        assert!(matches!(
            scenario.validate(),
            Err(Error::ScenarioInvalid(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut scenario: Scenario = serde_yaml::from_str(MINIMAL).unwrap();
        scenario.base_url = "localhost:3000".to_string();
        assert!(matches!(
            scenario.validate(),
            Err(Error::ScenarioInvalid(_))
        ));
    }

    #[test]
    fn test_screenshot_path_is_last_screenshot_step() {
        let yaml = r#"
name: shots
base_url: http://localhost:3000
steps:
  - action: screenshot
    path: first.png
  - action: click
    locator: { by: text, text: "4" }
  - action: screenshot
    path: last.png
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.screenshot_path(), Some(Path::new("last.png")));
    }

    #[test]
    fn test_retarget_screenshots_rewrites_all_paths() {
        let yaml = r#"
name: shots
base_url: http://localhost:3000
steps:
  - action: screenshot
    path: first.png
  - action: screenshot
    path: second.png
"#;
        let mut scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        scenario.retarget_screenshots(Path::new("override.png"));
        assert_eq!(scenario.screenshot_path(), Some(Path::new("override.png")));
        for step in &scenario.steps {
            match step {
                Step::Screenshot { path } => assert_eq!(path, Path::new("override.png")),
                other => panic!("unexpected step: {other:?}"),
            }
        }
    }

    #[test]
    fn test_describe_names_the_locator() {
        let scenario: Scenario = serde_yaml::from_str(MINIMAL).unwrap();
        let described = scenario.steps[0].describe();
        assert!(described.contains("click"));
        assert!(described.contains("Admin"));
        assert_eq!(scenario.steps[0].action_name(), "click");
    }
}
