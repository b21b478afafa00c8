//! End-to-end tests for the verifier CLI
//!
//! These drive the compiled binary the way a user would: validating the
//! bundled scenarios, rejecting malformed ones, and failing fast when the
//! target application is not listening. No test needs a browser binary or a
//! live target application.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path to the compiled verifier binary
fn verifier_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_verifier"))
}

/// Path to a bundled scenario
fn scenario_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

/// Path to a test fixture
fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run the verifier with the given args and environment overrides
fn run_verifier(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(verifier_bin());
    cmd.args(args);
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("failed to run verifier binary")
}

#[test]
fn check_accepts_bundled_match_setup_scenario() {
    let path = scenario_path("match_setup.yaml");
    let out = run_verifier(&["check", path.to_str().unwrap()], &[]);

    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("match-setup-smoke"));
    assert!(stdout.contains("http://localhost:3000"));
    assert!(stdout.contains("verification.png"));
}

#[test]
fn check_accepts_bundled_live_scoring_scenario() {
    let path = scenario_path("live_scoring.yaml");
    let out = run_verifier(&["check", path.to_str().unwrap()], &[]);

    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("live-scoring-smoke"));
    assert!(stdout.contains("http://localhost:5173"));
    assert!(stdout.contains("screenshot.png"));
}

#[test]
fn check_verbose_lists_every_step() {
    let path = scenario_path("match_setup.yaml");
    let out = run_verifier(&["check", "--verbose", path.to_str().unwrap()], &[]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("click"));
    assert!(stdout.contains("fill"));
    assert!(stdout.contains("select"));
    assert!(stdout.contains("screenshot"));
    // One numbered line per step
    let numbered = stdout.lines().filter(|l| l.contains(". ")).count();
    assert!(numbered >= 15, "expected all steps listed, got:\n{stdout}");
}

#[test]
fn check_rejects_scenario_without_steps() {
    let path = fixture_path("no_steps.yaml");
    let out = run_verifier(&["check", path.to_str().unwrap()], &[]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no steps"), "stderr: {stderr}");
}

#[test]
fn check_rejects_unknown_action() {
    let path = fixture_path("bad_action.yaml");
    let out = run_verifier(&["check", path.to_str().unwrap()], &[]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error"), "stderr: {stderr}");
}

#[test]
fn check_rejects_non_http_base_url() {
    let path = fixture_path("bad_url.yaml");
    let out = run_verifier(&["check", path.to_str().unwrap()], &[]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("base_url"), "stderr: {stderr}");
}

#[test]
fn check_rejects_missing_file() {
    let out = run_verifier(&["check", "does-not-exist.yaml"], &[]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("does-not-exist.yaml"), "stderr: {stderr}");
}

#[test]
fn run_fails_fast_when_target_unreachable() {
    let temp = tempfile::tempdir().unwrap();

    // Fast readiness settings through a scratch config dir
    let config_dir = temp.path().join("verifier-cli");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[readiness]\nmax_attempts = 2\ninterval_ms = 50\n",
    )
    .unwrap();

    // Port 9 (discard) refuses HTTP connections
    let shot = temp.path().join("shot.png");
    let scenario = temp.path().join("unreachable.yaml");
    std::fs::write(
        &scenario,
        format!(
            "name: unreachable\n\
             base_url: http://127.0.0.1:9\n\
             steps:\n\
             \x20 - action: screenshot\n\
             \x20   path: {}\n",
            shot.display()
        ),
    )
    .unwrap();

    let out = run_verifier(
        &["run", scenario.to_str().unwrap()],
        &[("XDG_CONFIG_HOME", temp.path().to_str().unwrap())],
    );

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not reachable"), "stderr: {stderr}");
    assert!(!shot.exists(), "no screenshot may be produced on failure");
}

#[test]
fn doctor_reports_environment_as_json() {
    // Exit status depends on whether the machine has a browser installed;
    // the JSON shape must be stable either way.
    let out = run_verifier(&["doctor", "--json"], &[]);

    let stdout = String::from_utf8_lossy(&out.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("doctor --json must emit valid JSON");
    assert!(payload.get("browser").is_some());
    assert!(payload.get("target").is_some());
}
