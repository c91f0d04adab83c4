//! Startup fails fast on a bad or missing run mode.

use std::process::{Command, Output};

use rstest::rstest;
use tempfile::TempDir;

const SETTINGS_VARIABLES: [&str; 7] = [
    "ADOPTME_MODE",
    "ADOPTME_HOST",
    "ADOPTME_PORT",
    "ADOPTME_WORKERS",
    "ADOPTME_LOG_FILE",
    "ADOPTME_SESSION_KEY_FILE",
    "ADOPTME_COOKIE_SECURE",
];

fn run_backend(mode: Option<&str>) -> (Output, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let mut command = Command::new(env!("CARGO_BIN_EXE_adoptme-backend"));
    command
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path());
    for variable in SETTINGS_VARIABLES {
        command.env_remove(variable);
    }
    if let Some(mode) = mode {
        command.env("ADOPTME_MODE", mode);
    }
    let output = command.output().expect("run backend");
    (output, dir)
}

#[rstest]
#[case::unknown_mode(Some("VERBOSE"), "INVALID_CONFIG")]
#[case::unset_mode(None, "MISSING_ENV_VARIABLE")]
fn startup_aborts_with_a_fatal_record(#[case] mode: Option<&str>, #[case] kind: &str) {
    let (output, dir) = run_backend(mode);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fatal: startup aborted"), "stderr was: {stderr}");
    assert!(stderr.contains(kind), "stderr was: {stderr}");
    assert!(!dir.path().join("logs").exists());
}
