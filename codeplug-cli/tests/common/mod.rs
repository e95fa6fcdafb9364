//! Common test utilities for CLI integration tests.
//!
//! Every command runs inside a temporary directory with `HOME` pointed at
//! it, so no real user or project configuration leaks into the tests.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would otherwise change command behavior.
const CODEPLUG_VARS: &[&str] = &[
    "CODEPLUG_CONFIG",
    "CODEPLUG_LOG_MODE",
    "CODEPLUG_LOCATOR",
    "CODEPLUG_POWER",
    "CODEPLUG_BANDS",
    "CODEPLUG_RADIO_MODEL",
    "CODEPLUG_OUTPUT_DIR",
    "CODEPLUG_DMR_SLOTS",
    "CODEPLUG_INCLUDE_TOWN",
    "CODEPLUG_ZONE_GROUPING",
    "CODEPLUG_MAX_ZONE_CHANNELS",
    "CODEPLUG_TALKGROUP_FILTER",
];

/// Path of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Isolated working and home directory.
pub struct TestEnv {
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Default output directory relative to the working directory.
    pub fn output_dir(&self) -> PathBuf {
        self.path().join("output")
    }

    /// A `codeplug` command running in this environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("codeplug").expect("Failed to find codeplug binary");
        cmd.current_dir(self.path()).env("HOME", self.path());
        for var in CODEPLUG_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// `generate` fully offline from the fixture files.
    pub fn generate_offline(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("generate")
            .arg("--repeaters")
            .arg(fixture_path("repeaters.json"))
            .arg("--talkgroups")
            .arg(fixture_path("talkgroups.json"));
        cmd
    }

    /// Generate the tables and copy the users fixture next to them.
    pub fn prepare_flash_inputs(&self) {
        self.generate_offline().assert().success();
        std::fs::copy(fixture_path("user.csv"), self.output_dir().join("user.csv"))
            .expect("Failed to copy users fixture");
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
