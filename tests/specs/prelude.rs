//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the `ap` binary against an isolated
//! config, state directory and scripted `aerospace` stand-in.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR points at a different target directory.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // target/debug/deps/specs-<hash> -> target/debug/
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

fn ap_binary() -> PathBuf {
    binary_path("ap")
}

/// Create a CLI builder with no config or state isolation
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: vec![("NO_COLOR".into(), "1".into())],
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = Command::new(ap_binary());
        cmd.args(&self.args);

        // Never let the developer's own setup leak into a spec
        for var in ["AP_CONFIG", "AP_STATE_DIR", "AP_LOG", "COLOR"] {
            cmd.env_remove(var);
        }
        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Start the command without waiting, capturing both streams
    pub fn spawn(self) -> Child {
        self.command()
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("command should start")
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    /// Wait for a spawned run to finish
    pub fn wait(child: Child) -> Self {
        Self {
            output: child.wait_with_output().expect("command should finish"),
        }
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).expect("stdout should be JSON")
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    /// Assert stderr does not contain substring.
    pub fn stderr_lacks(self, unexpected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            !stderr.contains(unexpected),
            "stderr should not contain '{}'\nstderr: {}",
            unexpected,
            stderr
        );
        self
    }
}

// =============================================================================
// Fake AeroSpace
// =============================================================================

/// Every flag the compatibility check looks for
pub const ALL_FLAGS: &str =
    "--all --focused --workspace --monitor --app-bundle-id --format --window-id";

/// Script answering `--help` probes with `help_flags`, listing `workspaces`,
/// and accepting workspace switches and config reloads.
pub fn aerospace_script(help_flags: &str, workspaces: &[&str]) -> String {
    format!(
        r#"#!/bin/sh
echo "$@" >> "$(dirname "$0")/aerospace.calls"
if [ "$2" = "--help" ]; then
  echo "Usage: aerospace $1 {help_flags}"
  exit 0
fi
case "$1" in
  list-workspaces) printf '{listing}' ;;
  workspace|reload-config) exit 0 ;;
  *) echo "unexpected: $*" >&2; exit 1 ;;
esac
"#,
        listing = workspaces
            .iter()
            .map(|w| format!("{}\\n", w))
            .collect::<String>(),
    )
}

/// Script that records each call and then never answers
pub fn hanging_aerospace_script() -> String {
    r#"#!/bin/sh
echo "$@" >> "$(dirname "$0")/aerospace.calls"
exec sleep 5
"#
    .to_string()
}

// =============================================================================
// Sandbox
// =============================================================================

/// Isolated config file, state directory and `aerospace` binary for one spec.
pub struct Sandbox {
    dir: tempfile::TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    pub fn state_path(&self) -> PathBuf {
        self.path().join("state")
    }

    pub fn aerospace_path(&self) -> PathBuf {
        self.path().join("aerospace")
    }

    /// Write the config with `[aerospace] binary` pointing at the sandbox script
    pub fn config(&self, projects: &str) -> &Self {
        self.config_with_timeout(projects, 2000)
    }

    pub fn config_with_timeout(&self, projects: &str, timeout_ms: u64) -> &Self {
        let content = format!(
            "[aerospace]\nbinary = \"{}\"\ntimeout_ms = {}\n\n{}",
            self.aerospace_path().display(),
            timeout_ms,
            projects
        );
        std::fs::write(self.config_path(), content).unwrap();
        self
    }

    /// Install an executable `aerospace` stand-in
    pub fn aerospace(&self, script: &str) -> &Self {
        use std::os::unix::fs::PermissionsExt;
        let path = self.aerospace_path();
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        self
    }

    /// Argument lines the stand-in received, in order
    pub fn aerospace_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.path().join("aerospace.calls"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Run `ap` against this sandbox
    pub fn ap(&self) -> CliBuilder {
        cli()
            .env("AP_CONFIG", self.config_path())
            .env("AP_STATE_DIR", self.state_path())
    }

    pub fn log(&self) -> String {
        std::fs::read_to_string(self.state_path().join("ap.log")).unwrap_or_default()
    }
}

/// Two local projects
pub const TWO_PROJECTS: &str = r#"
[[project]]
name = "Demo"
path = "/src/demo"

[[project]]
name = "Infra Tools"
path = "/src/infra"
color = "green"
"#;
