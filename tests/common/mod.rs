//! Shared test infrastructure for integration tests.
// Each test binary uses a subset of these helpers.
#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

pub const BASE_HTML: &str = "<!doctype html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <title>Acme</title>\n</head>\n<body>\n  <header><h1>Acme</h1></header>\n  <section><p>We make things.</p><a class=\"button\" href=\"#\">Contact</a></section>\n  <footer>Acme Inc.</footer>\n</body>\n</html>\n";

/// A throwaway project directory holding a base `index.html`.
pub struct TestProject {
    // Held so the directory lives as long as the project.
    _dir: TempDir,
    pub root: PathBuf,
}

impl TestProject {
    pub fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let root = dir.path().canonicalize()?;
        std::fs::write(root.join("index.html"), BASE_HTML)?;
        Ok(Self { _dir: dir, root })
    }

    /// Run `drafts <args> --root <project>` and capture the output.
    pub fn drafts(&self, args: &[&str]) -> Output {
        self.drafts_with_env(args, &[])
    }

    /// Like [`TestProject::drafts`], with extra environment variables set.
    pub fn drafts_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> Output {
        let mut cmd = with_git_identity(Command::new(env!("CARGO_BIN_EXE_drafts")));
        cmd.args(args)
            .arg("--root")
            .arg(&self.root)
            .env_remove("DRAFTS_LM_COMMAND")
            .env_remove("RUST_LOG")
            .envs(envs.iter().copied());
        cmd.output().expect("run drafts binary")
    }

    /// Run drafts and fail the test with stderr when it does not succeed.
    pub fn drafts_ok(&self, args: &[&str]) -> String {
        let output = self.drafts(args);
        assert!(
            output.status.success(),
            "drafts {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root.join(rel))
            .unwrap_or_else(|err| panic!("read {rel}: {err}"))
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Run git in the project with a fixed identity.
    pub fn git(&self, args: &[&str]) -> String {
        let mut cmd = with_git_identity(Command::new("git"));
        let output = cmd
            .current_dir(&self.root)
            .args(args)
            .output()
            .expect("run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

/// Git is optional on test hosts; callers return early when it is missing.
pub fn skip_if_git_missing() -> bool {
    let missing = Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_err();
    if missing {
        eprintln!("Skipping: git not available");
    }
    missing
}

fn with_git_identity(mut cmd: Command) -> Command {
    cmd.env("GIT_AUTHOR_NAME", "Drafts Test")
        .env("GIT_AUTHOR_EMAIL", "drafts@example.com")
        .env("GIT_COMMITTER_NAME", "Drafts Test")
        .env("GIT_COMMITTER_EMAIL", "drafts@example.com")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", "/dev/null");
    cmd
}
