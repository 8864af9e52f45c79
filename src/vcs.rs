//! Git boundary for drafts.
//!
//! Only files under the drafts directory are ever added or committed. The base
//! page must stay out of the index entirely.
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// A git work tree the project lives in.
#[derive(Debug, Clone)]
pub struct GitRepo {
    git: PathBuf,
    top_level: PathBuf,
}

impl GitRepo {
    /// Locate the repository containing `dir`, or `None` outside one.
    pub fn discover(dir: &Path) -> Result<Option<GitRepo>> {
        let git = which::which("git").context("locate git executable")?;
        let output = Command::new(&git)
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(dir)
            .output()
            .with_context(|| format!("run git rev-parse in {}", dir.display()))?;
        if !output.status.success() {
            return Ok(None);
        }
        let top_level = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        let top_level = top_level
            .canonicalize()
            .with_context(|| format!("resolve repository root {}", top_level.display()))?;
        Ok(Some(GitRepo { git, top_level }))
    }

    /// Like [`GitRepo::discover`], but a missing repository is an error.
    pub fn require(dir: &Path) -> Result<GitRepo> {
        Self::discover(dir)?
            .ok_or_else(|| anyhow!("{} is not inside a git repository", dir.display()))
    }

    /// Repository-relative `/` path for a file inside the work tree.
    pub fn repo_path(&self, path: &Path) -> Result<String> {
        let rel = path.strip_prefix(&self.top_level).map_err(|_| {
            anyhow!(
                "{} is outside repository {}",
                path.display(),
                self.top_level.display()
            )
        })?;
        Ok(rel
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"))
    }

    /// Paths currently staged in the index, repository-relative.
    pub fn staged_paths(&self) -> Result<Vec<String>> {
        let output = self.run(&["diff", "--cached", "--name-only", "-z"])?;
        Ok(output
            .stdout
            .split(|byte| *byte == 0)
            .filter(|entry| !entry.is_empty())
            .map(|entry| String::from_utf8_lossy(entry).into_owned())
            .collect())
    }

    /// Add exactly the given repository-relative paths.
    pub fn add_paths(&self, paths: &[String]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(&args)?;
        tracing::info!(count = paths.len(), "staged draft files");
        Ok(())
    }

    /// Commit only `pathspec`, leaving every other staged path untouched.
    pub fn commit_only(&self, message: &str, pathspec: &str) -> Result<String> {
        self.run(&["commit", "--only", "-m", message, "--", pathspec])?;
        let head = self.run(&["rev-parse", "HEAD"])?;
        Ok(String::from_utf8_lossy(&head.stdout).trim().to_string())
    }

    /// Paths touched by the `HEAD` commit, repository-relative.
    pub fn head_commit_paths(&self) -> Result<Vec<String>> {
        let output = self.run(&[
            "show",
            "--pretty=format:",
            "--name-only",
            "-z",
            "HEAD",
        ])?;
        Ok(output
            .stdout
            .split(|byte| *byte == 0 || *byte == b'\n')
            .filter(|entry| !entry.is_empty())
            .map(|entry| String::from_utf8_lossy(entry).into_owned())
            .collect())
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        tracing::debug!(?args, "git");
        let output = Command::new(&self.git)
            .args(args)
            .current_dir(&self.top_level)
            .output()
            .with_context(|| format!("run git {}", args.join(" ")))?;
        if !output.status.success() {
            return Err(anyhow!(
                "git {} failed: {}",
                args.first().copied().unwrap_or_default(),
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        Ok(output)
    }
}

/// True when `path` is `dir` itself or nested below it (both `/`-separated).
pub fn is_under(path: &str, dir: &str) -> bool {
    let dir = dir.trim_end_matches('/');
    path == dir || path.strip_prefix(dir).is_some_and(|rest| rest.starts_with('/'))
}
