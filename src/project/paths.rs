//! Typed paths into a project layout.
//!
//! Centralizing path construction keeps file access consistent across
//! commands.
use super::{DraftConfig, STATE_DIR_REL};
use crate::draft::DraftNumber;
use std::path::{Path, PathBuf};

/// Convenience wrapper for locating project artifacts.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    /// Create a new path helper rooted at the project root.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Return the project root used for path derivation.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the `.drafts/` state directory path.
    pub fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR_REL)
    }

    /// Return the `.drafts/config.json` path.
    pub fn config_path(&self) -> PathBuf {
        self.state_dir().join("config.json")
    }

    /// Return the `.drafts/lock.json` path.
    pub fn lock_path(&self) -> PathBuf {
        self.state_dir().join("lock.json")
    }

    /// Return the `.drafts/txns` directory path.
    pub fn txns_root(&self) -> PathBuf {
        self.state_dir().join("txns")
    }

    /// Return the per-transaction staging directory path.
    pub fn txn_staging_root(&self, txn_id: &str) -> PathBuf {
        self.txns_root().join(txn_id).join("staging")
    }

    pub fn base_path(&self, config: &DraftConfig) -> PathBuf {
        self.root.join(&config.base)
    }

    pub fn drafts_dir(&self, config: &DraftConfig) -> PathBuf {
        self.root.join(&config.drafts_dir)
    }

    /// Return the `<drafts>/README.md` changelog path.
    pub fn changelog_path(&self, config: &DraftConfig) -> PathBuf {
        self.drafts_dir(config).join("README.md")
    }

    /// Return the `<drafts>/<n>/index.html` path.
    pub fn draft_path(&self, config: &DraftConfig, number: DraftNumber) -> PathBuf {
        self.drafts_dir(config).join(draft_rel(number))
    }

    /// Convert a path into a project relative path string.
    pub fn rel_path(&self, path: &Path) -> String {
        rel_path(&self.root, path)
    }
}

/// Draft file location relative to the drafts directory.
pub fn draft_rel(number: DraftNumber) -> String {
    format!("{number}/index.html")
}

/// Convert a path into a root relative path string with `/` separators.
pub(crate) fn rel_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
