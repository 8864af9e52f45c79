use crate::project::{self, DraftConfig, ProjectPaths};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) struct ProjectContext {
    pub(crate) paths: ProjectPaths,
    pub(crate) config: DraftConfig,
}

impl ProjectContext {
    /// Resolve the root and load a validated config (defaults when absent).
    pub(crate) fn load(root: &Path) -> Result<Self> {
        let root = resolve_project_root(root, false)?;
        let config = project::load_config_optional(&root)?;
        project::validate_config(&config)?;
        Ok(Self {
            paths: ProjectPaths::new(root),
            config,
        })
    }

    pub(crate) fn base_path(&self) -> PathBuf {
        self.paths.base_path(&self.config)
    }

    pub(crate) fn drafts_dir(&self) -> PathBuf {
        self.paths.drafts_dir(&self.config)
    }
}

pub(crate) fn resolve_project_root(path: &Path, create: bool) -> Result<PathBuf> {
    if create {
        fs::create_dir_all(path).context("create project root")?;
    }
    path.canonicalize()
        .with_context(|| format!("resolve project root {}", path.display()))
}
