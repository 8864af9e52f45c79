//! Draft configuration helpers.
//!
//! This module loads, validates, and persists the project-owned config. A
//! project without a config runs on the defaults.
use super::{
    DraftConfig, ProjectPaths, CONFIG_SCHEMA_VERSION, DEFAULT_BASE_REL, DEFAULT_DRAFTS_DIR_REL,
    STATE_DIR_REL,
};
use crate::palette::Palette;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Build the default config used when a project is first initialized.
pub fn default_config() -> DraftConfig {
    DraftConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        base: DEFAULT_BASE_REL.to_string(),
        drafts_dir: DEFAULT_DRAFTS_DIR_REL.to_string(),
        palette: Palette::default(),
        lm_command: None,
    }
}

/// Load the project config from `.drafts/config.json`.
pub fn load_config(project_root: &Path) -> Result<DraftConfig> {
    let paths = ProjectPaths::new(project_root.to_path_buf());
    let path = paths.config_path();
    let bytes = fs::read(&path).with_context(|| format!("read config {}", path.display()))?;
    let config: DraftConfig =
        serde_json::from_slice(&bytes).context("parse draft config JSON")?;
    Ok(config)
}

/// Load the config when present, otherwise fall back to defaults.
pub fn load_config_optional(project_root: &Path) -> Result<DraftConfig> {
    let paths = ProjectPaths::new(project_root.to_path_buf());
    if !paths.config_path().is_file() {
        tracing::debug!("no config; using defaults");
        return Ok(default_config());
    }
    load_config(project_root)
}

/// Persist a config to disk in a stable JSON format.
pub fn write_config(project_root: &Path, config: &DraftConfig) -> Result<()> {
    let paths = ProjectPaths::new(project_root.to_path_buf());
    let path = paths.config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create state dir")?;
    }
    let text = serde_json::to_string_pretty(config).context("serialize draft config")?;
    fs::write(&path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Validate schema version and the relative paths a config names.
pub fn validate_config(config: &DraftConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported draft config schema_version {}",
            config.schema_version
        ));
    }
    validate_relative_path(&config.base, "base")?;
    validate_relative_path(&config.drafts_dir, "drafts_dir")?;

    let base = normalized(&config.base);
    let drafts_dir = normalized(&config.drafts_dir);
    if drafts_dir.as_os_str().is_empty() {
        return Err(anyhow!(
            "drafts_dir must name a subdirectory of the project (got {:?})",
            config.drafts_dir
        ));
    }
    if base.as_os_str().is_empty() {
        return Err(anyhow!("base must name a file (got {:?})", config.base));
    }
    if base.starts_with(&drafts_dir) {
        return Err(anyhow!(
            "base {:?} must not live inside drafts_dir {:?}",
            config.base,
            config.drafts_dir
        ));
    }
    if drafts_dir.starts_with(STATE_DIR_REL) {
        return Err(anyhow!("drafts_dir must not live inside {STATE_DIR_REL}"));
    }
    if let Some(command) = config.lm_command.as_deref() {
        if command.trim().is_empty() {
            return Err(anyhow!("lm_command must be non-empty when set"));
        }
    }
    Ok(())
}

/// Drop `.` components so `./drafts` and `drafts` compare equal.
fn normalized(rel: &str) -> PathBuf {
    Path::new(rel)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

fn validate_relative_path(rel: &str, label: &str) -> Result<()> {
    if rel.trim().is_empty() {
        return Err(anyhow!("{label} must be non-empty"));
    }
    let path = Path::new(rel);
    let escapes = path
        .components()
        .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
    if path.is_absolute() || escapes {
        return Err(anyhow!(
            "{label} must be a relative path without '..' (got {rel:?})"
        ));
    }
    Ok(())
}
