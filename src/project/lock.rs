//! Lock snapshot helpers.
//!
//! The lock records the base page hash taken before generation so status can
//! prove the original was left untouched.
use super::{DraftConfig, DraftFingerprint, DraftLock, ProjectPaths, LOCK_SCHEMA_VERSION};
use crate::draft::Draft;
use crate::util::{now_epoch_ms, sha256_hex};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// Load the lock snapshot when one has been written.
pub fn load_lock_optional(project_root: &Path) -> Result<Option<DraftLock>> {
    let paths = ProjectPaths::new(project_root.to_path_buf());
    let path = paths.lock_path();
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = fs::read(&path).with_context(|| format!("read lock {}", path.display()))?;
    let lock: DraftLock = serde_json::from_slice(&bytes).context("parse draft lock JSON")?;
    if lock.schema_version != LOCK_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported draft lock schema_version {}",
            lock.schema_version
        ));
    }
    Ok(Some(lock))
}

/// Persist the lock snapshot in a stable JSON format.
pub fn write_lock(project_root: &Path, lock: &DraftLock) -> Result<()> {
    let paths = ProjectPaths::new(project_root.to_path_buf());
    let path = paths.lock_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create state dir")?;
    }
    let text = serde_json::to_string_pretty(lock).context("serialize draft lock")?;
    fs::write(&path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Build a lock snapshot from the base hash and the drafts about to publish.
pub fn build_lock(
    paths: &ProjectPaths,
    config: &DraftConfig,
    base_sha256: &str,
    drafts: &[Draft],
) -> Result<DraftLock> {
    let drafts = drafts
        .iter()
        .map(|draft| DraftFingerprint {
            number: draft.number.get(),
            path: paths.rel_path(&paths.draft_path(config, draft.number)),
            sha256: sha256_hex(draft.html.as_bytes()),
        })
        .collect();
    Ok(DraftLock {
        schema_version: LOCK_SCHEMA_VERSION,
        generated_at_epoch_ms: now_epoch_ms()?,
        base: config.base.clone(),
        base_sha256: base_sha256.to_string(),
        palette: config.palette,
        drafts,
    })
}
