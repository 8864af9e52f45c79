//! Transactional publishing of generated files.
//!
//! Files are written into `.drafts/txns/<id>/staging/` first and only copied
//! into the project once every file has been rendered. A failed publish
//! restores whatever it replaced.
use crate::project::ProjectPaths;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One staging directory plus the project it publishes into.
pub struct StagingTxn {
    id: String,
    txn_root: PathBuf,
    staging_root: PathBuf,
    project_root: PathBuf,
}

impl StagingTxn {
    /// Open a fresh transaction directory under `.drafts/txns/`.
    pub fn begin(paths: &ProjectPaths, id: String) -> Result<Self> {
        let txn_root = paths.txns_root().join(&id);
        if txn_root.exists() {
            fs::remove_dir_all(&txn_root)
                .with_context(|| format!("clear {}", txn_root.display()))?;
        }
        let staging_root = paths.txn_staging_root(&id);
        fs::create_dir_all(&staging_root)
            .with_context(|| format!("create {}", staging_root.display()))?;
        Ok(Self {
            id,
            txn_root,
            staging_root,
            project_root: paths.root().to_path_buf(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn staging_root(&self) -> &Path {
        &self.staging_root
    }

    /// Write `text` at `rel_path` (relative to the project root) in staging.
    pub fn write_text(&self, rel_path: &str, text: &str) -> Result<()> {
        let staging_path = self.staging_root.join(rel_path);
        if let Some(parent) = staging_path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&staging_path, text.as_bytes())
            .with_context(|| format!("write {}", staging_path.display()))?;
        Ok(())
    }

    /// Drop the transaction without publishing anything.
    pub fn discard(self) {
        remove_txn_root(&self.txn_root);
    }

    /// Copy every staged file into the project, rolling back on failure.
    ///
    /// Returns the published destination paths in sorted order. The
    /// transaction directory is removed whether or not publishing succeeds.
    pub fn publish(self) -> Result<Vec<PathBuf>> {
        let mut published = Vec::new();
        let mut backups: Vec<(PathBuf, PathBuf)> = Vec::new();
        if let Err(err) = self.publish_into(&mut published, &mut backups) {
            rollback_publish(&published, &backups);
            remove_txn_root(&self.txn_root);
            return Err(err);
        }
        fs::remove_dir_all(&self.txn_root)
            .with_context(|| format!("remove {}", self.txn_root.display()))?;
        Ok(published)
    }

    fn publish_into(
        &self,
        published: &mut Vec<PathBuf>,
        backups: &mut Vec<(PathBuf, PathBuf)>,
    ) -> Result<()> {
        let backup_root = self.txn_root.join("backup");
        for file in collect_files_recursive(&self.staging_root)? {
            let rel = file
                .strip_prefix(&self.staging_root)
                .context("strip staging prefix")?;
            let dest = self.project_root.join(rel);
            if dest.exists() {
                let backup = backup_root.join(rel);
                if let Some(parent) = backup.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("create {}", parent.display()))?;
                }
                fs::copy(&dest, &backup).with_context(|| format!("backup {}", dest.display()))?;
                backups.push((dest.clone(), backup));
            }
            publish_file(&file, &dest)?;
            tracing::debug!(path = %dest.display(), "published");
            published.push(dest);
        }
        Ok(())
    }
}

fn remove_txn_root(txn_root: &Path) {
    if let Err(err) = fs::remove_dir_all(txn_root) {
        tracing::warn!(path = %txn_root.display(), %err, "failed to remove transaction");
    }
}

pub fn collect_files_recursive(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !root.exists() {
        return Ok(files);
    }
    for entry in fs::read_dir(root).with_context(|| format!("read {}", root.display()))? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            files.extend(collect_files_recursive(&path)?);
        } else if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn publish_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let file_name = dest
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("staged");
    let tmp_path = dest
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!(".{file_name}.tmp"));
    fs::copy(source, &tmp_path).with_context(|| format!("publish {}", dest.display()))?;
    fs::rename(&tmp_path, dest).with_context(|| format!("publish {}", dest.display()))?;
    Ok(())
}

/// Undo a partial publish: drop new files, then restore backups over them.
fn rollback_publish(published: &[PathBuf], backups: &[(PathBuf, PathBuf)]) {
    tracing::warn!(published = published.len(), "rolling back partial publish");
    for path in published {
        let _ = fs::remove_file(path);
    }
    for (dest, backup) in backups {
        if let Some(parent) = dest.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::copy(backup, dest);
    }
}
