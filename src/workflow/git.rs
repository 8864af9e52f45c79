//! Workflow stage and commit steps.
//!
//! Staging is path-by-path so nothing outside the drafts directory can slip
//! into the index, and commits are restricted to the drafts pathspec.
use super::context::ProjectContext;
use crate::cli::{CommitArgs, StageArgs};
use crate::draft::DraftNumber;
use crate::vcs::{is_under, GitRepo};
use anyhow::{anyhow, Result};

/// Stage the draft files and changelog; returns the staged repo paths.
pub fn run_stage(args: &StageArgs) -> Result<Vec<String>> {
    let ctx = ProjectContext::load(&args.root.root)?;
    let repo = GitRepo::require(ctx.paths.root())?;
    let staged = stage_drafts(&ctx, &repo)?;
    for path in &staged {
        println!("staged {path}");
    }
    Ok(staged)
}

/// Stage, then commit only the drafts directory; returns the commit id.
pub fn run_commit(args: &CommitArgs) -> Result<String> {
    let ctx = ProjectContext::load(&args.root.root)?;
    let repo = GitRepo::require(ctx.paths.root())?;
    stage_drafts(&ctx, &repo)?;
    let drafts_rel = repo.repo_path(&ctx.drafts_dir())?;
    let commit = repo.commit_only(&args.message, &drafts_rel)?;

    let base_rel = repo.repo_path(&ctx.base_path())?;
    let committed = repo.head_commit_paths()?;
    if let Some(stray) = committed.iter().find(|path| !is_under(path, &drafts_rel)) {
        return Err(anyhow!("commit {commit} unexpectedly includes {stray}"));
    }
    tracing::info!(%commit, files = committed.len(), "committed drafts");
    println!(
        "committed {commit} ({} files under {drafts_rel}, {base_rel} excluded)",
        committed.len()
    );
    Ok(commit)
}

fn stage_drafts(ctx: &ProjectContext, repo: &GitRepo) -> Result<Vec<String>> {
    let drafts_rel = repo.repo_path(&ctx.drafts_dir())?;
    let base_rel = repo.repo_path(&ctx.base_path())?;

    let already_staged = repo.staged_paths()?;
    if already_staged.iter().any(|path| *path == base_rel) {
        return Err(anyhow!(
            "{base_rel} is staged; unstage it first (git restore --staged {base_rel})"
        ));
    }

    let mut files = Vec::new();
    for number in DraftNumber::all() {
        let path = ctx.paths.draft_path(&ctx.config, number);
        if !path.is_file() {
            return Err(anyhow!(
                "draft {number} missing at {} (run generate first)",
                path.display()
            ));
        }
        files.push(path);
    }
    let changelog = ctx.paths.changelog_path(&ctx.config);
    if !changelog.is_file() {
        return Err(anyhow!(
            "changelog missing at {} (run generate first)",
            changelog.display()
        ));
    }
    files.push(changelog);

    let rel_files = files
        .iter()
        .map(|path| repo.repo_path(path))
        .collect::<Result<Vec<_>>>()?;
    if let Some(outside) = rel_files.iter().find(|path| !is_under(path, &drafts_rel)) {
        return Err(anyhow!("refusing to stage {outside} outside {drafts_rel}"));
    }
    repo.add_paths(&rel_files)?;
    Ok(rel_files)
}
