//! Project status: the checks a finished draft run must satisfy.
//!
//! Each check is evaluated independently from what is on disk (and in the git
//! index), so status is meaningful after partial or manual edits too.
use crate::changelog;
use crate::draft::{DraftNumber, DRAFT_COUNT};
use crate::project::{load_lock_optional, DraftConfig, ProjectPaths};
use crate::util::sha256_file;
use crate::vcs::{is_under, GitRepo};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    DraftsPresent,
    DraftsDistinct,
    ChangelogEntries,
    BaseUnchanged,
    StagingScoped,
}

impl CheckId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckId::DraftsPresent => "drafts_present",
            CheckId::DraftsDistinct => "drafts_distinct",
            CheckId::ChangelogEntries => "changelog_entries",
            CheckId::BaseUnchanged => "base_unchanged",
            CheckId::StagingScoped => "staging_scoped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub id: CheckId,
    pub status: CheckStatus,
    pub detail: String,
}

impl Check {
    fn pass(id: CheckId, detail: impl Into<String>) -> Self {
        Self {
            id,
            status: CheckStatus::Pass,
            detail: detail.into(),
        }
    }

    fn fail(id: CheckId, detail: impl Into<String>) -> Self {
        Self {
            id,
            status: CheckStatus::Fail,
            detail: detail.into(),
        }
    }

    fn skipped(id: CheckId, detail: impl Into<String>) -> Self {
        Self {
            id,
            status: CheckStatus::Skipped,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Complete,
    Incomplete,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub decision: Decision,
    pub base: String,
    pub drafts_dir: String,
    pub checks: Vec<Check>,
}

impl StatusReport {
    pub fn is_complete(&self) -> bool {
        self.decision == Decision::Complete
    }
}

/// Evaluate every check against the project on disk.
pub fn build_status(paths: &ProjectPaths, config: &DraftConfig) -> Result<StatusReport> {
    let checks = vec![
        check_drafts_present(paths, config)?,
        check_drafts_distinct(paths, config)?,
        check_changelog(paths, config)?,
        check_base_unchanged(paths, config)?,
        check_staging(paths, config)?,
    ];
    let decision = if checks.iter().any(|check| check.status == CheckStatus::Fail) {
        Decision::Incomplete
    } else {
        Decision::Complete
    };
    Ok(StatusReport {
        decision,
        base: config.base.clone(),
        drafts_dir: config.drafts_dir.clone(),
        checks,
    })
}

fn check_drafts_present(paths: &ProjectPaths, config: &DraftConfig) -> Result<Check> {
    let id = CheckId::DraftsPresent;
    let drafts_dir = paths.drafts_dir(config);
    if !drafts_dir.is_dir() {
        return Ok(Check::fail(
            id,
            format!("{} does not exist", config.drafts_dir),
        ));
    }
    let missing: Vec<String> = DraftNumber::all()
        .filter(|number| !paths.draft_path(config, *number).is_file())
        .map(|number| number.to_string())
        .collect();

    let mut unexpected = Vec::new();
    for entry in fs::read_dir(&drafts_dir)
        .with_context(|| format!("read {}", drafts_dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let valid = name
            .parse::<u8>()
            .ok()
            .filter(|n| name == n.to_string())
            .and_then(|n| DraftNumber::new(n).ok())
            .is_some();
        if !valid {
            unexpected.push(name);
        }
    }
    unexpected.sort();

    if missing.is_empty() && unexpected.is_empty() {
        return Ok(Check::pass(
            id,
            format!("drafts 1-{DRAFT_COUNT} each have index.html"),
        ));
    }
    let mut problems = Vec::new();
    if !missing.is_empty() {
        problems.push(format!("missing drafts: {}", missing.join(", ")));
    }
    if !unexpected.is_empty() {
        problems.push(format!(
            "unexpected directories: {}",
            unexpected.join(", ")
        ));
    }
    Ok(Check::fail(id, problems.join("; ")))
}

fn check_drafts_distinct(paths: &ProjectPaths, config: &DraftConfig) -> Result<Check> {
    let id = CheckId::DraftsDistinct;
    let base_path = paths.base_path(config);
    let base_hash = if base_path.is_file() {
        Some(sha256_file(&base_path)?)
    } else {
        None
    };

    let mut by_hash: BTreeMap<String, Vec<DraftNumber>> = BTreeMap::new();
    for number in DraftNumber::all() {
        let path = paths.draft_path(config, number);
        if path.is_file() {
            by_hash.entry(sha256_file(&path)?).or_default().push(number);
        }
    }
    if by_hash.is_empty() {
        return Ok(Check::skipped(id, "no drafts to compare"));
    }

    let mut problems = Vec::new();
    for (hash, numbers) in &by_hash {
        let names: Vec<String> = numbers.iter().map(ToString::to_string).collect();
        if base_hash.as_deref() == Some(hash.as_str()) {
            problems.push(format!(
                "draft {} identical to {}",
                names.join(", "),
                config.base
            ));
        }
        if numbers.len() > 1 {
            problems.push(format!("drafts {} are identical", names.join(", ")));
        }
    }
    if problems.is_empty() {
        Ok(Check::pass(
            id,
            "every draft differs from the base and from each other",
        ))
    } else {
        Ok(Check::fail(id, problems.join("; ")))
    }
}

fn check_changelog(paths: &ProjectPaths, config: &DraftConfig) -> Result<Check> {
    let id = CheckId::ChangelogEntries;
    let path = paths.changelog_path(config);
    if !path.is_file() {
        return Ok(Check::fail(
            id,
            format!("{} does not exist", paths.rel_path(&path)),
        ));
    }
    let text = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let entries = changelog::parse_entries(&text);
    let numbers: Vec<u32> = entries.iter().map(|entry| entry.number).collect();
    let expected: Vec<u32> = (1..=u32::from(DRAFT_COUNT)).collect();

    if numbers != expected {
        let found = numbers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Ok(Check::fail(
            id,
            format!("expected entries 1-{DRAFT_COUNT} in order, found [{found}]"),
        ));
    }
    let blank: Vec<String> = entries
        .iter()
        .filter(|entry| entry.title.is_empty() || entry.description.is_empty())
        .map(|entry| entry.number.to_string())
        .collect();
    if !blank.is_empty() {
        return Ok(Check::fail(
            id,
            format!("entries without title or description: {}", blank.join(", ")),
        ));
    }
    Ok(Check::pass(
        id,
        format!("{DRAFT_COUNT} entries in draft order"),
    ))
}

fn check_base_unchanged(paths: &ProjectPaths, config: &DraftConfig) -> Result<Check> {
    let id = CheckId::BaseUnchanged;
    let base_path = paths.base_path(config);
    if !base_path.is_file() {
        return Ok(Check::fail(id, format!("{} is missing", config.base)));
    }
    let Some(lock) = load_lock_optional(paths.root())? else {
        return Ok(Check::fail(id, "no lock.json; run generate first"));
    };
    if lock.base != config.base {
        return Ok(Check::fail(
            id,
            format!(
                "lock records base {:?} but config names {:?}",
                lock.base, config.base
            ),
        ));
    }
    let current = sha256_file(&base_path)?;
    if current == lock.base_sha256 {
        Ok(Check::pass(
            id,
            format!("{} matches the pre-generation hash", config.base),
        ))
    } else {
        Ok(Check::fail(
            id,
            format!("{} changed since generation", config.base),
        ))
    }
}

fn check_staging(paths: &ProjectPaths, config: &DraftConfig) -> Result<Check> {
    let id = CheckId::StagingScoped;
    if which::which("git").is_err() {
        return Ok(Check::skipped(id, "git not available"));
    }
    let Some(repo) = GitRepo::discover(paths.root())? else {
        return Ok(Check::skipped(id, "not a git repository"));
    };
    let drafts_rel = repo.repo_path(&paths.drafts_dir(config))?;
    let base_rel = repo.repo_path(&paths.base_path(config))?;
    let staged = repo.staged_paths()?;
    let outside: Vec<&String> = staged
        .iter()
        .filter(|path| !is_under(path, &drafts_rel))
        .collect();
    if staged.iter().any(|path| *path == base_rel) {
        return Ok(Check::fail(id, format!("{base_rel} is staged")));
    }
    if !outside.is_empty() {
        let list = outside
            .iter()
            .map(|path| path.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return Ok(Check::fail(
            id,
            format!("paths staged outside {drafts_rel}: {list}"),
        ));
    }
    Ok(Check::pass(
        id,
        format!(
            "{} staged path(s), all under {drafts_rel}",
            staged.len()
        ),
    ))
}

/// Human-readable status summary.
pub fn render_text(report: &StatusReport, paths: &ProjectPaths) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "project: {}", paths.root().display());
    let _ = writeln!(out, "base: {}  drafts: {}", report.base, report.drafts_dir);
    for check in &report.checks {
        let mark = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Skipped => "skip",
        };
        let _ = writeln!(out, "  [{mark:>4}] {}: {}", check.id.as_str(), check.detail);
    }
    let decision = match report.decision {
        Decision::Complete => "complete",
        Decision::Incomplete => "incomplete",
    };
    let _ = writeln!(out, "decision: {decision}");
    out
}
