//! Workflow generate step.
//!
//! Renders every draft in memory, checks them, stages them with the updated
//! changelog, and only then publishes into the project.
use super::context::ProjectContext;
use crate::changelog;
use crate::cli::GenerateArgs;
use crate::draft::{render_builtin, Draft, DraftNumber};
use crate::lm::{render_with_lm, resolve_lm_command};
use crate::palette::Palette;
use crate::project::{self, draft_rel};
use crate::staging::StagingTxn;
use crate::util::{now_epoch_ms, sha256_file, sha256_hex};
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Run the generate step and return the published paths.
pub fn run_generate(args: &GenerateArgs) -> Result<Vec<PathBuf>> {
    let ctx = ProjectContext::load(&args.root.root)?;
    let palette = ctx.config.palette.with_overrides(&args.palette.overrides());

    let base_path = ctx.base_path();
    let base_html = fs::read_to_string(&base_path)
        .with_context(|| format!("read base page {}", base_path.display()))?;
    let base_sha256 = sha256_hex(base_html.as_bytes());

    let changelog_path = ctx.paths.changelog_path(&ctx.config);
    let existing_changelog = if changelog_path.is_file() {
        Some(
            fs::read_to_string(&changelog_path)
                .with_context(|| format!("read {}", changelog_path.display()))?,
        )
    } else {
        None
    };
    if !args.force {
        ensure_no_existing_drafts(&ctx)?;
    }

    let drafts = render_drafts(&ctx, args.lm.as_deref(), &base_html, &palette)?;
    ensure_distinct(&base_html, &drafts, &ctx.config.base)?;

    let previous = match existing_changelog {
        Some(text) if args.force => Some(changelog::remove_entries(&text)),
        other => other,
    };
    let changelog_text =
        changelog::append_entries(previous.as_deref(), &ctx.config.base, &drafts)
            .map_err(|err| anyhow!("{err} (use --force to replace existing drafts)"))?;

    let txn = StagingTxn::begin(&ctx.paths, format!("generate-{}", now_epoch_ms()?))?;
    tracing::debug!(txn = txn.id(), staging = %txn.staging_root().display(), "staging drafts");
    let staged = stage_outputs(&txn, &ctx, &drafts, &changelog_text)
        .and_then(|()| ensure_base_untouched(&base_path, &base_sha256));
    if let Err(err) = staged {
        txn.discard();
        return Err(err);
    }
    let published = txn.publish()?;
    ensure_base_untouched(&base_path, &base_sha256)?;

    let mut config = ctx.config.clone();
    config.palette = palette;
    let lock = project::build_lock(&ctx.paths, &config, &base_sha256, &drafts)?;
    project::write_lock(ctx.paths.root(), &lock)?;

    for path in &published {
        tracing::info!(path = %ctx.paths.rel_path(path), "published");
        println!("wrote {}", ctx.paths.rel_path(path));
    }
    Ok(published)
}

fn stage_outputs(
    txn: &StagingTxn,
    ctx: &ProjectContext,
    drafts: &[Draft],
    changelog_text: &str,
) -> Result<()> {
    for draft in drafts {
        let rel = format!("{}/{}", ctx.config.drafts_dir, draft_rel(draft.number));
        txn.write_text(&rel, &draft.html)?;
    }
    let changelog_path = ctx.paths.changelog_path(&ctx.config);
    txn.write_text(&ctx.paths.rel_path(&changelog_path), changelog_text)
}

fn render_drafts(
    ctx: &ProjectContext,
    lm_flag: Option<&str>,
    base_html: &str,
    palette: &Palette,
) -> Result<Vec<Draft>> {
    match resolve_lm_command(lm_flag, &ctx.config) {
        Some(lm) => {
            tracing::info!(command = %lm.command, "styling drafts with LM");
            DraftNumber::all()
                .map(|number| render_with_lm(&lm, base_html, number, palette))
                .collect()
        }
        None => Ok(DraftNumber::all()
            .map(|number| render_builtin(base_html, number, palette))
            .collect()),
    }
}

fn ensure_no_existing_drafts(ctx: &ProjectContext) -> Result<()> {
    let existing: Vec<String> = DraftNumber::all()
        .filter(|number| ctx.paths.draft_path(&ctx.config, *number).exists())
        .map(|number| number.to_string())
        .collect();
    if existing.is_empty() {
        return Ok(());
    }
    Err(anyhow!(
        "drafts {} already exist in {} (use --force to replace them)",
        existing.join(", "),
        ctx.drafts_dir().display()
    ))
}

/// Every draft must differ from the base and from every other draft.
fn ensure_distinct(base_html: &str, drafts: &[Draft], base_rel: &str) -> Result<()> {
    let mut seen: BTreeMap<&str, DraftNumber> = BTreeMap::new();
    for draft in drafts {
        if draft.html == base_html {
            return Err(anyhow!(
                "draft {} is identical to {base_rel}",
                draft.number
            ));
        }
        if let Some(previous) = seen.insert(draft.html.as_str(), draft.number) {
            return Err(anyhow!("drafts {previous} and {} are identical", draft.number));
        }
    }
    Ok(())
}

fn ensure_base_untouched(base_path: &Path, expected: &str) -> Result<()> {
    let current = sha256_file(base_path)?;
    if current != expected {
        return Err(anyhow!("{} changed during generation", base_path.display()));
    }
    Ok(())
}
