use super::context::ProjectContext;
use crate::cli::StatusArgs;
use crate::status::{build_status, render_text};
use anyhow::{anyhow, Context, Result};

/// Print the status report; incomplete projects exit non-zero.
pub fn run_status(args: &StatusArgs) -> Result<()> {
    let ctx = ProjectContext::load(&args.root.root)?;
    let report = build_status(&ctx.paths, &ctx.config)?;
    if args.json {
        let text = serde_json::to_string_pretty(&report).context("serialize status")?;
        println!("{text}");
    } else {
        print!("{}", render_text(&report, &ctx.paths));
    }
    if !report.is_complete() {
        return Err(anyhow!("drafts incomplete"));
    }
    Ok(())
}
