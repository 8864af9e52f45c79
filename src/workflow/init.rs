//! Workflow init step.
//!
//! Init records the palette and layout so later commands do not need flags.
use super::context::resolve_project_root;
use crate::cli::InitArgs;
use crate::project::{self, ProjectPaths};
use anyhow::{anyhow, Result};

/// Run the init step, writing `.drafts/config.json`.
pub fn run_init(args: &InitArgs) -> Result<()> {
    let root = resolve_project_root(&args.root.root, true)?;
    let paths = ProjectPaths::new(root);
    let config_path = paths.config_path();
    if config_path.is_file() && !args.force {
        return Err(anyhow!(
            "config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }

    let mut config = project::default_config();
    if let Some(base) = args.base.as_deref() {
        config.base = base.trim().to_string();
    }
    if let Some(drafts_dir) = args.drafts_dir.as_deref() {
        config.drafts_dir = drafts_dir.trim().trim_end_matches('/').to_string();
    }
    config.lm_command = args.lm.clone();
    config.palette = config.palette.with_overrides(&args.palette.overrides());
    project::validate_config(&config)?;

    let base_path = paths.base_path(&config);
    if !base_path.is_file() {
        tracing::warn!(base = %base_path.display(), "base page not found yet");
    }

    project::write_config(paths.root(), &config)?;
    println!("wrote {}", config_path.display());
    Ok(())
}
