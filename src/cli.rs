//! CLI argument parsing for the drafts workflow.
use crate::palette::{PaletteOverrides, Rgb};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "drafts",
    version,
    about = "Generate palette-styled draft variants of a static page",
    after_help = "Commands:\n  init      Write .drafts/config.json with the default palette\n  generate  Render drafts/1..7/index.html and append drafts/README.md\n  status    Check drafts, changelog, base page, and git staging\n  stage     git add only the draft files\n  commit    Stage and commit only the drafts directory\n\nExamples:\n  drafts init --root site\n  drafts generate --root site --accent '#ff6600'\n  drafts status --root site --json\n  drafts commit --root site -m 'Add palette drafts'",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug logging to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level workflow commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Init(InitArgs),
    Generate(GenerateArgs),
    Status(StatusArgs),
    Stage(StageArgs),
    Commit(CommitArgs),
}

/// Project root shared by every command.
#[derive(Args, Debug, Clone)]
pub struct RootDir {
    /// Project root containing the base page
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
}

/// Palette overrides accepted by init and generate.
#[derive(Args, Debug, Clone, Default)]
pub struct PaletteArgs {
    /// Primary color (#rrggbb)
    #[arg(long, value_name = "HEX")]
    pub primary: Option<Rgb>,

    /// Secondary color (#rrggbb)
    #[arg(long, value_name = "HEX")]
    pub secondary: Option<Rgb>,

    /// Accent color (#rrggbb)
    #[arg(long, value_name = "HEX")]
    pub accent: Option<Rgb>,

    /// Background color (#rrggbb)
    #[arg(long, value_name = "HEX")]
    pub background: Option<Rgb>,
}

impl PaletteArgs {
    pub fn overrides(&self) -> PaletteOverrides {
        PaletteOverrides {
            primary: self.primary,
            secondary: self.secondary,
            accent: self.accent,
            background: self.background,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Write .drafts/config.json for a project")]
pub struct InitArgs {
    #[command(flatten)]
    pub root: RootDir,

    /// Base page, relative to the root
    #[arg(long, value_name = "PATH")]
    pub base: Option<String>,

    /// Drafts directory, relative to the root
    #[arg(long, value_name = "PATH")]
    pub drafts_dir: Option<String>,

    /// LM command used to style drafts instead of the built-in variants
    #[arg(long, value_name = "CMD")]
    pub lm: Option<String>,

    #[command(flatten)]
    pub palette: PaletteArgs,

    /// Overwrite an existing config.json
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Render the drafts and append the changelog")]
pub struct GenerateArgs {
    #[command(flatten)]
    pub root: RootDir,

    #[command(flatten)]
    pub palette: PaletteArgs,

    /// LM command used to style drafts instead of the built-in variants
    #[arg(long, value_name = "CMD")]
    pub lm: Option<String>,

    /// Replace existing drafts and rewrite the changelog
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Check drafts, changelog, base page, and staging")]
pub struct StatusArgs {
    #[command(flatten)]
    pub root: RootDir,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Stage only the draft files")]
pub struct StageArgs {
    #[command(flatten)]
    pub root: RootDir,
}

#[derive(Parser, Debug)]
#[command(about = "Stage and commit only the drafts directory")]
pub struct CommitArgs {
    #[command(flatten)]
    pub root: RootDir,

    /// Commit message
    #[arg(short, long, default_value = DEFAULT_COMMIT_MESSAGE)]
    pub message: String,
}

pub const DEFAULT_COMMIT_MESSAGE: &str = "Add 7 palette drafts";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_with_palette_flags() {
        let args = RootArgs::try_parse_from([
            "drafts",
            "generate",
            "--root",
            "site",
            "--accent",
            "#ff6600",
            "--force",
        ])
        .unwrap();
        let Command::Generate(generate) = args.command else {
            panic!("expected generate");
        };
        assert_eq!(generate.root.root, PathBuf::from("site"));
        assert_eq!(generate.palette.accent, Some(Rgb::new(0xff, 0x66, 0x00)));
        assert!(generate.force);
    }

    #[test]
    fn rejects_bad_colors() {
        let err = RootArgs::try_parse_from(["drafts", "generate", "--primary", "blue"]);
        assert!(err.is_err());
    }

    #[test]
    fn commit_message_defaults() {
        let args = RootArgs::try_parse_from(["drafts", "commit"]).unwrap();
        let Command::Commit(commit) = args.command else {
            panic!("expected commit");
        };
        assert_eq!(commit.message, DEFAULT_COMMIT_MESSAGE);
        assert_eq!(commit.root.root, PathBuf::from("."));
    }
}
