use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod changelog;
mod cli;
mod draft;
mod lm;
mod palette;
mod project;
mod staging;
mod status;
mod styles;
mod util;
mod vcs;
mod workflow;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Init(args) => workflow::run_init(&args),
        Command::Generate(args) => workflow::run_generate(&args).map(|_| ()),
        Command::Status(args) => workflow::run_status(&args),
        Command::Stage(args) => workflow::run_stage(&args).map(|_| ()),
        Command::Commit(args) => workflow::run_commit(&args).map(|_| ()),
    }
}

/// Log to stderr; `RUST_LOG` wins over the `--verbose` default.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
