//! Workflow orchestration for the drafts commands.
//!
//! Each step loads the project context, does one thing, and reports what it
//! wrote on stdout.
mod context;
mod generate;
mod git;
mod init;
mod status;

pub(crate) use generate::run_generate;
pub(crate) use git::{run_commit, run_stage};
pub(crate) use init::run_init;
pub(crate) use status::run_status;
