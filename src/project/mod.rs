//! Project-owned configuration, lock snapshot, and path layout.
//!
//! Tool state lives under `.drafts/` next to the base page so that it never
//! mixes with the published drafts directory.
/// Current schema version for `.drafts/config.json`.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;
/// Current schema version for `.drafts/lock.json`.
pub const LOCK_SCHEMA_VERSION: u32 = 1;

/// Tool state directory, relative to the project root.
pub const STATE_DIR_REL: &str = ".drafts";
/// Default base page, relative to the project root.
pub const DEFAULT_BASE_REL: &str = "index.html";
/// Default drafts directory, relative to the project root.
pub const DEFAULT_DRAFTS_DIR_REL: &str = "drafts";
/// Environment variable consulted for the LM command.
pub const LM_COMMAND_ENV: &str = "DRAFTS_LM_COMMAND";

mod config;
mod lock;
mod paths;
mod types;

pub use config::{default_config, load_config_optional, validate_config, write_config};
pub use lock::{build_lock, load_lock_optional, write_lock};
pub use paths::{draft_rel, ProjectPaths};
pub use types::{DraftConfig, DraftFingerprint, DraftLock};
