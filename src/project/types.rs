//! JSON schema types for `.drafts/` artifacts.
use crate::palette::Palette;
use serde::{Deserialize, Serialize};

/// Project configuration stored in `.drafts/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftConfig {
    pub schema_version: u32,
    /// Base page, relative to the project root.
    pub base: String,
    /// Output directory for numbered drafts, relative to the project root.
    pub drafts_dir: String,
    pub palette: Palette,
    /// Command that styles drafts instead of the built-in variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lm_command: Option<String>,
}

/// Fingerprint of a published draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftFingerprint {
    pub number: u8,
    pub path: String,
    pub sha256: String,
}

/// Snapshot written after a successful `generate`.
///
/// `base_sha256` is the pre-generation hash status compares against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftLock {
    pub schema_version: u32,
    pub generated_at_epoch_ms: u128,
    pub base: String,
    pub base_sha256: String,
    pub palette: Palette,
    pub drafts: Vec<DraftFingerprint>,
}
