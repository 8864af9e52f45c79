//! External LM styling for drafts.
//!
//! Invokes a user-configured command with a prompt on stdin and reads the
//! restyled HTML document from stdout. Any tool that maps text to text works
//! (`llm`, `ollama run`, a wrapper script).
//!
//! The command is resolved in priority order:
//! 1. `--lm` CLI flag
//! 2. `lm_command` in `.drafts/config.json`
//! 3. `DRAFTS_LM_COMMAND` environment variable
use crate::draft::{Draft, DraftNumber};
use crate::palette::Palette;
use crate::project::{DraftConfig, LM_COMMAND_ENV};
use crate::util::truncate_string;
use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Instant;

const DRAFT_PROMPT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/draft_prompt.md"
));

/// Configuration for the local LM client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LmClientConfig {
    /// The command to invoke (parsed via shell-words).
    pub command: String,
}

/// Pick the LM command from the flag, then config, then environment.
pub fn resolve_lm_command(flag: Option<&str>, config: &DraftConfig) -> Option<LmClientConfig> {
    let env_command = std::env::var(LM_COMMAND_ENV).ok();
    pick_lm_command(flag, config.lm_command.as_deref(), env_command.as_deref())
}

fn pick_lm_command(
    flag: Option<&str>,
    config: Option<&str>,
    env: Option<&str>,
) -> Option<LmClientConfig> {
    let command = [flag, config, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|command| !command.is_empty())?;
    Some(LmClientConfig {
        command: command.to_string(),
    })
}

/// Fill the draft prompt template for one draft.
pub fn build_prompt(base_html: &str, number: DraftNumber, palette: &Palette) -> String {
    let variant = number.variant();
    DRAFT_PROMPT
        .replace("{{draft_number}}", &number.to_string())
        .replace("{{variant_title}}", variant.title())
        .replace("{{variant_description}}", variant.description())
        .replace("{{primary}}", &palette.primary.to_string())
        .replace("{{secondary}}", &palette.secondary.to_string())
        .replace("{{accent}}", &palette.accent.to_string())
        .replace("{{background}}", &palette.background.to_string())
        .replace("{{base_html}}", base_html.trim_end())
}

/// Render one draft by asking the LM to restyle the base page.
pub fn render_with_lm(
    config: &LmClientConfig,
    base_html: &str,
    number: DraftNumber,
    palette: &Palette,
) -> Result<Draft> {
    let prompt = build_prompt(base_html, number, palette);
    let response = invoke_lm(&config.command, &prompt)
        .with_context(|| format!("style draft {number} with LM"))?;
    let html = extract_html(&response);
    if html.is_empty() {
        return Err(anyhow!("LM returned an empty document for draft {number}"));
    }
    let variant = number.variant();
    Ok(Draft {
        number,
        title: variant.title().to_string(),
        description: variant.description().to_string(),
        html: format!("{html}\n"),
    })
}

fn invoke_lm(command: &str, prompt: &str) -> Result<String> {
    let args =
        shell_words::split(command).with_context(|| format!("parse LM command: {command}"))?;
    if args.is_empty() {
        return Err(anyhow!("LM command is empty"));
    }

    let start = Instant::now();
    let mut child = Command::new(&args[0])
        .args(&args[1..])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawn LM command: {}", args[0]))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(prompt.as_bytes())
            .context("write prompt to LM stdin")?;
    }

    let output = child.wait_with_output().context("wait for LM command")?;
    let elapsed_ms = start.elapsed().as_millis();

    tracing::info!(
        elapsed_ms,
        prompt_bytes = prompt.len(),
        response_bytes = output.stdout.len(),
        "lm invoke complete"
    );

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "LM command failed with status {}: {}",
            output.status,
            truncate_string(stderr.trim(), 500)
        ));
    }

    String::from_utf8(output.stdout).context("decode LM stdout as UTF-8")
}

/// Strip a surrounding code fence if the LM added one.
fn extract_html(text: &str) -> &str {
    let text = text.trim();

    if let Some(start) = text.find("```html") {
        let start = start + 7;
        if let Some(end) = text[start..].find("```") {
            return text[start..start + end].trim();
        }
    }

    if let Some(start) = text.find("```") {
        let start = start + 3;
        let start = text[start..]
            .find('\n')
            .map(|i| start + i + 1)
            .unwrap_or(start);
        if let Some(end) = text[start..].find("```") {
            return text[start..start + end].trim();
        }
    }

    text
}
