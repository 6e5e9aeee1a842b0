use crate::error::{DeployError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// File constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "config.json";
pub const ENV_FILE: &str = "outputs/.env";
pub const SECRET_FILE: &str = ".env";

/// Files that mark the root of a deployable service, in lookup priority order.
pub const SERVICE_MARKERS: &[&str] = &["serverless.yml", "serverless.config.js"];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn env_file_path(root: &Path) -> PathBuf {
    root.join(ENV_FILE)
}

pub fn secret_path(root: &Path) -> PathBuf {
    root.join(SECRET_FILE)
}

// ---------------------------------------------------------------------------
// Stage validation
// ---------------------------------------------------------------------------

static STAGE_RE: OnceLock<Regex> = OnceLock::new();

fn stage_re() -> &'static Regex {
    STAGE_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").unwrap())
}

pub fn validate_stage(stage: &str) -> Result<()> {
    if stage.is_empty() || stage.len() > 64 || !stage_re().is_match(stage) {
        return Err(DeployError::InvalidStage(stage.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
