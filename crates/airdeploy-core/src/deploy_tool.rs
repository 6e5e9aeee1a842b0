//! Invocation of the external deployment tool.
//!
//! Only the tool's status text is consumed; the deploy itself is never driven
//! from here. Each call runs the tool exactly once and blocks until it exits.

use crate::error::{DeployError, Result};
use crate::types::Stage;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const DEPLOY_TOOL: &str = "serverless";

fn tool_bin() -> Result<PathBuf> {
    which::which(DEPLOY_TOOL).map_err(|_| DeployError::ToolNotInstalled(DEPLOY_TOOL.to_string()))
}

/// Run `serverless info --stage <stage>` in `root` and return its stdout.
pub fn fetch_status(root: &Path, stage: &Stage) -> Result<String> {
    run_info(&tool_bin()?, root, stage)
}

fn run_info(bin: &Path, root: &Path, stage: &Stage) -> Result<String> {
    tracing::info!(binary = %bin.display(), stage = %stage, "fetching deployment status");
    let output = Command::new(bin)
        .args(["info", "--stage", stage.as_str()])
        .current_dir(root)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| DeployError::ToolFailed {
            tool: DEPLOY_TOOL.to_string(),
            message: e.to_string(),
        })?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DeployError::ToolFailed {
            tool: DEPLOY_TOOL.to_string(),
            message: stderr.trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
