use crate::output::print_json;
use airdeploy_core::config::DeployConfig;
use airdeploy_core::endpoints::{self, SynthesisMode};
use airdeploy_core::types::Stage;
use airdeploy_core::{deploy_tool, envfile, paths};
use anyhow::Context;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Where live endpoint text comes from.
#[derive(Debug, Clone)]
pub enum EnvSource {
    /// Stored config only.
    Config,
    /// Saved status output ("-" reads stdin).
    StatusFile(PathBuf),
    /// Ask the deployment tool.
    Discover,
}

pub fn run(
    root: &Path,
    stage: Stage,
    source: EnvSource,
    output: Option<&Path>,
    print: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = DeployConfig::load_optional(root).context("failed to load config")?;
    let status_text = read_status(root, &stage, &source)?;

    let (set, mode) = endpoints::synthesize(stage, status_text.as_deref(), config.as_ref())
        .context("failed to synthesize endpoints")?;

    if print {
        print!("{}", envfile::render(&set));
        return Ok(());
    }

    let path = match output {
        Some(p) if p.is_relative() => root.join(p),
        Some(p) => p.to_path_buf(),
        None => paths::env_file_path(root),
    };
    envfile::write(&path, &set).with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        print_json(&serde_json::json!({
            "path": path,
            "mode": mode,
            "endpoints": set,
        }))?;
    } else {
        let how = match mode {
            SynthesisMode::Discovery => "discovered endpoints",
            SynthesisMode::Derivation => "stored corsOrigin",
        };
        println!(".env file created at {} (from {how})", path.display());
        println!("Replace <CLIENT-ID> and <COGNITO-DOMAIN> before building the frontend.");
    }
    Ok(())
}

/// Collect status text. A failing deployment tool is not fatal; the caller
/// falls back to the stored config.
fn read_status(root: &Path, stage: &Stage, source: &EnvSource) -> anyhow::Result<Option<String>> {
    match source {
        EnvSource::Config => Ok(None),
        EnvSource::StatusFile(path) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read status text from stdin")?;
            Ok(Some(buf))
        }
        EnvSource::StatusFile(path) => {
            let path = if path.is_relative() {
                root.join(path)
            } else {
                path.clone()
            };
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read status file '{}'", path.display()))?;
            Ok(Some(text))
        }
        EnvSource::Discover => match deploy_tool::fetch_status(root, stage) {
            Ok(text) => Ok(Some(text)),
            Err(e) => {
                tracing::warn!(error = %e, "deployment status unavailable; using stored config");
                Ok(None)
            }
        },
    }
}
