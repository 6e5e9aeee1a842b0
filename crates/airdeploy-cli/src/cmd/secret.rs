use crate::output::print_json;
use airdeploy_core::{paths, secret};
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, key: &str, path: Option<&Path>, json: bool) -> anyhow::Result<()> {
    if key.trim().is_empty() || key.contains('=') {
        anyhow::bail!("invalid variable name '{key}'");
    }
    let path = match path {
        Some(p) if p.is_relative() => root.join(p),
        Some(p) => p.to_path_buf(),
        None => paths::secret_path(root),
    };
    secret::write_secret(&path, key)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        print_json(&serde_json::json!({ "key": key, "path": path }))?;
    } else {
        println!("wrote {key} to {}", path.display());
    }
    Ok(())
}
