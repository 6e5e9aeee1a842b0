use airdeploy_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the service root directory.
///
/// Priority:
/// 1. `--root` flag / `AIRDEPLOY_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `config.json`
/// 3. Walk upward from `cwd` looking for a serverless config
/// 4. Walk upward from `cwd` looking for `.git/`
/// 5. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_from(&cwd)
}

fn resolve_from(start: &Path) -> PathBuf {
    if let Some(dir) = find_upward(start, |d| d.join(paths::CONFIG_FILE).is_file()) {
        return dir;
    }
    if let Some(dir) = find_upward(start, |d| {
        paths::SERVICE_MARKERS.iter().any(|m| d.join(m).is_file())
    }) {
        return dir;
    }
    if let Some(dir) = find_upward(start, |d| d.join(".git").is_dir()) {
        return dir;
    }
    start.to_path_buf()
}

fn find_upward(start: &Path, matches: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        if matches(&dir) {
            return Some(dir);
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => return None,
        }
    }
}
