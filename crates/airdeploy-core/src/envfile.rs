//! Frontend `.env` rendering and parsing.
//!
//! One `KEY="value"` line per field, fixed order, `VITE_` prefixed so the
//! frontend build exposes them. `"` and `\` inside values are backslash-escaped,
//! and line breaks are written as `\n` / `\r` so every entry stays on one line.

use crate::endpoints::EndpointSet;
use crate::error::{DeployError, Result};
use crate::io;
use crate::types::Stage;
use std::collections::HashMap;
use std::path::Path;

pub const KEY_CLIENT_ID: &str = "VITE_CLIENT_ID";
pub const KEY_COGNITO_DOMAIN: &str = "VITE_COGNITO_DOMAIN";
pub const KEY_STAGE: &str = "VITE_STAGE";
pub const KEY_BASE_URL: &str = "VITE_BASE_URL";
pub const KEY_API_URL: &str = "VITE_API_URL";
pub const KEY_AUTH_URL: &str = "VITE_AUTH_URL";
pub const KEY_WSS_URL: &str = "VITE_WSS_URL";

/// Output order of the rendered file.
pub const KEYS: [&str; 7] = [
    KEY_CLIENT_ID,
    KEY_COGNITO_DOMAIN,
    KEY_STAGE,
    KEY_BASE_URL,
    KEY_API_URL,
    KEY_AUTH_URL,
    KEY_WSS_URL,
];

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

pub fn render(set: &EndpointSet) -> String {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    let values = [
        set.client_id.clone(),
        set.cognito_domain.clone(),
        set.stage.to_string(),
        opt(&set.base_url),
        opt(&set.api_url),
        opt(&set.auth_url),
        opt(&set.wss_url),
    ];
    let mut out = String::new();
    for (key, value) in KEYS.iter().zip(values.iter()) {
        out.push_str(&format!("{key}=\"{}\"\n", escape(value)));
    }
    out
}

/// Write the rendered file to `path`, creating parent directories and
/// replacing any existing file.
pub fn write(path: &Path, set: &EndpointSet) -> Result<()> {
    io::atomic_write(path, render(set).as_bytes())?;
    tracing::info!(path = %path.display(), stage = %set.stage, "wrote env file");
    Ok(())
}

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

pub fn parse(content: &str) -> Result<EndpointSet> {
    let mut values: HashMap<String, String> = HashMap::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, raw) = line.split_once('=').ok_or_else(|| {
            DeployError::MalformedEnvFile(format!("line {}: expected KEY=\"value\"", idx + 1))
        })?;
        let value = unquote(raw).ok_or_else(|| {
            DeployError::MalformedEnvFile(format!("line {}: value is not quoted", idx + 1))
        })?;
        values.insert(key.trim().to_string(), value);
    }

    let mut take = |key: &str| {
        values
            .remove(key)
            .ok_or_else(|| DeployError::MalformedEnvFile(format!("missing key {key}")))
    };
    let non_empty = |v: String| if v.is_empty() { None } else { Some(v) };

    let client_id = take(KEY_CLIENT_ID)?;
    let cognito_domain = take(KEY_COGNITO_DOMAIN)?;
    let stage = Stage::new(take(KEY_STAGE)?)?;
    let base_url = non_empty(take(KEY_BASE_URL)?);
    let api_url = non_empty(take(KEY_API_URL)?);
    let auth_url = non_empty(take(KEY_AUTH_URL)?);
    let wss_url = non_empty(take(KEY_WSS_URL)?);

    Ok(EndpointSet {
        stage,
        client_id,
        cognito_domain,
        base_url,
        api_url,
        auth_url,
        wss_url,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

fn unquote(raw: &str) -> Option<String> {
    let inner = raw.trim().strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(match chars.next()? {
                'n' => '\n',
                'r' => '\r',
                other => other,
            });
        } else if c == '"' {
            return None;
        } else {
            out.push(c);
        }
    }
    Some(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
