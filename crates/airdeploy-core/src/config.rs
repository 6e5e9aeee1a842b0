use crate::error::{DeployError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// DeployConfig
// ---------------------------------------------------------------------------

/// The persisted `config.json` document.
///
/// The deployment tool spreads this file into its own configuration, so keys
/// this crate does not know about are kept in `extra` and written back as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployConfig {
    /// Public URL of the frontend. Seeds CORS and endpoint derivation.
    pub cors_origin: String,
    pub admin_email: String,
    pub region: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DeployConfig {
    pub fn new(
        cors_origin: impl Into<String>,
        admin_email: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            cors_origin: cors_origin.into(),
            admin_email: admin_email.into(),
            region: region.into(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(DeployError::MissingConfig(path));
        }
        let data = std::fs::read_to_string(&path)?;
        serde_json::from_str(&data).map_err(|e| DeployError::MalformedConfig {
            path,
            reason: e.to_string(),
        })
    }

    /// Like [`DeployConfig::load`] but maps a missing file to `None`.
    pub fn load_optional(root: &Path) -> Result<Option<Self>> {
        match Self::load(root) {
            Ok(cfg) => Ok(Some(cfg)),
            Err(DeployError::MissingConfig(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let mut data = serde_json::to_string_pretty(self)?;
        data.push('\n');
        crate::io::atomic_write(&path, data.as_bytes())?;
        tracing::debug!(path = %path.display(), "saved deploy config");
        Ok(())
    }

    pub fn with_cors_origin(&self, cors_origin: impl Into<String>) -> Self {
        Self {
            cors_origin: cors_origin.into(),
            ..self.clone()
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for (field, value) in [
            ("corsOrigin", &self.cors_origin),
            ("adminEmail", &self.admin_email),
            ("region", &self.region),
        ] {
            if value.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("'{field}' is empty"),
                });
            }
        }

        if !self.cors_origin.trim().is_empty() {
            match crate::endpoints::origin_domain(&self.cors_origin) {
                Ok(_) if self.cors_origin.starts_with("http://") => {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "corsOrigin '{}' is not https; derived endpoints will still use https",
                            self.cors_origin
                        ),
                    });
                }
                Ok(_) => {}
                Err(e) => warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("corsOrigin: {e}"),
                }),
            }
        }

        if !self.admin_email.trim().is_empty() && !self.admin_email.contains('@') {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("adminEmail '{}' does not look like an email", self.admin_email),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
