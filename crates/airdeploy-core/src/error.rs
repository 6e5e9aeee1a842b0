use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("configuration not found at {0}: create it with 'airdeploy predeploy' or 'airdeploy config set'")]
    MissingConfig(PathBuf),

    #[error("malformed configuration at {path}: {reason}")]
    MalformedConfig { path: PathBuf, reason: String },

    #[error("no endpoint source: status text had no endpoints and no stored configuration is available")]
    EndpointSourceMissing,

    #[error("invalid origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("invalid stage '{0}': must be alphanumeric with '-' or '_'")]
    InvalidStage(String),

    #[error("derived table name is empty")]
    EmptyTableName,

    #[error("malformed env file: {0}")]
    MalformedEnvFile(String),

    #[error("'{0}' is not installed or not on PATH")]
    ToolNotInstalled(String),

    #[error("'{tool}' failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DeployError>;
