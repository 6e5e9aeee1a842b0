pub mod admin;
pub mod config;
pub mod env;
pub mod hook;
pub mod predeploy;
pub mod secret;

/// The operator declined at the confirmation prompt.
#[derive(Debug, thiserror::Error)]
#[error("deployment cancelled by operator")]
pub struct Cancelled;
