//! Endpoint synthesis: turns discovered origins or a stored frontend origin
//! into the full set of URLs the frontend build needs for one stage.

use crate::config::DeployConfig;
use crate::error::{DeployError, Result};
use crate::extract::{DiscoveredOrigins, OriginSource, StatusText};
use crate::types::Stage;
use serde::Serialize;

pub const CLIENT_ID_PLACEHOLDER: &str = "<CLIENT-ID>";
pub const COGNITO_DOMAIN_PLACEHOLDER: &str = "<COGNITO-DOMAIN>";

const API_PATH: &str = "/api";
const AUTH_PATH: &str = "/auth";

/// How an [`EndpointSet`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisMode {
    Discovery,
    Derivation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointSet {
    pub stage: Stage,
    pub client_id: String,
    pub cognito_domain: String,
    pub base_url: Option<String>,
    pub api_url: Option<String>,
    pub auth_url: Option<String>,
    pub wss_url: Option<String>,
}

impl EndpointSet {
    fn empty(stage: Stage) -> Self {
        Self {
            stage,
            client_id: CLIENT_ID_PLACEHOLDER.to_string(),
            cognito_domain: COGNITO_DOMAIN_PLACEHOLDER.to_string(),
            base_url: None,
            api_url: None,
            auth_url: None,
            wss_url: None,
        }
    }

    /// Build from live discovery. The first origin of each family wins.
    pub fn from_discovery(stage: Stage, origins: &DiscoveredOrigins) -> Self {
        let mut set = Self::empty(stage);
        if origins.web.len() > 1 || origins.websocket.len() > 1 {
            tracing::warn!(
                web = origins.web.len(),
                websocket = origins.websocket.len(),
                "multiple candidate origins discovered; using the first of each"
            );
        }
        if let Some(base) = origins.first_web() {
            let base = base.to_string();
            set.api_url = Some(format!("{base}{API_PATH}"));
            set.auth_url = Some(format!("{base}{AUTH_PATH}"));
            set.base_url = Some(base);
        }
        set.wss_url = origins.first_websocket().map(ToString::to_string);
        set
    }

    /// Build from the stored frontend origin using the fixed subdomain layout.
    pub fn from_origin(stage: Stage, cors_origin: &str) -> Result<Self> {
        let domain = origin_domain(cors_origin)?;
        let mut set = Self::empty(stage);
        set.base_url = Some(cors_origin.to_string());
        set.api_url = Some(format!("https://api.{domain}{API_PATH}"));
        set.auth_url = Some(format!("https://auth.{domain}{AUTH_PATH}"));
        set.wss_url = Some(format!("wss://wss.{domain}"));
        Ok(set)
    }
}

/// Registrable domain of an absolute http(s) origin.
///
/// Scheme, port and path are dropped. A host with three or more labels loses
/// its leftmost label, so `https://app.example.com` yields `example.com` and
/// `https://example.com` stays `example.com`. The origin must be a named host
/// with no whitespace or control characters anywhere in it.
pub fn origin_domain(cors_origin: &str) -> Result<String> {
    let invalid = |reason: &str| DeployError::InvalidOrigin {
        origin: cors_origin.to_string(),
        reason: reason.to_string(),
    };
    // Url::parse silently strips tabs, newlines and surrounding spaces.
    if cors_origin
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(invalid("contains whitespace or control characters"));
    }
    let parsed = url::Url::parse(cors_origin).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    let host = match parsed.host() {
        Some(url::Host::Domain(h)) if !h.is_empty() => h,
        Some(url::Host::Ipv4(_)) | Some(url::Host::Ipv6(_)) => {
            return Err(invalid("IP addresses have no subdomains to derive endpoints from"))
        }
        _ => return Err(invalid("missing host")),
    };
    let labels: Vec<&str> = host.split('.').collect();
    let domain = if labels.len() >= 3 {
        labels[1..].join(".")
    } else {
        host.to_string()
    };
    Ok(domain)
}

/// Pick a synthesis mode and build the endpoint set.
///
/// Discovery is used when `status_text` is given and contains at least one
/// origin; otherwise the stored config's `corsOrigin` is used.
pub fn synthesize(
    stage: Stage,
    status_text: Option<&str>,
    config: Option<&DeployConfig>,
) -> Result<(EndpointSet, SynthesisMode)> {
    if let Some(text) = status_text {
        let origins = StatusText(text).discover();
        if !origins.is_empty() {
            tracing::info!(stage = %stage, "synthesizing endpoints from discovered origins");
            return Ok((
                EndpointSet::from_discovery(stage, &origins),
                SynthesisMode::Discovery,
            ));
        }
        tracing::warn!(stage = %stage, "no endpoints found in status text; falling back to stored config");
    }

    let config = config.ok_or(DeployError::EndpointSourceMissing)?;
    tracing::info!(stage = %stage, origin = %config.cors_origin, "deriving endpoints from stored origin");
    Ok((
        EndpointSet::from_origin(stage, &config.cors_origin)?,
        SynthesisMode::Derivation,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(origin: &str) -> DeployConfig {
        DeployConfig::new(origin, "admin@example.com", "eu-west-1")
    }

    #[test]
    fn derivation_from_subdomain_origin() {
        let set = EndpointSet::from_origin(Stage::default(), "https://app.example.com").unwrap();
        assert_eq!(set.base_url.as_deref(), Some("https://app.example.com"));
        assert_eq!(set.api_url.as_deref(), Some("https://api.example.com/api"));
        assert_eq!(set.auth_url.as_deref(), Some("https://auth.example.com/auth"));
        assert_eq!(set.wss_url.as_deref(), Some("wss://wss.example.com"));
        assert_eq!(set.client_id, CLIENT_ID_PLACEHOLDER);
        assert_eq!(set.cognito_domain, COGNITO_DOMAIN_PLACEHOLDER);
    }

    #[test]
    fn derivation_strips_port_and_path() {
        assert_eq!(
            origin_domain("https://app.example.com:8443/login?x=1").unwrap(),
            "example.com"
        );
    }

    #[test]
    fn derivation_keeps_apex_domain() {
        assert_eq!(origin_domain("https://example.com").unwrap(), "example.com");
    }

    #[test]
    fn derivation_keeps_base_url_verbatim() {
        let set = EndpointSet::from_origin(Stage::default(), "https://app.example.com/").unwrap();
        assert_eq!(set.base_url.as_deref(), Some("https://app.example.com/"));
    }

    #[test]
    fn derivation_rejects_bad_origins() {
        for bad in [
            "app.example.com",
            "ftp://files.example.com",
            "",
            "https://",
            "https://app.example.com\n",
            " https://app.example.com",
            "https://app.exa\tmple.com",
            "https://192.168.1.10",
            "https://[::1]:8080",
        ] {
            assert!(
                matches!(origin_domain(bad), Err(DeployError::InvalidOrigin { .. })),
                "expected invalid: {bad:?}"
            );
        }
    }

    #[test]
    fn discovery_mode() {
        let origins = DiscoveredOrigins::from_text("https://foo.bar/ wss://foo.bar/");
        let set = EndpointSet::from_discovery(Stage::default(), &origins);
        assert_eq!(set.base_url.as_deref(), Some("https://foo.bar"));
        assert_eq!(set.wss_url.as_deref(), Some("wss://foo.bar"));
        assert_eq!(set.api_url.as_deref(), Some("https://foo.bar/api"));
        assert_eq!(set.auth_url.as_deref(), Some("https://foo.bar/auth"));
    }

    #[test]
    fn discovery_first_seen_wins() {
        let origins = DiscoveredOrigins::from_text(
            "https://first.example.com/ https://second.example.com/ wss://one.example.com/ wss://two.example.com/",
        );
        let set = EndpointSet::from_discovery(Stage::default(), &origins);
        assert_eq!(set.base_url.as_deref(), Some("https://first.example.com"));
        assert_eq!(set.wss_url.as_deref(), Some("wss://one.example.com"));
    }

    #[test]
    fn discovery_prefers_https_over_earlier_http() {
        let origins = DiscoveredOrigins::from_text(
            "http://plain.example.com/ https://secure.example.com/",
        );
        let set = EndpointSet::from_discovery(Stage::default(), &origins);
        assert_eq!(set.base_url.as_deref(), Some("https://secure.example.com"));
        assert_eq!(set.api_url.as_deref(), Some("https://secure.example.com/api"));
    }

    #[test]
    fn discovery_without_websocket_leaves_it_unset() {
        let origins = DiscoveredOrigins::from_text("https://foo.bar/");
        let set = EndpointSet::from_discovery(Stage::default(), &origins);
        assert!(set.wss_url.is_none());
        assert!(set.base_url.is_some());
    }

    #[test]
    fn synthesize_prefers_discovery() {
        let config = cfg("https://app.example.com");
        let (set, mode) = synthesize(
            Stage::new("prod").unwrap(),
            Some("https://foo.bar/"),
            Some(&config),
        )
        .unwrap();
        assert_eq!(mode, SynthesisMode::Discovery);
        assert_eq!(set.base_url.as_deref(), Some("https://foo.bar"));
        assert_eq!(set.stage.as_str(), "prod");
    }

    #[test]
    fn synthesize_falls_back_when_discovery_empty() {
        let config = cfg("https://app.example.com");
        let (set, mode) =
            synthesize(Stage::default(), Some("no endpoints here"), Some(&config)).unwrap();
        assert_eq!(mode, SynthesisMode::Derivation);
        assert_eq!(set.api_url.as_deref(), Some("https://api.example.com/api"));
    }

    #[test]
    fn synthesize_without_any_source_fails() {
        let result = synthesize(Stage::default(), Some(""), None);
        assert!(matches!(result, Err(DeployError::EndpointSourceMissing)));
        let result = synthesize(Stage::default(), None, None);
        assert!(matches!(result, Err(DeployError::EndpointSourceMissing)));
    }
}
