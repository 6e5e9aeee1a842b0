//! Endpoint origin extraction from deployment-tool status output.
//!
//! The deployment tool prints its endpoints somewhere in free-form text. An
//! origin is any `scheme://host/` substring where the scheme is `http`,
//! `https` or `wss` and the host is made of ASCII alphanumerics, dots and
//! hyphens. The trailing `/` delimits the match and is not part of the origin.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

static ORIGIN_RE: OnceLock<Regex> = OnceLock::new();

fn origin_re() -> &'static Regex {
    ORIGIN_RE.get_or_init(|| Regex::new(r"((https?|wss)://[a-zA-Z0-9.-]+)/").unwrap())
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
    Wss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeFamily {
    Web,
    WebSocket,
}

impl Scheme {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "http" => Some(Scheme::Http),
            "https" => Some(Scheme::Https),
            "wss" => Some(Scheme::Wss),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::Wss => "wss",
        }
    }

    pub fn family(&self) -> SchemeFamily {
        match self {
            Scheme::Http | Scheme::Https => SchemeFamily::Web,
            Scheme::Wss => SchemeFamily::WebSocket,
        }
    }
}

/// A scheme + host pair, no path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub scheme: Scheme,
    pub host: String,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme.as_str(), self.host)
    }
}

/// Distinct origins found in one scan, partitioned by scheme family.
/// Each list keeps scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveredOrigins {
    pub web: Vec<Origin>,
    pub websocket: Vec<Origin>,
}

impl DiscoveredOrigins {
    pub fn from_text(text: &str) -> Self {
        let mut found = Self::default();
        for origin in extract_origins(text) {
            match origin.scheme.family() {
                SchemeFamily::Web => found.web.push(origin),
                SchemeFamily::WebSocket => found.websocket.push(origin),
            }
        }
        found
    }

    pub fn is_empty(&self) -> bool {
        self.web.is_empty() && self.websocket.is_empty()
    }

    /// The first https origin, or the first http one when none is secure.
    pub fn first_web(&self) -> Option<&Origin> {
        self.web
            .iter()
            .find(|o| o.scheme == Scheme::Https)
            .or_else(|| self.web.first())
    }

    pub fn first_websocket(&self) -> Option<&Origin> {
        self.websocket.first()
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Anything that can report the endpoints of a live deployment.
pub trait OriginSource {
    fn discover(&self) -> DiscoveredOrigins;
}

/// Raw status text captured from the deployment tool.
#[derive(Debug, Clone, Copy)]
pub struct StatusText<'a>(pub &'a str);

impl OriginSource for StatusText<'_> {
    fn discover(&self) -> DiscoveredOrigins {
        DiscoveredOrigins::from_text(self.0)
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Scan `text` for origins. Duplicates (exact string match) are dropped;
/// the first occurrence keeps its position.
pub fn extract_origins(text: &str) -> Vec<Origin> {
    let mut seen: Vec<Origin> = Vec::new();
    for caps in origin_re().captures_iter(text) {
        let (Some(scheme), Some(full)) = (caps.get(2), caps.get(1)) else {
            continue;
        };
        let Some(scheme) = Scheme::parse(scheme.as_str()) else {
            continue;
        };
        let host = &full.as_str()[scheme.as_str().len() + "://".len()..];
        let origin = Origin {
            scheme,
            host: host.to_string(),
        };
        if !seen.contains(&origin) {
            seen.push(origin);
        }
    }
    tracing::debug!(count = seen.len(), "extracted origins from status text");
    seen
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
