//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Inertia adapter settings.
    pub inertia: InertiaConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Inertia adapter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InertiaConfig {
    /// Template used for full-page renders.
    pub root_view: String,

    /// Directory holding built assets and the manifest.
    pub public_path: PathBuf,

    /// Directory holding `views/*.html`.
    pub resources_path: PathBuf,

    /// Build manifest; defaults to `<public_path>/manifest.json`.
    pub manifest_path: Option<PathBuf>,

    /// Pinned asset version. Takes precedence over the manifest hash.
    pub version: Option<String>,

    /// Scheme reported when no TLS / forwarded-proto signal is present.
    pub default_scheme: String,

    /// Header carrying the request id.
    pub request_id_header: String,

    /// Age after which unclaimed shared props are reaped.
    pub shared_props_ttl_secs: u64,

    /// How often the reaper runs.
    pub reap_interval_secs: u64,
}

impl InertiaConfig {
    /// Directory the view templates are loaded from.
    pub fn views_dir(&self) -> PathBuf {
        self.resources_path.join("views")
    }

    /// Effective manifest location.
    pub fn manifest_path(&self) -> PathBuf {
        self.manifest_path
            .clone()
            .unwrap_or_else(|| self.public_path.join("manifest.json"))
    }
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            root_view: "app.html".to_string(),
            public_path: PathBuf::from("public"),
            resources_path: PathBuf::from("resources"),
            manifest_path: None,
            version: None,
            default_scheme: "http".to_string(),
            request_id_header: "x-request-id".to_string(),
            shared_props_ttl_secs: 300,
            reap_interval_secs: 60,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
