//! The adapter handle shared by middleware, extractors and handlers.
//!
//! # Responsibilities
//! - Own the shared-prop store, the version provider and the renderer
//! - Validate the rendering setup at construction (fatal if broken)
//! - Start responses with the configured root view and current version
//!
//! # Design Decisions
//! - One instance per process, created at startup and injected into the
//!   request path by the middleware; no package-level globals
//! - Cheap to clone (a single `Arc`)

use std::fmt;
use std::sync::Arc;

use axum::http::HeaderName;

use crate::config::InertiaConfig;
use crate::error::InertiaError;
use crate::http::response::Response;
use crate::props::{PropStore, Props};
use crate::render::{Renderer, TemplateRenderer};
use crate::version::VersionProvider;

struct InertiaInner {
    config: InertiaConfig,
    request_id_header: HeaderName,
    props: PropStore,
    version: VersionProvider,
    renderer: Arc<dyn Renderer>,
}

/// Inertia protocol adapter.
#[derive(Clone)]
pub struct Inertia {
    inner: Arc<InertiaInner>,
}

impl Inertia {
    /// Create the adapter around `renderer`.
    ///
    /// Fails when the root view cannot be rendered or the request id header
    /// name is invalid. The asset version comes from `config.version` when
    /// pinned, otherwise from the manifest hash when the manifest is readable.
    pub fn new(config: InertiaConfig, renderer: Arc<dyn Renderer>) -> Result<Self, InertiaError> {
        if !renderer.has_view(&config.root_view) {
            return Err(InertiaError::MissingView(config.root_view.clone()));
        }

        let request_id_header = HeaderName::try_from(config.request_id_header.as_str())
            .map_err(|e| InertiaError::Config(format!("request_id_header: {}", e)))?;

        let version = VersionProvider::new();
        match &config.version {
            Some(pinned) => version.set_version(pinned.clone()),
            None => {
                version.set_version_from_manifest(config.manifest_path());
            }
        }

        tracing::info!(
            root_view = %config.root_view,
            version = %version.get_version(),
            "Inertia adapter ready"
        );

        Ok(Self {
            inner: Arc::new(InertiaInner {
                config,
                request_id_header,
                props: PropStore::new(),
                version,
                renderer,
            }),
        })
    }

    /// Create the adapter with the liquid renderer over `config.views_dir()`.
    pub fn from_config(config: InertiaConfig) -> Result<Self, InertiaError> {
        let renderer = TemplateRenderer::from_config(&config)?;
        Self::new(config, Arc::new(renderer))
    }

    pub fn config(&self) -> &InertiaConfig {
        &self.inner.config
    }

    pub fn request_id_header(&self) -> &HeaderName {
        &self.inner.request_id_header
    }

    /// The shared-prop store.
    pub fn props(&self) -> &PropStore {
        &self.inner.props
    }

    /// The asset version provider.
    pub fn version(&self) -> &VersionProvider {
        &self.inner.version
    }

    pub fn get_version(&self) -> String {
        self.inner.version.get_version()
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.inner.renderer.as_ref()
    }

    /// Start a response for `component` with the root view and current version.
    pub fn response(&self, component: impl Into<String>, props: Props) -> Response {
        Response::new(
            component,
            props,
            self.inner.config.root_view.clone(),
            self.get_version(),
        )
    }
}

impl fmt::Debug for Inertia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inertia")
            .field("root_view", &self.inner.config.root_view)
            .field("version", &self.inner.version)
            .field("shared_entries", &self.inner.props.len())
            .finish()
    }
}
