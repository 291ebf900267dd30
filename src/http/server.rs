//! HTTP server setup.
//!
//! # Responsibilities
//! - Wrap the application routes with the Inertia middleware
//! - Wire up request id, timeout and tracing layers
//! - Run the shared-prop reaper next to the server
//! - Serve until the shutdown signal fires

use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::http::middleware::inertia_middleware;
use crate::http::request::request_id_layers;
use crate::inertia::Inertia;
use crate::props::SharedPropReaper;

/// HTTP server hosting an Inertia application.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    inertia: Inertia,
}

impl HttpServer {
    /// Wrap `routes` with the protocol middleware and the ambient layers.
    pub fn new(config: AppConfig, inertia: Inertia, routes: Router) -> Self {
        let router = Self::build_router(&config, &inertia, routes);
        Self {
            router,
            config,
            inertia,
        }
    }

    /// Layers run outermost first: trace, set id, propagate id, timeout, Inertia.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, inertia: &Inertia, routes: Router) -> Router {
        let (set_request_id, propagate_request_id) =
            request_id_layers(inertia.request_id_header().clone());

        routes
            .layer(middleware::from_fn_with_state(inertia.clone(), inertia_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
            .layer(propagate_request_id)
            .layer(set_request_id)
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let inertia_config = self.inertia.config();
        let reaper = SharedPropReaper::new(
            self.inertia.props().clone(),
            Duration::from_secs(inertia_config.shared_props_ttl_secs),
            Duration::from_secs(inertia_config.reap_interval_secs),
        );
        let reaper_shutdown = shutdown.resubscribe();
        tokio::spawn(async move {
            reaper.run(reaper_shutdown).await;
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
