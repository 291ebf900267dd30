//! Server-side Inertia.js adapter for axum.

// Protocol core
pub mod http;
pub mod inertia;
pub mod props;
pub mod version;

// Rendering
pub mod render;
pub mod routes;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::schema::AppConfig;
pub use error::InertiaError;
pub use http::{inertia_middleware, HttpServer, InertiaContext, PageObject, RequestId, Response};
pub use inertia::Inertia;
pub use lifecycle::Shutdown;
pub use props::{Prop, PropStore, Props};
pub use render::{Renderer, TemplateRenderer};
pub use version::VersionProvider;
