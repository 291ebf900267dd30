//! Full-page rendering.
//!
//! # Responsibilities
//! - Define the renderer contract: `render(view, data) -> html`
//! - Ship a liquid-backed implementation loading `views/*.html` at startup
//! - Resolve built asset paths from the build manifest for templates
//!   (`vite` / `vite_tag` filters) and JSON-encode view data (`json` filter)
//!
//! # Design Decisions
//! - Templates are parsed once; a missing view directory or root view is a
//!   startup error, never a request-time surprise
//! - View data arrives as JSON; the page object sits under the `page` key

pub mod assets;
pub mod filters;
pub mod template;

use serde_json::{Map, Value};

use crate::error::InertiaError;

pub use assets::AssetManifest;
pub use template::TemplateRenderer;

/// Renders a named view with view data into an HTML document.
pub trait Renderer: Send + Sync + 'static {
    fn render(&self, view: &str, data: &Map<String, Value>) -> Result<String, InertiaError>;

    /// Whether `view` can be rendered. Checked for the root view at startup.
    fn has_view(&self, _view: &str) -> bool {
        true
    }
}

impl<F> Renderer for F
where
    F: Fn(&str, &Map<String, Value>) -> Result<String, InertiaError> + Send + Sync + 'static,
{
    fn render(&self, view: &str, data: &Map<String, Value>) -> Result<String, InertiaError> {
        self(view, data)
    }
}
