//! Liquid-backed renderer.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use liquid::model::{KString, Object};
use liquid::{Parser, ParserBuilder, Template};
use serde_json::{Map, Value};

use crate::config::InertiaConfig;
use crate::error::InertiaError;
use crate::render::filters::{template_filters, SharedAssets};
use crate::render::{AssetManifest, Renderer};
use crate::routes::{RouteTable, Ziggy};

const ROOT_ELEMENT: &str = r#"<div id="app" data-page="{{ page_json | escape }}"></div>"#;

/// Renders `views/*.html` liquid templates.
///
/// Besides the view data, every template sees:
/// - `inertia`: the root element carrying the page object
/// - `page_json`: the page object as JSON
/// - `ziggy`: the named routes as JSON, when a route table was attached
///
/// and the `vite`, `vite_tag` and `json` filters.
pub struct TemplateRenderer {
    templates: HashMap<String, Template>,
    root_element: Template,
    assets: SharedAssets,
    routes: Option<RouteTable>,
}

impl TemplateRenderer {
    /// Parse every `*.html` file in `dir`, keyed by file name.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, InertiaError> {
        let dir = dir.as_ref();
        let assets = SharedAssets::default();
        let parser = build_parser(&assets)?;
        let template_err = |source: std::io::Error| InertiaError::Template {
            path: dir.to_path_buf(),
            source,
        };

        tracing::info!(path = %dir.display(), "Loading view templates");

        let mut templates = HashMap::new();
        for entry in fs::read_dir(dir).map_err(template_err)? {
            let path = entry.map_err(template_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(String::from) else {
                continue;
            };

            let source = fs::read_to_string(&path).map_err(template_err)?;
            let template = parser
                .parse(&source)
                .map_err(|e| InertiaError::TemplateParse {
                    view: name.clone(),
                    message: e.to_string(),
                })?;
            templates.insert(name, template);
        }

        tracing::info!(count = templates.len(), "View templates loaded");
        Self::with_templates(&parser, assets, templates)
    }

    /// Parse templates from in-memory sources.
    pub fn from_sources<I, K, V>(sources: I) -> Result<Self, InertiaError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let assets = SharedAssets::default();
        let parser = build_parser(&assets)?;
        let mut templates = HashMap::new();
        for (name, source) in sources {
            let name = name.into();
            let template = parser
                .parse(source.as_ref())
                .map_err(|e| InertiaError::TemplateParse {
                    view: name.clone(),
                    message: e.to_string(),
                })?;
            templates.insert(name, template);
        }
        Self::with_templates(&parser, assets, templates)
    }

    /// Load views and, when present, the asset manifest described by `config`.
    pub fn from_config(config: &InertiaConfig) -> Result<Self, InertiaError> {
        let renderer = Self::from_dir(config.views_dir())?;
        match AssetManifest::load(config.manifest_path()) {
            Ok(manifest) => {
                if manifest.is_empty() {
                    tracing::warn!("Asset manifest has no entries; templates will use logical asset paths");
                } else {
                    tracing::info!(entries = manifest.entries().len(), "Asset manifest loaded");
                }
                Ok(renderer.with_assets(manifest))
            }
            Err(e) => {
                tracing::debug!(error = %e, "Templates will use logical asset paths");
                Ok(renderer)
            }
        }
    }

    fn with_templates(
        parser: &Parser,
        assets: SharedAssets,
        templates: HashMap<String, Template>,
    ) -> Result<Self, InertiaError> {
        let root_element = parser
            .parse(ROOT_ELEMENT)
            .map_err(|e| InertiaError::TemplateParse {
                view: "<root element>".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            templates,
            root_element,
            assets,
            routes: None,
        })
    }

    /// Resolve `vite` / `vite_tag` through `assets`.
    pub fn with_assets(self, assets: AssetManifest) -> Self {
        self.assets.store(Arc::new(assets));
        self
    }

    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Names of the loaded views.
    pub fn views(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    fn globals(&self, view: &str, data: &Map<String, Value>) -> Result<Object, InertiaError> {
        let render_err = |message: String| InertiaError::Render {
            view: view.to_string(),
            message,
        };
        let to_liquid = |value: &Value| liquid::model::to_value(value).map_err(|e| render_err(e.to_string()));

        let mut globals = Object::new();
        for (key, value) in data {
            globals.insert(KString::from(key.clone()), to_liquid(value)?);
        }

        let page = data.get("page").cloned().unwrap_or(Value::Null);
        let page_json = serde_json::to_string(&page)?;
        globals.insert(KString::from_static("page_json"), to_liquid(&Value::String(page_json))?);

        let root = self
            .root_element
            .render(&globals)
            .map_err(|e| render_err(e.to_string()))?;
        globals.insert(KString::from_static("inertia"), to_liquid(&Value::String(root))?);

        if let Some(routes) = &self.routes {
            let scheme = page.get("scheme").and_then(Value::as_str).unwrap_or("http");
            let host = page.get("host").and_then(Value::as_str).unwrap_or_default();
            let ziggy = serde_json::to_string(&Ziggy::new(routes, scheme, host))?;
            globals.insert(KString::from_static("ziggy"), to_liquid(&Value::String(ziggy))?);
        }

        Ok(globals)
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, view: &str, data: &Map<String, Value>) -> Result<String, InertiaError> {
        let template = self
            .templates
            .get(view)
            .ok_or_else(|| InertiaError::MissingView(view.to_string()))?;

        let globals = self.globals(view, data)?;
        template.render(&globals).map_err(|e| InertiaError::Render {
            view: view.to_string(),
            message: e.to_string(),
        })
    }

    fn has_view(&self, view: &str) -> bool {
        self.templates.contains_key(view)
    }
}

fn build_parser(assets: &SharedAssets) -> Result<Parser, InertiaError> {
    template_filters(assets)
        .into_iter()
        .fold(ParserBuilder::with_stdlib(), |builder, filter| builder.filter(filter))
        .build()
        .map_err(|e| InertiaError::TemplateParse {
            view: "<parser>".to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;
    use serde_json::json;

    fn data() -> Map<String, Value> {
        json!({
            "title": "Users",
            "page": {
                "component": "Users/Index",
                "props": {"name": "<b>bob</b>"},
                "scheme": "https",
                "host": "example.com",
            }
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_render_root_element() {
        let renderer = TemplateRenderer::from_sources([(
            "app.html",
            "<title>{{ title }}</title>{{ inertia }}",
        )])
        .unwrap();

        let html = renderer.render("app.html", &data()).unwrap();
        assert!(html.starts_with("<title>Users</title><div id=\"app\" data-page=\""));
        assert!(html.contains("&quot;component&quot;:&quot;Users/Index&quot;"));
        assert!(!html.contains("<b>bob</b>"));
    }

    #[test]
    fn test_page_fields_are_reachable() {
        let renderer =
            TemplateRenderer::from_sources([("app.html", "{{ page.component }}")]).unwrap();
        assert_eq!(renderer.render("app.html", &data()).unwrap(), "Users/Index");
    }

    #[test]
    fn test_vite_filter_and_ziggy_global() {
        let renderer = TemplateRenderer::from_sources([(
            "app.html",
            r#"{{ "/js/app.js" | vite }}|{{ ziggy }}"#,
        )])
        .unwrap()
        .with_assets(AssetManifest::from_entries([("/js/app.js", "/build/app.1.js")]))
        .with_routes(RouteTable::new().add("home", Method::GET, "/"));

        let html = renderer.render("app.html", &data()).unwrap();
        let (asset, ziggy) = html.split_once('|').unwrap();
        assert_eq!(asset, "/build/app.1.js");

        let ziggy: Value = serde_json::from_str(ziggy).unwrap();
        assert_eq!(ziggy["url"], "https://example.com");
        assert_eq!(ziggy["routes"]["home"]["uri"], "/");
    }

    #[test]
    fn test_vite_filter_falls_back_to_logical_path() {
        let renderer = TemplateRenderer::from_sources([(
            "app.html",
            r#"{{ "/css/x.css" | vite }}|{{ "js/app.js" | vite_tag }}"#,
        )])
        .unwrap()
        .with_assets(AssetManifest::from_entries([("/js/app.js", "/build/app.1.js")]));

        let html = renderer.render("app.html", &data()).unwrap();
        assert_eq!(
            html,
            r#"/css/x.css|<script type="module" src="/build/app.1.js"></script>"#
        );
    }

    #[test]
    fn test_vite_filter_without_manifest() {
        let renderer =
            TemplateRenderer::from_sources([("app.html", r#"{{ "/js/app.js" | vite }}"#)]).unwrap();
        assert_eq!(renderer.render("app.html", &data()).unwrap(), "/js/app.js");
    }

    #[test]
    fn test_json_filter() {
        let renderer = TemplateRenderer::from_sources([(
            "app.html",
            "{{ title | json }}|{{ page.props | json }}",
        )])
        .unwrap();

        let html = renderer.render("app.html", &data()).unwrap();
        let (title, props) = html.split_once('|').unwrap();
        assert_eq!(title, r#""Users""#);
        let props: Value = serde_json::from_str(props).unwrap();
        assert_eq!(props, json!({"name": "<b>bob</b>"}));
    }

    #[test]
    fn test_filter_arguments_rejected() {
        assert!(matches!(
            TemplateRenderer::from_sources([("app.html", r#"{{ "x" | vite: "y" }}"#)]),
            Err(InertiaError::TemplateParse { .. })
        ));
    }

    #[test]
    fn test_missing_view() {
        let renderer = TemplateRenderer::from_sources([("app.html", "x")]).unwrap();
        assert!(renderer.has_view("app.html"));
        assert!(!renderer.has_view("other.html"));
        assert!(matches!(
            renderer.render("other.html", &Map::new()),
            Err(InertiaError::MissingView(_))
        ));
    }

    #[test]
    fn test_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.html"), "{{ inertia }}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let renderer = TemplateRenderer::from_dir(dir.path()).unwrap();
        assert_eq!(renderer.views().collect::<Vec<_>>(), vec!["app.html"]);
    }

    #[test]
    fn test_unreadable_dir_is_fatal() {
        assert!(matches!(
            TemplateRenderer::from_dir("/no/such/views"),
            Err(InertiaError::Template { .. })
        ));
    }
}
