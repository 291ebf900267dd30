//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::Path,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Map, Value};
use tower::ServiceExt;

use inertia_axum::config::{AppConfig, InertiaConfig};
use inertia_axum::{HttpServer, Inertia, InertiaContext, InertiaError, Prop, Props};

/// Renders the view name and data as JSON so tests can inspect what the template saw.
pub fn echo_renderer() -> Arc<dyn inertia_axum::Renderer> {
    Arc::new(
        |view: &str, data: &Map<String, Value>| -> Result<String, InertiaError> {
            Ok(serde_json::to_string(&json!({ "view": view, "data": data }))?)
        },
    )
}

pub fn test_inertia(version: Option<&str>) -> Inertia {
    let config = InertiaConfig {
        version: version.map(String::from),
        manifest_path: Some("/no/such/manifest.json".into()),
        ..InertiaConfig::default()
    };
    Inertia::new(config, echo_renderer()).unwrap()
}

/// A fully layered application plus handles for assertions.
pub struct TestApp {
    pub router: Router,
    pub inertia: Inertia,
    pub lazy_calls: Arc<AtomicUsize>,
}

impl TestApp {
    pub fn new(version: Option<&str>) -> Self {
        let inertia = test_inertia(version);
        let lazy_calls = Arc::new(AtomicUsize::new(0));
        let server = HttpServer::new(AppConfig::default(), inertia.clone(), routes(lazy_calls.clone()));
        Self {
            router: server.router(),
            inertia,
            lazy_calls,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub fn lazy_calls(&self) -> usize {
        self.lazy_calls.load(Ordering::SeqCst)
    }
}

fn routes(lazy_calls: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route("/", get(home))
        .route(
            "/stats",
            get(move |ctx: InertiaContext| {
                let calls = lazy_calls.clone();
                async move {
                    let mut props = Props::new();
                    props.insert("a".into(), json!(1).into());
                    props.insert(
                        "stats".into(),
                        Prop::lazy(move || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            json!({"visits": 42})
                        }),
                    );
                    ctx.render("Stats", props)
                }
            }),
        )
        .route("/pair", get(pair))
        .route("/shared", get(shared))
        .route("/nested", get(nested))
        .route("/created", get(created))
        .route("/external", get(external))
        .route("/abandoned", get(abandoned))
        .route("/users/{id}", post(redirect).put(redirect).patch(redirect).delete(redirect))
}

async fn home(ctx: InertiaContext) -> Response {
    ctx.inertia()
        .response("Home", Props::new())
        .with("user", "alice")
        .with_view_data("title", json!("Home"))
        .to_response(&ctx)
}

async fn pair(ctx: InertiaContext) -> Response {
    let mut props = Props::new();
    props.insert("a".into(), json!(1).into());
    props.insert("b".into(), json!(2).into());
    ctx.render("Pair", props)
}

async fn shared(ctx: InertiaContext) -> Response {
    ctx.share("flash", "ok");
    ctx.share_all([("user", json!("shared")), ("errors", json!({}))]);

    let mut props = Props::new();
    props.insert("user".into(), json!("explicit").into());
    ctx.render("Shared", props)
}

async fn nested(ctx: InertiaContext) -> Response {
    let sidebar = ctx
        .inertia()
        .response("Sidebar", Props::new())
        .with("items", json!(["a", "b"]))
        .with("count", Prop::lazy(|| json!(2)));
    ctx.inertia()
        .response("Layout", Props::new())
        .with("sidebar", sidebar)
        .to_response(&ctx)
}

async fn created(ctx: InertiaContext) -> Response {
    ctx.inertia()
        .response("Created", Props::new())
        .status(StatusCode::CREATED)
        .to_response(&ctx)
}

async fn external(ctx: InertiaContext) -> Response {
    ctx.location("https://other.example/login")
}

async fn abandoned(ctx: InertiaContext) -> &'static str {
    ctx.share("flash", "never rendered");
    "plain"
}

async fn redirect(Path(_id): Path<u64>) -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/users")])
}

/// GET request carrying the Inertia headers.
pub fn inertia_get(uri: &str, version: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("host", "example.com")
        .header("x-inertia", "true")
        .header("x-inertia-version", version)
        .body(Body::empty())
        .unwrap()
}

pub fn plain_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("host", "example.com")
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
