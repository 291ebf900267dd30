//! Demo application served through the Inertia adapter.
//!
//! ```text
//! GET   /             Home, with a shared flash message
//! GET   /users        Users/Index, with a lazily computed user count
//! PATCH /users/{id}   302 back to /users (303 for Inertia clients)
//! ```

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Router,
};
use clap::Parser;
use serde_json::json;
use tokio::net::TcpListener;

use inertia_axum::config::load_config;
use inertia_axum::lifecycle::{shutdown_signal, Shutdown};
use inertia_axum::observability::{logging, metrics};
use inertia_axum::routes::RouteTable;
use inertia_axum::{HttpServer, Inertia, InertiaContext, Prop, Props, TemplateRenderer};

#[derive(Parser)]
#[command(name = "inertia-axum")]
#[command(about = "Inertia.js adapter demo server", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    logging::init_tracing(&config.observability);
    tracing::info!(
        bind_address = %config.server.bind_address,
        root_view = %config.inertia.root_view,
        "inertia-axum v0.1.0 starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let renderer = match TemplateRenderer::from_config(&config.inertia) {
        Ok(renderer) => renderer.with_routes(route_table()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load views");
            process::exit(1);
        }
    };

    let inertia = match Inertia::new(config.inertia.clone(), Arc::new(renderer)) {
        Ok(inertia) => inertia,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize Inertia adapter");
            process::exit(1);
        }
    };

    let listener = match TcpListener::bind(&config.server.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(bind_address = %config.server.bind_address, error = %e, "Failed to bind");
            process::exit(1);
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let _signals = shutdown.trigger_on(shutdown_signal());

    let server = HttpServer::new(config, inertia, app());
    if let Err(e) = server.run(listener, server_shutdown).await {
        tracing::error!(error = %e, "Server error");
        process::exit(1);
    }

    tracing::info!("Shutdown complete");
}

fn app() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/users", get(users))
        .route("/users/{id}", patch(update_user))
}

fn route_table() -> RouteTable {
    RouteTable::new()
        .add("home", Method::GET, "/")
        .add("users.index", Method::GET, "/users")
        .add("users.update", Method::PATCH, "/users/{id}")
}

async fn home(ctx: InertiaContext) -> Response {
    ctx.share("flash", json!({"success": "Welcome back"}));

    let mut props = Props::new();
    props.insert("user".into(), json!({"name": "alice"}).into());
    ctx.inertia()
        .response("Home", props)
        .with_view_data("title", json!("Home"))
        .to_response(&ctx)
}

async fn users(ctx: InertiaContext) -> Response {
    let mut props = Props::new();
    props.insert("users".into(), json!([{"id": 1, "name": "alice"}, {"id": 2, "name": "bob"}]).into());
    props.insert("total".into(), Prop::lazy(|| json!(2)));
    ctx.render("Users/Index", props)
}

async fn update_user(Path(id): Path<u64>) -> impl IntoResponse {
    tracing::info!(user_id = id, "User updated");
    (StatusCode::FOUND, [(header::LOCATION, "/users")])
}
