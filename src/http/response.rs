//! Inertia response building and protocol negotiation.
//!
//! # Responsibilities
//! - Accumulate component, props and view-only data
//! - At send time: take shared props, apply partial-reload filtering,
//!   resolve lazy and nested props, then emit JSON or a full page
//!
//! # Design Decisions
//! - Builder methods consume and return `Self`; branch a chain with `clone()`
//! - Filtering happens before resolution so excluded lazy props never run
//! - Explicit props win over shared props on key collision
//! - View data reaches the full-page render only, never the JSON payload

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response as HttpResponse},
};
use serde_json::{Map, Value};

use crate::http::context::InertiaContext;
use crate::http::headers::{partial_keys, X_INERTIA};
use crate::http::page::PageObject;
use crate::observability::metrics;
use crate::props::{Prop, Props};

/// An Inertia page response under construction.
#[derive(Debug, Clone)]
pub struct Response {
    component: String,
    props: Props,
    view_data: Map<String, Value>,
    root_view: String,
    version: String,
    status: StatusCode,
}

impl Response {
    /// Start a response; status defaults to 200 and view data is empty.
    pub fn new(
        component: impl Into<String>,
        props: Props,
        root_view: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            props,
            view_data: Map::new(),
            root_view: root_view.into(),
            version: version.into(),
            status: StatusCode::OK,
        }
    }

    /// Set one prop, overwriting any previous value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Prop>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Merge a mapping of props, overwriting on collision.
    pub fn with_props<I, K, V>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Prop>,
    {
        self.props
            .extend(props.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set one value visible only to the full-page template.
    pub fn with_view_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.view_data.insert(key.into(), value);
        self
    }

    /// Merge a mapping into both the view data and the props.
    ///
    /// Templates and partial reloads then see the same values.
    pub fn with_view_data_map(mut self, data: Map<String, Value>) -> Self {
        for (key, value) in data {
            self.props.insert(key.clone(), Prop::Value(value.clone()));
            self.view_data.insert(key, value);
        }
        self
    }

    /// Override the status code.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn view_data(&self) -> &Map<String, Value> {
        &self.view_data
    }

    pub fn root_view(&self) -> &str {
        &self.root_view
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Negotiate and emit the response for the request in `ctx`.
    ///
    /// Consumes this request's shared props.
    pub fn to_response(self, ctx: &InertiaContext) -> HttpResponse {
        let Response {
            component,
            props,
            mut view_data,
            root_view,
            version,
            status,
        } = self;

        // 1. Shared props underneath explicit ones
        let mut merged = ctx.inertia().props().take_all(ctx.request_id());
        merged.extend(props);

        // 2. Partial reload filtering, before anything is resolved
        let selected = match partial_keys(ctx.headers(), &component) {
            Some(only) => {
                tracing::debug!(request_id = %ctx.request_id(), component = %component, keys = ?only, "Partial reload");
                filter_props(merged, &only)
            }
            None => merged,
        };

        // 3. Resolve lazy and nested props, build the page
        let page = build_page(ctx, component, selected, version, status);

        // 4. JSON for the client router, full page otherwise
        if ctx.wants_json() {
            metrics::record_response("json", status.as_u16());
            let mut response = (status, Json(page)).into_response();
            let headers = response.headers_mut();
            headers.insert(header::VARY, HeaderValue::from_static("Accept"));
            headers.insert(X_INERTIA, HeaderValue::from_static("true"));
            return response;
        }

        view_data.insert("page".to_string(), page.to_value());
        match ctx.inertia().renderer().render(&root_view, &view_data) {
            Ok(html) => {
                metrics::record_response("html", status.as_u16());
                (status, Html(html)).into_response()
            }
            Err(e) => {
                tracing::error!(request_id = %ctx.request_id(), view = %root_view, error = %e, "Full page render failed");
                e.into_response()
            }
        }
    }
}

/// Keep only the requested keys; unknown keys are simply absent.
fn filter_props(mut props: Props, only: &[String]) -> Props {
    only.iter()
        .filter_map(|key| props.remove_entry(key))
        .collect()
}

fn build_page(
    ctx: &InertiaContext,
    component: String,
    props: Props,
    version: String,
    status: StatusCode,
) -> PageObject {
    let props = props
        .into_iter()
        .map(|(key, prop)| (key, resolve(prop, ctx)))
        .collect();

    PageObject {
        component,
        props,
        url: ctx.url(),
        version,
        host: ctx.host().to_string(),
        path: ctx.uri().path().to_string(),
        scheme: ctx.scheme().to_string(),
        method: ctx.method().as_str().to_string(),
        status: status.as_u16(),
    }
}

/// Depth-first resolution of one prop.
fn resolve(prop: Prop, ctx: &InertiaContext) -> Value {
    match prop {
        Prop::Value(value) => value,
        Prop::Lazy(produce) => produce(),
        Prop::Nested(fragment) => {
            let Response {
                component,
                props,
                version,
                status,
                ..
            } = *fragment;
            build_page(ctx, component, props, version, status).to_value()
        }
    }
}
