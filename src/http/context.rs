//! Per-request Inertia context extractor.
//!
//! # Responsibilities
//! - Capture what response building needs from the request (id, method, uri, headers)
//! - Give handlers access to shared props for their own request
//! - Build protocol responses: page renders and external redirects
//!
//! # Design Decisions
//! - Only available behind `inertia_middleware`; a route without it is a
//!   wiring bug and is rejected with a 500

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response as HttpResponse},
};

use crate::error::InertiaError;
use crate::http::headers::{header_str, wants_json, X_INERTIA, X_INERTIA_LOCATION, X_INERTIA_VERSION};
use crate::http::request::{request_host, request_scheme, request_url, RequestId};
use crate::inertia::Inertia;
use crate::props::{Prop, Props};

/// Request data and adapter handle for building Inertia responses.
#[derive(Debug, Clone)]
pub struct InertiaContext {
    inertia: Inertia,
    request_id: RequestId,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    host: String,
    scheme: String,
}

impl InertiaContext {
    /// Capture the request parts.
    pub fn new(inertia: Inertia, request_id: RequestId, parts: &Parts) -> Self {
        let scheme = request_scheme(&parts.headers, &parts.uri, &inertia.config().default_scheme);
        let host = request_host(&parts.headers, &parts.uri);
        Self {
            inertia,
            request_id,
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
            host,
            scheme,
        }
    }

    pub fn inertia(&self) -> &Inertia {
        &self.inertia
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Path and query as requested.
    pub fn url(&self) -> String {
        request_url(&self.uri)
    }

    /// True when the `X-Inertia` header is present, whatever its value.
    pub fn is_inertia(&self) -> bool {
        self.headers.contains_key(X_INERTIA)
    }

    /// True when the client expects a JSON page object.
    pub fn wants_json(&self) -> bool {
        wants_json(&self.headers)
    }

    /// Share one prop with this request's response.
    pub fn share(&self, key: impl Into<String>, value: impl Into<Prop>) {
        self.inertia.props().share(&self.request_id, key, value);
    }

    /// Share several props with this request's response.
    pub fn share_all<I, K, V>(&self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Prop>,
    {
        self.inertia.props().share_all(&self.request_id, values);
    }

    /// A prop shared earlier in this request.
    pub fn shared(&self, key: &str) -> Option<Prop> {
        self.inertia.props().get(&self.request_id, key)
    }

    /// Render `component` with `props`, using the configured root view and version.
    pub fn render(&self, component: impl Into<String>, props: Props) -> HttpResponse {
        self.inertia.response(component, props).to_response(self)
    }

    /// Send the client to `url` with a full page visit.
    ///
    /// Inertia requests get `409` with `X-Inertia-Location`; plain requests a
    /// `303 See Other`.
    pub fn location(&self, url: &str) -> HttpResponse {
        let Ok(value) = HeaderValue::from_str(url) else {
            tracing::error!(request_id = %self.request_id, url, "Invalid redirect location");
            return InertiaError::Config(format!("invalid location {:?}", url)).into_response();
        };

        if self.is_inertia() {
            (StatusCode::CONFLICT, [(X_INERTIA_LOCATION, value)]).into_response()
        } else {
            (StatusCode::SEE_OTHER, [(header::LOCATION, value)]).into_response()
        }
    }

    /// Client-reported asset version, if sent.
    pub fn client_version(&self) -> Option<&str> {
        header_str(&self.headers, &X_INERTIA_VERSION)
    }
}

impl<S> FromRequestParts<S> for InertiaContext
where
    S: Send + Sync,
{
    type Rejection = InertiaError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let inertia = parts
            .extensions
            .get::<Inertia>()
            .cloned()
            .ok_or(InertiaError::MissingContext)?;
        let request_id = parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .ok_or(InertiaError::MissingContext)?;

        Ok(Self::new(inertia, request_id, parts))
    }
}
