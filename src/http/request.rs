//! Request identification and request-derived page fields.
//!
//! # Responsibilities
//! - Assign a unique request id (UUID v4) as early as possible
//! - Expose the id to handlers through request extensions
//! - Derive scheme, host and url for the page object
//!
//! # Design Decisions
//! - Shared props are keyed by an id minted per request, never by a header value
//! - A header id supplied by an upstream proxy is kept for log correlation
//! - TLS / forwarded-proto signals win over the configured default scheme

use std::fmt;

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request, Uri};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use uuid::Uuid;

use crate::http::headers::header_str;

/// Default request id header.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Opaque per-request identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Read the id from `headers`, ignoring empty or non-UTF-8 values.
    pub fn from_headers(headers: &HeaderMap, name: &HeaderName) -> Option<Self> {
        header_str(headers, name)
            .filter(|v| !v.is_empty())
            .map(|v| Self(v.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Access to the request id stored in request extensions.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&RequestId>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&RequestId> {
        self.extensions().get::<RequestId>()
    }
}

/// Return the request's header id, assigning a new one to the headers if missing.
///
/// The result correlates logs only; two requests may carry the same value.
pub fn ensure_request_id<B>(req: &mut Request<B>, name: &HeaderName) -> RequestId {
    if let Some(id) = RequestId::from_headers(req.headers(), name) {
        return id;
    }

    let id = RequestId::generate();
    if let Ok(value) = HeaderValue::from_str(id.as_str()) {
        req.headers_mut().insert(name.clone(), value);
    }
    id
}

/// Layers that set the id on the request and copy it onto the response.
pub fn request_id_layers(name: HeaderName) -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::new(name.clone(), MakeRequestUuid),
        PropagateRequestIdLayer::new(name),
    )
}

/// "https" when the request arrived over TLS or via an https proxy.
pub fn request_scheme(headers: &HeaderMap, uri: &Uri, default: &str) -> String {
    let forwarded_https = header_str(headers, &X_FORWARDED_PROTO)
        .map(|p| p.eq_ignore_ascii_case("https"))
        .unwrap_or(false);

    if forwarded_https || uri.scheme_str() == Some("https") {
        "https".to_string()
    } else {
        default.to_string()
    }
}

/// Host header, falling back to the uri authority.
pub fn request_host(headers: &HeaderMap, uri: &Uri) -> String {
    header_str(headers, &header::HOST)
        .map(String::from)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_default()
}

/// Path and query as the client requested them.
pub fn request_url(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_existing_id_is_kept() {
        let mut req = Request::builder()
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let id = ensure_request_id(&mut req, &X_REQUEST_ID);
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn test_missing_id_is_assigned() {
        let mut req = Request::builder().body(Body::empty()).unwrap();
        let id = ensure_request_id(&mut req, &X_REQUEST_ID);
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_eq!(req.headers()["x-request-id"], id.as_str());
    }

    #[test]
    fn test_request_id_ext() {
        let mut req = Request::builder().body(Body::empty()).unwrap();
        assert!(req.request_id().is_none());
        req.extensions_mut().insert(RequestId::from("r1"));
        assert_eq!(req.request_id().map(RequestId::as_str), Some("r1"));
    }

    #[test]
    fn test_scheme_detection() {
        let uri: Uri = "/users".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(request_scheme(&headers, &uri, "http"), "http");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(request_scheme(&headers, &uri, "http"), "https");

        let tls: Uri = "https://example.com/users".parse().unwrap();
        assert_eq!(request_scheme(&HeaderMap::new(), &tls, "http"), "https");
    }

    #[test]
    fn test_host_and_url() {
        let uri: Uri = "/users?page=2".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("example.com:8080"));

        assert_eq!(request_host(&headers, &uri), "example.com:8080");
        assert_eq!(request_url(&uri), "/users?page=2");

        let absolute: Uri = "http://other.test/x".parse().unwrap();
        assert_eq!(request_host(&HeaderMap::new(), &absolute), "other.test");
    }
}
