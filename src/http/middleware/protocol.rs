//! Inertia protocol middleware.
//!
//! # Responsibilities
//! - Make the adapter and a server-minted request id available to handlers
//! - Reject stale clients with `409` when asset versions differ
//! - Bound the lifetime of the request's shared props
//! - Rewrite `302` to `303` after mutating Inertia requests
//!
//! # Design Decisions
//! - The header only has to be present for the status rewrite; its value
//!   does not matter
//! - No version check while no version is configured
//! - The `x-request-id` header is never a store key: clients can repeat it

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::headers::{header_str, X_INERTIA, X_INERTIA_LOCATION, X_INERTIA_VERSION};
use crate::http::request::{ensure_request_id, request_host, request_scheme, request_url, RequestId};
use crate::inertia::Inertia;
use crate::observability::metrics;

pub async fn inertia_middleware(
    State(inertia): State<Inertia>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // 1. Header id for log correlation; the store key is always minted here
    let correlation_id = ensure_request_id(&mut req, inertia.request_id_header());
    let request_id = RequestId::generate();
    req.extensions_mut().insert(request_id.clone());
    req.extensions_mut().insert(inertia.clone());

    let method = req.method().clone();
    let is_inertia = req.headers().contains_key(X_INERTIA);

    // 2. Asset version check
    if is_inertia && method == Method::GET {
        let current = inertia.get_version();
        let client = header_str(req.headers(), &X_INERTIA_VERSION).unwrap_or_default();
        if !current.is_empty() && client != current {
            let location = absolute_url(&req, &inertia.config().default_scheme);
            tracing::info!(
                request_id = %request_id,
                correlation_id = %correlation_id,
                client_version = %client,
                current_version = %current,
                "Asset version changed, forcing full reload"
            );
            metrics::record_version_conflict();
            return version_conflict(&location);
        }
    }

    // 3. Run the handler; shared props do not outlive the request
    let _scope = inertia.props().scope(request_id.clone());
    let mut response = next.run(req).await;

    // 4. 302 → 303 so the follow-up is a GET
    if is_inertia && should_see_other(&method, response.status()) {
        tracing::debug!(
            request_id = %request_id,
            correlation_id = %correlation_id,
            method = %method,
            "Rewriting 302 to 303"
        );
        *response.status_mut() = StatusCode::SEE_OTHER;
        metrics::record_status_rewrite(method.as_str());
    }

    response
}

/// True for a `302` answering `PUT`, `PATCH` or `DELETE`.
pub fn should_see_other(method: &Method, status: StatusCode) -> bool {
    status == StatusCode::FOUND
        && (method == Method::PUT || method == Method::PATCH || method == Method::DELETE)
}

fn absolute_url(req: &Request<Body>, default_scheme: &str) -> String {
    let scheme = request_scheme(req.headers(), req.uri(), default_scheme);
    let host = request_host(req.headers(), req.uri());
    let url = request_url(req.uri());
    if host.is_empty() {
        url
    } else {
        format!("{}://{}{}", scheme, host, url)
    }
}

fn version_conflict(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::CONFLICT, [(X_INERTIA_LOCATION, value)]).into_response(),
        Err(_) => StatusCode::CONFLICT.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_see_other_only_for_mutations() {
        assert!(should_see_other(&Method::PUT, StatusCode::FOUND));
        assert!(should_see_other(&Method::PATCH, StatusCode::FOUND));
        assert!(should_see_other(&Method::DELETE, StatusCode::FOUND));

        assert!(!should_see_other(&Method::POST, StatusCode::FOUND));
        assert!(!should_see_other(&Method::GET, StatusCode::FOUND));
        assert!(!should_see_other(&Method::PUT, StatusCode::MOVED_PERMANENTLY));
        assert!(!should_see_other(&Method::PATCH, StatusCode::OK));
    }

    #[test]
    fn test_absolute_url() {
        let req = Request::builder()
            .uri("/users?page=2")
            .header("host", "example.com")
            .header("x-forwarded-proto", "https")
            .body(Body::empty())
            .unwrap();
        assert_eq!(absolute_url(&req, "http"), "https://example.com/users?page=2");

        let bare = Request::builder().uri("/users").body(Body::empty()).unwrap();
        assert_eq!(absolute_url(&bare, "http"), "/users");
    }

    #[test]
    fn test_version_conflict_response() {
        let response = version_conflict("http://example.com/");
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(response.headers()[X_INERTIA_LOCATION], "http://example.com/");
    }
}
