//! Inertia protocol headers.

use axum::http::{HeaderMap, HeaderName};

/// Marks an Inertia request (any value) and a JSON response (`"true"`).
pub const X_INERTIA: HeaderName = HeaderName::from_static("x-inertia");

/// Asset version the client was built against.
pub const X_INERTIA_VERSION: HeaderName = HeaderName::from_static("x-inertia-version");

/// Target of a forced full-page visit.
pub const X_INERTIA_LOCATION: HeaderName = HeaderName::from_static("x-inertia-location");

/// Comma-separated prop keys requested by a partial reload.
pub const X_INERTIA_PARTIAL_DATA: HeaderName = HeaderName::from_static("x-inertia-partial-data");

/// Component a partial reload targets.
pub const X_INERTIA_PARTIAL_COMPONENT: HeaderName =
    HeaderName::from_static("x-inertia-partial-component");

/// Header value as a string, if present and valid UTF-8.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// True when the request asks for a JSON page object.
pub fn wants_json(headers: &HeaderMap) -> bool {
    header_str(headers, &X_INERTIA) == Some("true")
}

/// Keys of a partial reload aimed at `component`, if any.
///
/// Applies only when the data list is non-empty and the partial component
/// header names exactly this component.
pub fn partial_keys(headers: &HeaderMap, component: &str) -> Option<Vec<String>> {
    let data = header_str(headers, &X_INERTIA_PARTIAL_DATA).filter(|d| !d.is_empty())?;
    let target = header_str(headers, &X_INERTIA_PARTIAL_COMPONENT)?;
    if target != component {
        return None;
    }

    Some(
        data.split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect(),
    )
}
