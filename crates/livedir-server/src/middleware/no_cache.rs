//! No-cache headers middleware.
//!
//! Adds headers to all responses so that browsers and proxies never serve
//! a stale copy:
//! - Cache-Control
//! - Pragma
//! - Expires

use axum::http::HeaderValue;
use axum::http::header;
use tower_http::set_header::SetResponseHeaderLayer;

/// Cache-Control header value.
pub(crate) const CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";

/// Create layer that adds the Cache-Control header.
pub(crate) fn cache_control_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL),
    )
}

/// Create layer that adds the Pragma header.
pub(crate) fn pragma_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::PRAGMA, HeaderValue::from_static("no-cache"))
}

/// Create layer that adds the Expires header.
pub(crate) fn expires_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::EXPIRES, HeaderValue::from_static("0"))
}
