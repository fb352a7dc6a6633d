//! Static file serving.
//!
//! `.html` paths are read and rewritten by [`handlers::html`]. Everything
//! else goes through `tower-http`'s `ServeDir` (MIME detection, range
//! requests, `index.html` for directories), falling back to a directory
//! listing when a directory has no index page.

use std::convert::Infallible;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower::service_fn;
use tower_http::services::ServeDir;

use crate::handlers;
use crate::state::AppState;

/// Create router that serves everything under the root directory.
pub(crate) fn static_router() -> Router<Arc<AppState>> {
    Router::new().fallback(serve_content)
}

/// Serve a file, rewriting HTML pages to reload themselves.
async fn serve_content(State(state): State<Arc<AppState>>, req: Request<Body>) -> Response {
    if req.uri().path().ends_with(".html") {
        let (parts, _body) = req.into_parts();
        return handlers::html::serve_html(&state, &parts.method, parts.uri.path())
            .await
            .into_response();
    }

    let root = state.root.clone();
    let listing = service_fn(move |req: Request<Body>| {
        let root = root.clone();
        let uri_path = req.uri().path().to_owned();
        async move {
            Ok::<_, Infallible>(handlers::listing::directory_listing(&root, &uri_path).await)
        }
    });

    match ServeDir::new(&state.root).fallback(listing).oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
