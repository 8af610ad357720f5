use axum::Router;
use axum::extract::Request;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{Span, info_span};

use crate::state::AppState;

/// Request bodies only ever carry a handful of string parameters.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Query strings may carry storage keys, so only the path is recorded.
pub fn request_span(request: &Request) -> Span {
    info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

pub fn create_app(state: AppState) -> Router {
    crate::routes::configure_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
        .with_state(state)
}
