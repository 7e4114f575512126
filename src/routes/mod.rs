mod admin;
mod auth;
mod device;

use crate::middlewares::authenticate::require_identity;
use crate::middlewares::request_id::{RequestId, RequestIdLayer};
use crate::state::AppState;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::time::Duration;
use tracing::Span;

pub fn build(state: AppState) -> Router {
    // ======== authenticated ========
    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/devices", get(device::list).post(device::create))
        .route("/api/devices/{id}", get(device::get).delete(device::delete))
        // ======== admin ========
        .route("/api/admin/devices", get(admin::list_devices))
        .route("/api/admin/devices/{id}", delete(admin::delete_device))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_identity,
        ));
    Router::new()
        .route("/api/health", get(|| async { axum::http::StatusCode::OK }))
        .route(
            "/api/version",
            get(|| async { format!("devicegate_{}", env!("CARGO_PKG_VERSION")) }),
        )
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .merge(protected)
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestId>()
                        .map(|it| it.to_string())
                        .unwrap_or_default();
                    tracing::debug_span!("request", request_id = %request_id)
                })
                .on_request(|req: &Request<Body>, _span: &Span| {
                    tracing::trace!(
                        method = %req.method(),
                        uri = %req.uri(),
                        version = %format!("{:?}", req.version()),
                        "started processing request"
                    );
                })
                .on_response(|res: &Response, latency: Duration, _span: &Span| {
                    tracing::trace!(
                        status = ?res.status(),
                        latency = %format!("{}ms", latency.as_millis()),
                        "finished processing request"
                    );
                }),
        )
        .layer(RequestIdLayer)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                ]),
        )
        .with_state(state)
}
