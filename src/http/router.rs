//! Router construction and middleware stack.

use axum::Router;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use mockable::Clock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::http::AppState;
use crate::http::handlers::{
    health_handler, job_handler, job_status_handler, list_jobs_handler, process_video_handler,
};
use crate::job::ports::{JobRepository, RequestValidator, VideoProcessor};
use crate::observability::request_id_middleware;

/// Builds the application router with CORS, request tracing and request-id
/// propagation.
pub fn create_router<R, V, P, C>(state: AppState<R, V, P, C>) -> Router
where
    R: JobRepository + 'static,
    V: RequestValidator + 'static,
    P: VideoProcessor + 'static,
    C: Clock + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/process-video", post(process_video_handler::<R, V, P, C>))
        .route("/jobs", get(list_jobs_handler::<R, V, P, C>))
        .route("/jobs/{job_id}", get(job_handler::<R, V, P, C>))
        .route("/jobs/{job_id}/status", get(job_status_handler::<R, V, P, C>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .layer(middleware::from_fn(preflight_no_content))
        .with_state(state)
}

/// Reports answered CORS preflight requests as `204 No Content`.
///
/// The CORS layer answers every `OPTIONS` request itself with an empty
/// `200`.
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if is_preflight && response.status().is_success() {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
