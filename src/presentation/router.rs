use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::FileFetcher;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    archive_status_handler, archive_status_lookup_handler, create_archive_handler,
    download_archive_handler, health_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<F>(state: AppState<F>) -> Router
where
    F: FileFetcher + ?Sized + 'static,
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
        .route("/api/archive/create", post(create_archive_handler::<F>))
        .route("/api/archive/status", post(archive_status_lookup_handler))
        .route(
            "/api/archive/status/{archive_id}",
            get(archive_status_handler::<F>).post(archive_status_handler::<F>),
        )
        .route(
            "/archive/get/{file_name}",
            get(download_archive_handler::<F>),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
