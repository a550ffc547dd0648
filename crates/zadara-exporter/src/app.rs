use crate::state::AppState;
use crate::{health, logging, metrics};
use axum::routing::get;
use axum::{middleware, Router};

pub fn build_http_app(state: AppState) -> Router {
    let listen_path = state.config.listen_path.clone();

    Router::new()
        .route(&listen_path, get(metrics::scrape))
        .route("/healthz", get(health::healthz))
        .layer(middleware::from_fn(logging::request_logging))
        .with_state(state)
}
