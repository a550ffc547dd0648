use crate::logging::TraceId;
use crate::state::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use prometheus::{Encoder, Registry, TextEncoder};
use std::time::Instant;
use zadara_metrics::ScrapeBuffer;

/// Runs one scrape and returns the text exposition.
///
/// Observations are only published once every target succeeded. A failed
/// scrape clears all series and answers 500 so Prometheus records `up == 0`.
pub async fn scrape(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
) -> Response {
    let _guard = state.scrape_lock.lock().await;

    let start = Instant::now();
    let mut buffer = ScrapeBuffer::default();
    match state.pipeline.observe(&state.shutdown, &mut buffer).await {
        Ok(summary) => {
            state.instruments.publish(buffer.observations());
            tracing::info!(
                trace_id = %trace_id.0,
                targets = summary.targets,
                stores = summary.stores,
                policies = summary.policies,
                observations = buffer.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Scrape completed"
            );
            encode(&state.registry)
        }
        Err(e) => {
            state.instruments.clear();
            tracing::error!(
                trace_id = %trace_id.0,
                kind = %e.kind(),
                target_name = e.target(),
                error = %e,
                "Scrape failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, format!("scrape failed: {e}\n")).into_response()
        }
    }
}

fn encode(registry: &Registry) -> Response {
    let encoder = TextEncoder::new();
    let mut body = Vec::new();
    if let Err(e) = encoder.encode(&registry.gather(), &mut body) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to encode metrics\n").into_response();
    }
    (
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        body,
    )
        .into_response()
}
