use crate::logging::TraceId;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Extension;
use zadara_metrics::aggregate;

/// Checks that every target answers a store listing.
///
/// Does not take the scrape lock and never touches published series.
pub async fn healthz(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
) -> Response {
    let cancel = state.shutdown.child_token();
    let mut unreachable = Vec::new();

    for scrape_target in state.pipeline.targets() {
        let target = &scrape_target.target;
        if let Err(e) = aggregate::probe(scrape_target.api.as_ref(), target, &cancel).await {
            tracing::warn!(
                trace_id = %trace_id.0,
                target_name = %target.name,
                kind = %e.kind(),
                error = %e,
                "Health probe failed"
            );
            unreachable.push(target.name.clone());
        }
    }

    if unreachable.is_empty() {
        (StatusCode::OK, "ok\n").into_response()
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("unreachable targets: {}\n", unreachable.join(", ")),
        )
            .into_response()
    }
}
