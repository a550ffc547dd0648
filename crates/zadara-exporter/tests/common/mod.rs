#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::util::ServiceExt;
use zadara_client::Target;
use zadara_exporter::app;
use zadara_exporter::config::ExporterConfig;
use zadara_exporter::state::AppState;

/// A fake Command Center serving one store with two policies.
#[derive(Clone, Default)]
pub struct FakeCommandCenter {
    failing: Arc<AtomicBool>,
}

impl FakeCommandCenter {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Serves on an ephemeral local port and returns its base url.
    pub async fn spawn(&self) -> String {
        let router = Router::new()
            .route("/api/clouds/{cloud}/zioses.json", get(list_stores))
            .route(
                "/api/clouds/{cloud}/zioses/{id}/storage_policies.json",
                get(list_policies),
            )
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener.local_addr().expect("listener should have an address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        format!("http://{addr}")
    }
}

async fn list_stores(State(cc): State<FakeCommandCenter>, Path(_cloud): Path<String>) -> Response {
    if cc.failing.load(Ordering::SeqCst) {
        return (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response();
    }
    Json(json!({
        "status": "success",
        "zioses": [{
            "id": 1,
            "name": "store1",
            "accounts_count": 3,
            "users_count": 7,
            "containers_count": 12,
            "objects_count": 4096,
            "drives": 8,
            "cache": 200
        }],
        "count": 1
    }))
    .into_response()
}

async fn list_policies(Path((_cloud, _id)): Path<(String, i64)>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "zios_storage_policies": [
            {
                "id": 1,
                "name": "policy1",
                "percentage_drives_added": "55.2",
                "health_percentage": 100.0,
                "rebalance_percentage": 0.0,
                "used_capacity": 1000,
                "free_capacity": 9000,
                "ring_balance": {
                    "normal_percentage": 100.0,
                    "degraded_percentage": 0.0,
                    "critical_percentage": 0.0,
                    "normal_count": 1024,
                    "degraded_count": 0,
                    "critical_count": 0
                }
            },
            {
                "id": 2,
                "name": "policy2",
                "percentage_drives_added": "74.3",
                "health_percentage": 98.5,
                "rebalance_percentage": 12.5,
                "used_capacity": 2000,
                "free_capacity": 8000,
                "ring_balance": {
                    "normal_percentage": 90.0,
                    "degraded_percentage": 10.0,
                    "critical_percentage": 0.0,
                    "normal_count": 900,
                    "degraded_count": 100,
                    "critical_count": 0
                }
            }
        ],
        "count": 2
    }))
}

pub fn target(name: &str, url: &str) -> Target {
    Target {
        name: name.to_string(),
        url: url.to_string(),
        cloud_name: "cloud-1".to_string(),
        token: "secret".to_string(),
    }
}

pub fn build_app(targets: Vec<Target>, listen_path: &str) -> axum::Router {
    let config = ExporterConfig {
        listen_path: listen_path.to_string(),
        request_timeout_secs: 5,
        targets,
        ..Default::default()
    };
    let state =
        AppState::new(config, CancellationToken::new()).expect("state should build for test targets");
    app::build_http_app(state)
}

pub async fn get_text(app: &axum::Router, path: &str) -> (StatusCode, String) {
    let (status, _, body) = get_with_trace_id(app, path).await;
    (status, body)
}

/// Like [`get_text`], also returning the `x-trace-id` response header.
pub async fn get_with_trace_id(app: &axum::Router, path: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");
    let status = response.status();
    let trace_id = response
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, trace_id, String::from_utf8_lossy(&bytes).into_owned())
}

/// A url on which nothing listens.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("listener should have an address");
    drop(listener);
    format!("http://{addr}")
}

/// Finds the exposition line of `metric` carrying every label fragment.
pub fn find_sample<'a>(body: &'a str, metric: &str, fragments: &[&str]) -> Option<&'a str> {
    body.lines().find(|line| {
        line.starts_with(&format!("{metric}{{")) && fragments.iter().all(|f| line.contains(f))
    })
}
