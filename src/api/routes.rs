//! JSON pass-through API mirroring the upstream service contracts.
//!
//! Page handlers swallow upstream failures and render empty state; these
//! endpoints instead answer 502 so a programmatic caller can tell "empty"
//! from "backend down". The failure detail goes to the log either way.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::warn;

use super::state::AppState;
use crate::model::{Connector, Policy};
use crate::upstream::UpstreamError;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/anomalies", get(list_anomalies))
        .route("/reports", get(list_reports))
        .route("/reports/{name}", get(report_content))
        .route("/connectors", get(list_connectors).post(create_connector))
        .route("/connectors/{id}", axum::routing::delete(delete_connector))
        .route("/policies", get(list_policies).post(create_policy))
        .route("/policies/{id}", axum::routing::delete(delete_policy))
}

fn bad_gateway(endpoint: &'static str, error: UpstreamError) -> Response {
    warn!(endpoint, error = %error, "upstream call failed");
    StatusCode::BAD_GATEWAY.into_response()
}

async fn health() -> Json<Value> {
    Json(json!({
        "data": {
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION")
        },
        "meta": {
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}

async fn list_anomalies(State(state): State<AppState>) -> Response {
    match state.clients.anomalies.list().await {
        Ok(anomalies) => {
            let total = anomalies.len();
            Json(json!({ "data": anomalies, "meta": { "total": total } })).into_response()
        }
        Err(e) => bad_gateway("anomalies", e),
    }
}

async fn list_reports(State(state): State<AppState>) -> Response {
    match state.clients.reports.list().await {
        Ok(reports) => {
            let total = reports.len();
            Json(json!({ "data": reports, "meta": { "total": total } })).into_response()
        }
        Err(e) => bad_gateway("reports", e),
    }
}

async fn report_content(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.clients.reports.fetch(&name).await {
        Ok(content) => content.into_response(),
        Err(e) => bad_gateway("report content", e),
    }
}

async fn list_connectors(State(state): State<AppState>) -> Response {
    match state.clients.connectors.list().await {
        Ok(connectors) => {
            let total = connectors.len();
            Json(json!({ "data": connectors, "meta": { "total": total } })).into_response()
        }
        Err(e) => bad_gateway("connectors", e),
    }
}

async fn create_connector(
    State(state): State<AppState>,
    Json(connector): Json<Connector>,
) -> Response {
    match state.clients.connectors.create(&connector).await {
        Ok(()) => (StatusCode::CREATED, Json(json!({ "data": connector }))).into_response(),
        Err(e) => bad_gateway("create connector", e),
    }
}

async fn delete_connector(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.clients.connectors.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => bad_gateway("delete connector", e),
    }
}

async fn list_policies(State(state): State<AppState>) -> Response {
    match state.clients.policies.list().await {
        Ok(policies) => {
            let total = policies.len();
            Json(json!({ "data": policies, "meta": { "total": total } })).into_response()
        }
        Err(e) => bad_gateway("policies", e),
    }
}

async fn create_policy(State(state): State<AppState>, Json(policy): Json<Policy>) -> Response {
    match state.clients.policies.create(&policy).await {
        Ok(()) => (StatusCode::CREATED, Json(json!({ "data": policy }))).into_response(),
        Err(e) => bad_gateway("create policy", e),
    }
}

async fn delete_policy(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.clients.policies.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => bad_gateway("delete policy", e),
    }
}
