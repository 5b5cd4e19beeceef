//! Server-rendered dashboard panels.
//!
//! Every panel fetches its collection wholesale on each request and renders
//! it; an upstream failure is logged and the panel falls back to its empty
//! state (no user-visible error, per the platform's display policy). Form
//! submissions forward upstream and answer 303 back to the panel, so the
//! browser's follow-up GET is the single re-fetch.

use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tracing::{error, warn};

use crate::api::state::AppState;
use crate::model::{Anomaly, Connector, Policy};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/anomalies", get(anomalies_page))
        .route("/policies", get(policies_page).post(add_policy))
        .route("/policies/{id}/delete", post(delete_policy))
        .route("/connectors", get(connectors_page).post(add_connector))
        .route("/connectors/{id}/delete", post(delete_connector))
        .route("/reports", get(reports_page))
        .route("/reports/{name}", get(report_detail_page))
}

#[derive(Template)]
#[template(path = "anomalies.html")]
struct AnomaliesPage {
    anomalies: Vec<Anomaly>,
}

#[derive(Template)]
#[template(path = "policies.html")]
struct PoliciesPage {
    policies: Vec<Policy>,
}

#[derive(Template)]
#[template(path = "connectors.html")]
struct ConnectorsPage {
    connectors: Vec<Connector>,
}

#[derive(Template)]
#[template(path = "reports.html")]
struct ReportsPage {
    reports: Vec<String>,
}

#[derive(Template)]
#[template(path = "report_detail.html")]
struct ReportDetailPage {
    name: String,
    content: String,
}

fn render<T: Template>(page: T) -> Response {
    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "template render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn index() -> Redirect {
    Redirect::to("/anomalies")
}

async fn anomalies_page(State(state): State<AppState>) -> Response {
    let mut anomalies = match state.clients.anomalies.list().await {
        Ok(anomalies) => anomalies,
        Err(e) => {
            warn!(error = %e, "anomaly snapshot fetch failed");
            Vec::new()
        }
    };
    // Detector returns oldest first; the panel shows newest first, matching
    // the live feed's prepend.
    anomalies.reverse();
    render(AnomaliesPage { anomalies })
}

async fn policies_page(State(state): State<AppState>) -> Response {
    let policies = match state.clients.policies.list().await {
        Ok(policies) => policies,
        Err(e) => {
            warn!(error = %e, "policy list fetch failed");
            Vec::new()
        }
    };
    render(PoliciesPage { policies })
}

/// Add-policy form fields. The rule list is not editable from the panel;
/// new policies start with an empty one.
#[derive(Debug, Deserialize)]
struct PolicyForm {
    id: String,
    name: String,
    description: String,
    data_type: String,
}

impl PolicyForm {
    fn into_policy(self) -> Policy {
        Policy {
            id: non_blank_or_uuid(self.id),
            name: self.name,
            description: self.description,
            data_type: self.data_type,
            rules: Vec::new(),
        }
    }
}

async fn add_policy(State(state): State<AppState>, Form(form): Form<PolicyForm>) -> Redirect {
    let policy = form.into_policy();
    if let Err(e) = state.clients.policies.create(&policy).await {
        warn!(policy = %policy.id, error = %e, "policy create failed");
    }
    Redirect::to("/policies")
}

async fn delete_policy(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    if let Err(e) = state.clients.policies.delete(&id).await {
        warn!(policy = %id, error = %e, "policy delete failed");
    }
    Redirect::to("/policies")
}

async fn connectors_page(State(state): State<AppState>) -> Response {
    let connectors = match state.clients.connectors.list().await {
        Ok(connectors) => connectors,
        Err(e) => {
            warn!(error = %e, "connector list fetch failed");
            Vec::new()
        }
    };
    render(ConnectorsPage { connectors })
}

#[derive(Debug, Deserialize)]
struct ConnectorForm {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    connection_string: String,
}

impl ConnectorForm {
    fn into_connector(self) -> Connector {
        Connector {
            id: non_blank_or_uuid(self.id),
            name: self.name,
            kind: self.kind,
            connection_string: self.connection_string,
        }
    }
}

async fn add_connector(
    State(state): State<AppState>,
    Form(form): Form<ConnectorForm>,
) -> Redirect {
    let connector = form.into_connector();
    if let Err(e) = state.clients.connectors.create(&connector).await {
        warn!(connector = %connector.id, error = %e, "connector create failed");
    }
    Redirect::to("/connectors")
}

async fn delete_connector(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    if let Err(e) = state.clients.connectors.delete(&id).await {
        warn!(connector = %id, error = %e, "connector delete failed");
    }
    Redirect::to("/connectors")
}

async fn reports_page(State(state): State<AppState>) -> Response {
    let reports = match state.clients.reports.list().await {
        Ok(reports) => reports,
        Err(e) => {
            warn!(error = %e, "report list fetch failed");
            Vec::new()
        }
    };
    render(ReportsPage { reports })
}

async fn report_detail_page(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    // Re-fetched on every visit, never cached.
    let content = match state.clients.reports.fetch(&name).await {
        Ok(content) => content,
        Err(e) => {
            warn!(report = %name, error = %e, "report content fetch failed");
            String::new()
        }
    };
    render(ReportDetailPage { name, content })
}

fn non_blank_or_uuid(id: String) -> String {
    if id.trim().is_empty() {
        uuid::Uuid::new_v4().to_string()
    } else {
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_form_id_gets_generated() {
        let id = non_blank_or_uuid("  ".to_string());
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn explicit_form_id_is_kept() {
        assert_eq!(non_blank_or_uuid("conn-7".to_string()), "conn-7");
    }

    #[test]
    fn policy_form_starts_with_empty_rules() {
        let form = PolicyForm {
            id: "p1".to_string(),
            name: "gdpr retention".to_string(),
            description: "retention windows".to_string(),
            data_type: "transaction".to_string(),
        };
        let policy = form.into_policy();
        assert_eq!(policy.id, "p1");
        assert!(policy.rules.is_empty());
    }
}
