//! Canonical entity types shared by the upstream clients and the views.
//!
//! All records are owned by the backend services; the dashboard only holds a
//! transient copy fetched on demand. The anomaly schema is pinned to the
//! flattened financial-transaction record the detector broadcasts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single financial transaction as emitted by the anomaly detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub user_id: String,
    pub amount: f64,
    pub currency: String,
    pub recipient: String,
    pub country: String,
    pub timestamp: DateTime<Utc>,
}

/// A flagged transaction plus the detector's human-readable reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub transaction: Transaction,
    pub reason: String,
}

/// A named rule-set configuration targeting one data type.
///
/// `rules` is opaque to this layer: it is stored and forwarded verbatim,
/// never interpreted or validated client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub name: String,
    pub description: String,
    pub data_type: String,
    #[serde(default)]
    pub rules: Vec<serde_json::Value>,
}

/// A registered external data-source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    pub id: String,
    pub name: String,
    /// Data-source kind, e.g. "mongodb" or "postgresql".
    #[serde(rename = "type")]
    pub kind: String,
    pub connection_string: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anomaly_deserializes_detector_broadcast() {
        let frame = r#"{
            "transaction": {
                "user_id": "user-42",
                "amount": 9500.0,
                "currency": "EUR",
                "recipient": "acct-17",
                "country": "LT",
                "timestamp": "2024-03-01T12:30:00Z"
            },
            "reason": "Amount 9500 is >10x the user's average of 420.00."
        }"#;

        let anomaly: Anomaly = serde_json::from_str(frame).unwrap();
        assert_eq!(anomaly.transaction.user_id, "user-42");
        assert_eq!(anomaly.transaction.currency, "EUR");
        assert!(anomaly.reason.contains(">10x"));
    }

    #[test]
    fn connector_type_field_round_trips() {
        let connector = Connector {
            id: "c1".to_string(),
            name: "prod mongo".to_string(),
            kind: "mongodb".to_string(),
            connection_string: "mongodb://admin:hunter2@db:27017".to_string(),
        };

        let json = serde_json::to_value(&connector).unwrap();
        // Wire field is `type`, not `kind`.
        assert_eq!(json["type"], "mongodb");

        let back: Connector = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind, "mongodb");
    }

    #[test]
    fn policy_rules_default_to_empty() {
        let policy: Policy = serde_json::from_str(
            r#"{"id":"p1","name":"gdpr","description":"","data_type":"transaction"}"#,
        )
        .unwrap();
        assert!(policy.rules.is_empty());
    }
}
