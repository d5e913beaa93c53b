mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::{json, Value};
use tower::ServiceExt;

use bms_backend::app;

use crate::common::test_state;

fn validation_app() -> axum::Router {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    app(test_state(db))
}

async fn validate(entity: &str, payload: Value) -> (StatusCode, Value) {
    let response = validation_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/validate/{}", entity))
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn accepts_valid_wallet_operation() {
    let payload = json!({
        "operation_type": "withdrawal",
        "asset": "BTC",
        "amount": "1.5",
        "destination_address": "bc1q9yz7xp3...",
        "required_approvals": 3,
        "required_confirmations": 6,
        "initiated_by": "treasury-bot"
    });
    let (status, body) = validate("wallet_operation", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["asset"], "BTC");
}

#[tokio::test]
async fn accepted_payload_survives_a_second_pass() {
    let payload = json!({
        "operation_type": "rebalance",
        "asset": "ETH",
        "amount": "120.00000001",
        "required_approvals": 2,
        "initiated_by": "treasury-bot"
    });
    let (status, accepted) = validate("wallet_operation", payload).await;
    assert_eq!(status, StatusCode::OK);

    let (status, again) = validate("wallet_operation", accepted.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accepted, again);
}

#[tokio::test]
async fn rejects_withdrawal_without_destination() {
    let payload = json!({
        "operation_type": "withdrawal",
        "asset": "BTC",
        "amount": "1.5",
        "required_approvals": 3,
        "initiated_by": "treasury-bot"
    });
    let (status, body) = validate("wallet_operation", payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let violations = body["violations"].as_array().unwrap();
    assert!(violations
        .iter()
        .any(|v| v["field"] == "destination_address" && v["code"] == "required"));
}

#[tokio::test]
async fn reports_every_violation_at_once() {
    let payload = json!({
        "operation_type": "teleport",
        "asset": "",
        "amount": "-3",
        "required_approvals": 0,
        "initiated_by": ""
    });
    let (status, body) = validate("wallet_operation", payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let violations = body["violations"].as_array().unwrap();
    assert!(violations.len() >= 4);
    let fields: Vec<&str> = violations
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"operation_type"));
    assert!(fields.contains(&"asset"));
    assert!(fields.contains(&"amount"));
    assert!(fields.contains(&"required_approvals"));
}

#[tokio::test]
async fn rejects_unknown_entity_kind() {
    let (status, body) = validate("order_book", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let violations = body["violations"].as_array().unwrap();
    assert!(violations.iter().any(|v| v["field"] == "entity"));
}

#[tokio::test]
async fn sar_report_needs_due_date_but_internal_review_does_not() {
    let sar = json!({
        "report_type": "sar",
        "created_by": "compliance-1",
        "transaction_ids": ["tx-1", "tx-2"]
    });
    let (status, body) = validate("compliance_report", sar).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v["field"] == "due_date"));

    let review = json!({
        "report_type": "internal_review",
        "created_by": "compliance-1"
    });
    let (status, _) = validate("compliance_report", review).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn support_ticket_priority_must_be_known() {
    let payload = json!({
        "user_id": "user-9",
        "subject": "Withdrawal stuck",
        "priority": "apocalyptic"
    });
    let (status, body) = validate("support_ticket", payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v["field"] == "priority" && v["code"] == "invalid_enum"));
}

#[tokio::test]
async fn staff_member_email_and_role_checked() {
    let payload = json!({
        "email": "dana@exchange.example",
        "full_name": "Dana Ops",
        "role": "compliance_officer"
    });
    let (status, _) = validate("staff_member", payload).await;
    assert_eq!(status, StatusCode::OK);

    let bad = json!({
        "email": "dana-at-example",
        "full_name": "Dana Ops",
        "role": "wizard"
    });
    let (status, body) = validate("staff_member", bad).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let violations = body["violations"].as_array().unwrap();
    assert!(violations.iter().any(|v| v["field"] == "email"));
    assert!(violations.iter().any(|v| v["field"] == "role"));
}

#[tokio::test]
async fn security_incident_severity_checked() {
    let payload = json!({
        "title": "Hot wallet anomaly",
        "severity": "critical",
        "reported_by": "secops-1",
        "affected_systems": ["hot-wallet-1"]
    });
    let (status, _) = validate("security_incident", payload).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn affiliate_program_rate_must_be_fraction() {
    let (status, body) = validate(
        "affiliate_program",
        json!({ "name": "VIP tier", "commission_rate": "2.0" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v["field"] == "commission_rate"));
}
