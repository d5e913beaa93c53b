mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use bms_backend::entities::kyc_workflows;
use bms_backend::{app, AppState};

use crate::common::test_state;

fn empty_state() -> AppState {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    test_state(db)
}

async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_workflow() -> kyc_workflows::Model {
    kyc_workflows::Model {
        id: Uuid::new_v4(),
        user_id: "user-77".to_string(),
        current_stage: "phone".to_string(),
        kyc_level: 1,
        risk_level: "low".to_string(),
        status: "in_progress".to_string(),
        sanctions_check: false,
        pep_check: false,
        assigned_to: None,
        approved_by: None,
        notes: None,
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn health_endpoint_responds() {
    let app = app(empty_state());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_kyc_workflows_returns_rows() {
    let workflow = sample_workflow();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![workflow.clone()]])
        .into_connection();
    let app = app(test_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/kyc/workflows")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], "user-77");
    assert_eq!(rows[0]["current_stage"], "phone");
    assert_eq!(rows[0]["kyc_level"], 1);
}

#[tokio::test]
async fn get_unknown_workflow_is_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<kyc_workflows::Model>::new()])
        .into_connection();
    let app = app(test_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/kyc/workflows/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn create_workflow_with_empty_user_id_is_422() {
    let app = app(empty_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/kyc/workflows")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "user_id": "" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response.into_body()).await;
    let violations = body["violations"].as_array().unwrap();
    assert!(violations.iter().any(|v| v["field"] == "user_id"));
}

#[tokio::test]
async fn send_email_dispatches_through_port() {
    let app = app(empty_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/email/send")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "to": "user@example.com",
                        "subject": "Withdrawal executed",
                        "body": "Your withdrawal of 1.5 BTC has been executed."
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["dispatched"], true);
}

#[tokio::test]
async fn send_email_rejects_blank_recipient() {
    let app = app(empty_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/email/send")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "to": "", "subject": "hi", "body": "x" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_payment_intent_returns_created() {
    let app = app(empty_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/payments/create-intent")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "amount": "49.99", "currency": "usd" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response.into_body()).await;
    assert!(body["intent_id"].as_str().unwrap().starts_with("pi_mock_"));
    assert_eq!(body["currency"], "usd");
}

#[tokio::test]
async fn create_payment_intent_rejects_non_positive_amount() {
    let app = app(empty_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/payments/create-intent")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "amount": "0", "currency": "usd" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response.into_body()).await;
    let violations = body["violations"].as_array().unwrap();
    assert!(violations.iter().any(|v| v["field"] == "amount"));
}
