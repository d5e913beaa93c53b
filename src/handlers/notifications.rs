//! Outbound email and payment-intent endpoints
//!
//! Thin fronts over the external-service ports so ops tooling can trigger
//! a send or collect a card payment without talking to the vendors
//! directly.

use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BmsError;
use crate::services::email::OutboundEmail;
use crate::validation::FieldViolation;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub dispatched: bool,
}

pub async fn send_email(
    State(state): State<AppState>,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, BmsError> {
    let mut violations = Vec::new();
    if request.to.trim().is_empty() {
        violations.push(FieldViolation::new("to", "required", "to must be a non-empty string"));
    }
    if request.subject.trim().is_empty() {
        violations.push(FieldViolation::new(
            "subject",
            "required",
            "subject must be a non-empty string",
        ));
    }
    if !violations.is_empty() {
        return Err(BmsError::Validation(violations));
    }

    state
        .email
        .send(OutboundEmail {
            to: request.to,
            subject: request.subject,
            body: request.body,
        })
        .await?;

    Ok(Json(SendEmailResponse { dispatched: true }))
}

#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Serialize)]
pub struct CreateIntentResponse {
    pub intent_id: String,
    pub client_secret: Option<String>,
    pub amount: Decimal,
    pub currency: String,
}

pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(request): Json<CreateIntentRequest>,
) -> Result<(StatusCode, Json<CreateIntentResponse>), BmsError> {
    let mut violations = Vec::new();
    if request.amount <= Decimal::ZERO {
        violations.push(FieldViolation::new(
            "amount",
            "out_of_range",
            "amount must be positive",
        ));
    }
    if request.currency.trim().is_empty() {
        violations.push(FieldViolation::new(
            "currency",
            "required",
            "currency must be a non-empty string",
        ));
    }
    if !violations.is_empty() {
        return Err(BmsError::Validation(violations));
    }

    let intent = state
        .payments
        .create_intent(request.amount, &request.currency)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateIntentResponse {
            intent_id: intent.intent_id,
            client_secret: intent.client_secret,
            amount: intent.amount,
            currency: intent.currency,
        }),
    ))
}
