// src/lib.rs

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::AppConfig;
use services::{email::EmailSender, payments::PaymentGateway, screening::ScreeningProvider};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
    pub screening: Arc<dyn ScreeningProvider>,
    pub email: Arc<dyn EmailSender>,
    pub payments: Arc<dyn PaymentGateway>,
}

pub mod entities {
    pub mod prelude;

    pub mod affiliate_programs;
    pub mod affiliate_trackings;
    pub mod compliance_reports;
    pub mod kyc_workflows;
    pub mod security_incidents;
    pub mod staff_members;
    pub mod support_tickets;
    pub mod ticket_messages;
    pub mod wallet_operation_approvals;
    pub mod wallet_operations;
}

pub mod services {
    pub mod affiliates;
    pub mod backoff;
    pub mod compliance;
    pub mod email;
    pub mod incidents;
    pub mod kyc;
    pub mod payments;
    pub mod screening;
    pub mod staff;
    pub mod tickets;
    pub mod treasury;
}

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod validation;
pub mod workflow;

/// Assemble the full API router over the given state
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route(
            "/api/kyc/workflows",
            get(handlers::kyc::list_workflows).post(handlers::kyc::create_workflow),
        )
        .route("/api/kyc/workflows/{id}", get(handlers::kyc::get_workflow))
        .route("/api/kyc/workflows/{id}/advance", post(handlers::kyc::advance_stage))
        .route("/api/kyc/workflows/{id}/screen", post(handlers::kyc::screen_workflow))
        .route("/api/kyc/workflows/{id}/complete", post(handlers::kyc::complete_workflow))
        .route("/api/kyc/workflows/{id}/cancel", post(handlers::kyc::cancel_workflow))
        .route(
            "/api/treasury/operations",
            get(handlers::treasury::list_operations).post(handlers::treasury::create_operation),
        )
        .route("/api/treasury/operations/{id}", get(handlers::treasury::get_operation))
        .route(
            "/api/treasury/operations/{id}/approvals",
            get(handlers::treasury::list_approvals).post(handlers::treasury::record_approval),
        )
        .route(
            "/api/treasury/operations/{id}/confirmations",
            post(handlers::treasury::record_confirmations),
        )
        .route(
            "/api/treasury/operations/{id}/execute",
            post(handlers::treasury::execute_operation),
        )
        .route(
            "/api/treasury/operations/{id}/cancel",
            post(handlers::treasury::cancel_operation),
        )
        .route(
            "/api/compliance/reports",
            get(handlers::compliance::list_reports).post(handlers::compliance::create_report),
        )
        .route("/api/compliance/reports/{id}", get(handlers::compliance::get_report))
        .route("/api/compliance/reports/{id}/file", post(handlers::compliance::file_report))
        .route(
            "/api/compliance/reports/{id}/transition",
            post(handlers::compliance::transition_report),
        )
        .route(
            "/api/support/tickets",
            get(handlers::tickets::list_tickets).post(handlers::tickets::create_ticket),
        )
        .route("/api/support/tickets/{id}", get(handlers::tickets::get_ticket))
        .route(
            "/api/support/tickets/{id}/transition",
            post(handlers::tickets::transition_ticket),
        )
        .route(
            "/api/support/tickets/{id}/messages",
            get(handlers::tickets::list_messages).post(handlers::tickets::add_message),
        )
        .route(
            "/api/affiliates/programs",
            get(handlers::affiliates::list_programs).post(handlers::affiliates::create_program),
        )
        .route(
            "/api/affiliates/programs/{id}/deactivate",
            post(handlers::affiliates::deactivate_program),
        )
        .route(
            "/api/affiliates/trackings",
            get(handlers::affiliates::list_trackings).post(handlers::affiliates::create_tracking),
        )
        .route("/api/affiliates/trackings/{id}", get(handlers::affiliates::get_tracking))
        .route(
            "/api/affiliates/trackings/{id}/commission",
            post(handlers::affiliates::record_commission),
        )
        .route(
            "/api/affiliates/trackings/{id}/payout",
            post(handlers::affiliates::pay_commission),
        )
        .route(
            "/api/security/incidents",
            get(handlers::incidents::list_incidents).post(handlers::incidents::create_incident),
        )
        .route("/api/security/incidents/{id}", get(handlers::incidents::get_incident))
        .route(
            "/api/security/incidents/{id}/transition",
            post(handlers::incidents::transition_incident),
        )
        .route(
            "/api/staff",
            get(handlers::staff::list_staff).post(handlers::staff::create_staff),
        )
        .route("/api/staff/{id}", get(handlers::staff::get_staff))
        .route("/api/staff/{id}/deactivate", post(handlers::staff::deactivate_staff))
        .route("/api/email/send", post(handlers::notifications::send_email))
        .route(
            "/api/payments/create-intent",
            post(handlers::notifications::create_payment_intent),
        )
        .route("/api/validate/{entity}", post(handlers::validation::validate_payload))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "BMS backend up"
}
