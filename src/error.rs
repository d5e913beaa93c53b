//! Domain errors and their HTTP mapping

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use sea_orm::DbErr;
use thiserror::Error;

use crate::models::common::{ErrorResponse, ValidationErrorResponse};
use crate::validation::FieldViolation;

#[derive(Debug, Error)]
pub enum BmsError {
    #[error("validation failed with {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("invalid transition from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },

    #[error("stage '{attempted}' cannot be completed while current stage is '{current}'")]
    InvalidStageOrder { current: String, attempted: String },

    #[error("insufficient approvals: {current} of {required}")]
    InsufficientApprovals { current: i32, required: i32 },

    #[error("insufficient confirmations: {current} of {required}")]
    InsufficientConfirmations { current: i32, required: i32 },

    #[error("report already filed at {filed_at}")]
    AlreadyFiled { filed_at: String },

    #[error("commission paid {paid} would exceed commission earned {earned}")]
    CommissionExceedsEarned { paid: String, earned: String },

    #[error("timestamp {field} would move backwards")]
    NonMonotonicTimestamp { field: &'static str },

    #[error("critical-risk workflow requires an approver sign-off")]
    ApprovalRequired,

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{service} request failed: {message}")]
    External { service: &'static str, message: String },

    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

impl BmsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BmsError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BmsError::InvalidTransition { .. }
            | BmsError::InvalidStageOrder { .. }
            | BmsError::InsufficientApprovals { .. }
            | BmsError::InsufficientConfirmations { .. }
            | BmsError::AlreadyFiled { .. }
            | BmsError::CommissionExceedsEarned { .. }
            | BmsError::NonMonotonicTimestamp { .. }
            | BmsError::ApprovalRequired => StatusCode::CONFLICT,
            BmsError::NotFound { .. } => StatusCode::NOT_FOUND,
            BmsError::External { .. } => StatusCode::BAD_GATEWAY,
            BmsError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BmsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self);
        }

        match self {
            BmsError::Validation(violations) => (
                status,
                Json(ValidationErrorResponse {
                    error: "validation failed".to_string(),
                    violations,
                }),
            )
                .into_response(),
            other => (
                status,
                Json(ErrorResponse {
                    error: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
