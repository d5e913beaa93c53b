//! KYC workflow endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{kyc_workflows, prelude::*};
use crate::error::BmsError;
use crate::models::kyc::{
    AdvanceStageRequest, CompleteKycRequest, CreateKycWorkflowRequest, KycStage,
    KycWorkflowResponse,
};
use crate::services::kyc;
use crate::validation::FieldViolation;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListWorkflowsParams {
    pub status: Option<String>,
    pub user_id: Option<String>,
}

pub async fn create_workflow(
    State(state): State<AppState>,
    Json(request): Json<CreateKycWorkflowRequest>,
) -> Result<(StatusCode, Json<KycWorkflowResponse>), BmsError> {
    let created = kyc::create_workflow(&*state.db, request).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn list_workflows(
    State(state): State<AppState>,
    Query(params): Query<ListWorkflowsParams>,
) -> Result<Json<Vec<KycWorkflowResponse>>, BmsError> {
    let mut query = KycWorkflows::find();
    if let Some(status) = params.status {
        query = query.filter(kyc_workflows::Column::Status.eq(status));
    }
    if let Some(user_id) = params.user_id {
        query = query.filter(kyc_workflows::Column::UserId.eq(user_id));
    }
    let workflows = query
        .order_by(kyc_workflows::Column::CreatedAt, Order::Desc)
        .all(&*state.db)
        .await?;
    Ok(Json(workflows.into_iter().map(Into::into).collect()))
}

pub async fn get_workflow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<KycWorkflowResponse>, BmsError> {
    let workflow = KycWorkflows::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "KYC workflow",
            id: id.to_string(),
        })?;
    Ok(Json(workflow.into()))
}

pub async fn advance_stage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AdvanceStageRequest>,
) -> Result<Json<KycWorkflowResponse>, BmsError> {
    let stage: KycStage = request.stage.parse().map_err(|msg: String| {
        BmsError::Validation(vec![FieldViolation::new("stage", "invalid_enum", msg)])
    })?;
    let updated = kyc::advance_stage(&*state.db, id, stage).await?;
    Ok(Json(updated.into()))
}

pub async fn screen_workflow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<KycWorkflowResponse>, BmsError> {
    let updated = kyc::screen_workflow(&*state.db, state.screening.as_ref(), id).await?;
    Ok(Json(updated.into()))
}

pub async fn complete_workflow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteKycRequest>,
) -> Result<Json<KycWorkflowResponse>, BmsError> {
    let updated = kyc::complete_workflow(&*state.db, id, request.approved_by).await?;
    Ok(Json(updated.into()))
}

pub async fn cancel_workflow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<KycWorkflowResponse>, BmsError> {
    let updated = kyc::cancel_workflow(&*state.db, id).await?;
    Ok(Json(updated.into()))
}
