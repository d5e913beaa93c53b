//! Treasury wallet operation endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{wallet_operation_approvals, wallet_operations, prelude::*};
use crate::error::BmsError;
use crate::models::wallet_operation::{
    ApprovalResponse, CreateWalletOperationRequest, RecordApprovalRequest,
    RecordConfirmationsRequest, WalletOperationResponse,
};
use crate::services::treasury;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListOperationsParams {
    pub status: Option<String>,
    pub asset: Option<String>,
}

pub async fn create_operation(
    State(state): State<AppState>,
    Json(request): Json<CreateWalletOperationRequest>,
) -> Result<(StatusCode, Json<WalletOperationResponse>), BmsError> {
    let created = treasury::create_operation(&*state.db, request).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn list_operations(
    State(state): State<AppState>,
    Query(params): Query<ListOperationsParams>,
) -> Result<Json<Vec<WalletOperationResponse>>, BmsError> {
    let mut query = WalletOperations::find();
    if let Some(status) = params.status {
        query = query.filter(wallet_operations::Column::Status.eq(status));
    }
    if let Some(asset) = params.asset {
        query = query.filter(wallet_operations::Column::Asset.eq(asset));
    }
    let operations = query
        .order_by(wallet_operations::Column::CreatedAt, Order::Desc)
        .all(&*state.db)
        .await?;
    Ok(Json(operations.into_iter().map(Into::into).collect()))
}

pub async fn get_operation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WalletOperationResponse>, BmsError> {
    let operation = WalletOperations::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "wallet operation",
            id: id.to_string(),
        })?;
    Ok(Json(operation.into()))
}

pub async fn list_approvals(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ApprovalResponse>>, BmsError> {
    let approvals = WalletOperationApprovals::find()
        .filter(wallet_operation_approvals::Column::OperationId.eq(id))
        .order_by(wallet_operation_approvals::Column::ApprovedAt, Order::Asc)
        .all(&*state.db)
        .await?;
    Ok(Json(approvals.into_iter().map(Into::into).collect()))
}

pub async fn record_approval(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordApprovalRequest>,
) -> Result<Json<WalletOperationResponse>, BmsError> {
    let updated = treasury::record_approval(&*state.db, id, &request.approver_id).await?;
    Ok(Json(updated.into()))
}

pub async fn record_confirmations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordConfirmationsRequest>,
) -> Result<Json<WalletOperationResponse>, BmsError> {
    let updated =
        treasury::record_confirmations(&*state.db, id, request.confirmations, request.tx_hash)
            .await?;
    Ok(Json(updated.into()))
}

pub async fn execute_operation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WalletOperationResponse>, BmsError> {
    let updated = treasury::execute_operation(&*state.db, id).await?;
    Ok(Json(updated.into()))
}

pub async fn cancel_operation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WalletOperationResponse>, BmsError> {
    let updated = treasury::cancel_operation(&*state.db, id).await?;
    Ok(Json(updated.into()))
}
