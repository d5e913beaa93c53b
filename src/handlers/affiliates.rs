//! Affiliate program and commission endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{affiliate_trackings, prelude::*};
use crate::error::BmsError;
use crate::models::affiliate::{
    AffiliateProgramResponse, AffiliateTrackingResponse, CreateAffiliateProgramRequest,
    CreateAffiliateTrackingRequest, PayCommissionRequest, RecordCommissionRequest,
};
use crate::services::affiliates;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListTrackingsParams {
    pub program_id: Option<Uuid>,
    pub affiliate_id: Option<String>,
}

pub async fn create_program(
    State(state): State<AppState>,
    Json(request): Json<CreateAffiliateProgramRequest>,
) -> Result<(StatusCode, Json<AffiliateProgramResponse>), BmsError> {
    let created = affiliates::create_program(&*state.db, request).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn list_programs(
    State(state): State<AppState>,
) -> Result<Json<Vec<AffiliateProgramResponse>>, BmsError> {
    let programs = AffiliatePrograms::find().all(&*state.db).await?;
    Ok(Json(programs.into_iter().map(Into::into).collect()))
}

pub async fn deactivate_program(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AffiliateProgramResponse>, BmsError> {
    let updated = affiliates::deactivate_program(&*state.db, id).await?;
    Ok(Json(updated.into()))
}

pub async fn create_tracking(
    State(state): State<AppState>,
    Json(request): Json<CreateAffiliateTrackingRequest>,
) -> Result<(StatusCode, Json<AffiliateTrackingResponse>), BmsError> {
    let created = affiliates::create_tracking(&*state.db, request).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn list_trackings(
    State(state): State<AppState>,
    Query(params): Query<ListTrackingsParams>,
) -> Result<Json<Vec<AffiliateTrackingResponse>>, BmsError> {
    let mut query = AffiliateTrackings::find();
    if let Some(program_id) = params.program_id {
        query = query.filter(affiliate_trackings::Column::ProgramId.eq(program_id));
    }
    if let Some(affiliate_id) = params.affiliate_id {
        query = query.filter(affiliate_trackings::Column::AffiliateId.eq(affiliate_id));
    }
    let rows = query
        .order_by(affiliate_trackings::Column::CreatedAt, Order::Desc)
        .all(&*state.db)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_tracking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AffiliateTrackingResponse>, BmsError> {
    let tracking = AffiliateTrackings::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "affiliate tracking",
            id: id.to_string(),
        })?;
    Ok(Json(tracking.into()))
}

pub async fn record_commission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordCommissionRequest>,
) -> Result<Json<AffiliateTrackingResponse>, BmsError> {
    let updated = affiliates::record_commission(&*state.db, id, request.amount).await?;
    Ok(Json(updated.into()))
}

pub async fn pay_commission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PayCommissionRequest>,
) -> Result<Json<AffiliateTrackingResponse>, BmsError> {
    let updated = affiliates::pay_commission(&*state.db, id, request.amount).await?;
    Ok(Json(updated.into()))
}
