//! Staff directory endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{prelude::*, staff_members};
use crate::error::BmsError;
use crate::models::staff::{CreateStaffRequest, StaffResponse};
use crate::services::staff;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListStaffParams {
    pub role: Option<String>,
    pub active: Option<bool>,
}

pub async fn create_staff(
    State(state): State<AppState>,
    Json(request): Json<CreateStaffRequest>,
) -> Result<(StatusCode, Json<StaffResponse>), BmsError> {
    let created = staff::create_staff(&*state.db, request).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn list_staff(
    State(state): State<AppState>,
    Query(params): Query<ListStaffParams>,
) -> Result<Json<Vec<StaffResponse>>, BmsError> {
    let mut query = StaffMembers::find();
    if let Some(role) = params.role {
        query = query.filter(staff_members::Column::Role.eq(role));
    }
    if let Some(active) = params.active {
        query = query.filter(staff_members::Column::IsActive.eq(active));
    }
    let rows = query
        .order_by(staff_members::Column::FullName, Order::Asc)
        .all(&*state.db)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StaffResponse>, BmsError> {
    let member = StaffMembers::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "staff member",
            id: id.to_string(),
        })?;
    Ok(Json(member.into()))
}

pub async fn deactivate_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StaffResponse>, BmsError> {
    let updated = staff::deactivate_staff(&*state.db, id).await?;
    Ok(Json(updated.into()))
}
