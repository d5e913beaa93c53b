//! Security incident endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{prelude::*, security_incidents};
use crate::error::BmsError;
use crate::models::incident::{
    CreateIncidentRequest, IncidentResponse, IncidentStatus, TransitionIncidentRequest,
};
use crate::services::incidents;
use crate::validation::FieldViolation;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListIncidentsParams {
    pub status: Option<String>,
    pub severity: Option<String>,
}

pub async fn create_incident(
    State(state): State<AppState>,
    Json(request): Json<CreateIncidentRequest>,
) -> Result<(StatusCode, Json<IncidentResponse>), BmsError> {
    let created = incidents::create_incident(&*state.db, request).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn list_incidents(
    State(state): State<AppState>,
    Query(params): Query<ListIncidentsParams>,
) -> Result<Json<Vec<IncidentResponse>>, BmsError> {
    let mut query = SecurityIncidents::find();
    if let Some(status) = params.status {
        query = query.filter(security_incidents::Column::Status.eq(status));
    }
    if let Some(severity) = params.severity {
        query = query.filter(security_incidents::Column::Severity.eq(severity));
    }
    let rows = query
        .order_by(security_incidents::Column::DetectedAt, Order::Desc)
        .all(&*state.db)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_incident(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IncidentResponse>, BmsError> {
    let incident = SecurityIncidents::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "security incident",
            id: id.to_string(),
        })?;
    Ok(Json(incident.into()))
}

pub async fn transition_incident(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionIncidentRequest>,
) -> Result<Json<IncidentResponse>, BmsError> {
    let to: IncidentStatus = request.status.parse().map_err(|msg: String| {
        BmsError::Validation(vec![FieldViolation::new("status", "invalid_enum", msg)])
    })?;
    let updated = incidents::transition_incident(&*state.db, id, to).await?;
    Ok(Json(updated.into()))
}
