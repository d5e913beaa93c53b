//! Compliance report endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{compliance_reports, prelude::*};
use crate::error::BmsError;
use crate::models::common::WorkflowStatus;
use crate::models::compliance::{
    ComplianceReportResponse, CreateComplianceReportRequest, FileReportRequest,
};
use crate::services::compliance;
use crate::validation::FieldViolation;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListReportsParams {
    pub status: Option<String>,
    pub report_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransitionReportRequest {
    pub status: String,
}

pub async fn create_report(
    State(state): State<AppState>,
    Json(request): Json<CreateComplianceReportRequest>,
) -> Result<(StatusCode, Json<ComplianceReportResponse>), BmsError> {
    let created = compliance::create_report(&*state.db, request).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<ListReportsParams>,
) -> Result<Json<Vec<ComplianceReportResponse>>, BmsError> {
    let mut query = ComplianceReports::find();
    if let Some(status) = params.status {
        query = query.filter(compliance_reports::Column::Status.eq(status));
    }
    if let Some(report_type) = params.report_type {
        query = query.filter(compliance_reports::Column::ReportType.eq(report_type));
    }
    let reports = query
        .order_by(compliance_reports::Column::CreatedAt, Order::Desc)
        .all(&*state.db)
        .await?;
    Ok(Json(reports.into_iter().map(Into::into).collect()))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ComplianceReportResponse>, BmsError> {
    let report = ComplianceReports::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "compliance report",
            id: id.to_string(),
        })?;
    Ok(Json(report.into()))
}

pub async fn file_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FileReportRequest>,
) -> Result<Json<ComplianceReportResponse>, BmsError> {
    let updated = compliance::file_report(&*state.db, id, request.filed_by).await?;
    Ok(Json(updated.into()))
}

pub async fn transition_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionReportRequest>,
) -> Result<Json<ComplianceReportResponse>, BmsError> {
    let to: WorkflowStatus = request.status.parse().map_err(|msg: String| {
        BmsError::Validation(vec![FieldViolation::new("status", "invalid_enum", msg)])
    })?;
    let updated = compliance::transition_report(&*state.db, id, to).await?;
    Ok(Json(updated.into()))
}
