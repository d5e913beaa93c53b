//! Support ticket endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{prelude::*, support_tickets};
use crate::error::BmsError;
use crate::models::ticket::{
    CreateTicketMessageRequest, CreateTicketRequest, TicketMessageResponse, TicketResponse,
    TicketStatus, TransitionTicketRequest,
};
use crate::services::tickets;
use crate::validation::FieldViolation;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListTicketsParams {
    pub status: Option<String>,
    pub user_id: Option<String>,
    pub breached: Option<bool>,
}

pub async fn create_ticket(
    State(state): State<AppState>,
    Json(request): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<TicketResponse>), BmsError> {
    let created = tickets::create_ticket(&*state.db, &state.config.sla, request).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn list_tickets(
    State(state): State<AppState>,
    Query(params): Query<ListTicketsParams>,
) -> Result<Json<Vec<TicketResponse>>, BmsError> {
    let mut query = SupportTickets::find();
    if let Some(status) = params.status {
        query = query.filter(support_tickets::Column::Status.eq(status));
    }
    if let Some(user_id) = params.user_id {
        query = query.filter(support_tickets::Column::UserId.eq(user_id));
    }
    if let Some(breached) = params.breached {
        query = query.filter(support_tickets::Column::SlaBreached.eq(breached));
    }
    let rows = query
        .order_by(support_tickets::Column::CreatedAt, Order::Desc)
        .all(&*state.db)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TicketResponse>, BmsError> {
    let ticket = SupportTickets::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "support ticket",
            id: id.to_string(),
        })?;
    Ok(Json(ticket.into()))
}

pub async fn transition_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionTicketRequest>,
) -> Result<Json<TicketResponse>, BmsError> {
    let to: TicketStatus = request.status.parse().map_err(|msg: String| {
        BmsError::Validation(vec![FieldViolation::new("status", "invalid_enum", msg)])
    })?;
    let updated = tickets::transition_ticket(&*state.db, id, to).await?;
    Ok(Json(updated.into()))
}

pub async fn add_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateTicketMessageRequest>,
) -> Result<(StatusCode, Json<TicketMessageResponse>), BmsError> {
    let created = tickets::add_message(&*state.db, id, request).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TicketMessageResponse>>, BmsError> {
    let messages = tickets::list_messages(&*state.db, id).await?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}
