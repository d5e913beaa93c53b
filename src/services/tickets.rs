//! Support ticket service
//!
//! The SLA clock starts at creation: sla_deadline = created_at + the
//! priority's window. The first staff reply stamps first_response_at and,
//! when it lands after the deadline, flags the ticket breached for good.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::config::SlaConfig;
use crate::entities::support_tickets::{self, Entity as SupportTickets};
use crate::entities::ticket_messages;
use crate::error::BmsError;
use crate::models::ticket::{
    AuthorRole, CreateTicketMessageRequest, CreateTicketRequest, TicketPriority, TicketStatus,
};
use crate::validation::ValidateInsert;
use crate::workflow;

pub async fn create_ticket(
    db: &DatabaseConnection,
    sla: &SlaConfig,
    request: CreateTicketRequest,
) -> Result<support_tickets::Model, BmsError> {
    request.validate().map_err(BmsError::Validation)?;

    // validate() guarantees the priority parses
    let priority: TicketPriority = request.priority.parse().map_err(|_| {
        BmsError::Validation(vec![crate::validation::FieldViolation::new(
            "priority",
            "invalid_enum",
            "unknown ticket priority",
        )])
    })?;

    let now = Utc::now();
    let deadline = now + sla.window(priority);

    let model = support_tickets::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(request.user_id),
        subject: Set(request.subject),
        priority: Set(priority.to_string()),
        status: Set(TicketStatus::Open.to_string()),
        assigned_to: Set(request.assigned_to),
        sla_deadline: Set(deadline.into()),
        first_response_at: Set(None),
        sla_breached: Set(false),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    let created = model.insert(db).await?;
    tracing::info!(
        ticket_id = %created.id,
        priority = %created.priority,
        sla_deadline = %created.sla_deadline,
        "ticket opened"
    );
    Ok(created)
}

/// Append a message. The first staff reply stops the SLA clock; a late
/// first reply marks the ticket breached permanently.
pub async fn add_message(
    db: &DatabaseConnection,
    ticket_id: Uuid,
    request: CreateTicketMessageRequest,
) -> Result<ticket_messages::Model, BmsError> {
    request.validate().map_err(BmsError::Validation)?;

    let txn = db.begin().await?;

    let ticket = SupportTickets::find_by_id(ticket_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "support ticket",
            id: ticket_id.to_string(),
        })?;

    let role: AuthorRole = request.author_role.parse().map_err(|_| {
        BmsError::Validation(vec![crate::validation::FieldViolation::new(
            "author_role",
            "invalid_enum",
            "unknown author role",
        )])
    })?;

    let now = Utc::now();
    let message = ticket_messages::ActiveModel {
        id: Set(Uuid::new_v4()),
        ticket_id: Set(ticket_id),
        author_id: Set(request.author_id),
        author_role: Set(role.to_string()),
        body: Set(request.body),
        created_at: Set(now.into()),
    };
    let created = message.insert(&txn).await?;

    if role == AuthorRole::Staff && ticket.first_response_at.is_none() {
        let breached = now > ticket.sla_deadline;
        let mut active: support_tickets::ActiveModel = ticket.into();
        active.first_response_at = Set(Some(now.into()));
        if breached {
            active.sla_breached = Set(true);
            tracing::warn!(ticket_id = %ticket_id, "first response missed the SLA deadline");
        }
        active.updated_at = Set(now.into());
        active.update(&txn).await?;
    }

    txn.commit().await?;
    Ok(created)
}

pub async fn list_messages(
    db: &DatabaseConnection,
    ticket_id: Uuid,
) -> Result<Vec<ticket_messages::Model>, BmsError> {
    let messages = ticket_messages::Entity::find()
        .filter(ticket_messages::Column::TicketId.eq(ticket_id))
        .order_by(ticket_messages::Column::CreatedAt, Order::Asc)
        .all(db)
        .await?;
    Ok(messages)
}

pub async fn transition_ticket(
    db: &DatabaseConnection,
    ticket_id: Uuid,
    to: TicketStatus,
) -> Result<support_tickets::Model, BmsError> {
    let txn = db.begin().await?;

    let ticket = SupportTickets::find_by_id(ticket_id)
        .one(&txn)
        .await?
        .ok_or_else(|| BmsError::NotFound {
            entity: "support ticket",
            id: ticket_id.to_string(),
        })?;

    let status: TicketStatus = ticket
        .status
        .parse()
        .map_err(|_| BmsError::InvalidTransition {
            from: ticket.status.clone(),
            to: to.to_string(),
        })?;
    let next = workflow::transition_ticket(status, to)?;

    let mut active: support_tickets::ActiveModel = ticket.into();
    active.status = Set(next.to_string());
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}
