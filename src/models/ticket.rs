//! Support ticket types
//!
//! Ticket status progresses strictly forward: open → pending → resolved → closed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Pending,
    Resolved,
    Closed,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Open => write!(f, "open"),
            TicketStatus::Pending => write!(f, "pending"),
            TicketStatus::Resolved => write!(f, "resolved"),
            TicketStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(TicketStatus::Open),
            "pending" => Ok(TicketStatus::Pending),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err(format!("Unknown ticket status: {}", s)),
        }
    }
}

/// Priority controls the first-response SLA window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketPriority::Low => write!(f, "low"),
            TicketPriority::Normal => write!(f, "normal"),
            TicketPriority::High => write!(f, "high"),
            TicketPriority::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for TicketPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TicketPriority::Low),
            "normal" => Ok(TicketPriority::Normal),
            "high" => Ok(TicketPriority::High),
            "urgent" => Ok(TicketPriority::Urgent),
            _ => Err(format!("Unknown ticket priority: {}", s)),
        }
    }
}

/// Message author side; the first staff reply stops the SLA clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorRole {
    Customer,
    Staff,
}

impl std::fmt::Display for AuthorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorRole::Customer => write!(f, "customer"),
            AuthorRole::Staff => write!(f, "staff"),
        }
    }
}

impl std::str::FromStr for AuthorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(AuthorRole::Customer),
            "staff" => Ok(AuthorRole::Staff),
            _ => Err(format!("Unknown author role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    pub user_id: String,
    pub subject: String,
    pub priority: String,
    #[serde(default)]
    pub assigned_to: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketMessageRequest {
    pub author_id: String,
    pub author_role: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionTicketRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketResponse {
    pub id: Uuid,
    pub user_id: String,
    pub subject: String,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<Uuid>,
    pub sla_deadline: String,
    pub first_response_at: Option<String>,
    pub sla_breached: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<crate::entities::support_tickets::Model> for TicketResponse {
    fn from(model: crate::entities::support_tickets::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            subject: model.subject,
            priority: model.priority,
            status: model.status,
            assigned_to: model.assigned_to,
            sla_deadline: model.sla_deadline.to_rfc3339(),
            first_response_at: model.first_response_at.map(|t| t.to_rfc3339()),
            sla_breached: model.sla_breached,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketMessageResponse {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub author_id: String,
    pub author_role: String,
    pub body: String,
    pub created_at: String,
}

impl From<crate::entities::ticket_messages::Model> for TicketMessageResponse {
    fn from(model: crate::entities::ticket_messages::Model) -> Self {
        Self {
            id: model.id,
            ticket_id: model.ticket_id,
            author_id: model.author_id,
            author_role: model.author_role,
            body: model.body,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}
