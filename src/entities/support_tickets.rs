//! SeaORM Entity for support tickets

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "support_tickets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: String,
    pub subject: String,
    /// low, normal, high, urgent
    pub priority: String,
    /// open, pending, resolved, closed
    pub status: String,
    pub assigned_to: Option<Uuid>,
    /// First-response deadline derived from priority at creation
    pub sla_deadline: DateTimeWithTimeZone,
    pub first_response_at: Option<DateTimeWithTimeZone>,
    /// Flagged when the first staff reply lands after the deadline
    pub sla_breached: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ticket_messages::Entity")]
    TicketMessages,
}

impl Related<super::ticket_messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketMessages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
