//! Migration to create the support tickets table

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SupportTickets::Table)
                    .if_not_exists()
                    .col(pk_uuid(SupportTickets::Id))
                    .col(string(SupportTickets::UserId))
                    .col(string(SupportTickets::Subject))
                    .col(string(SupportTickets::Priority))
                    .col(string(SupportTickets::Status))
                    .col(uuid_null(SupportTickets::AssignedTo))
                    .col(timestamp_with_time_zone(SupportTickets::SlaDeadline))
                    .col(timestamp_with_time_zone_null(SupportTickets::FirstResponseAt))
                    .col(boolean(SupportTickets::SlaBreached).default(false))
                    .col(timestamp_with_time_zone(SupportTickets::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(SupportTickets::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_support_tickets_user_id")
                    .table(SupportTickets::Table)
                    .col(SupportTickets::UserId)
                    .to_owned(),
            )
            .await?;

        // Index for open-queue listings and SLA sweeps
        manager
            .create_index(
                Index::create()
                    .name("idx_support_tickets_status")
                    .table(SupportTickets::Table)
                    .col(SupportTickets::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SupportTickets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SupportTickets {
    Table,
    Id,
    UserId,
    Subject,
    Priority,
    Status,
    AssignedTo,
    SlaDeadline,
    FirstResponseAt,
    SlaBreached,
    CreatedAt,
    UpdatedAt,
}
