//! Migration to create the ticket messages table

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketMessages::Table)
                    .if_not_exists()
                    .col(pk_uuid(TicketMessages::Id))
                    .col(uuid(TicketMessages::TicketId))
                    .col(string(TicketMessages::AuthorId))
                    .col(string(TicketMessages::AuthorRole))
                    .col(text(TicketMessages::Body))
                    .col(timestamp_with_time_zone(TicketMessages::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_messages_ticket_id")
                            .from(TicketMessages::Table, TicketMessages::TicketId)
                            .to(SupportTickets::Table, SupportTickets::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for loading a ticket's conversation in order
        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_messages_ticket_id")
                    .table(TicketMessages::Table)
                    .col(TicketMessages::TicketId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketMessages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TicketMessages {
    Table,
    Id,
    TicketId,
    AuthorId,
    AuthorRole,
    Body,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SupportTickets {
    Table,
    Id,
}
