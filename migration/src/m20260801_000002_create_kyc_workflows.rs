//! Migration to create the KYC workflows table

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KycWorkflows::Table)
                    .if_not_exists()
                    .col(pk_uuid(KycWorkflows::Id))
                    .col(string(KycWorkflows::UserId))
                    .col(string(KycWorkflows::CurrentStage))
                    .col(small_integer(KycWorkflows::KycLevel).default(0))
                    .col(string(KycWorkflows::RiskLevel))
                    .col(string(KycWorkflows::Status))
                    .col(boolean(KycWorkflows::SanctionsCheck).default(false))
                    .col(boolean(KycWorkflows::PepCheck).default(false))
                    .col(uuid_null(KycWorkflows::AssignedTo))
                    .col(string_null(KycWorkflows::ApprovedBy))
                    .col(text_null(KycWorkflows::Notes))
                    .col(timestamp_with_time_zone(KycWorkflows::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(KycWorkflows::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Index for looking up a user's workflows
        manager
            .create_index(
                Index::create()
                    .name("idx_kyc_workflows_user_id")
                    .table(KycWorkflows::Table)
                    .col(KycWorkflows::UserId)
                    .to_owned(),
            )
            .await?;

        // Index for querying by status (review queues)
        manager
            .create_index(
                Index::create()
                    .name("idx_kyc_workflows_status")
                    .table(KycWorkflows::Table)
                    .col(KycWorkflows::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(KycWorkflows::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum KycWorkflows {
    Table,
    Id,
    UserId,
    CurrentStage,
    KycLevel,
    RiskLevel,
    Status,
    SanctionsCheck,
    PepCheck,
    AssignedTo,
    ApprovedBy,
    Notes,
    CreatedAt,
    UpdatedAt,
}
