//! Migration to create the security incidents table

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SecurityIncidents::Table)
                    .if_not_exists()
                    .col(pk_uuid(SecurityIncidents::Id))
                    .col(string(SecurityIncidents::Title))
                    .col(text_null(SecurityIncidents::Description))
                    .col(string(SecurityIncidents::Severity))
                    .col(string(SecurityIncidents::Status))
                    .col(timestamp_with_time_zone(SecurityIncidents::DetectedAt))
                    .col(timestamp_with_time_zone_null(SecurityIncidents::ContainedAt))
                    .col(timestamp_with_time_zone_null(SecurityIncidents::ResolvedAt))
                    .col(string(SecurityIncidents::ReportedBy))
                    .col(json_binary(SecurityIncidents::AffectedSystems))
                    .col(timestamp_with_time_zone(SecurityIncidents::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(SecurityIncidents::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Index for the open-incident board
        manager
            .create_index(
                Index::create()
                    .name("idx_security_incidents_status")
                    .table(SecurityIncidents::Table)
                    .col(SecurityIncidents::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_security_incidents_severity")
                    .table(SecurityIncidents::Table)
                    .col(SecurityIncidents::Severity)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SecurityIncidents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SecurityIncidents {
    Table,
    Id,
    Title,
    Description,
    Severity,
    Status,
    DetectedAt,
    ContainedAt,
    ResolvedAt,
    ReportedBy,
    AffectedSystems,
    CreatedAt,
    UpdatedAt,
}
