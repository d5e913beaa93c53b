//! Migration to create the compliance reports table

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ComplianceReports::Table)
                    .if_not_exists()
                    .col(pk_uuid(ComplianceReports::Id))
                    .col(string(ComplianceReports::ReportType))
                    .col(string_null(ComplianceReports::UserId))
                    .col(json_binary(ComplianceReports::TransactionIds))
                    .col(string(ComplianceReports::Status))
                    .col(timestamp_with_time_zone_null(ComplianceReports::DueDate))
                    .col(timestamp_with_time_zone_null(ComplianceReports::FiledAt))
                    .col(string_null(ComplianceReports::FiledBy))
                    .col(text_null(ComplianceReports::Summary))
                    .col(string(ComplianceReports::CreatedBy))
                    .col(timestamp_with_time_zone(ComplianceReports::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(ComplianceReports::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Index for deadline sweeps over unfiled regulatory reports
        manager
            .create_index(
                Index::create()
                    .name("idx_compliance_reports_due_date")
                    .table(ComplianceReports::Table)
                    .col(ComplianceReports::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_compliance_reports_status")
                    .table(ComplianceReports::Table)
                    .col(ComplianceReports::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComplianceReports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ComplianceReports {
    Table,
    Id,
    ReportType,
    UserId,
    TransactionIds,
    Status,
    DueDate,
    FiledAt,
    FiledBy,
    Summary,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
