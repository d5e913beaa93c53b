//! Migration to create the wallet operation approvals table
//!
//! The unique (operation_id, approver_id) index backs approval idempotence.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WalletOperationApprovals::Table)
                    .if_not_exists()
                    .col(pk_uuid(WalletOperationApprovals::Id))
                    .col(uuid(WalletOperationApprovals::OperationId))
                    .col(string(WalletOperationApprovals::ApproverId))
                    .col(
                        timestamp_with_time_zone(WalletOperationApprovals::ApprovedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_approvals_operation_id")
                            .from(
                                WalletOperationApprovals::Table,
                                WalletOperationApprovals::OperationId,
                            )
                            .to(WalletOperations::Table, WalletOperations::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One approval per approver per operation
        manager
            .create_index(
                Index::create()
                    .name("idx_approvals_operation_approver")
                    .table(WalletOperationApprovals::Table)
                    .col(WalletOperationApprovals::OperationId)
                    .col(WalletOperationApprovals::ApproverId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WalletOperationApprovals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WalletOperationApprovals {
    Table,
    Id,
    OperationId,
    ApproverId,
    ApprovedAt,
}

#[derive(DeriveIden)]
enum WalletOperations {
    Table,
    Id,
}
