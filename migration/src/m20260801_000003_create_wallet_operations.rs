//! Migration to create the treasury wallet operations table

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WalletOperations::Table)
                    .if_not_exists()
                    .col(pk_uuid(WalletOperations::Id))
                    .col(string(WalletOperations::OperationType))
                    .col(string(WalletOperations::Asset))
                    .col(decimal_len(WalletOperations::Amount, 30, 8))
                    .col(string_null(WalletOperations::DestinationAddress))
                    .col(string(WalletOperations::Status))
                    .col(integer(WalletOperations::RequiredApprovals))
                    .col(integer(WalletOperations::CurrentApprovals).default(0))
                    .col(integer(WalletOperations::Confirmations).default(0))
                    .col(integer(WalletOperations::RequiredConfirmations).default(0))
                    .col(string_null(WalletOperations::TxHash))
                    .col(string(WalletOperations::InitiatedBy))
                    .col(timestamp_with_time_zone_null(WalletOperations::ExecutedAt))
                    .col(timestamp_with_time_zone(WalletOperations::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(WalletOperations::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Index for querying pending operations
        manager
            .create_index(
                Index::create()
                    .name("idx_wallet_operations_status")
                    .table(WalletOperations::Table)
                    .col(WalletOperations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_wallet_operations_asset")
                    .table(WalletOperations::Table)
                    .col(WalletOperations::Asset)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WalletOperations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WalletOperations {
    Table,
    Id,
    OperationType,
    Asset,
    Amount,
    DestinationAddress,
    Status,
    RequiredApprovals,
    CurrentApprovals,
    Confirmations,
    RequiredConfirmations,
    TxHash,
    InitiatedBy,
    ExecutedAt,
    CreatedAt,
    UpdatedAt,
}
