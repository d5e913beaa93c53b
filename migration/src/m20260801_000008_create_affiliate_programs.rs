//! Migration to create the affiliate programs table

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AffiliatePrograms::Table)
                    .if_not_exists()
                    .col(pk_uuid(AffiliatePrograms::Id))
                    .col(string(AffiliatePrograms::Name))
                    .col(decimal_len(AffiliatePrograms::CommissionRate, 5, 4))
                    .col(boolean(AffiliatePrograms::IsActive).default(true))
                    .col(timestamp_with_time_zone(AffiliatePrograms::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(AffiliatePrograms::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AffiliatePrograms::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AffiliatePrograms {
    Table,
    Id,
    Name,
    CommissionRate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
