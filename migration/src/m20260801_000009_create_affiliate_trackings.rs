//! Migration to create the affiliate trackings table

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AffiliateTrackings::Table)
                    .if_not_exists()
                    .col(pk_uuid(AffiliateTrackings::Id))
                    .col(uuid(AffiliateTrackings::ProgramId))
                    .col(string(AffiliateTrackings::AffiliateId))
                    .col(string(AffiliateTrackings::ReferredUserId))
                    .col(decimal_len(AffiliateTrackings::CommissionEarned, 30, 8).default(0))
                    .col(decimal_len(AffiliateTrackings::CommissionPaid, 30, 8).default(0))
                    .col(string(AffiliateTrackings::Status))
                    .col(timestamp_with_time_zone(AffiliateTrackings::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(AffiliateTrackings::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_affiliate_trackings_program_id")
                            .from(AffiliateTrackings::Table, AffiliateTrackings::ProgramId)
                            .to(AffiliatePrograms::Table, AffiliatePrograms::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for an affiliate's earnings dashboard
        manager
            .create_index(
                Index::create()
                    .name("idx_affiliate_trackings_affiliate_id")
                    .table(AffiliateTrackings::Table)
                    .col(AffiliateTrackings::AffiliateId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_affiliate_trackings_program_id")
                    .table(AffiliateTrackings::Table)
                    .col(AffiliateTrackings::ProgramId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AffiliateTrackings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AffiliateTrackings {
    Table,
    Id,
    ProgramId,
    AffiliateId,
    ReferredUserId,
    CommissionEarned,
    CommissionPaid,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AffiliatePrograms {
    Table,
    Id,
}
