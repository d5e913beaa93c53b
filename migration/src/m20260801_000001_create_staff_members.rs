//! Migration to create the staff directory table

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StaffMembers::Table)
                    .if_not_exists()
                    .col(pk_uuid(StaffMembers::Id))
                    .col(string_uniq(StaffMembers::Email))
                    .col(string(StaffMembers::FullName))
                    .col(string(StaffMembers::Role))
                    .col(string_null(StaffMembers::Department))
                    .col(boolean(StaffMembers::IsActive).default(true))
                    .col(timestamp_with_time_zone(StaffMembers::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(StaffMembers::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_staff_members_role")
                    .table(StaffMembers::Table)
                    .col(StaffMembers::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StaffMembers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StaffMembers {
    Table,
    Id,
    Email,
    FullName,
    Role,
    Department,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
