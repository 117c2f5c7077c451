//! Create profile table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profile::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Profile::Email)
                            .string_len(320)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Profile::FullName).string_len(256).not_null())
                    .col(ColumnDef::new(Profile::Role).string_len(16).not_null())
                    .col(ColumnDef::new(Profile::Phone).string_len(64))
                    .col(ColumnDef::new(Profile::Address).string_len(512))
                    .col(ColumnDef::new(Profile::Latitude).double())
                    .col(ColumnDef::new(Profile::Longitude).double())
                    .col(
                        ColumnDef::new(Profile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Profile::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: role (dashboards are role-scoped)
        manager
            .create_index(
                Index::create()
                    .name("idx_profile_role")
                    .table(Profile::Table)
                    .col(Profile::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profile::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Profile {
    Table,
    Id,
    Email,
    FullName,
    Role,
    Phone,
    Address,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}
