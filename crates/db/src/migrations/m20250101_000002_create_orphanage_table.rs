//! Create orphanage table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orphanage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orphanage::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Orphanage::UserId)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Orphanage::Name).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Orphanage::Address)
                            .string_len(512)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Orphanage::Phone).string_len(64).not_null())
                    .col(ColumnDef::new(Orphanage::Latitude).double().not_null())
                    .col(ColumnDef::new(Orphanage::Longitude).double().not_null())
                    .col(ColumnDef::new(Orphanage::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(Orphanage::Verified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Orphanage::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Orphanage::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orphanage_user")
                            .from(Orphanage::Table, Orphanage::UserId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: verified (donor-facing directory lists verified only)
        manager
            .create_index(
                Index::create()
                    .name("idx_orphanage_verified")
                    .table(Orphanage::Table)
                    .col(Orphanage::Verified)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orphanage::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Orphanage {
    Table,
    Id,
    UserId,
    Name,
    Address,
    Phone,
    Latitude,
    Longitude,
    Capacity,
    Verified,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Profile {
    Table,
    Id,
}
