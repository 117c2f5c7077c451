//! Create donation table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Donation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donation::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Donation::DonorId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Donation::FoodType)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Donation::Quantity)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Donation::ExpiryTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Donation::Location)
                            .string_len(512)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Donation::Latitude).double().not_null())
                    .col(ColumnDef::new(Donation::Longitude).double().not_null())
                    .col(ColumnDef::new(Donation::Notes).text())
                    .col(ColumnDef::new(Donation::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Donation::AcceptedBy).string_len(32))
                    .col(
                        ColumnDef::new(Donation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Donation::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donation_donor")
                            .from(Donation::Table, Donation::DonorId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donation_acceptor")
                            .from(Donation::Table, Donation::AcceptedBy)
                            .to(Orphanage::Table, Orphanage::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: status (open-donation listing filters on it)
        manager
            .create_index(
                Index::create()
                    .name("idx_donation_status")
                    .table(Donation::Table)
                    .col(Donation::Status)
                    .to_owned(),
            )
            .await?;

        // Index: donor_id (donor's own listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_donation_donor_id")
                    .table(Donation::Table)
                    .col(Donation::DonorId)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (most-recent-first ordering)
        manager
            .create_index(
                Index::create()
                    .name("idx_donation_created_at")
                    .table(Donation::Table)
                    .col(Donation::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donation::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Donation {
    Table,
    Id,
    DonorId,
    FoodType,
    Quantity,
    ExpiryTime,
    Location,
    Latitude,
    Longitude,
    Notes,
    Status,
    AcceptedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Profile {
    Table,
    Id,
}

#[derive(Iden)]
enum Orphanage {
    Table,
    Id,
}
