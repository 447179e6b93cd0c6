//! Migration to create the pesanan table (service orders between a user and a mitra)

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250801_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pesanan::Table)
                    .if_not_exists()
                    .col(pk_auto(Pesanan::Id))
                    .col(integer(Pesanan::IdUser).not_null())
                    .col(integer(Pesanan::IdMitra).not_null())
                    .col(string(Pesanan::JenisLayanan).not_null())
                    .col(text(Pesanan::Deskripsi).not_null())
                    .col(text(Pesanan::Alamat).not_null())
                    .col(timestamp_with_time_zone(Pesanan::WaktuDiinginkan).not_null())
                    .col(big_integer_null(Pesanan::EstimasiBudget))
                    .col(string(Pesanan::Status).not_null().default("menunggu_konfirmasi"))
                    .col(timestamp_with_time_zone(Pesanan::WaktuPesan).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Pesanan::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pesanan_id_user")
                            .from(Pesanan::Table, Pesanan::IdUser)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pesanan_id_mitra")
                            .from(Pesanan::Table, Pesanan::IdMitra)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Indexes for the per-user and per-mitra order listings
        manager
            .create_index(
                Index::create()
                    .name("idx_pesanan_id_user")
                    .table(Pesanan::Table)
                    .col(Pesanan::IdUser)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pesanan_id_mitra")
                    .table(Pesanan::Table)
                    .col(Pesanan::IdMitra)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pesanan::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Pesanan {
    Table,
    Id,
    IdUser,
    IdMitra,
    JenisLayanan,
    Deskripsi,
    Alamat,
    WaktuDiinginkan,
    EstimasiBudget,
    Status,
    WaktuPesan,
    CreatedAt,
}
