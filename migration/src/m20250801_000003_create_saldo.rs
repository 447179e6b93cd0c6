//! Migration to create the saldo table (append-only balance ledger per account)

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
                    .table(Saldo::Table)
                    .if_not_exists()
                    .col(pk_auto(Saldo::Id))
                    .col(integer(Saldo::IdUser).not_null())
                    .col(big_integer(Saldo::Jumlah).not_null())
                    .col(string(Saldo::JenisTransaksi).not_null())
                    .col(string_null(Saldo::Deskripsi))
                    .col(timestamp_with_time_zone(Saldo::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saldo_id_user")
                            .from(Saldo::Table, Saldo::IdUser)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_saldo_id_user")
                    .table(Saldo::Table)
                    .col(Saldo::IdUser)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Saldo::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Saldo {
    Table,
    Id,
    IdUser,
    Jumlah,
    JenisTransaksi,
    Deskripsi,
    CreatedAt,
}
