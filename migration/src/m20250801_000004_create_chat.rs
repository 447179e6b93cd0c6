//! Migration to create the chat table (append-only message log per order)

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250801_000001_create_users::Users;
use crate::m20250801_000002_create_pesanan::Pesanan;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chat::Table)
                    .if_not_exists()
                    .col(pk_auto(Chat::Id))
                    .col(integer(Chat::IdPesanan).not_null())
                    .col(integer(Chat::IdPengirim).not_null())
                    .col(text(Chat::Pesan).not_null())
                    .col(timestamp_with_time_zone(Chat::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_id_pesanan")
                            .from(Chat::Table, Chat::IdPesanan)
                            .to(Pesanan::Table, Pesanan::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_id_pengirim")
                            .from(Chat::Table, Chat::IdPengirim)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chat_id_pesanan")
                    .table(Chat::Table)
                    .col(Chat::IdPesanan)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chat::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Chat {
    Table,
    Id,
    IdPesanan,
    IdPengirim,
    Pesan,
    CreatedAt,
}
