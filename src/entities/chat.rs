//! SeaORM entity for the chat table (append-only per-order message log)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chat")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub id_pesanan: i32,
    pub id_pengirim: i32,
    pub pesan: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pesanan::Entity",
        from = "Column::IdPesanan",
        to = "super::pesanan::Column::Id"
    )]
    Pesanan,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::IdPengirim",
        to = "super::users::Column::Id"
    )]
    Pengirim,
}

impl Related<super::pesanan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pesanan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
