//! SeaORM entity for the pesanan table (service orders)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pesanan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub id_user: i32,
    pub id_mitra: i32,
    pub jenis_layanan: String,
    pub deskripsi: String,
    pub alamat: String,
    pub waktu_diinginkan: DateTimeUtc,
    pub estimasi_budget: Option<i64>,
    pub status: String,
    pub waktu_pesan: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::IdUser",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::IdMitra",
        to = "super::users::Column::Id"
    )]
    Mitra,
}

impl ActiveModelBehavior for ActiveModel {}
