pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_users;
mod m20250801_000002_create_pesanan;
mod m20250801_000003_create_saldo;
mod m20250801_000004_create_chat;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_users::Migration),
            Box::new(m20250801_000002_create_pesanan::Migration),
            Box::new(m20250801_000003_create_saldo::Migration),
            Box::new(m20250801_000004_create_chat::Migration),
        ]
    }
}
