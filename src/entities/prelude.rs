pub use super::chat::Entity as Chat;
pub use super::pesanan::Entity as Pesanan;
pub use super::saldo::Entity as Saldo;
pub use super::users::Entity as Users;
