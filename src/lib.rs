// src/lib.rs

use axum::{
    Router,
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Legacy admin-code login is only enabled when this is set
    /// (SMARTCARE_ADMIN_CODE); see handlers::auth::admin_login.
    pub admin_code: Option<String>,
}

pub mod entities {
    pub mod prelude;
    pub mod chat;
    pub mod pesanan;
    pub mod saldo;
    pub mod users;
}

pub mod models {
    pub mod chat;
    pub mod common;
    pub mod pesanan;
    pub mod saldo;
    pub mod user;
}

pub mod handlers {
    pub mod auth;
    pub mod chat;
    pub mod health;
    pub mod pesanan;
    pub mod saldo;
    pub mod users;
}

pub mod error;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/register", post(handlers::auth::register))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/admin/login", post(handlers::auth::admin_login))
        .route("/api/users", get(handlers::users::list_users))
        .route("/api/users/{id}/verify", put(handlers::users::verify_user))
        .route("/api/mitra/unverified", get(handlers::users::list_unverified_mitra))
        .route("/api/mitra/verified", get(handlers::users::list_verified_mitra))
        .route(
            "/api/pesanan",
            get(handlers::pesanan::list_pesanan).post(handlers::pesanan::create_pesanan),
        )
        .route("/api/pesanan/user/{id}", get(handlers::pesanan::list_pesanan_by_user))
        .route("/api/pesanan/mitra/{id}", get(handlers::pesanan::list_pesanan_by_mitra))
        .route("/api/pesanan/{id}/status", put(handlers::pesanan::update_pesanan_status))
        .route(
            "/api/saldo",
            get(handlers::saldo::list_saldo).post(handlers::saldo::add_saldo),
        )
        .route("/api/saldo/balance/{id}", get(handlers::saldo::get_balance))
        .route(
            "/api/chat",
            get(handlers::chat::list_chat).post(handlers::chat::send_chat),
        )
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
