use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr, TransactionTrait,
};

use crate::AppState;
use crate::entities::{prelude::*, users};
use crate::error::ApiError;
use crate::models::user::{
    AdminLoginRequest, AdminLoginResponse, AdminUser, LoginRequest, LoginResponse,
    RegisterRequest, RegisterResponse, Role, UserPublic, VerificationStatus,
};

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let role = Role::parse(&payload.role)?;
    if payload.email.trim().is_empty()
        || payload.password.trim().is_empty()
        || payload.nama_lengkap.trim().is_empty()
    {
        return Err(ApiError::Validation(
            "Email, password, dan nama lengkap wajib diisi".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;

    // Check-then-insert runs in one transaction; the unique index on email
    // backstops concurrent registrations.
    let txn = state.db.begin().await?;

    let existing = Users::find()
        .filter(users::Column::Email.eq(&payload.email))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(ApiError::DuplicateEmail);
    }

    let status_verifikasi = match role {
        Role::Mitra => Some(VerificationStatus::MenungguVerifikasi.as_str().to_string()),
        _ => None,
    };

    let now = Utc::now();
    let new_user = users::ActiveModel {
        email: Set(payload.email),
        password: Set(password_hash),
        nama_lengkap: Set(payload.nama_lengkap),
        role: Set(role.as_str().to_string()),
        status_verifikasi: Set(status_verifikasi),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = new_user
        .insert(&txn)
        .await
        .map_err(map_unique_email_violation)?;
    txn.commit().await?;

    tracing::info!(user_id = result.id, role = role.as_str(), "account registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Pendaftaran berhasil".to_string(),
            user_id: result.id,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = Users::find()
        .filter(users::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&payload.password, &user.password) {
        return Err(ApiError::InvalidCredentials);
    }

    if user.role == Role::Mitra.as_str()
        && user.status_verifikasi.as_deref() != Some(VerificationStatus::Terverifikasi.as_str())
    {
        return Err(ApiError::NotVerified);
    }

    Ok(Json(LoginResponse {
        message: "Login berhasil".to_string(),
        user: UserPublic::from(user),
    }))
}

/// Legacy admin-code login. Disabled unless `SMARTCARE_ADMIN_CODE` is set;
/// every successful use is logged.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, ApiError> {
    let expected = state.admin_code.as_ref().ok_or(ApiError::InvalidAdminCode)?;
    if &payload.code != expected {
        return Err(ApiError::InvalidAdminCode);
    }

    tracing::warn!("legacy admin code login used");

    Ok(Json(AdminLoginResponse {
        message: "Admin login berhasil".to_string(),
        user: AdminUser {
            id: "admin".to_string(),
            email: "admin@smartcare.com".to_string(),
            nama_lengkap: "Administrator".to_string(),
            role: Role::Admin.as_str().to_string(),
            status_verifikasi: VerificationStatus::Terverifikasi.as_str().to_string(),
        },
    }))
}

/// The unique index on email backstops registrations that race past the
/// pre-insert check; both paths surface the same wire error.
fn map_unique_email_violation(e: DbErr) -> ApiError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ApiError::DuplicateEmail,
        _ => ApiError::Database(e),
    }
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))
}

/// An unparseable stored hash counts as a mismatch so login failures stay
/// indistinguishable from a wrong password.
fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
