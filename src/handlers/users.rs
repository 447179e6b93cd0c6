use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::AppState;
use crate::entities::{prelude::*, users};
use crate::error::ApiError;
use crate::models::common::{DataResponse, MessageResponse};
use crate::models::user::{Role, UserPublic, VerificationStatus, VerifyRequest};

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<UserPublic>>>, ApiError> {
    let accounts = Users::find().all(&state.db).await?;
    let data = accounts.into_iter().map(UserPublic::from).collect();
    Ok(Json(DataResponse { data }))
}

/// Overwrites a user's verification status. The `status` field is optional;
/// without it the status is set to `terverifikasi` (the admin approval action).
pub async fn verify_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(payload): Json<VerifyRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let status = match payload.status.as_deref() {
        Some(raw) => VerificationStatus::parse(raw)?,
        None => VerificationStatus::Terverifikasi,
    };

    let user = Users::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let mut active: users::ActiveModel = user.into();
    active.status_verifikasi = Set(Some(status.as_str().to_string()));
    active.updated_at = Set(Utc::now());
    active.update(&state.db).await?;

    tracing::info!(user_id, status = status.as_str(), "verification status updated");

    Ok(Json(MessageResponse {
        message: "Status verifikasi berhasil diupdate".to_string(),
    }))
}

pub async fn list_unverified_mitra(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<UserPublic>>>, ApiError> {
    list_mitra_by_status(&state, VerificationStatus::MenungguVerifikasi).await
}

pub async fn list_verified_mitra(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<UserPublic>>>, ApiError> {
    list_mitra_by_status(&state, VerificationStatus::Terverifikasi).await
}

async fn list_mitra_by_status(
    state: &AppState,
    status: VerificationStatus,
) -> Result<Json<DataResponse<Vec<UserPublic>>>, ApiError> {
    let mitra = Users::find()
        .filter(users::Column::Role.eq(Role::Mitra.as_str()))
        .filter(users::Column::StatusVerifikasi.eq(status.as_str()))
        .all(&state.db)
        .await?;

    let data = mitra.into_iter().map(UserPublic::from).collect();
    Ok(Json(DataResponse { data }))
}
