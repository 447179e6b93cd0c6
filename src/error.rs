//! Typed error taxonomy for the HTTP API.
//!
//! Every handler failure is one of these variants. The client always receives
//! a `{"error": <localized message>}` body with the mapped status code; the
//! underlying detail (database errors in particular) is only logged.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("email already registered")]
    DuplicateEmail,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("mitra account not verified")]
    NotVerified,

    #[error("invalid admin code")]
    InvalidAdminCode,

    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition { from: String, to: String },

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::DuplicateEmail => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::InvalidAdminCode => StatusCode::UNAUTHORIZED,
            ApiError::NotVerified => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::IllegalTransition { .. } => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Localized message sent to the client. Matches the wire contract of the
    /// original SmartCare API; never leaks internal detail.
    fn user_message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::DuplicateEmail => "Email sudah terdaftar".to_string(),
            ApiError::NotFound(resource) => format!("{} tidak ditemukan", resource),
            ApiError::InvalidCredentials => "Email atau password salah".to_string(),
            ApiError::NotVerified => "Akun Anda belum diverifikasi oleh Admin".to_string(),
            ApiError::InvalidAdminCode => "Kode admin salah".to_string(),
            ApiError::IllegalTransition { from, to } => {
                format!("Transisi status dari '{}' ke '{}' tidak diizinkan", from, to)
            }
            ApiError::Database(_) | ApiError::Internal(_) => {
                "Terjadi kesalahan pada server".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        (status, Json(ErrorResponse { error: self.user_message() })).into_response()
    }
}
