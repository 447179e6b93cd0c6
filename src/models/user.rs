use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::users;
use crate::error::ApiError;

/// Account roles. Stored as strings in the users table, parsed at the API
/// boundary so unknown roles are rejected at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Mitra,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Mitra => "mitra",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ApiError> {
        match value {
            "user" => Ok(Role::User),
            "mitra" => Ok(Role::Mitra),
            "admin" => Ok(Role::Admin),
            other => Err(ApiError::Validation(format!("Role '{}' tidak dikenal", other))),
        }
    }
}

/// Admin-controlled approval state for mitra accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    MenungguVerifikasi,
    Terverifikasi,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::MenungguVerifikasi => "menunggu_verifikasi",
            VerificationStatus::Terverifikasi => "terverifikasi",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ApiError> {
        match value {
            "menunggu_verifikasi" => Ok(VerificationStatus::MenungguVerifikasi),
            "terverifikasi" => Ok(VerificationStatus::Terverifikasi),
            other => Err(ApiError::Validation(format!(
                "Status verifikasi '{}' tidak dikenal",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub nama_lengkap: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public projection of an account. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: i32,
    pub email: String,
    pub nama_lengkap: String,
    pub role: String,
    pub status_verifikasi: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for UserPublic {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nama_lengkap: user.nama_lengkap,
            role: user.role,
            status_verifikasi: user.status_verifikasi,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserPublic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub code: String,
}

/// Synthetic admin identity returned by the legacy code login. Not backed by
/// a users row, hence the string id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub nama_lengkap: String,
    pub role: String,
    pub status_verifikasi: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub message: String,
    pub user: AdminUser,
}
