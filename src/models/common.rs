use serde::{Deserialize, Serialize};

/// Success envelope carrying only a localized message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Success envelope carrying data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Counterparty annotation embedded in order, saldo and chat listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyInfo {
    pub nama_lengkap: String,
    pub email: String,
}

impl From<&crate::entities::users::Model> for PartyInfo {
    fn from(user: &crate::entities::users::Model) -> Self {
        Self {
            nama_lengkap: user.nama_lengkap.clone(),
            email: user.email.clone(),
        }
    }
}
