use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::pesanan;
use crate::error::ApiError;
use crate::models::common::PartyInfo;

/// Order lifecycle. The store keeps the status as a string, but the API only
/// ever writes values from this closed set and only along the forward chain
/// menunggu_konfirmasi -> dikonfirmasi -> selesai.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    MenungguKonfirmasi,
    Dikonfirmasi,
    Selesai,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::MenungguKonfirmasi => "menunggu_konfirmasi",
            OrderStatus::Dikonfirmasi => "dikonfirmasi",
            OrderStatus::Selesai => "selesai",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ApiError> {
        match value {
            "menunggu_konfirmasi" => Ok(OrderStatus::MenungguKonfirmasi),
            "dikonfirmasi" => Ok(OrderStatus::Dikonfirmasi),
            "selesai" => Ok(OrderStatus::Selesai),
            other => Err(ApiError::Validation(format!(
                "Status pesanan '{}' tidak dikenal",
                other
            ))),
        }
    }

    /// Transition table: one step forward, no skips, no backward moves.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::MenungguKonfirmasi, OrderStatus::Dikonfirmasi)
                | (OrderStatus::Dikonfirmasi, OrderStatus::Selesai)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePesananRequest {
    pub id_user: i32,
    pub id_mitra: i32,
    pub jenis_layanan: String,
    pub deskripsi: String,
    pub alamat: String,
    pub waktu_diinginkan: String,
    pub estimasi_budget: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePesananResponse {
    pub message: String,
    pub pesanan_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Full order projection joined with both parties, used by the admin listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PesananDetail {
    pub id: i32,
    pub id_user: i32,
    pub id_mitra: i32,
    pub jenis_layanan: String,
    pub deskripsi: String,
    pub alamat: String,
    pub waktu_diinginkan: DateTime<Utc>,
    pub estimasi_budget: Option<i64>,
    pub status: String,
    pub waktu_pesan: DateTime<Utc>,
    pub user: PartyInfo,
    pub mitra: PartyInfo,
}

/// Order projection joined with the counterparty only, used by the
/// per-user and per-mitra listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PesananSummary {
    pub id: i32,
    pub jenis_layanan: String,
    pub deskripsi: String,
    pub alamat: String,
    pub waktu_diinginkan: DateTime<Utc>,
    pub estimasi_budget: Option<i64>,
    pub status: String,
    pub waktu_pesan: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PartyInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mitra: Option<PartyInfo>,
}

impl PesananSummary {
    pub fn new(order: &pesanan::Model) -> Self {
        Self {
            id: order.id,
            jenis_layanan: order.jenis_layanan.clone(),
            deskripsi: order.deskripsi.clone(),
            alamat: order.alamat.clone(),
            waktu_diinginkan: order.waktu_diinginkan,
            estimasi_budget: order.estimasi_budget,
            status: order.status.clone(),
            waktu_pesan: order.waktu_pesan,
            user: None,
            mitra: None,
        }
    }
}
