use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::PartyInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSaldoRequest {
    pub id_user: i32,
    pub jumlah: i64,
    pub jenis_transaksi: String,
    pub deskripsi: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSaldoResponse {
    pub message: String,
    pub saldo_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaldoListParams {
    pub user_id: Option<i32>,
}

/// Ledger entry joined with the owning account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaldoEntry {
    pub id: i32,
    pub id_user: i32,
    pub jumlah: i64,
    pub jenis_transaksi: String,
    pub deskripsi: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user: PartyInfo,
}

/// Derived balance: sum of signed `jumlah` over one account's entries.
/// The ledger itself stays append-only; this is a read-side projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceData {
    pub id_user: i32,
    pub saldo: i64,
}
