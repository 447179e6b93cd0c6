use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};

use crate::AppState;
use crate::entities::{pesanan, prelude::*, users};
use crate::error::ApiError;
use crate::models::common::{DataResponse, MessageResponse, PartyInfo};
use crate::models::pesanan::{
    CreatePesananRequest, CreatePesananResponse, OrderStatus, PesananDetail, PesananSummary,
    UpdateStatusRequest,
};
use crate::models::user::Role;

pub async fn create_pesanan(
    State(state): State<AppState>,
    Json(payload): Json<CreatePesananRequest>,
) -> Result<(StatusCode, Json<CreatePesananResponse>), ApiError> {
    let waktu_diinginkan = parse_waktu(&payload.waktu_diinginkan)?;

    if payload.id_user == payload.id_mitra {
        return Err(ApiError::Validation(
            "Pemesan dan mitra tidak boleh sama".to_string(),
        ));
    }

    let txn = state.db.begin().await?;

    let requester = Users::find_by_id(payload.id_user)
        .one(&txn)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    let provider = Users::find_by_id(payload.id_mitra)
        .one(&txn)
        .await?
        .ok_or(ApiError::NotFound("Mitra"))?;

    if provider.role != Role::Mitra.as_str() {
        return Err(ApiError::Validation(format!(
            "Akun {} bukan mitra",
            provider.id
        )));
    }

    let now = Utc::now();
    let new_pesanan = pesanan::ActiveModel {
        id_user: Set(requester.id),
        id_mitra: Set(provider.id),
        jenis_layanan: Set(payload.jenis_layanan),
        deskripsi: Set(payload.deskripsi),
        alamat: Set(payload.alamat),
        waktu_diinginkan: Set(waktu_diinginkan),
        estimasi_budget: Set(payload.estimasi_budget),
        status: Set(OrderStatus::MenungguKonfirmasi.as_str().to_string()),
        waktu_pesan: Set(now),
        created_at: Set(now),
        ..Default::default()
    };

    let result = new_pesanan.insert(&txn).await?;
    txn.commit().await?;

    tracing::info!(pesanan_id = result.id, id_user = result.id_user, "order created");

    Ok((
        StatusCode::CREATED,
        Json(CreatePesananResponse {
            message: "Pesanan berhasil dibuat".to_string(),
            pesanan_id: result.id,
        }),
    ))
}

pub async fn list_pesanan(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<PesananDetail>>>, ApiError> {
    let orders = Pesanan::find().all(&state.db).await?;
    let parties = load_parties(&state, &orders).await?;

    let mut data = Vec::with_capacity(orders.len());
    for order in &orders {
        data.push(PesananDetail {
            id: order.id,
            id_user: order.id_user,
            id_mitra: order.id_mitra,
            jenis_layanan: order.jenis_layanan.clone(),
            deskripsi: order.deskripsi.clone(),
            alamat: order.alamat.clone(),
            waktu_diinginkan: order.waktu_diinginkan,
            estimasi_budget: order.estimasi_budget,
            status: order.status.clone(),
            waktu_pesan: order.waktu_pesan,
            user: party(&parties, order.id_user)?,
            mitra: party(&parties, order.id_mitra)?,
        });
    }

    Ok(Json(DataResponse { data }))
}

pub async fn list_pesanan_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<DataResponse<Vec<PesananSummary>>>, ApiError> {
    let orders = Pesanan::find()
        .filter(pesanan::Column::IdUser.eq(user_id))
        .order_by(pesanan::Column::WaktuPesan, Order::Desc)
        .all(&state.db)
        .await?;
    let parties = load_parties(&state, &orders).await?;

    let mut data = Vec::with_capacity(orders.len());
    for order in &orders {
        let mut summary = PesananSummary::new(order);
        summary.mitra = Some(party(&parties, order.id_mitra)?);
        data.push(summary);
    }

    Ok(Json(DataResponse { data }))
}

pub async fn list_pesanan_by_mitra(
    State(state): State<AppState>,
    Path(mitra_id): Path<i32>,
) -> Result<Json<DataResponse<Vec<PesananSummary>>>, ApiError> {
    let orders = Pesanan::find()
        .filter(pesanan::Column::IdMitra.eq(mitra_id))
        .order_by(pesanan::Column::WaktuPesan, Order::Desc)
        .all(&state.db)
        .await?;
    let parties = load_parties(&state, &orders).await?;

    let mut data = Vec::with_capacity(orders.len());
    for order in &orders {
        let mut summary = PesananSummary::new(order);
        summary.user = Some(party(&parties, order.id_user)?);
        data.push(summary);
    }

    Ok(Json(DataResponse { data }))
}

pub async fn update_pesanan_status(
    State(state): State<AppState>,
    Path(pesanan_id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let next = OrderStatus::parse(&payload.status)?;

    let order = Pesanan::find_by_id(pesanan_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Pesanan"))?;

    // The store only ever holds values from the closed set; anything else is
    // data corruption, not client error.
    let current = OrderStatus::parse(&order.status)
        .map_err(|_| ApiError::Internal(format!("unknown stored status '{}'", order.status)))?;

    if !current.can_transition_to(next) {
        return Err(ApiError::IllegalTransition {
            from: current.as_str().to_string(),
            to: next.as_str().to_string(),
        });
    }

    // Conditional write: the row must still hold the status the check saw.
    // A concurrent writer that advanced the order in between leaves
    // rows_affected at zero, and the stale transition is rejected instead of
    // clobbering the newer state.
    let result = Pesanan::update_many()
        .col_expr(pesanan::Column::Status, Expr::value(next.as_str()))
        .filter(pesanan::Column::Id.eq(pesanan_id))
        .filter(pesanan::Column::Status.eq(current.as_str()))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(ApiError::IllegalTransition {
            from: current.as_str().to_string(),
            to: next.as_str().to_string(),
        });
    }

    tracing::info!(pesanan_id, status = next.as_str(), "order status updated");

    Ok(Json(MessageResponse {
        message: "Status pesanan berhasil diupdate".to_string(),
    }))
}

fn parse_waktu(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            ApiError::Validation(format!("Format waktu_diinginkan tidak valid: '{}'", raw))
        })
}

/// Loads every account referenced by the given orders in one query.
async fn load_parties(
    state: &AppState,
    orders: &[pesanan::Model],
) -> Result<HashMap<i32, users::Model>, ApiError> {
    let mut ids: Vec<i32> = orders
        .iter()
        .flat_map(|o| [o.id_user, o.id_mitra])
        .collect();
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let accounts = Users::find()
        .filter(users::Column::Id.is_in(ids))
        .all(&state.db)
        .await?;

    Ok(accounts.into_iter().map(|u| (u.id, u)).collect())
}

fn party(parties: &HashMap<i32, users::Model>, id: i32) -> Result<PartyInfo, ApiError> {
    parties
        .get(&id)
        .map(PartyInfo::from)
        .ok_or_else(|| ApiError::Internal(format!("referenced account {} missing", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_waktu_accepts_utc_suffix() {
        let dt = parse_waktu("2025-01-01T10:00:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-01-01T10:00:00+00:00");
    }

    #[test]
    fn test_parse_waktu_accepts_offset() {
        let dt = parse_waktu("2025-01-01T17:00:00+07:00").unwrap();
        assert_eq!(dt, parse_waktu("2025-01-01T10:00:00Z").unwrap());
    }

    #[test]
    fn test_parse_waktu_rejects_garbage() {
        assert!(parse_waktu("besok siang").is_err());
        assert!(parse_waktu("2025-01-01").is_err());
    }
}
