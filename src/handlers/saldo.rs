use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::AppState;
use crate::entities::{prelude::*, saldo, users};
use crate::error::ApiError;
use crate::models::common::{DataResponse, PartyInfo};
use crate::models::saldo::{
    AddSaldoRequest, AddSaldoResponse, BalanceData, SaldoEntry, SaldoListParams,
};

pub async fn list_saldo(
    State(state): State<AppState>,
    Query(params): Query<SaldoListParams>,
) -> Result<Json<DataResponse<Vec<SaldoEntry>>>, ApiError> {
    let mut query = Saldo::find();
    if let Some(user_id) = params.user_id {
        query = query.filter(saldo::Column::IdUser.eq(user_id));
    }
    let entries = query.all(&state.db).await?;

    let mut ids: Vec<i32> = entries.iter().map(|e| e.id_user).collect();
    ids.sort_unstable();
    ids.dedup();

    let owners: HashMap<i32, users::Model> = if ids.is_empty() {
        HashMap::new()
    } else {
        Users::find()
            .filter(users::Column::Id.is_in(ids))
            .all(&state.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect()
    };

    let mut data = Vec::with_capacity(entries.len());
    for entry in &entries {
        let user = owners
            .get(&entry.id_user)
            .map(PartyInfo::from)
            .ok_or_else(|| {
                ApiError::Internal(format!("referenced account {} missing", entry.id_user))
            })?;
        data.push(SaldoEntry {
            id: entry.id,
            id_user: entry.id_user,
            jumlah: entry.jumlah,
            jenis_transaksi: entry.jenis_transaksi.clone(),
            deskripsi: entry.deskripsi.clone(),
            created_at: entry.created_at,
            user,
        });
    }

    Ok(Json(DataResponse { data }))
}

pub async fn add_saldo(
    State(state): State<AppState>,
    Json(payload): Json<AddSaldoRequest>,
) -> Result<(StatusCode, Json<AddSaldoResponse>), ApiError> {
    if payload.jenis_transaksi.trim().is_empty() {
        return Err(ApiError::Validation(
            "Jenis transaksi wajib diisi".to_string(),
        ));
    }

    Users::find_by_id(payload.id_user)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let new_entry = saldo::ActiveModel {
        id_user: Set(payload.id_user),
        jumlah: Set(payload.jumlah),
        jenis_transaksi: Set(payload.jenis_transaksi),
        deskripsi: Set(payload.deskripsi),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = new_entry.insert(&state.db).await?;

    tracing::info!(
        saldo_id = result.id,
        id_user = result.id_user,
        jumlah = result.jumlah,
        "ledger entry recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(AddSaldoResponse {
            message: "Saldo berhasil ditambahkan".to_string(),
            saldo_id: result.id,
        }),
    ))
}

/// Derived balance for one account: the sum of its signed ledger entries.
pub async fn get_balance(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<DataResponse<BalanceData>>, ApiError> {
    Users::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let entries = Saldo::find()
        .filter(saldo::Column::IdUser.eq(user_id))
        .all(&state.db)
        .await?;

    let total: i64 = entries.iter().map(|e| e.jumlah).sum();

    Ok(Json(DataResponse {
        data: BalanceData {
            id_user: user_id,
            saldo: total,
        },
    }))
}
