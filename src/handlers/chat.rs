use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, Set};

use crate::AppState;
use crate::entities::{chat, prelude::*, users};
use crate::error::ApiError;
use crate::models::chat::{ChatListParams, ChatMessage, SendChatRequest, SendChatResponse};
use crate::models::common::{DataResponse, PartyInfo};

pub async fn list_chat(
    State(state): State<AppState>,
    Query(params): Query<ChatListParams>,
) -> Result<Json<DataResponse<Vec<ChatMessage>>>, ApiError> {
    let mut query = Chat::find().order_by(chat::Column::CreatedAt, Order::Asc);
    if let Some(pesanan_id) = params.pesanan_id {
        query = query.filter(chat::Column::IdPesanan.eq(pesanan_id));
    }
    let messages = query.all(&state.db).await?;

    let mut ids: Vec<i32> = messages.iter().map(|m| m.id_pengirim).collect();
    ids.sort_unstable();
    ids.dedup();

    let senders: HashMap<i32, users::Model> = if ids.is_empty() {
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

    let mut data = Vec::with_capacity(messages.len());
    for message in &messages {
        let pengirim = senders
            .get(&message.id_pengirim)
            .map(PartyInfo::from)
            .ok_or_else(|| {
                ApiError::Internal(format!("referenced account {} missing", message.id_pengirim))
            })?;
        data.push(ChatMessage {
            id: message.id,
            id_pesanan: message.id_pesanan,
            id_pengirim: message.id_pengirim,
            pesan: message.pesan.clone(),
            created_at: message.created_at,
            pengirim,
        });
    }

    Ok(Json(DataResponse { data }))
}

pub async fn send_chat(
    State(state): State<AppState>,
    Json(payload): Json<SendChatRequest>,
) -> Result<(StatusCode, Json<SendChatResponse>), ApiError> {
    if payload.pesan.trim().is_empty() {
        return Err(ApiError::Validation("Pesan tidak boleh kosong".to_string()));
    }

    Pesanan::find_by_id(payload.id_pesanan)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Pesanan"))?;
    Users::find_by_id(payload.id_pengirim)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    // Timestamp is server-assigned; clients cannot reorder the log.
    let new_message = chat::ActiveModel {
        id_pesanan: Set(payload.id_pesanan),
        id_pengirim: Set(payload.id_pengirim),
        pesan: Set(payload.pesan),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = new_message.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(SendChatResponse {
            message: "Pesan berhasil dikirim".to_string(),
            chat_id: result.id,
        }),
    ))
}
