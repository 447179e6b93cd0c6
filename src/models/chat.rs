use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::PartyInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendChatRequest {
    pub id_pesanan: i32,
    pub id_pengirim: i32,
    pub pesan: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendChatResponse {
    pub message: String,
    pub chat_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatListParams {
    pub pesanan_id: Option<i32>,
}

/// Chat message joined with the sender, ordered by timestamp ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i32,
    pub id_pesanan: i32,
    pub id_pengirim: i32,
    pub pesan: String,
    pub created_at: DateTime<Utc>,
    pub pengirim: PartyInfo,
}
