use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const KIND_MEMBER_CREATED: &str = "MEMBER_CREATED";
pub const KIND_RECHARGE: &str = "RECHARGE";
pub const KIND_CONSUME: &str = "CONSUME";

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_SENT: &str = "SENT";
pub const STATUS_FAILED: &str = "FAILED";

/// An outbound SMS waiting for the background dispatcher. Enqueued after a
/// committed ledger operation; delivery failures never reach the caller.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct NotificationJob {
    pub id: String,
    pub store_id: String,
    pub phone: String,
    pub kind: String,
    pub payload: sqlx::types::Json<serde_json::Value>,
    pub status: String,
    pub attempts: i64,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NotificationJob {
    pub fn new(store_id: String, phone: String, kind: &str, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            store_id,
            phone,
            kind: kind.to_string(),
            payload: sqlx::types::Json(payload),
            status: STATUS_PENDING.to_string(),
            attempts: 0,
            last_error: None,
            created_at: Utc::now(),
        }
    }
}
