use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A VIP member with a stored-value balance. The balance is mutated only
/// through the ledger; it never goes negative once committed.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Member {
    pub id: String,
    pub store_id: String,
    pub name: String,
    pub phone: String,
    pub balance: f64,
    /// Discount factor in [0.1, 1.0]; 1.0 means full price.
    pub discount: f64,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(store_id: String, name: String, phone: String, balance: f64, discount: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            store_id,
            name,
            phone,
            balance,
            discount,
            created_at: Utc::now(),
        }
    }
}
