use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A store account. One row per tenant; every member, project, technician
/// and transaction is scoped to its store.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Store {
    pub id: String,
    pub store_name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Store {
    pub fn new(store_name: String, username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            store_name,
            username,
            password_hash,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }
}
