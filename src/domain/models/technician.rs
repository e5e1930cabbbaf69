use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Technician {
    pub id: String,
    pub store_id: String,
    pub name: String,
    /// Short staff code, unique within a store.
    pub code: String,
    pub is_active: bool,
}

impl Technician {
    pub fn new(store_id: String, name: String, code: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            store_id,
            name,
            code,
            is_active: true,
        }
    }
}
