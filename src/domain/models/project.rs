use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A service project from the store catalog. Deleting a project only
/// deactivates it, so historical transaction lines keep resolving.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Project {
    pub id: String,
    pub store_id: String,
    pub name: String,
    pub duration_min: i64,
    pub price: f64,
    pub notes: Option<String>,
    pub is_active: bool,
}

impl Project {
    pub fn new(
        store_id: String,
        name: String,
        duration_min: i64,
        price: f64,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            store_id,
            name,
            duration_min,
            price,
            notes,
            is_active: true,
        }
    }
}
