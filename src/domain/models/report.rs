use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Manually entered daily revenue figures, one row per store per day.
/// Hours and revenue are tracked per payment channel.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct DailyReport {
    pub id: String,
    pub store_id: String,
    pub report_date: NaiveDate,
    pub douyin_hours: f64,
    pub douyin_revenue: f64,
    pub meituan_hours: f64,
    pub meituan_revenue: f64,
    pub cash_hours: f64,
    pub cash_revenue: f64,
    pub pos_hours: f64,
    pub pos_revenue: f64,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyReport {
    pub fn new(store_id: String, report_date: NaiveDate, created_by: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            store_id,
            report_date,
            douyin_hours: 0.0,
            douyin_revenue: 0.0,
            meituan_hours: 0.0,
            meituan_revenue: 0.0,
            cash_hours: 0.0,
            cash_revenue: 0.0,
            pos_hours: 0.0,
            pos_revenue: 0.0,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}
