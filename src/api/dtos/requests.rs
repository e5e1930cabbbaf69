use crate::domain::models::transaction::PaymentMethod;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub store_name: String,
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateVipRequest {
    pub name: String,
    pub phone: String,
    pub balance: Option<f64>,
    pub discount: Option<f64>,
    pub technician_id: Option<String>,
    pub note: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateVipRequest {
    pub name: String,
    pub phone: String,
    pub discount: Option<f64>,
}

#[derive(Deserialize)]
pub struct RechargeRequestBody {
    pub amount: f64,
    #[serde(default)]
    pub bonus_amount: f64,
    pub technician_id: Option<String>,
    pub note: Option<String>,
}

#[derive(Deserialize)]
pub struct ConsumeLineBody {
    #[serde(alias = "project")]
    pub project_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Deserialize)]
pub struct ConsumeRequestBody {
    /// Itemized mode when present and non-empty; flat-amount mode otherwise.
    pub projects: Option<Vec<ConsumeLineBody>>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub custom_amount: f64,
    pub payment_method: Option<PaymentMethod>,
    pub technician_id: Option<String>,
    pub note: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub duration_min: i64,
    pub price: f64,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub duration_min: Option<i64>,
    pub price: Option<f64>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateTechnicianRequest {
    pub name: String,
    pub code: String,
}

#[derive(Deserialize)]
pub struct UpdateTechnicianRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct ChannelFiguresBody {
    #[serde(default)]
    pub hours: f64,
    #[serde(default)]
    pub revenue: f64,
}

#[derive(Deserialize)]
pub struct UpsertDailyReportRequest {
    /// Calendar day the report is for, `YYYY-MM-DD`.
    pub date: chrono::NaiveDate,
    pub douyin: Option<ChannelFiguresBody>,
    pub meituan: Option<ChannelFiguresBody>,
    pub cash: Option<ChannelFiguresBody>,
    pub pos: Option<ChannelFiguresBody>,
}

#[derive(Deserialize)]
pub struct TransactionQuery {
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub kind: Option<crate::domain::models::transaction::TransactionKind>,
    pub vip_id: Option<String>,
    pub technician_id: Option<String>,
}

#[derive(Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

#[derive(Deserialize)]
pub struct ConsumptionReportQuery {
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub technician_id: Option<String>,
}

#[derive(Deserialize)]
pub struct PlatformSummaryQuery {
    pub platform: String,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}
