use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TransactionKind {
    Recharge,
    Consume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum PaymentMethod {
    VipBalance,
    Cash,
    Pos,
    Douyin,
    Meituan,
    Other,
}

/// One itemized line of a consumption. The project price is resolved from
/// the catalog at transaction time and only its contribution to
/// `original_amount` is stored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProjectLine {
    pub project_id: String,
    pub quantity: i64,
}

/// An immutable record of one balance mutation. `amount` is always the sum
/// actually credited to or debited from the member balance in the same
/// operation; the breakdown fields are populated per kind.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Transaction {
    pub id: String,
    pub store_id: String,
    pub member_id: String,
    pub kind: TransactionKind,
    pub amount: f64,
    pub bonus_amount: Option<f64>,
    pub original_amount: Option<f64>,
    pub discounted_amount: Option<f64>,
    pub final_amount: Option<f64>,
    pub custom_amount: Option<f64>,
    /// Member discount snapshot taken at transaction time.
    pub discount: Option<f64>,
    pub projects: Option<Json<Vec<ProjectLine>>>,
    pub technician_id: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub note: Option<String>,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn recharge(
        store_id: String,
        member_id: String,
        total: f64,
        bonus_amount: f64,
        technician_id: Option<String>,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            store_id,
            member_id,
            kind: TransactionKind::Recharge,
            amount: total,
            bonus_amount: Some(bonus_amount),
            original_amount: None,
            discounted_amount: None,
            final_amount: None,
            custom_amount: None,
            discount: None,
            projects: None,
            technician_id,
            payment_method: None,
            note,
            date: Utc::now(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn consume(
        store_id: String,
        member_id: String,
        total: f64,
        breakdown: ConsumeBreakdown,
        projects: Vec<ProjectLine>,
        technician_id: Option<String>,
        payment_method: PaymentMethod,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            store_id,
            member_id,
            kind: TransactionKind::Consume,
            amount: total,
            bonus_amount: None,
            original_amount: Some(breakdown.original),
            discounted_amount: Some(breakdown.discounted),
            final_amount: Some(breakdown.final_amount),
            custom_amount: Some(breakdown.custom),
            discount: Some(breakdown.discount),
            projects: if projects.is_empty() {
                None
            } else {
                Some(Json(projects))
            },
            technician_id,
            payment_method: Some(payment_method),
            note,
            date: Utc::now(),
        }
    }
}

/// Computed amounts of a consumption, before the debit is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumeBreakdown {
    pub original: f64,
    pub discounted: f64,
    pub final_amount: f64,
    pub custom: f64,
    pub discount: f64,
}

/// Filters for the transaction report listing. `end_date` is an exclusive
/// upper bound, midnight after the last requested day.
#[derive(Debug, Default, Clone)]
pub struct TransactionFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub kind: Option<TransactionKind>,
    pub member_id: Option<String>,
    pub technician_id: Option<String>,
}
