use crate::domain::models::{member::Member, transaction::Transaction};
use serde::Serialize;

/// Result of a ledger operation: the member after the mutation plus the
/// transaction that justifies it.
#[derive(Serialize)]
pub struct LedgerResponse {
    pub vip: Member,
    pub transaction: Transaction,
}

#[derive(Serialize)]
pub struct VipDetailResponse {
    #[serde(flatten)]
    pub vip: Member,
    pub history: Vec<Transaction>,
}

#[derive(Serialize)]
pub struct TransactionReport {
    pub transactions: Vec<Transaction>,
    pub summary: serde_json::Value,
}

#[derive(Serialize)]
pub struct MemberTotal {
    pub member_id: String,
    pub name: String,
    pub phone: String,
    pub total_amount: f64,
    pub count: usize,
}

#[derive(Serialize)]
pub struct TechnicianTotal {
    pub technician_id: String,
    pub name: String,
    pub code: String,
    pub total_amount: f64,
    pub count: usize,
}

#[derive(Serialize)]
pub struct ProjectTotal {
    pub project_id: String,
    pub name: String,
    pub total_quantity: i64,
    pub total_amount: f64,
}
