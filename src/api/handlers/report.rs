use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::dtos::requests::{
    ConsumptionReportQuery, DateRangeQuery, PlatformSummaryQuery, TransactionQuery,
    UpsertDailyReportRequest,
};
use crate::api::dtos::responses::{MemberTotal, ProjectTotal, TechnicianTotal, TransactionReport};
use crate::api::extractors::auth::CurrentStore;
use crate::domain::models::report::DailyReport;
use crate::domain::models::transaction::{TransactionFilter, TransactionKind};
use crate::error::AppError;
use crate::state::AppState;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde_json::json;

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Midnight after the requested day, paired with a strict comparison in the
/// repository so the whole last day counts.
fn day_end(date: NaiveDate) -> DateTime<Utc> {
    date.checked_add_days(Days::new(1))
        .unwrap_or(date)
        .and_time(NaiveTime::MIN)
        .and_utc()
}

fn range_filter(start: Option<NaiveDate>, end: Option<NaiveDate>) -> TransactionFilter {
    TransactionFilter {
        start_date: start.map(day_start),
        end_date: end.map(day_end),
        ..Default::default()
    }
}

pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Query(query): Query<TransactionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = TransactionFilter {
        start_date: query.start_date.map(day_start),
        end_date: query.end_date.map(day_end),
        kind: query.kind,
        member_id: query.vip_id,
        technician_id: query.technician_id,
    };

    let transactions = state.transaction_repo.list_filtered(&store.id, &filter).await?;
    Ok(Json(transactions))
}

pub async fn recharge_report(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut filter = range_filter(query.start_date, query.end_date);
    filter.kind = Some(TransactionKind::Recharge);

    let transactions = state.transaction_repo.list_filtered(&store.id, &filter).await?;
    let members = state.member_repo.list_by_store(&store.id).await?;
    let member_names: HashMap<&str, (&str, &str)> = members
        .iter()
        .map(|m| (m.id.as_str(), (m.name.as_str(), m.phone.as_str())))
        .collect();

    let total_amount: f64 = transactions.iter().map(|t| t.amount).sum();

    let mut per_member: HashMap<String, MemberTotal> = HashMap::new();
    for t in &transactions {
        let entry = per_member
            .entry(t.member_id.clone())
            .or_insert_with(|| {
                let (name, phone) = member_names
                    .get(t.member_id.as_str())
                    .copied()
                    .unwrap_or(("", ""));
                MemberTotal {
                    member_id: t.member_id.clone(),
                    name: name.to_string(),
                    phone: phone.to_string(),
                    total_amount: 0.0,
                    count: 0,
                }
            });
        entry.total_amount += t.amount;
        entry.count += 1;
    }

    let total_count = transactions.len();
    Ok(Json(TransactionReport {
        transactions,
        summary: json!({
            "total_amount": total_amount,
            "total_count": total_count,
            "vip_summary": per_member.into_values().collect::<Vec<_>>(),
        }),
    }))
}

pub async fn consumption_report(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Query(query): Query<ConsumptionReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut filter = range_filter(query.start_date, query.end_date);
    filter.kind = Some(TransactionKind::Consume);
    filter.technician_id = query.technician_id;

    let transactions = state.transaction_repo.list_filtered(&store.id, &filter).await?;
    let technicians = state.technician_repo.list_all(&store.id).await?;
    let projects = state.project_repo.list_all(&store.id).await?;

    let technician_names: HashMap<&str, (&str, &str)> = technicians
        .iter()
        .map(|t| (t.id.as_str(), (t.name.as_str(), t.code.as_str())))
        .collect();
    let project_info: HashMap<&str, (&str, f64)> = projects
        .iter()
        .map(|p| (p.id.as_str(), (p.name.as_str(), p.price)))
        .collect();

    let total_amount: f64 = transactions.iter().map(|t| t.amount).sum();

    let mut per_technician: HashMap<String, TechnicianTotal> = HashMap::new();
    let mut per_project: HashMap<String, ProjectTotal> = HashMap::new();
    for t in &transactions {
        if let Some(tech_id) = &t.technician_id {
            let entry = per_technician.entry(tech_id.clone()).or_insert_with(|| {
                let (name, code) = technician_names
                    .get(tech_id.as_str())
                    .copied()
                    .unwrap_or(("", ""));
                TechnicianTotal {
                    technician_id: tech_id.clone(),
                    name: name.to_string(),
                    code: code.to_string(),
                    total_amount: 0.0,
                    count: 0,
                }
            });
            entry.total_amount += t.amount;
            entry.count += 1;
        }

        if let Some(lines) = &t.projects {
            for line in lines.iter() {
                let Some((name, price)) = project_info.get(line.project_id.as_str()).copied()
                else {
                    continue;
                };
                let entry = per_project
                    .entry(line.project_id.clone())
                    .or_insert_with(|| ProjectTotal {
                        project_id: line.project_id.clone(),
                        name: name.to_string(),
                        total_quantity: 0,
                        total_amount: 0.0,
                    });
                entry.total_quantity += line.quantity;
                entry.total_amount += price * line.quantity as f64;
            }
        }
    }

    let total_count = transactions.len();
    Ok(Json(TransactionReport {
        transactions,
        summary: json!({
            "total_amount": total_amount,
            "total_count": total_count,
            "technician_summary": per_technician.into_values().collect::<Vec<_>>(),
            "project_summary": per_project.into_values().collect::<Vec<_>>(),
        }),
    }))
}

pub async fn vip_summary(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
) -> Result<impl IntoResponse, AppError> {
    let members = state.member_repo.list_by_store(&store.id).await?;
    let transactions = state
        .transaction_repo
        .list_filtered(&store.id, &TransactionFilter::default())
        .await?;

    let total_balance: f64 = members.iter().map(|m| m.balance).sum();
    let sum_kind = |kind: TransactionKind| -> f64 {
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    };

    Ok(Json(json!({
        "member_count": members.len(),
        "total_balance": total_balance,
        "total_recharge": sum_kind(TransactionKind::Recharge),
        "total_consumption": sum_kind(TransactionKind::Consume),
    })))
}

pub async fn platform_summary(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Query(query): Query<PlatformSummaryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let reports = state
        .report_repo
        .list_range(&store.id, query.start_date, query.end_date)
        .await?;

    let (hours, revenue): (f64, f64) = match query.platform.as_str() {
        "douyin" => reports
            .iter()
            .fold((0.0, 0.0), |(h, r), d| (h + d.douyin_hours, r + d.douyin_revenue)),
        "meituan" => reports
            .iter()
            .fold((0.0, 0.0), |(h, r), d| (h + d.meituan_hours, r + d.meituan_revenue)),
        other => {
            return Err(AppError::Validation(format!(
                "Unknown platform: {}",
                other
            )))
        }
    };

    Ok(Json(json!({
        "platform": query.platform,
        "total_hours": hours,
        "total_revenue": revenue,
        "report_count": reports.len(),
    })))
}

pub async fn cash_summary(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let reports = state
        .report_repo
        .list_range(&store.id, query.start_date, query.end_date)
        .await?;

    let fold = |f: fn(&DailyReport) -> (f64, f64)| -> (f64, f64) {
        reports
            .iter()
            .fold((0.0, 0.0), |(h, r), d| {
                let (dh, dr) = f(d);
                (h + dh, r + dr)
            })
    };
    let (cash_hours, cash_revenue) = fold(|d| (d.cash_hours, d.cash_revenue));
    let (pos_hours, pos_revenue) = fold(|d| (d.pos_hours, d.pos_revenue));

    Ok(Json(json!({
        "cash": { "total_hours": cash_hours, "total_revenue": cash_revenue },
        "pos": { "total_hours": pos_hours, "total_revenue": pos_revenue },
        "report_count": reports.len(),
    })))
}

pub async fn upsert_daily_report(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Json(payload): Json<UpsertDailyReportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut report = DailyReport::new(store.id.clone(), payload.date, Some(store.username));
    if let Some(douyin) = payload.douyin {
        report.douyin_hours = douyin.hours;
        report.douyin_revenue = douyin.revenue;
    }
    if let Some(meituan) = payload.meituan {
        report.meituan_hours = meituan.hours;
        report.meituan_revenue = meituan.revenue;
    }
    if let Some(cash) = payload.cash {
        report.cash_hours = cash.hours;
        report.cash_revenue = cash.revenue;
    }
    if let Some(pos) = payload.pos {
        report.pos_hours = pos.hours;
        report.pos_revenue = pos.revenue;
    }

    for (hours, revenue) in [
        (report.douyin_hours, report.douyin_revenue),
        (report.meituan_hours, report.meituan_revenue),
        (report.cash_hours, report.cash_revenue),
        (report.pos_hours, report.pos_revenue),
    ] {
        if hours < 0.0 || revenue < 0.0 || !hours.is_finite() || !revenue.is_finite() {
            return Err(AppError::Validation(
                "Hours and revenue must not be negative".into(),
            ));
        }
    }

    let saved = state.report_repo.upsert(&report).await?;
    Ok(Json(saved))
}

pub async fn list_daily_reports(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let reports = state
        .report_repo
        .list_range(&store.id, query.start_date, query.end_date)
        .await?;
    Ok(Json(reports))
}

pub async fn get_daily_report(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Path(date): Path<NaiveDate>,
) -> Result<impl IntoResponse, AppError> {
    let report = state
        .report_repo
        .find_by_date(&store.id, date)
        .await?
        .ok_or_else(|| AppError::NotFound("No report for that date".into()))?;
    Ok(Json(report))
}
