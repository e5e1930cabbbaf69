use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::dtos::requests::{
    ConsumeRequestBody, CreateVipRequest, RechargeRequestBody, UpdateVipRequest,
};
use crate::api::dtos::responses::{LedgerResponse, VipDetailResponse};
use crate::api::extractors::auth::CurrentStore;
use crate::domain::models::member::Member;
use crate::domain::models::notification::{
    NotificationJob, KIND_CONSUME, KIND_MEMBER_CREATED, KIND_RECHARGE,
};
use crate::domain::models::transaction::{ProjectLine, Transaction};
use crate::domain::services::ledger::{ConsumeMode, ConsumeRequest, RechargeRequest};
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;
use tracing::{info, warn};

pub async fn list_vips(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
) -> Result<impl IntoResponse, AppError> {
    let members = state.member_repo.list_by_store(&store.id).await?;
    Ok(Json(members))
}

pub async fn get_vip(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let member = state
        .member_repo
        .find_by_id(&store.id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".into()))?;

    let history = state
        .transaction_repo
        .list_by_member(&store.id, &member.id)
        .await?;

    Ok(Json(VipDetailResponse {
        vip: member,
        history,
    }))
}

pub async fn create_vip(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Json(payload): Json<CreateVipRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim().to_string();
    let phone = payload.phone.trim().to_string();
    let balance = payload.balance.unwrap_or(0.0);
    let discount = payload.discount.unwrap_or(1.0);
    validate_member_fields(&name, &phone, balance, discount)?;

    let member = Member::new(store.id.clone(), name, phone, balance, discount);

    // An opening balance is booked as the member's first recharge so the
    // ledger history accounts for every yuan on the card.
    let initial_recharge = if balance > 0.0 {
        Some(Transaction::recharge(
            store.id.clone(),
            member.id.clone(),
            balance,
            0.0,
            payload.technician_id.clone(),
            Some(
                payload
                    .note
                    .clone()
                    .unwrap_or_else(|| "Initial membership recharge".to_string()),
            ),
        ))
    } else {
        None
    };

    let created = state
        .member_repo
        .create(&member, initial_recharge.as_ref())
        .await?;

    info!(member_id = %created.id, "created member");

    enqueue_notification(
        &state,
        NotificationJob::new(
            store.id.clone(),
            created.phone.clone(),
            KIND_MEMBER_CREATED,
            json!({ "name": created.name, "balance": created.balance }),
        ),
    )
    .await;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_vip(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Path(id): Path<String>,
    Json(payload): Json<UpdateVipRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut member = state
        .member_repo
        .find_by_id(&store.id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".into()))?;

    let name = payload.name.trim().to_string();
    let phone = payload.phone.trim().to_string();
    let discount = payload.discount.unwrap_or(member.discount);
    validate_member_fields(&name, &phone, 0.0, discount)?;

    // The balance is owned by the ledger; profile updates never touch it.
    member.name = name;
    member.phone = phone;
    member.discount = discount;

    let updated = state.member_repo.update_profile(&member).await?;
    Ok(Json(updated))
}

pub async fn delete_vip(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let member = state
        .member_repo
        .find_by_id(&store.id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".into()))?;

    let history = state
        .transaction_repo
        .list_by_member(&store.id, &member.id)
        .await?;
    if !history.is_empty() {
        return Err(AppError::Conflict(
            "Member has transaction history and cannot be deleted".into(),
        ));
    }

    state.member_repo.delete(&store.id, &member.id).await?;
    info!(member_id = %member.id, "deleted member");
    Ok(Json(json!({ "status": "deleted" })))
}

pub async fn recharge_vip(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Path(id): Path<String>,
    Json(payload): Json<RechargeRequestBody>,
) -> Result<impl IntoResponse, AppError> {
    let (member, transaction) = state
        .ledger
        .recharge(
            &store.id,
            &id,
            RechargeRequest {
                amount: payload.amount,
                bonus_amount: payload.bonus_amount,
                technician_id: payload.technician_id,
                note: payload.note,
            },
        )
        .await?;

    enqueue_notification(
        &state,
        NotificationJob::new(
            store.id.clone(),
            member.phone.clone(),
            KIND_RECHARGE,
            json!({
                "amount": payload.amount,
                "bonus": payload.bonus_amount,
                "balance": member.balance,
            }),
        ),
    )
    .await;

    Ok(Json(LedgerResponse {
        vip: member,
        transaction,
    }))
}

pub async fn consume_vip(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Path(id): Path<String>,
    Json(payload): Json<ConsumeRequestBody>,
) -> Result<impl IntoResponse, AppError> {
    let mode = match payload.projects {
        Some(lines) if !lines.is_empty() => ConsumeMode::Itemized {
            lines: lines
                .into_iter()
                .map(|l| ProjectLine {
                    project_id: l.project_id,
                    quantity: l.quantity,
                })
                .collect(),
        },
        _ => ConsumeMode::FlatAmount {
            amount: payload.amount,
        },
    };

    let (member, transaction) = state
        .ledger
        .consume(
            &store.id,
            &id,
            ConsumeRequest {
                mode,
                custom_amount: payload.custom_amount,
                technician_id: payload.technician_id,
                payment_method: payload.payment_method,
                note: payload.note,
            },
        )
        .await?;

    enqueue_notification(
        &state,
        NotificationJob::new(
            store.id.clone(),
            member.phone.clone(),
            KIND_CONSUME,
            json!({
                "amount": transaction.amount,
                "balance": member.balance,
            }),
        ),
    )
    .await;

    Ok(Json(LedgerResponse {
        vip: member,
        transaction,
    }))
}

/// Best effort: a full outbox must never fail the ledger operation that
/// triggered the notification.
async fn enqueue_notification(state: &AppState, job: NotificationJob) {
    if let Err(e) = state.notification_repo.enqueue(&job).await {
        warn!("Failed to enqueue notification: {:?}", e);
    }
}

fn validate_member_fields(
    name: &str,
    phone: &str,
    balance: f64,
    discount: f64,
) -> Result<(), AppError> {
    if name.chars().count() < 2 {
        return Err(AppError::Validation(
            "Member name must be at least 2 characters".into(),
        ));
    }
    if phone.len() != 11 || !phone.starts_with('1') || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Phone must be a valid 11-digit mobile number".into(),
        ));
    }
    if !balance.is_finite() || balance < 0.0 {
        return Err(AppError::Validation("Balance must not be negative".into()));
    }
    if !discount.is_finite() || !(0.1..=1.0).contains(&discount) {
        return Err(AppError::Validation(
            "Discount must be between 0.1 and 1.0".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_phone_shape() {
        assert!(validate_member_fields("Jin", "13812345678", 0.0, 1.0).is_ok());
        assert!(validate_member_fields("Jin", "23812345678", 0.0, 1.0).is_err());
        assert!(validate_member_fields("Jin", "1381234567", 0.0, 1.0).is_err());
        assert!(validate_member_fields("Jin", "1381234567a", 0.0, 1.0).is_err());
    }

    #[test]
    fn validates_discount_range() {
        assert!(validate_member_fields("Jin", "13812345678", 0.0, 0.05).is_err());
        assert!(validate_member_fields("Jin", "13812345678", 0.0, 1.2).is_err());
        assert!(validate_member_fields("Jin", "13812345678", 0.0, 0.8).is_ok());
    }
}
