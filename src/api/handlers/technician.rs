use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::dtos::requests::{CreateTechnicianRequest, UpdateTechnicianRequest};
use crate::api::extractors::auth::CurrentStore;
use crate::domain::models::technician::Technician;
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;
use tracing::info;

pub async fn list_technicians(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
) -> Result<impl IntoResponse, AppError> {
    let technicians = state.technician_repo.list_active(&store.id).await?;
    Ok(Json(technicians))
}

pub async fn get_technician(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let technician = state
        .technician_repo
        .find_by_id(&store.id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Technician not found".into()))?;
    Ok(Json(technician))
}

pub async fn create_technician(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Json(payload): Json<CreateTechnicianRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() || payload.code.trim().is_empty() {
        return Err(AppError::Validation(
            "Technician name and code are required".into(),
        ));
    }

    if state
        .technician_repo
        .find_by_code(&store.id, payload.code.trim())
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Technician code already exists".into()));
    }

    let technician = Technician::new(
        store.id.clone(),
        payload.name.trim().to_string(),
        payload.code.trim().to_string(),
    );
    let created = state.technician_repo.create(&technician).await?;

    info!(technician_id = %created.id, "created technician");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_technician(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTechnicianRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut technician = state
        .technician_repo
        .find_by_id(&store.id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Technician not found".into()))?;

    if let Some(code) = payload.code {
        let code = code.trim().to_string();
        if code.is_empty() {
            return Err(AppError::Validation("Technician code is required".into()));
        }
        if let Some(existing) = state.technician_repo.find_by_code(&store.id, &code).await? {
            if existing.id != technician.id {
                return Err(AppError::Conflict("Technician code already exists".into()));
            }
        }
        technician.code = code;
    }
    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Technician name is required".into()));
        }
        technician.name = name.trim().to_string();
    }
    if let Some(is_active) = payload.is_active {
        technician.is_active = is_active;
    }

    let updated = state.technician_repo.update(&technician).await?;
    Ok(Json(updated))
}

/// Soft delete, mirroring projects.
pub async fn delete_technician(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .technician_repo
        .deactivate(&store.id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Technician not found".into()))?;

    Ok(Json(json!({ "status": "deleted" })))
}
