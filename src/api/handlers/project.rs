use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::dtos::requests::{CreateProjectRequest, UpdateProjectRequest};
use crate::api::extractors::auth::CurrentStore;
use crate::domain::models::project::Project;
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;
use tracing::info;

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
) -> Result<impl IntoResponse, AppError> {
    let projects = state.project_repo.list_active(&store.id).await?;
    Ok(Json(projects))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let project = state
        .project_repo
        .find_by_id(&store.id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;
    Ok(Json(project))
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Project name is required".into()));
    }
    if payload.duration_min <= 0 {
        return Err(AppError::Validation(
            "Project duration must be greater than 0".into(),
        ));
    }
    if !payload.price.is_finite() || payload.price <= 0.0 {
        return Err(AppError::Validation(
            "Project price must be greater than 0".into(),
        ));
    }

    let project = Project::new(
        store.id.clone(),
        payload.name.trim().to_string(),
        payload.duration_min,
        payload.price,
        payload.notes,
    );
    let created = state.project_repo.create(&project).await?;

    info!(project_id = %created.id, "created project");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut project = state
        .project_repo
        .find_by_id(&store.id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Project name is required".into()));
        }
        project.name = name.trim().to_string();
    }
    if let Some(duration_min) = payload.duration_min {
        if duration_min <= 0 {
            return Err(AppError::Validation(
                "Project duration must be greater than 0".into(),
            ));
        }
        project.duration_min = duration_min;
    }
    if let Some(price) = payload.price {
        if !price.is_finite() || price <= 0.0 {
            return Err(AppError::Validation(
                "Project price must be greater than 0".into(),
            ));
        }
        project.price = price;
    }
    if let Some(notes) = payload.notes {
        project.notes = Some(notes);
    }
    if let Some(is_active) = payload.is_active {
        project.is_active = is_active;
    }

    let updated = state.project_repo.update(&project).await?;
    Ok(Json(updated))
}

/// Soft delete: the project stays resolvable for historical transactions.
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    store: CurrentStore,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .project_repo
        .deactivate(&store.id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    Ok(Json(json!({ "status": "deleted" })))
}
