use crate::domain::{models::technician::Technician, ports::TechnicianRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteTechnicianRepo {
    pool: SqlitePool,
}

impl SqliteTechnicianRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TechnicianRepository for SqliteTechnicianRepo {
    async fn create(&self, technician: &Technician) -> Result<Technician, AppError> {
        sqlx::query_as::<_, Technician>(
            "INSERT INTO technicians (id, store_id, name, code, is_active) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&technician.id)
        .bind(&technician.store_id)
        .bind(&technician.name)
        .bind(&technician.code)
        .bind(technician.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, store_id: &str, id: &str) -> Result<Option<Technician>, AppError> {
        sqlx::query_as::<_, Technician>("SELECT * FROM technicians WHERE id = ? AND store_id = ?")
            .bind(id)
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_code(
        &self,
        store_id: &str,
        code: &str,
    ) -> Result<Option<Technician>, AppError> {
        sqlx::query_as::<_, Technician>(
            "SELECT * FROM technicians WHERE store_id = ? AND code = ?",
        )
        .bind(store_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_active(&self, store_id: &str) -> Result<Vec<Technician>, AppError> {
        sqlx::query_as::<_, Technician>(
            "SELECT * FROM technicians WHERE store_id = ? AND is_active = TRUE ORDER BY name",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_all(&self, store_id: &str) -> Result<Vec<Technician>, AppError> {
        sqlx::query_as::<_, Technician>(
            "SELECT * FROM technicians WHERE store_id = ? ORDER BY name",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, technician: &Technician) -> Result<Technician, AppError> {
        sqlx::query_as::<_, Technician>(
            "UPDATE technicians SET name = ?, code = ?, is_active = ? \
             WHERE id = ? AND store_id = ? RETURNING *",
        )
        .bind(&technician.name)
        .bind(&technician.code)
        .bind(technician.is_active)
        .bind(&technician.id)
        .bind(&technician.store_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn deactivate(&self, store_id: &str, id: &str) -> Result<Option<Technician>, AppError> {
        sqlx::query_as::<_, Technician>(
            "UPDATE technicians SET is_active = FALSE WHERE id = ? AND store_id = ? RETURNING *",
        )
        .bind(id)
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
