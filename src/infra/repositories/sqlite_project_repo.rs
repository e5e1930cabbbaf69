use crate::domain::{models::project::Project, ports::ProjectRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteProjectRepo {
    pool: SqlitePool,
}

impl SqliteProjectRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqliteProjectRepo {
    async fn create(&self, project: &Project) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (id, store_id, name, duration_min, price, notes, is_active) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&project.id)
        .bind(&project.store_id)
        .bind(&project.name)
        .bind(project.duration_min)
        .bind(project.price)
        .bind(&project.notes)
        .bind(project.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, store_id: &str, id: &str) -> Result<Option<Project>, AppError> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ? AND store_id = ?")
            .bind(id)
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active(&self, store_id: &str) -> Result<Vec<Project>, AppError> {
        sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE store_id = ? AND is_active = TRUE ORDER BY name",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_all(&self, store_id: &str) -> Result<Vec<Project>, AppError> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE store_id = ? ORDER BY name")
            .bind(store_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_active_by_ids(
        &self,
        store_id: &str,
        ids: &[String],
    ) -> Result<Vec<Project>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM projects WHERE store_id = ");
        builder.push_bind(store_id);
        builder.push(" AND is_active = TRUE AND id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        builder
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, project: &Project) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET name = ?, duration_min = ?, price = ?, notes = ?, is_active = ? \
             WHERE id = ? AND store_id = ? RETURNING *",
        )
        .bind(&project.name)
        .bind(project.duration_min)
        .bind(project.price)
        .bind(&project.notes)
        .bind(project.is_active)
        .bind(&project.id)
        .bind(&project.store_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn deactivate(&self, store_id: &str, id: &str) -> Result<Option<Project>, AppError> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET is_active = FALSE WHERE id = ? AND store_id = ? RETURNING *",
        )
        .bind(id)
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
