use crate::domain::{models::notification::NotificationJob, ports::NotificationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteNotificationRepo {
    pool: SqlitePool,
}

impl SqliteNotificationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for SqliteNotificationRepo {
    async fn enqueue(&self, job: &NotificationJob) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO notification_jobs (id, store_id, phone, kind, payload, status, \
             attempts, last_error, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&job.id)
        .bind(&job.store_id)
        .bind(&job.phone)
        .bind(&job.kind)
        .bind(job.payload.clone())
        .bind(&job.status)
        .bind(job.attempts)
        .bind(&job.last_error)
        .bind(job.created_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(())
    }

    async fn find_pending(&self, limit: i32) -> Result<Vec<NotificationJob>, AppError> {
        sqlx::query_as::<_, NotificationJob>(
            "SELECT * FROM notification_jobs WHERE status = 'PENDING' \
             ORDER BY created_at LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn mark(
        &self,
        id: &str,
        status: &str,
        attempts: i64,
        last_error: Option<String>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE notification_jobs SET status = ?, attempts = ?, last_error = ? WHERE id = ?",
        )
        .bind(status)
        .bind(attempts)
        .bind(last_error)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(())
    }
}
