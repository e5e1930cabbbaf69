use crate::domain::{models::store::Store, ports::StoreRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteStoreRepo {
    pool: SqlitePool,
}

impl SqliteStoreRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreRepository for SqliteStoreRepo {
    async fn create(&self, store: &Store) -> Result<Store, AppError> {
        sqlx::query_as::<_, Store>(
            "INSERT INTO stores (id, store_name, username, password_hash, created_at, last_login_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&store.id)
        .bind(&store.store_name)
        .bind(&store.username)
        .bind(&store.password_hash)
        .bind(store.created_at)
        .bind(store.last_login_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Store>, AppError> {
        sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Store>, AppError> {
        sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_store_name(&self, store_name: &str) -> Result<Option<Store>, AppError> {
        sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE store_name = ?")
            .bind(store_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn touch_last_login(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE stores SET last_login_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
