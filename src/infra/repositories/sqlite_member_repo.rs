use crate::domain::{
    models::{member::Member, transaction::Transaction},
    ports::MemberRepository,
};
use crate::error::AppError;
use crate::infra::repositories::sqlite_ledger_repo::insert_transaction;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteMemberRepo {
    pool: SqlitePool,
}

impl SqliteMemberRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepo {
    async fn create(
        &self,
        member: &Member,
        initial_recharge: Option<&Transaction>,
    ) -> Result<Member, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Member>(
            "INSERT INTO members (id, store_id, name, phone, balance, discount, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&member.id)
        .bind(&member.store_id)
        .bind(&member.name)
        .bind(&member.phone)
        .bind(member.balance)
        .bind(member.discount)
        .bind(member.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if let Some(transaction) = initial_recharge {
            insert_transaction(&mut tx, transaction).await?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, store_id: &str, id: &str) -> Result<Option<Member>, AppError> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = ? AND store_id = ?")
            .bind(id)
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_store(&self, store_id: &str) -> Result<Vec<Member>, AppError> {
        sqlx::query_as::<_, Member>(
            "SELECT * FROM members WHERE store_id = ? ORDER BY created_at DESC",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update_profile(&self, member: &Member) -> Result<Member, AppError> {
        sqlx::query_as::<_, Member>(
            "UPDATE members SET name = ?, phone = ?, discount = ? \
             WHERE id = ? AND store_id = ? RETURNING *",
        )
        .bind(&member.name)
        .bind(&member.phone)
        .bind(member.discount)
        .bind(&member.id)
        .bind(&member.store_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, store_id: &str, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM members WHERE id = ? AND store_id = ?")
            .bind(id)
            .bind(store_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
