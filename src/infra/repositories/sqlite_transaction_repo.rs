use crate::domain::{
    models::transaction::{Transaction, TransactionFilter},
    ports::TransactionRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteTransactionRepo {
    pool: SqlitePool,
}

impl SqliteTransactionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for SqliteTransactionRepo {
    async fn list_by_member(
        &self,
        store_id: &str,
        member_id: &str,
    ) -> Result<Vec<Transaction>, AppError> {
        sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE store_id = ? AND member_id = ? ORDER BY date DESC",
        )
        .bind(store_id)
        .bind(member_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_filtered(
        &self,
        store_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, AppError> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM transactions WHERE store_id = ");
        builder.push_bind(store_id);

        if let Some(start) = filter.start_date {
            builder.push(" AND date >= ");
            builder.push_bind(start);
        }
        if let Some(end) = filter.end_date {
            builder.push(" AND date < ");
            builder.push_bind(end);
        }
        if let Some(kind) = filter.kind {
            builder.push(" AND kind = ");
            builder.push_bind(kind);
        }
        if let Some(member_id) = &filter.member_id {
            builder.push(" AND member_id = ");
            builder.push_bind(member_id);
        }
        if let Some(technician_id) = &filter.technician_id {
            builder.push(" AND technician_id = ");
            builder.push_bind(technician_id);
        }
        builder.push(" ORDER BY date DESC");

        builder
            .build_query_as::<Transaction>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
