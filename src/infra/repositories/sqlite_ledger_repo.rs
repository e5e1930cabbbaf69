use crate::domain::{
    models::{member::Member, transaction::Transaction},
    ports::LedgerRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool};

/// Persists ledger operations. Balance update and transaction append run in
/// one database transaction; the debit re-checks the balance inside the
/// UPDATE so concurrent debits can never overdraw the member.
pub struct SqliteLedgerRepo {
    pool: SqlitePool,
}

impl SqliteLedgerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepository for SqliteLedgerRepo {
    async fn credit(
        &self,
        store_id: &str,
        member_id: &str,
        total: f64,
        transaction: &Transaction,
    ) -> Result<Option<Member>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let member = sqlx::query_as::<_, Member>(
            "UPDATE members SET balance = balance + ? WHERE id = ? AND store_id = ? RETURNING *",
        )
        .bind(total)
        .bind(member_id)
        .bind(store_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        let Some(member) = member else {
            tx.rollback().await.map_err(AppError::Database)?;
            return Ok(None);
        };

        insert_transaction(&mut tx, transaction).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(Some(member))
    }

    async fn debit(
        &self,
        store_id: &str,
        member_id: &str,
        total: f64,
        transaction: &Transaction,
    ) -> Result<Option<Member>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let member = sqlx::query_as::<_, Member>(
            "UPDATE members SET balance = balance - ? \
             WHERE id = ? AND store_id = ? AND balance >= ? RETURNING *",
        )
        .bind(total)
        .bind(member_id)
        .bind(store_id)
        .bind(total)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        let Some(member) = member else {
            tx.rollback().await.map_err(AppError::Database)?;
            return Ok(None);
        };

        insert_transaction(&mut tx, transaction).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(Some(member))
    }
}

pub(crate) async fn insert_transaction(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    transaction: &Transaction,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO transactions (id, store_id, member_id, kind, amount, bonus_amount, \
         original_amount, discounted_amount, final_amount, custom_amount, discount, projects, \
         technician_id, payment_method, note, date) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&transaction.id)
    .bind(&transaction.store_id)
    .bind(&transaction.member_id)
    .bind(transaction.kind)
    .bind(transaction.amount)
    .bind(transaction.bonus_amount)
    .bind(transaction.original_amount)
    .bind(transaction.discounted_amount)
    .bind(transaction.final_amount)
    .bind(transaction.custom_amount)
    .bind(transaction.discount)
    .bind(transaction.projects.clone())
    .bind(&transaction.technician_id)
    .bind(transaction.payment_method)
    .bind(&transaction.note)
    .bind(transaction.date)
    .execute(&mut **tx)
    .await
    .map_err(AppError::Database)?;
    Ok(())
}
