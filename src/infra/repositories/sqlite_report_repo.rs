use crate::domain::{models::report::DailyReport, ports::DailyReportRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteReportRepo {
    pool: SqlitePool,
}

impl SqliteReportRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DailyReportRepository for SqliteReportRepo {
    async fn upsert(&self, report: &DailyReport) -> Result<DailyReport, AppError> {
        sqlx::query_as::<_, DailyReport>(
            "INSERT INTO daily_reports (id, store_id, report_date, \
             douyin_hours, douyin_revenue, meituan_hours, meituan_revenue, \
             cash_hours, cash_revenue, pos_hours, pos_revenue, \
             created_by, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (store_id, report_date) DO UPDATE SET \
             douyin_hours = excluded.douyin_hours, douyin_revenue = excluded.douyin_revenue, \
             meituan_hours = excluded.meituan_hours, meituan_revenue = excluded.meituan_revenue, \
             cash_hours = excluded.cash_hours, cash_revenue = excluded.cash_revenue, \
             pos_hours = excluded.pos_hours, pos_revenue = excluded.pos_revenue, \
             updated_at = excluded.updated_at \
             RETURNING *",
        )
        .bind(&report.id)
        .bind(&report.store_id)
        .bind(report.report_date)
        .bind(report.douyin_hours)
        .bind(report.douyin_revenue)
        .bind(report.meituan_hours)
        .bind(report.meituan_revenue)
        .bind(report.cash_hours)
        .bind(report.cash_revenue)
        .bind(report.pos_hours)
        .bind(report.pos_revenue)
        .bind(&report.created_by)
        .bind(report.created_at)
        .bind(report.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_date(
        &self,
        store_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyReport>, AppError> {
        sqlx::query_as::<_, DailyReport>(
            "SELECT * FROM daily_reports WHERE store_id = ? AND report_date = ?",
        )
        .bind(store_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_range(
        &self,
        store_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<DailyReport>, AppError> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM daily_reports WHERE store_id = ");
        builder.push_bind(store_id);
        if let Some(start) = start {
            builder.push(" AND report_date >= ");
            builder.push_bind(start);
        }
        if let Some(end) = end {
            builder.push(" AND report_date <= ");
            builder.push_bind(end);
        }
        builder.push(" ORDER BY report_date DESC");

        builder
            .build_query_as::<DailyReport>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
