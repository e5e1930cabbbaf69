use crate::domain::models::{
    member::Member,
    notification::NotificationJob,
    project::Project,
    report::DailyReport,
    store::Store,
    technician::Technician,
    transaction::{Transaction, TransactionFilter},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn create(&self, store: &Store) -> Result<Store, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Store>, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Store>, AppError>;
    async fn find_by_store_name(&self, store_name: &str) -> Result<Option<Store>, AppError>;
    async fn touch_last_login(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Creates the member and, when an initial balance was supplied, the
    /// synthesized opening recharge transaction in the same unit of work.
    async fn create(
        &self,
        member: &Member,
        initial_recharge: Option<&Transaction>,
    ) -> Result<Member, AppError>;
    async fn find_by_id(&self, store_id: &str, id: &str) -> Result<Option<Member>, AppError>;
    async fn list_by_store(&self, store_id: &str) -> Result<Vec<Member>, AppError>;
    async fn update_profile(&self, member: &Member) -> Result<Member, AppError>;
    async fn delete(&self, store_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, project: &Project) -> Result<Project, AppError>;
    async fn find_by_id(&self, store_id: &str, id: &str) -> Result<Option<Project>, AppError>;
    async fn list_active(&self, store_id: &str) -> Result<Vec<Project>, AppError>;
    async fn list_all(&self, store_id: &str) -> Result<Vec<Project>, AppError>;
    /// Resolves catalog prices for a consumption; only active projects of
    /// the given store are returned.
    async fn find_active_by_ids(
        &self,
        store_id: &str,
        ids: &[String],
    ) -> Result<Vec<Project>, AppError>;
    async fn update(&self, project: &Project) -> Result<Project, AppError>;
    async fn deactivate(&self, store_id: &str, id: &str) -> Result<Option<Project>, AppError>;
}

#[async_trait]
pub trait TechnicianRepository: Send + Sync {
    async fn create(&self, technician: &Technician) -> Result<Technician, AppError>;
    async fn find_by_id(&self, store_id: &str, id: &str) -> Result<Option<Technician>, AppError>;
    async fn find_by_code(&self, store_id: &str, code: &str)
        -> Result<Option<Technician>, AppError>;
    async fn list_active(&self, store_id: &str) -> Result<Vec<Technician>, AppError>;
    async fn list_all(&self, store_id: &str) -> Result<Vec<Technician>, AppError>;
    async fn update(&self, technician: &Technician) -> Result<Technician, AppError>;
    async fn deactivate(&self, store_id: &str, id: &str) -> Result<Option<Technician>, AppError>;
}

/// The ledger's persistence seam. Implementations must apply the balance
/// change and append the transaction as one atomic unit, and must check the
/// debit precondition atomically with the debit itself.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn credit(
        &self,
        store_id: &str,
        member_id: &str,
        total: f64,
        transaction: &Transaction,
    ) -> Result<Option<Member>, AppError>;
    /// Returns `None` when the balance does not cover `total`; in that case
    /// nothing is written.
    async fn debit(
        &self,
        store_id: &str,
        member_id: &str,
        total: f64,
        transaction: &Transaction,
    ) -> Result<Option<Member>, AppError>;
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn list_by_member(
        &self,
        store_id: &str,
        member_id: &str,
    ) -> Result<Vec<Transaction>, AppError>;
    async fn list_filtered(
        &self,
        store_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, AppError>;
}

#[async_trait]
pub trait DailyReportRepository: Send + Sync {
    async fn upsert(&self, report: &DailyReport) -> Result<DailyReport, AppError>;
    async fn find_by_date(
        &self,
        store_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyReport>, AppError>;
    async fn list_range(
        &self,
        store_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<DailyReport>, AppError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn enqueue(&self, job: &NotificationJob) -> Result<(), AppError>;
    async fn find_pending(&self, limit: i32) -> Result<Vec<NotificationJob>, AppError>;
    async fn mark(
        &self,
        id: &str,
        status: &str,
        attempts: i64,
        last_error: Option<String>,
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait SmsService: Send + Sync {
    async fn send_member_created(
        &self,
        phone: &str,
        name: &str,
        balance: f64,
    ) -> Result<(), AppError>;
    async fn send_recharge(
        &self,
        phone: &str,
        amount: f64,
        bonus: f64,
        balance: f64,
    ) -> Result<(), AppError>;
    async fn send_consumption(&self, phone: &str, amount: f64, balance: f64)
        -> Result<(), AppError>;
}
