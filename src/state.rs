use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{
    DailyReportRepository, MemberRepository, NotificationRepository, ProjectRepository,
    SmsService, StoreRepository, TechnicianRepository, TransactionRepository,
};
use crate::domain::services::{auth_service::AuthService, ledger::Ledger};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store_repo: Arc<dyn StoreRepository>,
    pub member_repo: Arc<dyn MemberRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub technician_repo: Arc<dyn TechnicianRepository>,
    pub transaction_repo: Arc<dyn TransactionRepository>,
    pub report_repo: Arc<dyn DailyReportRepository>,
    pub notification_repo: Arc<dyn NotificationRepository>,
    pub auth_service: Arc<AuthService>,
    pub ledger: Arc<Ledger>,
    pub sms_service: Arc<dyn SmsService>,
}
