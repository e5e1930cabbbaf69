pub mod sqlite_ledger_repo;
pub mod sqlite_member_repo;
pub mod sqlite_notification_repo;
pub mod sqlite_project_repo;
pub mod sqlite_report_repo;
pub mod sqlite_store_repo;
pub mod sqlite_technician_repo;
pub mod sqlite_transaction_repo;
