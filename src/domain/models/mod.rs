pub mod auth;
pub mod member;
pub mod notification;
pub mod project;
pub mod report;
pub mod store;
pub mod technician;
pub mod transaction;
