pub mod auth;
pub mod health;
pub mod project;
pub mod report;
pub mod technician;
pub mod vip;
