pub mod activity_log;
pub mod assignment;
pub mod dashboard;
pub mod inventory;
pub mod reconciliation;
pub mod records;
