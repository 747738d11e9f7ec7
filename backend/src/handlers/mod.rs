pub mod activity_logs;
pub mod assignments;
pub mod common;
pub mod credentials;
pub mod dashboard;
pub mod inventory;
pub mod reconciliation;
pub mod vlans;
