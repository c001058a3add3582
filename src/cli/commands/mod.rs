pub mod audit;
pub mod employee;
pub mod init;
pub mod kiosk;
pub mod punch;
pub mod queue;
pub mod reconcile;
pub mod report;
pub mod setting;
