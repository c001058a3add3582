pub mod orchestrator;
pub mod queue;
pub mod reconciler;
pub mod reports;
pub mod security;
pub mod session;
