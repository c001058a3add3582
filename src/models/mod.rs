pub mod attempt;
pub mod employee;
pub mod outcome;
pub mod punch;
pub mod punch_action;
pub mod queued_event;
