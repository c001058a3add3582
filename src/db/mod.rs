pub mod attempts;
pub mod audit;
pub mod employees;
pub mod initialize;
pub mod pool;
pub mod punches;
pub mod settings;
