pub mod filter;
pub mod log;
pub mod logic;
pub mod maintenance;
pub mod performance;
