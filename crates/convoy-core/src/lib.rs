pub mod apply;
pub mod config;
pub mod hooks;
pub mod inventory;
pub mod logging;
pub mod pool;
pub mod report;
