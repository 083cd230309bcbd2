pub mod config;
pub mod log;
pub mod panel;
pub mod task;
pub mod timer;
