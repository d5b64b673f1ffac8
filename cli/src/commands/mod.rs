pub mod config;
pub mod devices;
pub mod report;
pub mod watch;
