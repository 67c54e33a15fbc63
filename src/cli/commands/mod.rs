pub mod add;
pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod export;
pub mod holiday;
pub mod init;
pub mod list;
pub mod log;
pub mod punch;
pub mod reset;
pub mod start;
pub mod status;
pub mod watch;
