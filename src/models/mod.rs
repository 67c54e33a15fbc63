pub mod day_summary;
pub mod holiday;
pub mod segment;
pub mod snapshot;
pub mod worklog;
