pub mod add;
pub mod export;
pub mod notify;
pub mod overtime;
pub mod reconcile;
pub mod summary;
pub mod timeline;
pub mod timer;
