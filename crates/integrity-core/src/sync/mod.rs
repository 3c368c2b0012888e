//! Check, sync, and fix operations over the snapshot store

mod coordinator;
mod status;

pub use coordinator::SyncCoordinator;
pub use status::SyncResult;
