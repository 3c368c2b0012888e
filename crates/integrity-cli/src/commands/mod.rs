//! Command implementations

mod audit;
mod register;
mod sync;

pub use audit::run_audit;
pub use register::run_register;
pub use sync::{run_check, run_fix, run_sync};
