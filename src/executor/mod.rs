//! Test execution engine
//!
//! Destination pool, batch planning and job scheduling.

mod batch;
mod pool;
mod scheduler;

pub use batch::plan;
pub use pool::{DestinationPool, PoolError};
pub use scheduler::{JobScheduler, UnitExecutor};
