//! Data models for parallel test runs
//!
//! Destinations, project descriptions, units of work and run summaries.

mod destination;
mod project;
mod run;
mod work;

pub use destination::Destination;
pub use project::ProjectKind;
pub use run::{RunPhase, RunSummary};
pub use work::WorkUnit;
