//! Build directory layout and run reports

mod layout;
mod report;

pub use layout::BuildLayout;
pub use report::save_summary;
