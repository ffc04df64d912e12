//! Core data models.

mod datetime;
mod record;
mod stats;

pub use datetime::*;
pub use record::*;
pub use stats::*;
