//! # rtave
//!
//! Average elapsed run time across records carrying a start and an end
//! timestamp.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (date/time, interval record, statistics)
//! - **calendar**: Leap years, validation and epoch-second arithmetic
//! - **parse**: Date/time string parsing in several layouts
//! - **ingest**: Turning one input line into an interval record
//! - **calculate**: Running totals and the finalized average
//! - **input**: Files and standard input as line sources
//! - **run**: The sequential source → record → aggregate pipeline
//! - **report**: Plain-text, CSV and JSON rendering
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod calendar;
pub mod config;
pub mod ingest;
pub mod input;
pub mod models;
pub mod parse;
pub mod report;
pub mod run;

pub use models::*;
