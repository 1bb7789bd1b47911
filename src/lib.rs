//! Text statistics toolkit.
//!
//! [`TextStatsEngine`] loads one UTF-8 file and answers character frequency
//! and summary queries over it; [`report`] renders the results and [`timing`]
//! measures the end-to-end call. [`guess`] holds the console number-guessing
//! game shipped alongside as the `numguess` binary.

pub mod engine;
pub mod error;
pub mod guess;
pub mod logging;
pub mod report;
pub mod script;
pub mod timing;

pub use engine::{FrequencyTable, SummaryStats, TextStatsEngine};
pub use error::{GuessError, Result, TextStatsError};
