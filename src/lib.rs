// src/lib.rs

pub mod config;
pub mod core;
pub mod specs;
pub mod vote;

pub mod error;
pub mod log;
pub mod report;
pub mod runner;
pub mod tally;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::TallyError;
pub use runner::{run, summarize, RunSummary};
