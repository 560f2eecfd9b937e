// src/runner.rs
use std::fs;

use tracing::info;

use crate::config::options::RunParams;
use crate::error::{Result, TallyError};
use crate::report::render_markdown;
use crate::specs::thread;
use crate::tally::Tally;
use crate::vote::parse_fragments;

/// What one run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub report: String,
    /// Email fragments found in the page.
    pub messages: usize,
    /// Emails that carried a vote.
    pub records: usize,
    /// Distinct authors with a final vote.
    pub voters: usize,
}

/// Read the saved page and build the report. Only an unreadable file is an error.
pub fn run(params: &RunParams) -> Result<RunSummary> {
    let bytes = fs::read(&params.input).map_err(|source| TallyError::Read {
        path: params.input.clone(),
        source,
    })?;
    info!("Read {} bytes from {}", bytes.len(), params.input.display());

    Ok(summarize(&String::from_utf8_lossy(&bytes), params))
}

/// The in-memory half of [`run`].
pub fn summarize(doc: &str, params: &RunParams) -> RunSummary {
    let fragments = thread::split_messages(doc);
    let records = parse_fragments(&fragments);
    let tally = Tally::new(&records);
    let report = render_markdown(&tally, &params.report);

    RunSummary { report, messages: fragments.len(), records: records.len(), voters: tally.voters() }
}
