// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;

use crate::config::options::{Lang, RunParams};

/// Tally +1 / 0 / -1 votes from a saved mailing-list thread page.
#[derive(Debug, Parser)]
#[command(name = "vote_tally", version, about, long_about = None)]
pub struct Args {
    /// Saved thread HTML file
    pub html_path: PathBuf,

    /// Report language
    #[arg(long, value_enum, default_value_t = Lang::En)]
    pub lang: Lang,

    /// Log pipeline decisions to stderr (overridden by VOTE_TALLY_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn params(&self) -> RunParams {
        RunParams::new(&self.html_path).with_lang(self.lang)
    }
}

/// Parse args, run, print the report to stdout.
pub fn run() -> Result<()> {
    let args = Args::parse();
    crate::log::init(args.verbose.then_some("debug"));

    let summary = crate::runner::run(&args.params())?;
    tracing::info!(
        "{} messages, {} votes, {} voters",
        summary.messages, summary.records, summary.voters
    );

    let mut out = io::stdout().lock();
    out.write_all(summary.report.as_bytes())?;
    out.flush()?;
    Ok(())
}
