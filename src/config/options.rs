// src/config/options.rs
use std::path::PathBuf;

/// Language used for headings and labels in the rendered report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Lang {
    #[default]
    En,
    Zh,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub lang: Lang,
}

/// Everything one invocation needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunParams {
    pub input: PathBuf,
    pub report: ReportOptions,
}

impl RunParams {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self { input: input.into(), report: ReportOptions::default() }
    }

    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.report.lang = lang;
        self
    }
}
