// src/config/consts.rs

// Archive
pub const ARCHIVE_THREAD_BASE: &str = "https://lists.apache.org/thread/";
pub const PERMALINK_TITLE: &str = "Permanent link to this email";

// Parsing
pub const UNKNOWN_AUTHOR: &str = "(unknown author)";
pub const AUTHOR_DATE_SEP: &str = " - ";

// Mailing-list footer lines that never carry a vote
pub const FOOTER_PREFIXES: [&str; 2] = ["To unsubscribe,", "For additional commands,"];

// Logging
pub const LOG_ENV: &str = "VOTE_TALLY_LOG";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
