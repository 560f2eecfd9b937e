// src/specs/mod.rs
//! # Page reading "specs"
//!
//! Each spec knows *where the ground truth lives* in one part of a saved
//! thread page and how to pull it out tolerantly.
//!
//! ## What lives here
//! - `thread`: cut the page into one fragment per email.
//! - `message`: read author, date, permalink and body text out of one fragment.
//!
//! ## What does **not** live here
//! - Deciding what counts as a vote (`vote::classify`).
//! - Grouping, counting and rendering (`tally`, `report`).
//!
//! ## Typical call chain
//! ```text
//! runner → vote::parse_thread → specs::thread::split_messages
//!                             ↘ specs::message::parse_message → vote::classify_body
//! ```
//!
//! ## Conventions
//! - Patterns are compiled once (`LazyLock<Regex>`) and shared read-only.
//! - Missing markup degrades to defaults; nothing in here returns an error.
//! - Tests run offline against saved HTML snippets.
pub mod message;
pub mod thread;
