// src/vote/mod.rs
pub mod classify;
mod types;

pub use classify::{classify_body, Classification};
pub use types::{SortKey, Vote, VoteRecord};

use tracing::{debug, info};

use crate::config::consts::UNKNOWN_AUTHOR;
use crate::specs::{message, thread};

/// Splitter → parser → classifier. One record per email that carries a vote,
/// in document order.
pub fn parse_thread(doc: &str) -> Vec<VoteRecord> {
    parse_fragments(&thread::split_messages(doc))
}

/// Parser → classifier over already split emails.
pub fn parse_fragments(fragments: &[thread::Fragment<'_>]) -> Vec<VoteRecord> {
    info!("Thread: {} message fragments", fragments.len());

    let mut records = Vec::new();
    for frag in fragments {
        let Some(msg) = message::parse_message(frag) else {
            debug!("Message {}: no body, skipping", frag.id);
            continue;
        };
        let Some(Classification { vote, excerpt }) = classify_body(&msg.body) else {
            debug!("Message {}: no vote line", frag.id);
            continue;
        };

        let author = if msg.author.is_empty() { UNKNOWN_AUTHOR.to_string() } else { msg.author };
        let sort_key = message::parse_date_key(&msg.date_text);
        if sort_key.is_sentinel() && !msg.date_text.is_empty() {
            debug!("Message {}: unrecognized date '{}'", frag.id, msg.date_text);
        }
        debug!("Message {}: {} votes {}", frag.id, author, vote);

        records.push(VoteRecord::new(
            msg.id,
            msg.permalink,
            author,
            msg.date_text,
            sort_key,
            vote,
            excerpt,
        ));
    }

    info!("Thread: {} vote records", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_author_placeholder() {
        let doc = r#"<div class="email_wrapper" id="email_m1"><pre class="chatty_body">-1</pre></div>"#;
        let records = parse_thread(doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].author(), UNKNOWN_AUTHOR);
        assert_eq!(records[0].vote(), Vote::MinusOne);
        assert!(records[0].sort_key().is_sentinel());
    }

    #[test]
    fn quoted_vote_only_yields_nothing() {
        let doc = concat!(
            r#"<div class="email_wrapper" id="email_m1"><pre class="chatty_body">I agree with this."#,
            r#"<blockquote class="email_quote">+1<br>-1</blockquote></pre></div>"#,
        );
        assert!(parse_thread(doc).is_empty());
    }

    #[test]
    fn presplit_fragments_match_whole_document() {
        let doc = concat!(
            r#"<div class="email_wrapper" id="email_m1"><pre class="chatty_body">+1</pre></div>"#,
            r#"<div class="email_wrapper" id="email_m2"><p>no body</p></div>"#,
            r#"<div class="email_wrapper" id="email_m3"><pre class="chatty_body">-0</pre></div>"#,
        );
        let fragments = thread::split_messages(doc);
        assert_eq!(fragments.len(), 3);
        let records = parse_fragments(&fragments);
        assert_eq!(records.len(), 2);
        assert_eq!(records, parse_thread(doc));
    }
}
