// src/specs/thread.rs
//! Reading *spec* for the thread page.
//!
//! Purpose:
//! - Cut a saved thread page into one [`Fragment`] per email.
//! - Each email block opens with `<div class="email_wrapper" id="email_<ID>"`; consecutive
//!   markers delimit consecutive emails. Whatever precedes the first marker is page chrome
//!   and is dropped.
//!
//! Non-Responsibilities:
//! - Nothing inside a fragment is interpreted here; see `specs::message`.
//!
//! A page with no markers yields no fragments. That is "nothing to tally", not an error.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static RE_SPLIT_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="email_wrapper"\s+id="email_"#).expect("valid email boundary pattern")
});

/// Markup belonging to one email, starting right after its `id="email_` marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub id: &'a str,
    pub markup: &'a str,
}

pub fn split_messages(doc: &str) -> Vec<Fragment<'_>> {
    let mut parts = RE_SPLIT_EMAIL.split(doc);
    let _preamble = parts.next();

    parts
        .enumerate()
        .filter_map(|(i, markup)| match message_id(markup) {
            Some(id) => Some(Fragment { id, markup }),
            None => {
                debug!("Thread: fragment #{i} has no message id, skipping");
                None
            }
        })
        .collect()
}

/// The id runs up to the attribute's closing quote.
fn message_id(markup: &str) -> Option<&str> {
    let (id, _) = markup.split_once('"')?;
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_each_email_wrapper() {
        let doc = concat!(
            "<html><head>preamble</head>",
            r#"<div class="email_wrapper" id="email_abc123"><p>one</p></div>"#,
            r#"<div class="email_wrapper"   id="email_def456"><p>two</p></div>"#,
        );
        let frags = split_messages(doc);
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].id, "abc123");
        assert!(frags[0].markup.contains("one"));
        assert!(!frags[0].markup.contains("two"));
        assert_eq!(frags[1].id, "def456");
    }

    #[test]
    fn no_boundary_means_no_fragments() {
        assert!(split_messages("<html><body>nothing here</body></html>").is_empty());
        assert!(split_messages("").is_empty());
    }

    #[test]
    fn fragment_without_id_is_skipped() {
        let doc = concat!(
            r#"x<div class="email_wrapper" id="email_"><pre>empty id</pre>"#,
            r#"<div class="email_wrapper" id="email_ok1">fine"</div>"#,
            r#"<div class="email_wrapper" id="email_no quote ever"#,
        );
        let ids: Vec<_> = split_messages(doc).iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["ok1"]);
    }
}
