// src/specs/message.rs
//! Reading *spec* for a single email inside the thread page.
//!
//! Where the ground truth lives:
//! - Author and date: `<div class="chatty_author_name">Name - 2026年1月6日星期二 GMT+8 04:34:47</div>`,
//!   with a bare `<b>Name</b>` fallback.
//! - Permalink: `<a href="https://lists.apache.org/thread/..." ... title="Permanent link to this email">`.
//! - Body: `<pre class="chatty_body" ...>...</pre>`. No body, no message.
//!
//! Everything is best-effort. Missing pieces degrade to empty strings or the
//! synthesized permalink; only a missing body drops the email.

use std::sync::LazyLock;

use regex::Regex;

use super::thread::Fragment;
use crate::config::consts::{ARCHIVE_THREAD_BASE, AUTHOR_DATE_SEP, PERMALINK_TITLE};
use crate::core::html::markup_to_text;
use crate::core::sanitize::{decode_entities, normalize_ws};
use crate::vote::SortKey;

static RE_AUTHOR_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="chatty_author_name">(.*?)</div>"#).expect("valid author block pattern")
});
static RE_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="chatty_author_name">\s*<b>(.*?)</b>"#).expect("valid author pattern")
});
static RE_PERMALINK: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r#"(?s)<a\s+href="({}[^"]+)"[^>]*title="{}""#,
        regex::escape(ARCHIVE_THREAD_BASE),
        regex::escape(PERMALINK_TITLE),
    );
    Regex::new(&pattern).expect("valid permalink pattern")
});
static RE_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre class="chatty_body"[^>]*>(.*?)</pre>"#).expect("valid body pattern")
});
static RE_DATE_CN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<y>[0-9]{4})年(?P<m>[0-9]{1,2})月(?P<d>[0-9]{1,2})日.*?(?P<h>[0-9]{1,2}):(?P<mi>[0-9]{2}):(?P<s>[0-9]{2})",
    )
    .expect("valid date pattern")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedMessage {
    pub id: String,
    pub permalink: String,
    /// Empty when no author markup was found.
    pub author: String,
    pub date_text: String,
    /// Plain text with quoted replies already removed.
    pub body: String,
}

pub fn parse_message(frag: &Fragment<'_>) -> Option<ParsedMessage> {
    let body_html = RE_BODY.captures(frag.markup)?.get(1)?.as_str();
    let (author, date_text) = extract_author_date(frag.markup);

    Some(ParsedMessage {
        id: frag.id.to_string(),
        permalink: extract_permalink(frag.markup, frag.id),
        author,
        date_text,
        body: markup_to_text(body_html),
    })
}

fn extract_author_date(markup: &str) -> (String, String) {
    if let Some(block) = RE_AUTHOR_BLOCK.captures(markup).and_then(|c| c.get(1)) {
        return split_author_block(block.as_str());
    }
    match RE_AUTHOR.captures(markup).and_then(|c| c.get(1)) {
        Some(name) => (markup_to_text(name.as_str()).trim().to_string(), String::new()),
        None => (String::new(), String::new()),
    }
}

/// "Name - <date>" → (name, date). Saved pages sometimes repeat the pair
/// ("Name - <date> Name - <date>"); only the first date is kept.
pub fn split_author_block(block_html: &str) -> (String, String) {
    let text = normalize_ws(&markup_to_text(block_html));

    let Some((author, date)) = text.split_once(AUTHOR_DATE_SEP) else {
        return (text, String::new());
    };
    let author = author.trim();
    let mut date = date.trim();

    let dup_marker = format!("{author}{AUTHOR_DATE_SEP}");
    if let Some(idx) = date.find(&dup_marker) {
        date = date[..idx].trim();
    }
    (author.to_string(), date.to_string())
}

fn extract_permalink(markup: &str, id: &str) -> String {
    match RE_PERMALINK.captures(markup).and_then(|c| c.get(1)) {
        Some(href) => decode_entities(href.as_str()),
        None => format!("{ARCHIVE_THREAD_BASE}{id}"),
    }
}

/// Parse `2026年1月6日星期二 GMT+8 04:34:47` style dates.
/// Anything else sorts last via the sentinel.
pub fn parse_date_key(date_text: &str) -> SortKey {
    let Some(caps) = RE_DATE_CN.captures(date_text) else {
        return SortKey::SENTINEL;
    };
    let field = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());

    match (field("y"), field("m"), field("d"), field("h"), field("mi"), field("s")) {
        (Some(y), Some(mo), Some(d), Some(h), Some(mi), Some(s)) => SortKey::new(y, mo, d, h, mi, s),
        _ => SortKey::SENTINEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag<'a>(id: &'a str, markup: &'a str) -> Fragment<'a> {
        Fragment { id, markup }
    }

    #[test]
    fn extracts_all_fields() {
        let markup = concat!(
            r#"abc"><div class="chatty_author_name"><b>Jane Doe</b> - 2026年1月6日星期二 GMT+8 04:34:47</div>"#,
            r#"<a href="https://lists.apache.org/thread/xyz?a=1&amp;b=2" class="l" title="Permanent link to this email">#</a>"#,
            r#"<pre class="chatty_body" id="b">+1 (binding)<br>Jane</pre>"#,
        );
        let m = parse_message(&frag("abc", markup)).unwrap();
        assert_eq!(m.author, "Jane Doe");
        assert_eq!(m.date_text, "2026年1月6日星期二 GMT+8 04:34:47");
        assert_eq!(m.permalink, "https://lists.apache.org/thread/xyz?a=1&b=2");
        assert_eq!(m.body, "+1 (binding)\nJane");
    }

    #[test]
    fn missing_body_drops_message() {
        let markup = r#"abc"><div class="chatty_author_name">Jane - x</div>"#;
        assert!(parse_message(&frag("abc", markup)).is_none());
    }

    #[test]
    fn permalink_falls_back_to_message_id() {
        let markup = r#"abc"><pre class="chatty_body">+1</pre>"#;
        let m = parse_message(&frag("abc", markup)).unwrap();
        assert_eq!(m.permalink, "https://lists.apache.org/thread/abc");
        assert_eq!(m.author, "");
        assert_eq!(m.date_text, "");
    }

    #[test]
    fn bare_bold_author_when_block_never_closes() {
        let markup = r#"abc"><div class="chatty_author_name"> <b>Solo Name</b><pre class="chatty_body">+1</pre>"#;
        let m = parse_message(&frag("abc", markup)).unwrap();
        assert_eq!(m.author, "Solo Name");
        assert_eq!(m.date_text, "");
        assert_eq!(m.body, "+1");
    }

    #[test]
    fn author_without_separator_has_no_date() {
        assert_eq!(split_author_block("<b>Solo</b>\n  Name"), ("Solo Name".into(), String::new()));
    }

    #[test]
    fn duplicated_author_date_is_truncated() {
        let block = "<b>Justin Mclean</b> - 2026年1月6日 10:00:00 <span>Justin Mclean - 2026年1月6日 10:00:00</span>";
        let (author, date) = split_author_block(block);
        assert_eq!(author, "Justin Mclean");
        assert_eq!(date, "2026年1月6日 10:00:00");
    }

    #[test]
    fn quoted_reply_never_reaches_body() {
        let markup = concat!(
            r#"abc"><pre class="chatty_body">Looks fine to me."#,
            r#"<blockquote class="email_quote">+1 from the original poster</blockquote></pre>"#,
        );
        let m = parse_message(&frag("abc", markup)).unwrap();
        assert!(!m.body.contains("+1"));
    }

    #[test]
    fn parses_cjk_date_key() {
        assert_eq!(
            parse_date_key("2026年1月6日星期二 GMT+8 04:34:47"),
            SortKey::new(2026, 1, 6, 4, 34, 47)
        );
        assert_eq!(parse_date_key("Tue, 6 Jan 2026 04:34:47 GMT"), SortKey::SENTINEL);
        assert_eq!(parse_date_key(""), SortKey::SENTINEL);
    }
}
