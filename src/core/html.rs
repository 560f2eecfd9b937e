// src/core/html.rs
// Markup-to-text helpers tailored to the archive's thread rendering.
// Tag detection is case-insensitive on ASCII tag/attribute names.

use std::sync::LazyLock;

use regex::Regex;

use super::sanitize::{decode_entities, normalize_newlines};

static RE_BR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|<br\s+[^>]*?>").expect("valid <br> pattern"));
static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

const QUOTE_OPEN: &str = r#"<blockquote class="email_quote""#;
const BLOCKQUOTE_OPEN: &str = "<blockquote";
const BLOCKQUOTE_CLOSE: &str = "</blockquote>";

/// Fast ASCII-only lowercasing for tag/attribute matching.
/// Byte offsets in the result line up with the input.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Remove every quoted-reply block, including any blockquotes nested inside it.
/// An unterminated quote swallows the rest of the input.
pub fn remove_quote_blocks(s: &str) -> String {
    let lc = to_lower(s);
    let open_lc = to_lower(QUOTE_OPEN);

    let mut out = String::with_capacity(s.len());
    let mut pos = 0usize;
    while let Some(rel) = lc[pos..].find(&open_lc) {
        let start = pos + rel;
        out.push_str(&s[pos..start]);
        match matching_close(&lc, start) {
            Some(end) => pos = end,
            None => return out,
        }
    }
    out.push_str(&s[pos..]);
    out
}

/// `start` points at an opening `<blockquote`. Returns the offset just past
/// the `</blockquote>` that balances it.
fn matching_close(lc: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = start;
    loop {
        let next_open = lc[pos..].find(BLOCKQUOTE_OPEN).map(|i| i + pos);
        let next_close = lc[pos..].find(BLOCKQUOTE_CLOSE).map(|i| i + pos)?;
        match next_open {
            Some(o) if o < next_close => {
                depth += 1;
                pos = o + BLOCKQUOTE_OPEN.len();
            }
            _ => {
                depth -= 1;
                pos = next_close + BLOCKQUOTE_CLOSE.len();
                if depth == 0 {
                    return Some(pos);
                }
            }
        }
    }
}

pub fn br_to_newlines(s: &str) -> String {
    RE_BR.replace_all(s, "\n").into_owned()
}

/// Drop every `<...>` tag. Whitespace is preserved.
pub fn strip_tags(s: &str) -> String {
    RE_TAG.replace_all(s, "").into_owned()
}

/// Turn a markup fragment into plain multi-line text.
/// Quoted replies go first so nothing inside them reaches the text.
pub fn markup_to_text(fragment: &str) -> String {
    let unquoted = remove_quote_blocks(fragment);
    let broken = br_to_newlines(&unquoted);
    let text = strip_tags(&broken);
    normalize_newlines(&decode_entities(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_flat_and_nested_quotes() {
        let flat = r#"+1<blockquote class="email_quote">-1</blockquote> ok"#;
        assert_eq!(remove_quote_blocks(flat), "+1 ok");

        let nested = concat!(
            r#"a<blockquote class="email_quote">q1"#,
            r#"<blockquote class="email_quote">q2</blockquote>q3</blockquote>b"#,
        );
        assert_eq!(remove_quote_blocks(nested), "ab");
    }

    #[test]
    fn unterminated_quote_drops_tail() {
        let s = r#"keep<BLOCKQUOTE class="email_quote">+1 never closed"#;
        assert_eq!(remove_quote_blocks(s), "keep");
    }

    #[test]
    fn other_blockquotes_are_left_alone() {
        let s = "<blockquote>plain</blockquote>";
        assert_eq!(remove_quote_blocks(s), s);
    }

    #[test]
    fn br_variants_become_newlines() {
        assert_eq!(br_to_newlines("a<br>b<BR/>c<br />d<br class=\"x\">e"), "a\nb\nc\nd\ne");
    }

    #[test]
    fn markup_to_text_pipeline() {
        let s = "<span>+1</span> &amp; thanks<br>\r\n<i>--</i>";
        assert_eq!(markup_to_text(s), "+1 & thanks\n\n--");
    }

    #[test]
    fn escaped_markup_is_not_stripped_twice() {
        assert_eq!(markup_to_text("&lt;b&gt;not a tag&lt;/b&gt;"), "<b>not a tag</b>");
    }
}
