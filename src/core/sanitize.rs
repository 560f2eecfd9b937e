// src/core/sanitize.rs

use super::entities;

/// Longest run of name characters considered after `&`.
const MAX_NAME_CHARS: usize = 32;

/// Decode HTML character references the way an HTML5 parser does.
///
/// Named references use the full HTML5 table; legacy names (`&amp`, `&eacute`)
/// and numeric references (`&#39`) decode without the trailing `;`. An unknown
/// name falls back to its longest known prefix, else it is kept verbatim.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let used = match after.strip_prefix('#') {
            Some(num) => decode_numeric(num, &mut out).map(|n| n + 1),
            None => decode_named(after, &mut out),
        };
        match used {
            Some(n) => rest = &after[n..],
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// `num` follows `&#`. Pushes the decoded text, returns bytes consumed after `#`.
fn decode_numeric(num: &str, out: &mut String) -> Option<usize> {
    let (digits, radix, prefix) = match num.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16, 1),
        None => (num, 10, 0),
    };
    let len = digits.bytes().take_while(|b| match radix {
        16 => b.is_ascii_hexdigit(),
        _ => b.is_ascii_digit(),
    }).count();
    if len == 0 {
        return None;
    }
    let semi = usize::from(digits[len..].starts_with(';'));

    // Overflow means far past U+10FFFF.
    let cp = u32::from_str_radix(&digits[..len], radix).unwrap_or(u32::MAX);
    if let Some(fixed) = entities::charref_fixup(cp) {
        out.push_str(fixed);
    } else if (0xD800..=0xDFFF).contains(&cp) || cp > 0x10FFFF {
        out.push('\u{FFFD}');
    } else if !entities::is_dropped_codepoint(cp) {
        out.extend(char::from_u32(cp));
    }
    Some(prefix + len + semi)
}

/// `after` follows `&`. Pushes the decoded text, returns bytes consumed.
fn decode_named(after: &str, out: &mut String) -> Option<usize> {
    let name_len: usize = after
        .chars()
        .take_while(|c| !matches!(*c, '\t' | '\n' | '\x0c' | ' ' | '<' | '&' | '#' | ';'))
        .take(MAX_NAME_CHARS)
        .map(char::len_utf8)
        .sum();
    if name_len == 0 {
        return None;
    }
    let full = name_len + usize::from(after[name_len..].starts_with(';'));
    let candidate = &after[..full];

    if let Some(text) = entities::lookup(candidate) {
        out.push_str(text);
        return Some(full);
    }
    // Longest known prefix of at least two chars; the remainder stays as text.
    let cuts: Vec<usize> = candidate.char_indices().map(|(i, _)| i).skip(2).collect();
    for &cut in cuts.iter().rev() {
        if let Some(text) = entities::lookup(&candidate[..cut]) {
            out.push_str(text);
            out.push_str(&candidate[cut..]);
            return Some(full);
        }
    }
    out.push('&');
    out.push_str(candidate);
    Some(full)
}

/// Collapse sequences of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Fold `\r\n` and lone `\r` into `\n`.
pub fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_references() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("it&#39;s &#x2B;1"), "it's +1");
        assert_eq!(decode_entities("x&nbsp;y"), "x\u{A0}y");
    }

    #[test]
    fn decodes_full_html5_names() {
        assert_eq!(decode_entities("Jos&eacute; M&uuml;ller"), "José Müller");
        assert_eq!(decode_entities("&hellip;&rarr;&NotEqualTilde;"), "…→\u{2242}\u{338}");
    }

    #[test]
    fn legacy_forms_without_semicolon() {
        assert_eq!(decode_entities("+1 &#39binding&#39 &amp thanks"), "+1 'binding' & thanks");
        assert_eq!(decode_entities("&ampx; &notit;"), "&x; ¬it;");
        assert_eq!(decode_entities("&#x41BC"), "\u{41BC}");
    }

    #[test]
    fn leaves_unknown_or_bare_ampersands() {
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&bogus; a & b &#; &"), "&bogus; a & b &#; &");
    }

    #[test]
    fn numeric_fixups() {
        assert_eq!(decode_entities("&#0; &#xD800; &#99999999999;"), "\u{FFFD} \u{FFFD} \u{FFFD}");
        assert_eq!(decode_entities("&#128;&#x92;"), "€’");
        assert_eq!(decode_entities("a&#1;b"), "ab");
    }

    #[test]
    fn whitespace_and_newlines() {
        assert_eq!(normalize_ws("  Alice \n\t Smith  "), "Alice Smith");
        assert_eq!(normalize_newlines("a\r\nb\rc\n"), "a\nb\nc\n");
    }
}
