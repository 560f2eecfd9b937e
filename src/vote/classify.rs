// src/vote/classify.rs
//! Line-level vote classification.
//!
//! A body is scanned top to bottom. Noise lines (quotes, ballot templates,
//! list footers) are skipped first; every other line is tested against
//! [`RULES`] in order and the first hit decides the vote for the whole message.

use std::sync::LazyLock;

use regex::Regex;

use super::types::Vote;
use crate::config::consts::FOOTER_PREFIXES;

static RE_ABSTAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(abstain|abstention)\b").expect("valid abstain pattern"));
static RE_PLUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*\+1\b").expect("valid +1 pattern"));
static RE_MINUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-1\b").expect("valid -1 pattern"));
// Unsigned "0" counts too: a body opening with "0 comments" is a zero vote.
static RE_ZERO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[+-]?0\b").expect("valid 0 pattern"));

const ABSTAIN_CJK: &str = "弃权";

type Rule = (Vote, fn(&str) -> bool);

/// Classification rules in precedence order.
pub const RULES: [Rule; 4] = [
    (Vote::Abstain, |l: &str| RE_ABSTAIN.is_match(l) || l.contains(ABSTAIN_CJK)),
    (Vote::PlusOne, |l: &str| RE_PLUS.is_match(l)),
    (Vote::MinusOne, |l: &str| RE_MINUS.is_match(l)),
    (Vote::Zero, |l: &str| RE_ZERO.is_match(l)),
];

/// Lines that look vote-like but never are. `line` is already trimmed.
const SKIPS: [fn(&str) -> bool; 3] = [
    is_quote_line,
    is_ballot_template,
    is_list_footer,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub vote: Vote,
    /// The trimmed line that matched.
    pub excerpt: String,
}

fn is_quote_line(line: &str) -> bool {
    line.starts_with('>')
}

/// "[ ] +1 approve" and friends from the ballot in the opening mail.
fn is_ballot_template(line: &str) -> bool {
    line.starts_with('[') && ["+1", "-1", "0"].iter().any(|tok| line.contains(tok))
}

fn is_list_footer(line: &str) -> bool {
    FOOTER_PREFIXES.iter().any(|p| line.starts_with(p))
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

pub fn classify_line(line: &str) -> Option<Vote> {
    RULES.iter().find(|(_, matches)| matches(line)).map(|(vote, _)| *vote)
}

/// First vote line in the body, if any.
pub fn classify_body(text: &str) -> Option<Classification> {
    text.split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !SKIPS.iter().any(|skip| skip(*line)))
        .find_map(|line| {
            classify_line(line).map(|vote| Classification { vote, excerpt: line.to_string() })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote_of(body: &str) -> Option<Vote> {
        classify_body(body).map(|c| c.vote)
    }

    #[test]
    fn recognizes_each_category() {
        assert_eq!(vote_of("+1 (binding)"), Some(Vote::PlusOne));
        assert_eq!(vote_of("-1, the license header is missing"), Some(Vote::MinusOne));
        assert_eq!(vote_of("+0"), Some(Vote::Zero));
        assert_eq!(vote_of("-0 not sure"), Some(Vote::Zero));
        assert_eq!(vote_of("0"), Some(Vote::Zero));
        assert_eq!(vote_of("Abstain."), Some(Vote::Abstain));
        assert_eq!(vote_of("ABSTENTION from me"), Some(Vote::Abstain));
        assert_eq!(vote_of("我投弃权票"), Some(Vote::Abstain));
    }

    #[test]
    fn requires_word_boundary() {
        assert_eq!(vote_of("+10 to this idea"), None);
        assert_eq!(vote_of("-100"), None);
        assert_eq!(vote_of("0day exploit discussed below"), None);
        assert_eq!(vote_of("abstaining for now"), None);
    }

    #[test]
    fn bare_zero_prefix_counts_as_zero() {
        assert_eq!(vote_of("0 comments from my side"), Some(Vote::Zero));
    }

    #[test]
    fn first_vote_line_wins_and_excerpt_is_trimmed() {
        let body = "Hi all,\n\n   +1 binding   \n-1\n";
        let c = classify_body(body).unwrap();
        assert_eq!(c.vote, Vote::PlusOne);
        assert_eq!(c.excerpt, "+1 binding");
    }

    #[test]
    fn abstain_outranks_plus_one_on_same_line() {
        assert_eq!(vote_of("+1 ... just kidding, 弃权"), Some(Vote::Abstain));
    }

    #[test]
    fn ballot_template_lines_are_skipped() {
        assert_eq!(vote_of("[ ] +1 approve"), None);
        assert_eq!(vote_of("[ ] +1 approve\n[ ] 0 no opinion\n[ ] -1 disapprove because..."), None);
        assert_eq!(vote_of("[ ] +1 approve\n+1"), Some(Vote::PlusOne));
    }

    #[test]
    fn quote_and_footer_lines_are_skipped() {
        assert_eq!(vote_of("> +1\n>> -1"), None);
        let footer = "To unsubscribe, e-mail: dev-unsubscribe@x.apache.org\n\
                      For additional commands, e-mail: dev-help@x.apache.org";
        assert_eq!(vote_of(footer), None);
    }

    #[test]
    fn discussion_without_votes_is_none() {
        assert_eq!(vote_of("Thanks for driving the release!\n\nCheers"), None);
        assert_eq!(vote_of(""), None);
    }

    #[test]
    fn all_line_endings_split() {
        assert_eq!(vote_of("hello\r-1"), Some(Vote::MinusOne));
        assert_eq!(vote_of("hello\u{2028}+1"), Some(Vote::PlusOne));
    }
}
