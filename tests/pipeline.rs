// tests/pipeline.rs
//
// Whole-pipeline checks against in-memory thread pages.
//
use vote_tally::config::options::{Lang, RunParams};
use vote_tally::summarize;
use vote_tally::vote::{parse_thread, Vote};

const FIXTURE: &str = include_str!("fixtures/vote_thread.html");
const EXPECTED: &str = include_str!("fixtures/vote_thread.expected.md");

fn email(id: &str, author: &str, date: &str, body: &str) -> String {
    format!(
        r#"<div class="email_wrapper" id="email_{id}"><div class="chatty_author_name"><b>{author}</b> - {date}</div><pre class="chatty_body">{body}</pre></div>"#
    )
}

fn page(emails: &[String]) -> String {
    format!("<html><body><h2>[VOTE] thing</h2>{}</body></html>", emails.concat())
}

fn params() -> RunParams {
    RunParams::new("unused.html")
}

#[test]
fn fixture_report_matches_golden() {
    let summary = summarize(FIXTURE, &params());
    assert_eq!(summary.messages, 9);
    assert_eq!(summary.records, 6);
    assert_eq!(summary.voters, 5);
    assert_eq!(summary.report, EXPECTED);
}

#[test]
fn fixture_report_in_chinese() {
    let summary = summarize(FIXTURE, &params().with_lang(Lang::Zh));
    assert!(summary.report.contains("- **0（含 abstain）**：3（其中 abstain：2）\n"));
    assert!(summary.report.contains("## 改票/多次投票记录（以最后一票计入）\n- **Carol Wu**：\n"));
}

#[test]
fn no_boundaries_gives_all_zero_report() {
    let summary = summarize("<html><body><p>+1</p></body></html>", &params());
    assert_eq!(summary.messages, 0);
    assert_eq!(summary.voters, 0);
    assert!(summary.report.contains("- **Distinct voters**: 0\n"));
    assert!(summary.report.contains("- **0 (including abstain)**: 0 (abstain: 0)\n"));
    assert_eq!(summary.report.matches("- (none)\n").count(), 3);
}

#[test]
fn three_authors_plus_zero_abstain() {
    let doc = page(&[
        email("a", "Ann", "2026年2月1日 GMT+8 10:00:00", "+1"),
        email("b", "Ben", "2026年2月1日 GMT+8 11:00:00", "0"),
        email("c", "Cat", "2026年2月1日 GMT+8 12:00:00", "abstain"),
    ]);
    let r = summarize(&doc, &params()).report;
    assert!(r.contains("- **Distinct voters**: 3\n"));
    assert!(r.contains("- **+1**: 1\n"));
    assert!(r.contains("- **-1**: 0\n"));
    assert!(r.contains("- **0 (including abstain)**: 2 (abstain: 1)\n"));
    assert!(r.contains("## +1\n- **Ann**"));
    assert!(r.contains("## 0 (including abstain)\n- **Ben**"));
    assert!(r.contains("[abstain](https://lists.apache.org/thread/c)"));
    assert!(r.contains("## -1\n- (none)\n"));
    assert!(!r.contains("## Changed"));
}

#[test]
fn minus_then_plus_counts_final_plus() {
    let doc = page(&[
        email("late", "Dee", "2026年2月2日 GMT+8 09:00:00", "+1 after the fix"),
        email("early", "Dee", "2026年2月1日 GMT+8 09:00:00", "-1 broken build"),
    ]);
    let r = summarize(&doc, &params()).report;
    assert!(r.contains("- **+1**: 1\n"));
    assert!(r.contains("- **-1**: 0\n"));

    let changed = &r[r.find("## Changed").expect("changed section")..];
    let early = changed.find("thread/early").unwrap();
    let late = changed.find("thread/late").unwrap();
    assert!(early < late);
}

#[test]
fn quoted_and_ballot_votes_are_ignored() {
    let doc = page(&[
        email("q", "Quo", "2026年3月1日 10:00:00",
              r#"Agree with the above.<blockquote class="email_quote">+1</blockquote>"#),
        email("t", "Tem", "2026年3月1日 11:00:00", "[ ] +1 approve<br>[ ] -1 disapprove"),
    ]);
    assert!(parse_thread(&doc).is_empty());
}

#[test]
fn unparseable_dates_sort_last_regardless_of_input_order() {
    let doc = page(&[
        email("x", "Xia", "Tue, 3 Mar 2026 10:00:00 GMT", "+1"),
        email("y", "Yan", "2026年3月9日 10:00:00", "+1"),
        email("z", "Zoe", "2026年3月1日 10:00:00", "+1"),
    ]);
    let r = summarize(&doc, &params()).report;
    let pos = |name: &str| r.find(&format!("**{name}**")).unwrap();
    assert!(pos("Zoe") < pos("Yan"));
    assert!(pos("Yan") < pos("Xia"));
}

#[test]
fn same_input_same_output() {
    let a = summarize(FIXTURE, &params());
    let b = summarize(FIXTURE, &params());
    assert_eq!(a, b);
}

#[test]
fn records_carry_trimmed_excerpt_and_vote() {
    let doc = page(&[email("e", "Eve", "", "Hello<br>   -0 meh   <br>+1")]);
    let records = parse_thread(&doc);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].vote(), Vote::Zero);
    assert_eq!(records[0].excerpt(), "-0 meh");
    assert_eq!(records[0].date_text(), "");
}
