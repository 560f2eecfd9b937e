// src/report.rs
//! Markdown rendering of a [`Tally`].
//!
//! Layout: summary, `+1` list, `0 (including abstain)` list, `-1` list, then the
//! changed-vote audit section when at least one author voted more than once.
//! Empty lists render a "none" bullet so every section is always present.

use std::fmt::Write as _;

use crate::config::options::{Lang, ReportOptions};
use crate::tally::Tally;
use crate::vote::{Vote, VoteRecord};

struct Labels {
    summary: &'static str,
    voters: &'static str,
    zero_section: &'static str,
    changed: &'static str,
    none: &'static str,
    excerpt: &'static str,
    /// Opens the abstain sub-count in the summary line.
    abstain_of: &'static str,
    /// Wraps a date, e.g. "(…)".
    open: &'static str,
    close: &'static str,
    colon: &'static str,
}

const EN: Labels = Labels {
    summary: "Summary",
    voters: "Distinct voters",
    zero_section: "0 (including abstain)",
    abstain_of: " (abstain",
    changed: "Changed / repeated votes (last vote counts)",
    none: "(none)",
    excerpt: "Excerpt",
    open: "(",
    close: ")",
    colon: ": ",
};

const ZH: Labels = Labels {
    summary: "总览",
    voters: "有效投票人数",
    zero_section: "0（含 abstain）",
    abstain_of: "（其中 abstain",
    changed: "改票/多次投票记录（以最后一票计入）",
    none: "（无）",
    excerpt: "摘录",
    open: "（",
    close: "）",
    colon: "：",
};

fn labels(lang: Lang) -> &'static Labels {
    match lang {
        Lang::En => &EN,
        Lang::Zh => &ZH,
    }
}

pub fn render_markdown(tally: &Tally<'_>, opts: &ReportOptions) -> String {
    let l = labels(opts.lang);
    let mut out = String::new();

    let plus = tally.of(Vote::PlusOne);
    let minus = tally.of(Vote::MinusOne);
    let zero_like = tally.zero_including_abstain();
    let abstain = tally.count(Vote::Abstain);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "## {}", l.summary);
    let _ = writeln!(out, "- **{}**{}{}", l.voters, l.colon, tally.voters());
    let _ = writeln!(out, "- **+1**{}{}", l.colon, plus.len());
    let _ = writeln!(out, "- **-1**{}{}", l.colon, minus.len());
    let _ = writeln!(
        out,
        "- **{}**{}{}{}{}{}{}",
        l.zero_section, l.colon, zero_like.len(), l.abstain_of, l.colon, abstain, l.close,
    );
    out.push('\n');

    render_group(&mut out, l, "+1", &plus);
    render_group(&mut out, l, l.zero_section, &zero_like);
    render_group(&mut out, l, "-1", &minus);

    let changed = tally.changed();
    if !changed.is_empty() {
        let _ = writeln!(out, "## {}", l.changed);
        for (author, history) in changed {
            let _ = writeln!(out, "- **{author}**{}", l.colon.trim_end());
            for r in history {
                let _ = writeln!(
                    out,
                    "  - {} [{}]({}) ` {} `",
                    date_part(l, r), r.vote(), r.permalink(), r.excerpt(),
                );
            }
        }
        out.push('\n');
    }

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

fn date_part(l: &Labels, r: &VoteRecord) -> String {
    if r.date_text().is_empty() {
        String::new()
    } else {
        format!("{}{}{}", l.open, r.date_text(), l.close)
    }
}

fn render_group(out: &mut String, l: &Labels, title: &str, records: &[&VoteRecord]) {
    let _ = writeln!(out, "## {title}");
    if records.is_empty() {
        let _ = writeln!(out, "- {}", l.none);
        out.push('\n');
        return;
    }
    for r in records {
        let _ = writeln!(
            out,
            "- **{}** {}{}[{}]({})",
            r.author(), date_part(l, r), l.colon, r.vote(), r.permalink(),
        );
        let _ = writeln!(out, "  - {}{}`{}`", l.excerpt, l.colon, r.excerpt());
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::SortKey;

    #[test]
    fn empty_tally_renders_zeros_and_placeholders() {
        let records: Vec<VoteRecord> = Vec::new();
        let md = render_markdown(&Tally::new(&records), &ReportOptions::default());
        assert_eq!(
            md,
            "## Summary\n\
             - **Distinct voters**: 0\n\
             - **+1**: 0\n\
             - **-1**: 0\n\
             - **0 (including abstain)**: 0 (abstain: 0)\n\
             \n\
             ## +1\n\
             - (none)\n\
             \n\
             ## 0 (including abstain)\n\
             - (none)\n\
             \n\
             ## -1\n\
             - (none)\n"
        );
    }

    #[test]
    fn renders_entry_with_date_link_and_excerpt() {
        let records = vec![VoteRecord::new(
            "m1", "https://lists.apache.org/thread/m1", "Jane", "2026年1月6日 04:34:47",
            SortKey::new(2026, 1, 6, 4, 34, 47), Vote::PlusOne, "+1 (binding)",
        )];
        let md = render_markdown(&Tally::new(&records), &ReportOptions::default());
        assert!(md.contains(
            "- **Jane** (2026年1月6日 04:34:47): [+1](https://lists.apache.org/thread/m1)\n  - Excerpt: `+1 (binding)`\n"
        ));
        assert!(!md.contains("## Changed"));
    }

    #[test]
    fn changed_entries_pad_excerpt_and_keep_slot_for_missing_date() {
        let records = vec![
            VoteRecord::new("a", "https://x/a", "Kim", "", SortKey::new(2026, 1, 1, 0, 0, 0), Vote::MinusOne, "-1"),
            VoteRecord::new("b", "https://x/b", "Kim", "", SortKey::new(2026, 1, 2, 0, 0, 0), Vote::PlusOne, "+1"),
        ];
        let md = render_markdown(&Tally::new(&records), &ReportOptions::default());
        assert!(md.ends_with(
            "- **Kim**:\n  -  [-1](https://x/a) ` -1 `\n  -  [+1](https://x/b) ` +1 `\n"
        ));
    }

    #[test]
    fn chinese_labels() {
        let records = vec![
            VoteRecord::new("a", "https://x/a", "Li", "", SortKey::SENTINEL, Vote::Abstain, "弃权"),
        ];
        let opts = ReportOptions { lang: Lang::Zh };
        let md = render_markdown(&Tally::new(&records), &opts);
        assert!(md.starts_with("## 总览\n- **有效投票人数**：1\n"));
        assert!(md.contains("- **0（含 abstain）**：1（其中 abstain：1）\n"));
        assert!(md.contains("- **Li** ：[abstain](https://x/a)\n  - 摘录：`弃权`\n"));
        assert!(md.contains("## +1\n- （无）\n"));
    }
}
