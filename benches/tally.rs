// benches/tally.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vote_tally::config::options::RunParams;
use vote_tally::summarize;
use vote_tally::vote::parse_thread;

/// A few hundred emails: votes, quoted replies and discussion, a handful of repeat voters.
fn synthetic_thread(n: usize) -> String {
    let mut doc = String::from("<html><body><h2>[VOTE] Release</h2>");
    for i in 0..n {
        let body = match i % 5 {
            0 => "+1 (binding)<br>checked sigs".to_string(),
            1 => r#"Thanks!<blockquote class="email_quote">+1 (binding)</blockquote>"#.to_string(),
            2 => "-1 missing NOTICE".to_string(),
            3 => "[ ] +1 approve<br>[ ] -1 disapprove<br>+0".to_string(),
            _ => "Discussion only, no vote here.<br>Cheers".to_string(),
        };
        doc.push_str(&format!(
            r#"<div class="email_wrapper" id="email_{i}"><div class="chatty_author_name"><b>Voter {}</b> - 2026年1月{}日星期二 GMT+8 {:02}:{:02}:00</div><pre class="chatty_body">{body}</pre></div>"#,
            i % 120, 1 + i % 28, i % 24, i % 60,
        ));
    }
    doc.push_str("</body></html>");
    doc
}

fn bench_pipeline(c: &mut Criterion) {
    let doc = synthetic_thread(400);
    let params = RunParams::new("bench.html");

    c.bench_function("parse_thread", |b| {
        b.iter(|| black_box(parse_thread(black_box(&doc))).len())
    });

    c.bench_function("summarize", |b| {
        b.iter(|| black_box(summarize(black_box(&doc), &params)).voters)
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
