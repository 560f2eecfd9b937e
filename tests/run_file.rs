// tests/run_file.rs
//
// File-reading behavior of runner::run.
//
use std::fs;
use std::io::Write;

use vote_tally::config::options::RunParams;
use vote_tally::{run, TallyError};

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.html");
    let err = run(&RunParams::new(&path)).unwrap_err();
    match err {
        TallyError::Read { path: p, .. } => assert_eq!(p, path),
    }
}

#[test]
fn invalid_utf8_is_replaced_not_fatal() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(br#"<div class="email_wrapper" id="email_m1"><pre class="chatty_body">+1 "#).unwrap();
    f.write_all(&[0xff, 0xfe]).unwrap();
    f.write_all(b"</pre></div>").unwrap();
    f.flush().unwrap();

    let summary = run(&RunParams::new(f.path())).unwrap();
    assert_eq!(summary.voters, 1);
    assert!(summary.report.contains("`+1 \u{FFFD}\u{FFFD}`"));
}

#[test]
fn reads_saved_fixture_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thread.html");
    fs::write(&path, include_str!("fixtures/vote_thread.html")).unwrap();

    let summary = run(&RunParams::new(&path)).unwrap();
    assert_eq!(summary.report, include_str!("fixtures/vote_thread.expected.md"));
}
