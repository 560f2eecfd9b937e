// src/tally.rs
//! Per-author history and final-vote tally.
//!
//! The last vote an author cast (by timestamp) is the one that counts. Sorting is
//! stable throughout, so equal or unreadable timestamps keep document order.

use std::collections::HashMap;

use crate::vote::{Vote, VoteRecord};

/// Author → that author's records, oldest first. Authors keep first-appearance order.
#[derive(Debug, Default)]
pub struct AuthorHistory<'a> {
    entries: Vec<(&'a str, Vec<&'a VoteRecord>)>,
}

impl<'a> AuthorHistory<'a> {
    pub fn build(records: &'a [VoteRecord]) -> Self {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut entries: Vec<(&'a str, Vec<&'a VoteRecord>)> = Vec::new();

        for r in records {
            let slot = *index.entry(r.author()).or_insert_with(|| {
                entries.push((r.author(), Vec::new()));
                entries.len() - 1
            });
            entries[slot].1.push(r);
        }
        for (_, history) in &mut entries {
            history.sort_by_key(|r| r.sort_key());
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, author: &str) -> Option<&[&'a VoteRecord]> {
        self.entries.iter().find(|(a, _)| *a == author).map(|(_, h)| h.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a VoteRecord])> + '_ {
        self.entries.iter().map(|(a, h)| (*a, h.as_slice()))
    }
}

#[derive(Debug, Default)]
pub struct Tally<'a> {
    history: AuthorHistory<'a>,
    /// One per author, oldest first.
    final_votes: Vec<&'a VoteRecord>,
}

impl<'a> Tally<'a> {
    pub fn new(records: &'a [VoteRecord]) -> Self {
        Self::from_history(AuthorHistory::build(records))
    }

    pub fn from_history(history: AuthorHistory<'a>) -> Self {
        let mut final_votes: Vec<&'a VoteRecord> =
            history.iter().filter_map(|(_, h)| h.last().copied()).collect();
        final_votes.sort_by_key(|r| r.sort_key());
        Self { history, final_votes }
    }

    pub fn history(&self) -> &AuthorHistory<'a> {
        &self.history
    }

    pub fn final_votes(&self) -> &[&'a VoteRecord] {
        &self.final_votes
    }

    pub fn voters(&self) -> usize {
        self.final_votes.len()
    }

    pub fn of(&self, vote: Vote) -> Vec<&'a VoteRecord> {
        self.final_votes.iter().copied().filter(|r| r.vote() == vote).collect()
    }

    pub fn count(&self, vote: Vote) -> usize {
        self.final_votes.iter().filter(|r| r.vote() == vote).count()
    }

    /// Zero votes followed by abstentions, then ordered by time.
    pub fn zero_including_abstain(&self) -> Vec<&'a VoteRecord> {
        let mut merged = self.of(Vote::Zero);
        merged.extend(self.of(Vote::Abstain));
        merged.sort_by_key(|r| r.sort_key());
        merged
    }

    /// Authors who voted more than once, by case-insensitive name.
    pub fn changed(&self) -> Vec<(&'a str, &[&'a VoteRecord])> {
        let mut out: Vec<_> = self.history.iter().filter(|(_, h)| h.len() > 1).collect();
        out.sort_by_cached_key(|(author, _)| author.to_lowercase());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::SortKey;

    fn rec(id: &str, author: &str, key: SortKey, vote: Vote) -> VoteRecord {
        VoteRecord::new(id, format!("https://x/{id}"), author, "", key, vote, vote.label())
    }

    fn at(day: u32, hour: u32) -> SortKey {
        SortKey::new(2026, 1, day, hour, 0, 0)
    }

    #[test]
    fn last_vote_wins() {
        let records = vec![
            rec("a", "Bob", at(2, 10), Vote::PlusOne),
            rec("b", "Bob", at(3, 10), Vote::MinusOne),
        ];
        let t = Tally::new(&records);
        assert_eq!(t.voters(), 1);
        assert_eq!(t.count(Vote::MinusOne), 1);
        assert_eq!(t.count(Vote::PlusOne), 0);

        let changed = t.changed();
        assert_eq!(changed.len(), 1);
        let ids: Vec<_> = changed[0].1.iter().map(|r| r.message_id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn history_is_sorted_even_when_input_is_not() {
        let records = vec![
            rec("late", "Ann", at(5, 0), Vote::MinusOne),
            rec("early", "Ann", at(1, 0), Vote::PlusOne),
        ];
        let t = Tally::new(&records);
        assert_eq!(t.final_votes()[0].message_id(), "late");
        let ids: Vec<_> = t.history().get("Ann").unwrap().iter().map(|r| r.message_id()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn unparseable_dates_sort_last() {
        let records = vec![
            rec("u", "Una", SortKey::SENTINEL, Vote::PlusOne),
            rec("p", "Pat", at(9, 23), Vote::PlusOne),
            rec("q", "Quinn", at(1, 1), Vote::PlusOne),
        ];
        let t = Tally::new(&records);
        let ids: Vec<_> = t.final_votes().iter().map(|r| r.message_id()).collect();
        assert_eq!(ids, vec!["q", "p", "u"]);
    }

    #[test]
    fn equal_keys_keep_document_order() {
        let records = vec![
            rec("first", "Sam", SortKey::SENTINEL, Vote::PlusOne),
            rec("second", "Sam", SortKey::SENTINEL, Vote::MinusOne),
        ];
        let t = Tally::new(&records);
        assert_eq!(t.final_votes()[0].message_id(), "second");
    }

    #[test]
    fn zero_and_abstain_merge() {
        let records = vec![
            rec("z", "Zed", at(2, 0), Vote::Zero),
            rec("a", "Abe", at(1, 0), Vote::Abstain),
        ];
        let t = Tally::new(&records);
        assert_eq!(t.count(Vote::Zero), 1);
        assert_eq!(t.count(Vote::Abstain), 1);
        let ids: Vec<_> = t.zero_including_abstain().iter().map(|r| r.message_id()).collect();
        assert_eq!(ids, vec!["a", "z"]);
    }

    #[test]
    fn authors_are_case_sensitive_but_changed_order_is_not() {
        let records = vec![
            rec("1", "bea", at(1, 0), Vote::PlusOne),
            rec("2", "bea", at(2, 0), Vote::PlusOne),
            rec("3", "Alan", at(1, 0), Vote::PlusOne),
            rec("4", "Alan", at(2, 0), Vote::Zero),
            rec("5", "BEA", at(3, 0), Vote::MinusOne),
        ];
        let t = Tally::new(&records);
        assert_eq!(t.voters(), 3);
        let names: Vec<_> = t.changed().iter().map(|(a, _)| *a).collect();
        assert_eq!(names, vec!["Alan", "bea"]);
    }
}
