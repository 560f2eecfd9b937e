// src/vote/types.rs
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vote {
    PlusOne,
    MinusOne,
    Zero,
    Abstain,
}

impl Vote {
    pub fn label(&self) -> &'static str {
        match self {
            Vote::PlusOne => "+1",
            Vote::MinusOne => "-1",
            Vote::Zero => "0",
            Vote::Abstain => "abstain",
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sortable timestamp: year, month, day, hour, minute, second.
///
/// Field order gives calendar order under the derived `Ord`. Messages whose
/// date could not be read get [`SortKey::SENTINEL`] and land after all others.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl SortKey {
    pub const SENTINEL: SortKey = SortKey::new(9999, 12, 31, 23, 59, 59);

    pub const fn new(year: u32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self { year, month, day, hour, minute, second }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::SENTINEL
    }
}

/// One message that carried a recognized vote. Read-only once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteRecord {
    message_id: String,
    permalink: String,
    author: String,
    date_text: String,
    sort_key: SortKey,
    vote: Vote,
    excerpt: String,
}

impl VoteRecord {
    pub fn new(
        message_id: impl Into<String>,
        permalink: impl Into<String>,
        author: impl Into<String>,
        date_text: impl Into<String>,
        sort_key: SortKey,
        vote: Vote,
        excerpt: impl Into<String>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            permalink: permalink.into(),
            author: author.into(),
            date_text: date_text.into(),
            sort_key,
            vote,
            excerpt: excerpt.into(),
        }
    }

    pub fn message_id(&self) -> &str { &self.message_id }
    pub fn permalink(&self) -> &str { &self.permalink }
    pub fn author(&self) -> &str { &self.author }
    pub fn date_text(&self) -> &str { &self.date_text }
    pub fn sort_key(&self) -> SortKey { self.sort_key }
    pub fn vote(&self) -> Vote { self.vote }
    pub fn excerpt(&self) -> &str { &self.excerpt }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_sorts_after_real_dates() {
        let real = SortKey::new(2026, 1, 6, 4, 34, 47);
        assert!(real < SortKey::SENTINEL);
        assert!(SortKey::new(2026, 1, 6, 4, 34, 47) < SortKey::new(2026, 1, 6, 4, 35, 0));
        assert!(SortKey::default().is_sentinel());
    }
}
