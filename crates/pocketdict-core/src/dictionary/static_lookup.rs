use core::convert::Infallible;

use super::{MAX_RESULTS, WordEntry, WordList, WordLookup};
use crate::text_policy::push_truncated;

/// Compiled-in dictionary entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StaticEntry<'a> {
    pub word: &'a str,
    pub phonetic: &'a str,
    pub translation: &'a str,
    pub collins: u8,
}

impl<'a> StaticEntry<'a> {
    pub const fn new(word: &'a str, phonetic: &'a str, translation: &'a str, collins: u8) -> Self {
        Self {
            word,
            phonetic,
            translation,
            collins,
        }
    }
}

/// Static in-memory word store, searched in slice order.
#[derive(Clone, Copy, Debug)]
pub struct StaticLookup<'a> {
    entries: &'a [StaticEntry<'a>],
    limit: usize,
}

impl<'a> StaticLookup<'a> {
    pub const fn new(entries: &'a [StaticEntry<'a>]) -> Self {
        Self {
            entries,
            limit: MAX_RESULTS,
        }
    }

    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = if limit > MAX_RESULTS { MAX_RESULTS } else { limit };
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WordLookup for StaticLookup<'_> {
    type Error = Infallible;

    fn search_prefix(&mut self, prefix: &str, out: &mut WordList) -> Result<(), Self::Error> {
        out.clear();
        for entry in self.entries.iter().filter(|entry| entry.word.starts_with(prefix)) {
            if out.len() >= self.limit {
                break;
            }
            let mut word = super::Word::new();
            push_truncated(&mut word, entry.word);
            if out.push(word).is_err() {
                break;
            }
        }
        Ok(())
    }

    fn detail(&mut self, word: &str, out: &mut WordEntry) -> Result<bool, Self::Error> {
        out.clear();
        let Some(entry) = self.entries.iter().find(|entry| entry.word == word) else {
            return Ok(false);
        };

        out.set_word(entry.word);
        out.set_phonetic(entry.phonetic);
        out.set_translation(entry.translation);
        out.collins = entry.collins;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRIES: [StaticEntry<'static>; 4] = [
        StaticEntry::new("aback", "ə'bæk", "adv. 向后", 1),
        StaticEntry::new("abandon", "ə'bændən", "vt. 放弃", 4),
        StaticEntry::new("abase", "ə'beis", "vt. 贬低", 0),
        StaticEntry::new("baby", "'beibi", "n. 婴儿", 5),
    ];

    #[test]
    fn prefix_search_keeps_slice_order() {
        let mut lookup = StaticLookup::new(&ENTRIES);
        let mut out = WordList::new();
        lookup.search_prefix("aba", &mut out).unwrap();

        let words: std::vec::Vec<&str> = out.iter().map(|word| word.as_str()).collect();
        assert_eq!(words, ["aback", "abandon", "abase"]);
    }

    #[test]
    fn search_honours_limit_and_replaces_output() {
        let mut lookup = StaticLookup::new(&ENTRIES).with_limit(1);
        let mut out = WordList::new();
        lookup.search_prefix("b", &mut out).unwrap();
        lookup.search_prefix("a", &mut out).unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].as_str(), "aback");
    }

    #[test]
    fn detail_reports_missing_words() {
        let mut lookup = StaticLookup::new(&ENTRIES);
        let mut entry = WordEntry::new();

        assert!(lookup.detail("abandon", &mut entry).unwrap());
        assert_eq!(entry.word.as_str(), "abandon");
        assert_eq!(entry.collins, 4);

        assert!(!lookup.detail("zebra", &mut entry).unwrap());
        assert!(entry.word.is_empty());
    }
}
