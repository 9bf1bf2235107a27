//! Dictionary query collaborator contract and entry model.
//!
//! The UI only needs two capabilities from the store: an ordered prefix
//! search and a detail fetch for a single headword. Filtering and ranking
//! are owned by the implementation.

mod static_lookup;

use core::fmt::Write as _;

use heapless::{String, Vec};

use crate::text_policy::{push_truncated, wrap_lines};

pub use static_lookup::{StaticEntry, StaticLookup};

pub const WORD_BYTES: usize = 64;
pub const MAX_RESULTS: usize = 20;
pub const PHONETIC_BYTES: usize = 96;
pub const TEXT_BYTES: usize = 1024;
pub const FORM_BYTES: usize = 64;
pub const MAX_FORMS: usize = WordForm::ALL.len();

pub type Word = String<WORD_BYTES>;
pub type WordList = Vec<Word, MAX_RESULTS>;

/// Prefix search and entry lookup over a word store.
pub trait WordLookup {
    type Error: core::fmt::Debug;

    /// Replaces `out` with the words starting with `prefix`, best match first.
    fn search_prefix(&mut self, prefix: &str, out: &mut WordList) -> Result<(), Self::Error>;

    /// Fills `out` with the entry for `word`. Returns `false` when the word
    /// is not in the store.
    fn detail(&mut self, word: &str, out: &mut WordEntry) -> Result<bool, Self::Error>;
}

impl<T: WordLookup + ?Sized> WordLookup for &mut T {
    type Error = T::Error;

    fn search_prefix(&mut self, prefix: &str, out: &mut WordList) -> Result<(), Self::Error> {
        (**self).search_prefix(prefix, out)
    }

    fn detail(&mut self, word: &str, out: &mut WordEntry) -> Result<bool, Self::Error> {
        (**self).detail(word, out)
    }
}

/// Inflected forms stored alongside a headword.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WordForm {
    Plural,
    Comparative,
    Superlative,
    Present,
    Past,
    Perfect,
    Third,
    Lemma,
}

impl WordForm {
    pub const ALL: [Self; 8] = [
        Self::Plural,
        Self::Comparative,
        Self::Superlative,
        Self::Present,
        Self::Past,
        Self::Perfect,
        Self::Third,
        Self::Lemma,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Plural => "pl.",
            Self::Comparative => "comp.",
            Self::Superlative => "sup.",
            Self::Present => "ing",
            Self::Past => "past",
            Self::Perfect => "pp.",
            Self::Third => "3rd",
            Self::Lemma => "lemma",
        }
    }
}

/// One dictionary entry, bounded for a fixed-memory UI.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WordEntry {
    pub word: Word,
    pub phonetic: String<PHONETIC_BYTES>,
    pub translation: String<TEXT_BYTES>,
    pub definition: String<TEXT_BYTES>,
    /// Collins frequency stars, 0..=5.
    pub collins: u8,
    pub oxford: bool,
    pub forms: Vec<(WordForm, String<FORM_BYTES>), MAX_FORMS>,
}

impl WordEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.word.clear();
        self.phonetic.clear();
        self.translation.clear();
        self.definition.clear();
        self.collins = 0;
        self.oxford = false;
        self.forms.clear();
    }

    pub fn set_word(&mut self, word: &str) {
        self.word.clear();
        push_truncated(&mut self.word, word);
    }

    pub fn set_phonetic(&mut self, phonetic: &str) {
        self.phonetic.clear();
        push_truncated(&mut self.phonetic, phonetic);
    }

    pub fn set_translation(&mut self, translation: &str) {
        self.translation.clear();
        push_truncated(&mut self.translation, translation);
    }

    pub fn set_definition(&mut self, definition: &str) {
        self.definition.clear();
        push_truncated(&mut self.definition, definition);
    }

    /// Records an inflected form; empty values are skipped.
    pub fn push_form(&mut self, form: WordForm, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        let mut text = String::new();
        push_truncated(&mut text, value);
        let _ = self.forms.push((form, text));
    }

    pub fn form(&self, form: WordForm) -> Option<&str> {
        self.forms
            .iter()
            .find(|(kind, _)| *kind == form)
            .map(|(_, value)| value.as_str())
    }

    /// Lays the entry out as display rows no wider than `max_px`.
    ///
    /// Order: phonetic, rank, translation, definition, inflections.
    /// Returns `false` when `out` ran out of rows.
    pub fn layout_lines<const L: usize, const N: usize>(
        &self,
        max_px: usize,
        out: &mut Vec<String<L>, N>,
    ) -> bool {
        let mut scratch: String<TEXT_BYTES> = String::new();

        let phonetic = self.phonetic.trim();
        if !phonetic.is_empty() {
            let _ = write!(scratch, "[{phonetic}]");
            if !wrap_lines(&scratch, max_px, out) {
                return false;
            }
        }

        if self.collins > 0 || self.oxford {
            scratch.clear();
            for _ in 0..self.collins.min(5) {
                let _ = scratch.push('★');
            }
            if self.oxford {
                if !scratch.is_empty() {
                    let _ = scratch.push(' ');
                }
                let _ = scratch.push_str("Oxford");
            }
            if !wrap_lines(&scratch, max_px, out) {
                return false;
            }
        }

        if !wrap_lines(&self.translation, max_px, out) {
            return false;
        }
        if !wrap_lines(&self.definition, max_px, out) {
            return false;
        }

        for (form, value) in &self.forms {
            scratch.clear();
            let _ = write!(scratch, "{}: {}", form.label(), value);
            if !wrap_lines(&scratch, max_px, out) {
                return false;
            }
        }

        true
    }
}
