//! ECDICT word store on SQLite.
//!
//! Every user-supplied value reaches SQL as a bound parameter; the statement
//! text is assembled only from fixed fragments chosen by [`SearchPolicy`].

use std::path::Path;

use log::{debug, info};
use pocketdict_core::{
    dictionary::{MAX_RESULTS, WORD_BYTES, Word, WordEntry, WordForm, WordList, WordLookup},
    text_policy::push_truncated,
};
use rusqlite::{Connection, OpenFlags, OptionalExtension, ToSql, params};

use crate::error::{HalError, Result};

/// Translation markers of senses that are not worth showing on their own.
const DOMAIN_TAGS: [&str; 5] = ["[网络]", "[地名]", "[医]", "[药]", "[化]"];
const ABBREVIATION_TAG: &str = "abbr.";

const DETAIL_SQL: &str = "SELECT word, phonetic, translation, definition, collins, oxford, \
     plural, comparative, superlative, present, past, perfect, third, lemma \
     FROM ecdict WHERE word = ?1 LIMIT 1";
const FORM_COLUMN: usize = 6;

/// Which headwords a prefix search returns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchPolicy {
    limit: usize,
    exclude_phrases: bool,
    require_collins: bool,
    exclude_abbreviations: bool,
    exclude_domain_tags: bool,
    exclude_parenthesised: bool,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            limit: MAX_RESULTS,
            exclude_phrases: true,
            require_collins: true,
            exclude_abbreviations: true,
            exclude_domain_tags: true,
            exclude_parenthesised: true,
        }
    }
}

impl SearchPolicy {
    /// Result cap, clamped to `1..=MAX_RESULTS`.
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = if limit == 0 {
            1
        } else if limit > MAX_RESULTS {
            MAX_RESULTS
        } else {
            limit
        };
        self
    }

    pub const fn with_exclude_phrases(mut self, exclude_phrases: bool) -> Self {
        self.exclude_phrases = exclude_phrases;
        self
    }

    pub const fn with_require_collins(mut self, require_collins: bool) -> Self {
        self.require_collins = require_collins;
        self
    }

    pub const fn with_exclude_abbreviations(mut self, exclude_abbreviations: bool) -> Self {
        self.exclude_abbreviations = exclude_abbreviations;
        self
    }

    pub const fn with_exclude_domain_tags(mut self, exclude_domain_tags: bool) -> Self {
        self.exclude_domain_tags = exclude_domain_tags;
        self
    }

    pub const fn with_exclude_parenthesised(mut self, exclude_parenthesised: bool) -> Self {
        self.exclude_parenthesised = exclude_parenthesised;
        self
    }

    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Translation fragments that disqualify a single-line entry.
    fn excluded_fragments(&self) -> Vec<&'static str> {
        let mut fragments = Vec::new();
        if self.exclude_abbreviations {
            fragments.push(ABBREVIATION_TAG);
        }
        if self.exclude_domain_tags {
            fragments.extend_from_slice(&DOMAIN_TAGS);
        }
        fragments
    }

    /// `?1` is the LIKE pattern, `?2` the limit, `?3` the headword byte cap,
    /// `?4..` the fragments.
    ///
    /// Oversized headwords are filtered before `LIMIT` so a page stays full.
    fn search_sql(&self, fragment_count: usize) -> String {
        let mut sql = String::from(
            "SELECT word FROM ecdict WHERE word LIKE ?1 ESCAPE '\\' \
             AND length(CAST(word AS BLOB)) <= ?3",
        );
        if self.exclude_phrases {
            sql.push_str(" AND word NOT LIKE '% %'");
        }
        if self.require_collins {
            sql.push_str(" AND collins > 0");
        }
        if fragment_count > 0 {
            sql.push_str(" AND (instr(coalesce(translation, ''), char(10)) > 0 OR (");
            for index in 0..fragment_count {
                if index > 0 {
                    sql.push_str(" AND ");
                }
                sql.push_str(&format!(
                    "instr(coalesce(translation, ''), ?{}) = 0",
                    index + 4
                ));
            }
            sql.push_str("))");
        }
        if self.exclude_parenthesised {
            sql.push_str(" AND instr(word, '(') = 0 AND instr(word, '（') = 0");
        }
        sql.push_str(" LIMIT ?2");
        sql
    }
}

/// LIKE pattern matching words that start with `prefix` literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

pub struct EcdictLookup {
    conn: Connection,
    policy: SearchPolicy,
    fragments: Vec<&'static str>,
    search_sql: String,
}

impl EcdictLookup {
    /// Opens the database read-only and checks that both statements prepare.
    pub fn open(path: &Path, policy: SearchPolicy) -> Result<Self> {
        let open_error = |source| HalError::DictOpen {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(open_error)?;

        let lookup = Self::from_connection(conn, policy);
        lookup.prepare_statements().map_err(open_error)?;

        info!(
            "dict: opened path={} limit={}",
            path.display(),
            lookup.policy.limit
        );
        Ok(lookup)
    }

    pub fn from_connection(conn: Connection, policy: SearchPolicy) -> Self {
        let fragments = policy.excluded_fragments();
        let search_sql = policy.search_sql(fragments.len());
        Self {
            conn,
            policy,
            fragments,
            search_sql,
        }
    }

    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }

    fn prepare_statements(&self) -> rusqlite::Result<()> {
        self.conn.prepare_cached(&self.search_sql)?;
        self.conn.prepare_cached(DETAIL_SQL)?;
        Ok(())
    }
}

impl WordLookup for EcdictLookup {
    type Error = HalError;

    fn search_prefix(&mut self, prefix: &str, out: &mut WordList) -> Result<()> {
        out.clear();

        let pattern = like_prefix(prefix);
        let limit = self.policy.limit as i64;
        let max_bytes = WORD_BYTES as i64;
        let mut bound: Vec<&dyn ToSql> = vec![&pattern, &limit, &max_bytes];
        for fragment in &self.fragments {
            bound.push(fragment);
        }

        let mut stmt = self.conn.prepare_cached(&self.search_sql)?;
        let rows = stmt.query_map(bound.as_slice(), |row| row.get::<_, String>(0))?;
        for word in rows {
            let word = word?;
            let mut entry = Word::new();
            push_truncated(&mut entry, &word);
            if out.push(entry).is_err() {
                break;
            }
        }

        debug!("dict: search prefix=\"{}\" hits={}", prefix, out.len());
        Ok(())
    }

    fn detail(&mut self, word: &str, out: &mut WordEntry) -> Result<bool> {
        out.clear();

        let mut stmt = self.conn.prepare_cached(DETAIL_SQL)?;
        let found = stmt
            .query_row(params![word], |row| {
                out.set_word(&row.get::<_, String>(0)?);
                out.set_phonetic(&row.get::<_, Option<String>>(1)?.unwrap_or_default());
                out.set_translation(&row.get::<_, Option<String>>(2)?.unwrap_or_default());
                out.set_definition(&row.get::<_, Option<String>>(3)?.unwrap_or_default());
                out.collins = row.get::<_, Option<i64>>(4)?.unwrap_or(0).clamp(0, 5) as u8;
                out.oxford = row.get::<_, Option<i64>>(5)?.unwrap_or(0) > 0;
                for (offset, form) in WordForm::ALL.iter().enumerate() {
                    if let Some(value) = row.get::<_, Option<String>>(FORM_COLUMN + offset)? {
                        out.push_form(*form, &value);
                    }
                }
                Ok(())
            })
            .optional()?
            .is_some();

        if !found {
            debug!("dict: no entry word=\"{}\"", word);
        }
        Ok(found)
    }
}
