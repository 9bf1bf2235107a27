//! App-level view model consumed by the board renderer.

/// Row shown when a list has nothing to display.
pub const PLACEHOLDER: &str = "(none)";
/// Appended to the query in the header while typing.
pub const CURSOR_MARKER: char = '|';

/// One frame worth of UI content. Row 0 is the header; `rows` fill rows 1..=3.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Screen<'a> {
    /// Query entry and the result list.
    Results {
        /// Query plus cursor marker, already cut to the row width.
        header: &'a str,
        rows: &'a [&'a str],
        /// Screen row (1..=3) of the selected result.
        highlight_row: Option<usize>,
    },
    /// Entry detail for one word.
    Detail { title: &'a str, rows: &'a [&'a str] },
}

impl<'a> Screen<'a> {
    pub fn header(&self) -> &'a str {
        match *self {
            Self::Results { header, .. } => header,
            Self::Detail { title, .. } => title,
        }
    }

    pub fn rows(&self) -> &'a [&'a str] {
        match *self {
            Self::Results { rows, .. } | Self::Detail { rows, .. } => rows,
        }
    }

    pub fn highlight_row(&self) -> Option<usize> {
        match *self {
            Self::Results { highlight_row, .. } => highlight_row,
            Self::Detail { .. } => None,
        }
    }
}
