//! Dictionary UI state machine: query entry, result browsing, and detail
//! drill-down.

use heapless::{String, Vec};
use log::{debug, warn};

use crate::{
    dictionary::{WordEntry, WordList, WordLookup},
    input::{Event, InputProvider},
    keypad::{KeyOutcome, KeypadDecoder},
    list_window::{ListWindow, VISIBLE_ITEMS},
    render::{CURSOR_MARKER, PLACEHOLDER, Screen},
    text_policy::{ROW_WIDTH_PX, tail_fitting},
};

pub const QUERY_BYTES: usize = 32;
const HEADER_BYTES: usize = QUERY_BYTES + 4;
const DETAIL_LINE_BYTES: usize = 64;
const MAX_DETAIL_LINES: usize = 48;

pub type DetailLine = String<DETAIL_LINE_BYTES>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
    /// The input source has no more events.
    InputClosed,
}

/// Top-level UI mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Typing,
    Detail,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum UiState {
    Typing {
        selected: usize,
    },
    Detail {
        /// Result index to restore on exit; also the word on display.
        saved_selected: usize,
        /// First visible detail line.
        scroll: usize,
    },
}

pub struct DictionaryApp<Q, IN>
where
    Q: WordLookup,
    IN: InputProvider,
{
    lookup: Q,
    input: IN,
    keypad: KeypadDecoder,
    ui: UiState,
    query: String<QUERY_BYTES>,
    results: WordList,
    entry: WordEntry,
    detail_lines: Vec<DetailLine, MAX_DETAIL_LINES>,
}

include!("view.rs");
include!("input.rs");
include!("lookup.rs");
