impl<Q, IN> DictionaryApp<Q, IN>
where
    Q: WordLookup,
    IN: InputProvider,
{
    pub fn new(lookup: Q, input: IN) -> Self {
        Self {
            lookup,
            input,
            keypad: KeypadDecoder::new(),
            ui: UiState::Typing { selected: 0 },
            query: String::new(),
            results: WordList::new(),
            entry: WordEntry::new(),
            detail_lines: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        match self.ui {
            UiState::Typing { .. } => Mode::Typing,
            UiState::Detail { .. } => Mode::Detail,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &WordList {
        &self.results
    }

    /// Selected result index; in detail mode, the index that will be restored.
    pub fn selected(&self) -> Option<usize> {
        if self.results.is_empty() {
            return None;
        }
        match self.ui {
            UiState::Typing { selected } => Some(selected),
            UiState::Detail { saved_selected, .. } => Some(saved_selected),
        }
    }

    pub fn detail_lines(&self) -> &[DetailLine] {
        &self.detail_lines
    }

    pub fn keypad(&self) -> &KeypadDecoder {
        &self.keypad
    }

    pub fn lookup(&self) -> &Q {
        &self.lookup
    }

    pub fn into_parts(self) -> (Q, IN) {
        (self.lookup, self.input)
    }

    pub fn with_screen<F>(&self, f: F)
    where
        F: FnOnce(Screen<'_>),
    {
        match self.ui {
            UiState::Typing { selected } => {
                let mut header: String<HEADER_BYTES> = String::new();
                let _ = header.push_str(&self.query);
                let _ = header.push(CURSOR_MARKER);

                let window = ListWindow::compute(self.results.len(), selected);
                let mut rows: Vec<&str, VISIBLE_ITEMS> = Vec::new();
                match window {
                    ListWindow::Placeholder => {
                        let _ = rows.push(PLACEHOLDER);
                    }
                    ListWindow::Items { .. } => {
                        for word in window.visible(&self.results) {
                            let _ = rows.push(word.as_str());
                        }
                    }
                }

                f(Screen::Results {
                    header: tail_fitting(&header, ROW_WIDTH_PX),
                    rows: &rows,
                    highlight_row: window.highlight_row(),
                });
            }
            UiState::Detail {
                saved_selected,
                scroll,
            } => {
                let title = self
                    .results
                    .get(saved_selected)
                    .map(|word| word.as_str())
                    .unwrap_or("");

                let mut rows: Vec<&str, VISIBLE_ITEMS> = Vec::new();
                for line in self.detail_lines.iter().skip(scroll).take(VISIBLE_ITEMS) {
                    let _ = rows.push(line.as_str());
                }
                if rows.is_empty() {
                    let _ = rows.push(PLACEHOLDER);
                }

                f(Screen::Detail { title, rows: &rows });
            }
        }
    }
}
