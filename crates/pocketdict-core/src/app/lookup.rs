impl<Q, IN> DictionaryApp<Q, IN>
where
    Q: WordLookup,
    IN: InputProvider,
{
    /// Replaces the result list with a fresh search for the current query.
    /// A failed search leaves the list empty.
    fn refresh_results(&mut self) {
        self.results.clear();
        if self.query.is_empty() {
            return;
        }

        if let Err(err) = self.lookup.search_prefix(&self.query, &mut self.results) {
            warn!("ui: lookup failed query=\"{}\" err={:?}", self.query, err);
            self.results.clear();
        }
    }

    fn open_detail(&mut self, selected: usize) -> TickResult {
        let Some(word) = self.results.get(selected) else {
            return TickResult::NoRender;
        };

        self.detail_lines.clear();
        let found = match self.lookup.detail(word, &mut self.entry) {
            Ok(found) => found,
            Err(err) => {
                warn!("ui: detail lookup failed word=\"{}\" err={:?}", word, err);
                false
            }
        };

        if found && !self.entry.layout_lines(ROW_WIDTH_PX, &mut self.detail_lines) {
            debug!(
                "ui: detail truncated word=\"{}\" lines={}",
                word,
                self.detail_lines.len()
            );
        }

        debug!(
            "ui: enter detail word=\"{}\" found={} lines={}",
            word,
            found,
            self.detail_lines.len()
        );
        self.ui = UiState::Detail {
            saved_selected: selected,
            scroll: 0,
        };
        TickResult::RenderRequested
    }

    fn close_detail(&mut self, saved_selected: usize) -> TickResult {
        self.detail_lines.clear();
        self.entry.clear();

        let selected = saved_selected.min(self.results.len().saturating_sub(1));
        debug!("ui: leave detail selected={}", selected);
        self.ui = UiState::Typing { selected };
        TickResult::RenderRequested
    }
}
