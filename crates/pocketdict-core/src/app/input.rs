impl<Q, IN> DictionaryApp<Q, IN>
where
    Q: WordLookup,
    IN: InputProvider,
{
    /// Blocks for the next input event and applies it.
    pub fn tick(&mut self) -> Result<TickResult, IN::Error> {
        match self.input.wait_event()? {
            Some(event) => Ok(self.handle_event(event)),
            None => {
                debug!("ui: input closed");
                Ok(TickResult::InputClosed)
            }
        }
    }

    pub fn handle_event(&mut self, event: Event) -> TickResult {
        match self.ui {
            UiState::Typing { selected } => self.handle_typing(event, selected),
            UiState::Detail {
                saved_selected,
                scroll,
            } => self.handle_detail(event, saved_selected, scroll),
        }
    }

    fn handle_typing(&mut self, event: Event, selected: usize) -> TickResult {
        match self.keypad.feed(event) {
            KeyOutcome::Armed(digit) => {
                debug!("ui: key armed digit={}", digit);
                TickResult::NoRender
            }
            KeyOutcome::Ignored => TickResult::NoRender,
            KeyOutcome::Letter(letter) => self.append_letter(letter),
            KeyOutcome::Unmapped { digit, direction } => {
                warn!(
                    "ui: unmapped chord digit={} direction={:?}",
                    digit, direction
                );
                TickResult::NoRender
            }
            KeyOutcome::Action(Event::Up) => {
                if selected == 0 || self.results.is_empty() {
                    return TickResult::NoRender;
                }
                self.ui = UiState::Typing {
                    selected: selected - 1,
                };
                TickResult::RenderRequested
            }
            KeyOutcome::Action(Event::Down) => {
                if selected + 1 >= self.results.len() {
                    return TickResult::NoRender;
                }
                self.ui = UiState::Typing {
                    selected: selected + 1,
                };
                TickResult::RenderRequested
            }
            KeyOutcome::Action(Event::Left) => {
                if self.query.pop().is_none() {
                    return TickResult::NoRender;
                }
                self.query_changed()
            }
            KeyOutcome::Action(Event::Back) => {
                if self.query.is_empty() {
                    return TickResult::NoRender;
                }
                self.query.clear();
                self.query_changed()
            }
            KeyOutcome::Action(Event::Right) => self.open_detail(selected),
            KeyOutcome::Action(_) => TickResult::NoRender,
        }
    }

    fn handle_detail(&mut self, event: Event, saved_selected: usize, scroll: usize) -> TickResult {
        let next_scroll = match event {
            Event::Up if scroll > 0 => scroll - 1,
            Event::Down if scroll + VISIBLE_ITEMS < self.detail_lines.len() => scroll + 1,
            Event::Left | Event::Back => return self.close_detail(saved_selected),
            _ => return TickResult::NoRender,
        };

        self.ui = UiState::Detail {
            saved_selected,
            scroll: next_scroll,
        };
        TickResult::RenderRequested
    }

    fn append_letter(&mut self, letter: char) -> TickResult {
        if self.query.push(letter).is_err() {
            debug!(
                "ui: query full, letter dropped letter={} capacity={}",
                letter, QUERY_BYTES
            );
            return TickResult::NoRender;
        }
        self.query_changed()
    }

    fn query_changed(&mut self) -> TickResult {
        self.refresh_results();
        self.ui = UiState::Typing { selected: 0 };
        debug!(
            "ui: query changed query=\"{}\" results={}",
            self.query,
            self.results.len()
        );
        TickResult::RenderRequested
    }
}
