use super::{Event, InputProvider};

/// Replays a fixed event sequence, then reports exhaustion.
#[derive(Debug, Clone)]
pub struct ScriptedInput<'a> {
    events: &'a [Event],
    cursor: usize,
}

impl<'a> ScriptedInput<'a> {
    pub const fn new(events: &'a [Event]) -> Self {
        Self { events, cursor: 0 }
    }

    /// Events not yet delivered.
    pub fn remaining(&self) -> usize {
        self.events.len().saturating_sub(self.cursor)
    }
}

impl InputProvider for ScriptedInput<'_> {
    type Error = core::convert::Infallible;

    fn wait_event(&mut self) -> Result<Option<Event>, Self::Error> {
        let Some(event) = self.events.get(self.cursor).copied() else {
            return Ok(None);
        };
        self.cursor = self.cursor.saturating_add(1);
        Ok(Some(event))
    }
}
