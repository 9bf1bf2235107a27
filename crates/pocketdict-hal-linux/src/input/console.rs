use std::io::{BufRead, ErrorKind};

use log::debug;
use pocketdict_core::input::{Event, InputProvider};

use crate::error::HalError;

/// Keypad stand-in reading key bytes from a text stream.
///
/// `1`-`9` are the digit keys, `w`/`s`/`a`/`d` are Up/Down/Left/Right and
/// `b` is Back. Whitespace and unknown bytes are skipped.
#[derive(Debug)]
pub struct ConsoleKeypad<R> {
    reader: R,
    line: Vec<u8>,
    cursor: usize,
}

impl<R: BufRead> ConsoleKeypad<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            cursor: 0,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Refills the line buffer; `false` at end of stream.
    fn fill_line(&mut self) -> Result<bool, HalError> {
        self.line.clear();
        self.cursor = 0;
        loop {
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(read) => return Ok(read > 0),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }
}

pub fn event_for_key(key: u8) -> Option<Event> {
    match key {
        b'1'..=b'9' => Event::from_digit(key - b'0'),
        b'w' | b'W' => Some(Event::Up),
        b's' | b'S' => Some(Event::Down),
        b'a' | b'A' => Some(Event::Left),
        b'd' | b'D' => Some(Event::Right),
        b'b' | b'B' => Some(Event::Back),
        _ => None,
    }
}

impl<R: BufRead> InputProvider for ConsoleKeypad<R> {
    type Error = HalError;

    fn wait_event(&mut self) -> Result<Option<Event>, Self::Error> {
        loop {
            while let Some(&key) = self.line.get(self.cursor) {
                self.cursor += 1;
                match event_for_key(key) {
                    Some(event) => {
                        debug!("input: key={:?} event={:?}", key as char, event);
                        return Ok(Some(event));
                    }
                    None if key.is_ascii_whitespace() => {}
                    None => debug!("input: ignored byte={:#04x}", key),
                }
            }

            if !self.fill_line()? {
                return Ok(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn drain(text: &str) -> Vec<Event> {
        let mut keypad = ConsoleKeypad::new(Cursor::new(text.as_bytes().to_vec()));
        let mut events = Vec::new();
        while let Some(event) = keypad.wait_event().unwrap() {
            events.push(event);
        }
        events
    }

    #[test]
    fn maps_keys_across_lines() {
        assert_eq!(
            drain("1w 5a\nd\r\nb"),
            [
                Event::Key1,
                Event::Up,
                Event::Key5,
                Event::Left,
                Event::Right,
                Event::Back
            ]
        );
    }

    #[test]
    fn skips_unknown_bytes() {
        assert_eq!(drain("0x?9S"), [Event::Key9, Event::Down]);
    }

    #[test]
    fn empty_stream_is_exhausted() {
        assert!(drain("").is_empty());
        assert!(drain("\n\n").is_empty());
    }

    #[test]
    fn every_digit_maps() {
        for (offset, expected) in Event::DIGITS.iter().enumerate() {
            assert_eq!(event_for_key(b'1' + offset as u8), Some(*expected));
        }
        assert_eq!(event_for_key(b'0'), None);
    }
}
