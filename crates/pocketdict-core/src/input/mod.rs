//! Input abstraction layer.

mod scripted;

pub use scripted::ScriptedInput;

/// Logical key events produced by the keypad.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    Up,
    Down,
    Left,
    Right,
    Back,
    None,
}

impl Event {
    /// Digit keys in keypad order.
    pub const DIGITS: [Self; 9] = [
        Self::Key1,
        Self::Key2,
        Self::Key3,
        Self::Key4,
        Self::Key5,
        Self::Key6,
        Self::Key7,
        Self::Key8,
        Self::Key9,
    ];

    /// Returns the digit (1..=9) for numeric keys.
    pub const fn digit(self) -> Option<u8> {
        match self {
            Self::Key1 => Some(1),
            Self::Key2 => Some(2),
            Self::Key3 => Some(3),
            Self::Key4 => Some(4),
            Self::Key5 => Some(5),
            Self::Key6 => Some(6),
            Self::Key7 => Some(7),
            Self::Key8 => Some(8),
            Self::Key9 => Some(9),
            _ => None,
        }
    }

    /// Numeric key for a digit (1..=9).
    pub const fn from_digit(digit: u8) -> Option<Self> {
        if digit >= 1 && digit <= 9 {
            Some(Self::DIGITS[(digit - 1) as usize])
        } else {
            None
        }
    }
}

/// Blocking source of decoded key events.
pub trait InputProvider {
    type Error;

    /// Waits for the next event. `Ok(None)` means the source is exhausted.
    fn wait_event(&mut self) -> Result<Option<Event>, Self::Error>;
}
