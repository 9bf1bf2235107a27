//! Multi-tap keypad decoding.
//!
//! A digit key arms a letter group; the following Up, Down, or Left picks
//! one letter from it. Keypad legend:
//!
//! ```text
//! abc  def  gh   Up
//! ijk  lmn  opq  Down
//! rst  uvw  xyz  Left
//!           Back Right
//! ```

use crate::input::Event;

/// Direction keys that pick a letter from an armed group.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
}

impl Direction {
    pub const fn from_event(event: Event) -> Option<Self> {
        match event {
            Event::Up => Some(Self::Up),
            Event::Down => Some(Self::Down),
            Event::Left => Some(Self::Left),
            _ => None,
        }
    }

    const fn column(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
        }
    }
}

/// Letters per digit, indexed `[digit - 1][Up, Down, Left]`.
///
/// Key 3 carries only two letters; its Left slot is empty.
const LETTER_TABLE: [[Option<char>; 3]; 9] = [
    [Some('a'), Some('b'), Some('c')],
    [Some('d'), Some('e'), Some('f')],
    [Some('g'), Some('h'), None],
    [Some('i'), Some('j'), Some('k')],
    [Some('l'), Some('m'), Some('n')],
    [Some('o'), Some('p'), Some('q')],
    [Some('r'), Some('s'), Some('t')],
    [Some('u'), Some('v'), Some('w')],
    [Some('x'), Some('y'), Some('z')],
];

/// Looks up the letter for a digit/direction chord.
pub fn letter_for(digit: u8, direction: Direction) -> Option<char> {
    let row = LETTER_TABLE.get(usize::from(digit).checked_sub(1)?)?;
    row[direction.column()]
}

/// Decoder register.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum KeypadState {
    #[default]
    Idle,
    /// A digit key (1..=9) waits for its direction.
    Pending(u8),
}

/// What one event means after decoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyOutcome {
    /// A digit was armed; nothing visible changes.
    Armed(u8),
    /// A chord completed into a letter.
    Letter(char),
    /// A chord completed on an empty slot; no letter.
    Unmapped { digit: u8, direction: Direction },
    /// Plain navigation or action key (`Up`, `Down`, `Left`, `Right`, `Back`).
    Action(Event),
    /// `Event::None`.
    Ignored,
}

/// Pure transition function of the multi-tap decoder.
pub fn decode(state: KeypadState, event: Event) -> (KeypadState, KeyOutcome) {
    if let Some(digit) = event.digit() {
        return (KeypadState::Pending(digit), KeyOutcome::Armed(digit));
    }

    match (state, event) {
        (_, Event::None) => (state, KeyOutcome::Ignored),
        (KeypadState::Pending(digit), _) => match Direction::from_event(event) {
            Some(direction) => {
                let outcome = match letter_for(digit, direction) {
                    Some(letter) => KeyOutcome::Letter(letter),
                    None => KeyOutcome::Unmapped { digit, direction },
                };
                (KeypadState::Idle, outcome)
            }
            // Right / Back drop the armed digit and keep their own meaning.
            None => (KeypadState::Idle, KeyOutcome::Action(event)),
        },
        (KeypadState::Idle, _) => (KeypadState::Idle, KeyOutcome::Action(event)),
    }
}

/// Stateful wrapper around [`decode`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct KeypadDecoder {
    state: KeypadState,
}

impl KeypadDecoder {
    pub const fn new() -> Self {
        Self {
            state: KeypadState::Idle,
        }
    }

    pub fn state(&self) -> KeypadState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, KeypadState::Pending(_))
    }

    pub fn feed(&mut self, event: Event) -> KeyOutcome {
        let (next, outcome) = decode(self.state, event);
        self.state = next;
        outcome
    }

    /// Drops any armed digit, returning it.
    pub fn discard(&mut self) -> Option<u8> {
        match core::mem::take(&mut self.state) {
            KeypadState::Pending(digit) => Some(digit),
            KeypadState::Idle => None,
        }
    }
}
