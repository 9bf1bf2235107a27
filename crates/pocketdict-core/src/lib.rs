#![cfg_attr(not(test), no_std)]

//! Hardware-independent core of the pocket dictionary: keypad decoding,
//! list windowing, and the dictionary UI state machine.

pub mod app;
pub mod dictionary;
pub mod input;
pub mod keypad;
pub mod list_window;
pub mod render;
pub mod text_policy;
