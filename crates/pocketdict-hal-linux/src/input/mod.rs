mod console;

pub use console::ConsoleKeypad;
