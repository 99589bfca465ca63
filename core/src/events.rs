//! Input Events
//!
//! Everything the state machine reacts to. Surfaces translate their native
//! input (crossterm, a test script, ...) into these; the core never sees a
//! terminal type.

use crate::messages::Message;

/// A key press, independent of any terminal library
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Printable character (space included)
    Char(char),
    /// Enter / return
    Enter,
    /// Escape
    Esc,
    /// Tab
    Tab,
    /// Shift-tab
    BackTab,
    /// Backspace
    Backspace,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Home
    Home,
    /// End
    End,
    /// Ctrl-C
    Interrupt,
}

impl Key {
    /// Up arrow or `k`
    pub fn is_up(self) -> bool {
        matches!(self, Self::Up | Self::Char('k'))
    }

    /// Down arrow or `j`
    pub fn is_down(self) -> bool {
        matches!(self, Self::Down | Self::Char('j'))
    }
}

/// Input to [`App::handle`](crate::app::App::handle)
#[derive(Debug)]
pub enum Event {
    /// User pressed a key
    Key(Key),
    /// Terminal was resized
    Resize {
        /// Columns
        width: u16,
        /// Rows
        height: u16,
    },
    /// A dispatched command finished
    Completed(Message),
}

impl From<Key> for Event {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

impl From<Message> for Event {
    fn from(message: Message) -> Self {
        Self::Completed(message)
    }
}
