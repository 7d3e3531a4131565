//! Discrete player commands and the sources that produce them.
//!
//! The game reads at most one [`Command`] per tick from its active
//! [`InputSource`]. Two sources take turns:
//!
//! - [`KeyboardInput`] - fed by the host with key presses
//! - [`AttractInput`] - a background producer that plays random moves
//!
//! [`ScriptedInput`] replays a fixed sequence and is handy for demos and tests.

pub use self::{attract::*, keyboard::*, scripted::*};

mod attract;
mod keyboard;
mod scripted;

/// A discrete input command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    /// Start a game or take over from attract mode.
    Confirm,
}

/// A non-blocking source of commands.
pub trait InputSource {
    /// Returns the pending command, if any. Never blocks.
    fn read_command(&mut self) -> Option<Command>;

    /// Consumes a pending [`Command::Confirm`] edge and reports whether there was one.
    ///
    /// Other pending commands are left in place.
    fn take_confirm(&mut self) -> bool {
        false
    }
}

impl<T> InputSource for Box<T>
where
    T: InputSource + ?Sized,
{
    fn read_command(&mut self) -> Option<Command> {
        (**self).read_command()
    }

    fn take_confirm(&mut self) -> bool {
        (**self).take_confirm()
    }
}
