use super::{Command, InputSource};

/// Live keyboard source.
///
/// The host translates key presses into commands and hands them over with
/// [`KeyboardInput::press`]. Only the latest unread press is kept, like a
/// "just pressed" key edge that lasts until the next frame reads it.
#[derive(Debug, Default)]
pub struct KeyboardInput {
    pending: Option<Command>,
}

impl KeyboardInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key press, replacing any unread one.
    pub fn press(&mut self, command: Command) {
        self.pending = Some(command);
    }

    #[must_use]
    pub fn pending(&self) -> Option<Command> {
        self.pending
    }
}

impl InputSource for KeyboardInput {
    fn read_command(&mut self) -> Option<Command> {
        self.pending.take()
    }

    fn take_confirm(&mut self) -> bool {
        self.pending.take_if(|command| command.is_confirm()).is_some()
    }
}
