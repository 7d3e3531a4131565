use std::collections::VecDeque;

use super::{Command, InputSource};

/// Replays a fixed sequence of reads.
///
/// Each [`InputSource::read_command`] call consumes one entry; `None`
/// entries stand for ticks without input. Once the script runs out, every
/// read returns `None`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<Option<Command>>,
}

impl ScriptedInput {
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = Option<Command>>,
    {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Appends one read to the end of the script.
    pub fn push(&mut self, command: Option<Command>) {
        self.script.push_back(command);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputSource for ScriptedInput {
    fn read_command(&mut self) -> Option<Command> {
        self.script.pop_front().flatten()
    }

    fn take_confirm(&mut self) -> bool {
        let is_confirm = self.script.front().copied().flatten() == Some(Command::Confirm);
        if is_confirm {
            self.script.pop_front();
        }
        is_confirm
    }
}
