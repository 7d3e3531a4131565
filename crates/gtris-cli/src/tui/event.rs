use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone)]
pub(super) enum TuiEvent {
    /// Game logic update, carrying the time since the previous tick.
    Tick(Duration),
    /// Screen redraw after a state change.
    Render,
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
}

impl From<CrosstermEvent> for TuiEvent {
    fn from(event: CrosstermEvent) -> Self {
        Self::Crossterm(event)
    }
}
