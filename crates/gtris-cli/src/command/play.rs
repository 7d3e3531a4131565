use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use gtris_engine::{Command, Game, GameState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    tui::{App, Tui},
    ui::widgets::GameDisplay,
};

#[derive(Debug)]
pub struct PlayApp {
    game: Game,
    tick_rate: f64,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(game: Game, tick_rate: f64) -> Self {
        Self {
            game,
            tick_rate,
            is_exiting: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }
}

/// Maps a key to the command it stands for in the game.
fn key_command(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Up => Command::Rotate,
        KeyCode::Char(' ') => Command::Confirm,
        _ => return None,
    };
    Some(command)
}

fn is_quit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Esc)
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(self.tick_rate);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        if is_quit_key(key.code) {
            self.is_exiting = true;
        } else if let Some(command) = key_command(key.code) {
            self.game.keyboard_mut().press(command);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let help_text = match (self.game.state(), self.game.is_attract_mode()) {
            (GameState::Playing, true) => "Controls: Space (Play) | Q (Quit)",
            (GameState::Playing, false) => {
                "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Q (Quit)"
            }
            (GameState::GameOver, _) => "Controls: Space (Start) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let game_display = GameDisplay::new(&self.game);
        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(game_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(game_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _tui: &mut Tui, elapsed: Duration) {
        self.game.tick(elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_and_space_map_to_commands() {
        assert_eq!(key_command(KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(key_command(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(key_command(KeyCode::Down), Some(Command::SoftDrop));
        assert_eq!(key_command(KeyCode::Up), Some(Command::Rotate));
        assert_eq!(key_command(KeyCode::Char(' ')), Some(Command::Confirm));
        assert_eq!(key_command(KeyCode::Char('x')), None);
        assert_eq!(key_command(KeyCode::Enter), None);
    }

    #[test]
    fn test_quit_keys_never_reach_the_game() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            assert!(is_quit_key(code));
            assert_eq!(key_command(code), None);
        }
        assert!(!is_quit_key(KeyCode::Char(' ')));
    }
}
