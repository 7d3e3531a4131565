use gtris_engine::{Game, GameState, InputSource};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Padding, Widget},
};

use super::{BoardDisplay, PieceDisplay, ScoreDisplay, color, style};

/// Whole game screen: board on the left; score, next piece and captions on the right.
#[derive(Debug)]
pub struct GameDisplay<'a, K, A> {
    game: &'a Game<K, A>,
    horizontal_padding: u16,
}

impl<'a, K, A> GameDisplay<'a, K, A>
where
    K: InputSource,
    A: InputSource,
{
    pub fn new(game: &'a Game<K, A>) -> Self {
        Self {
            game,
            horizontal_padding: 1,
        }
    }

    /// Height of the board including its border.
    pub fn height(&self) -> u16 {
        BoardDisplay::new(self.game.board())
            .block(Block::bordered())
            .height()
    }

    fn captions(&self) -> Vec<Line<'static>> {
        let mut lines = vec![];
        if self.game.state().is_game_over() {
            lines.push(Line::from("GAME OVER").style(style::GAME_OVER));
            lines.push(Line::from("space to start"));
            lines.push(Line::default());
        }
        if self.game.is_attract_mode() {
            lines.push(Line::from("press space"));
            lines.push(Line::from("  to play"));
        }
        lines
    }
}

impl<K, A> Widget for GameDisplay<'_, K, A>
where
    K: InputSource,
    A: InputSource,
{
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl<K, A> Widget for &GameDisplay<'_, K, A>
where
    K: InputSource,
    A: InputSource,
{
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::horizontal(self.horizontal_padding);
        let border_style = match self.game.state() {
            GameState::Playing if self.game.is_attract_mode() => color::GRAY,
            GameState::Playing => color::WHITE,
            GameState::GameOver => color::RED,
        };

        let board = BoardDisplay::new(self.game.board())
            .falling_piece(*self.game.current_piece())
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let score = ScoreDisplay::new(self.game.stats()).block(
            Block::bordered()
                .title(Line::from("SCORE").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let next = PieceDisplay::new().piece(*self.game.next_piece()).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let captions = Text::from(self.captions()).style(style::DEFAULT);

        let side_width = u16::max(score.width(), next.width());
        let [board_column, side_column] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(side_width),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(board_column);
        let [score_area, next_area, caption_area] = Layout::vertical([
            Constraint::Length(score.height()),
            Constraint::Length(next.height()),
            Constraint::Min(0),
        ])
        .spacing(1)
        .areas(side_column);

        board.render(board_area, buf);
        score.render(score_area, buf);
        next.render(next_area, buf);
        captions.render(caption_area, buf);
    }
}
