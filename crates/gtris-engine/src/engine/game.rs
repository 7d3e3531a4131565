use std::time::Duration;

use tracing::{debug, info, trace};

use crate::{
    AttractInput, Board, Command, ConfigError, GameConfig, GameStats, InputSource, KeyboardInput,
    Piece, PieceCatalog, PieceCollisionError, PieceGenerator, PieceSeed,
};

use super::fall_timer::FallTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum GameState {
    Playing,
    GameOver,
}

/// Which input source drives the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum InputMode {
    /// The demo source plays; a confirm on the keyboard hands over control.
    Attract,
    /// The player is in control.
    Keyboard,
}

/// A game session: board, falling piece, look-ahead, score and input routing.
///
/// The host drives the session by calling [`Game::tick`] at a fixed rate and
/// reads snapshots back through the accessors. Nothing here blocks or spawns
/// threads; the only background work belongs to the attract source `A`.
///
/// `K` is the live source the host feeds (a [`KeyboardInput`] by default) and
/// `A` the demo source (an [`AttractInput`] by default). Both are owned by the
/// session, so dropping the game stops the attract producer.
#[derive(Debug)]
pub struct Game<K = KeyboardInput, A = AttractInput> {
    config: GameConfig,
    generator: PieceGenerator,
    board: Board,
    current: Piece,
    next: Piece,
    stats: GameStats,
    state: GameState,
    mode: InputMode,
    fall_timer: FallTimer,
    keyboard: K,
    attract: A,
}

impl<K, A> Game<K, A>
where
    K: InputSource,
    A: InputSource,
{
    /// Validates `config` against `catalog` and starts a game in attract mode.
    pub fn new(
        config: GameConfig,
        catalog: PieceCatalog,
        seed: PieceSeed,
        keyboard: K,
        attract: A,
    ) -> Result<Self, ConfigError> {
        config.validate(&catalog)?;
        let mut generator = PieceGenerator::with_seed(catalog, seed);
        let next = generator.spawn(config.width);
        let mut game = Self {
            config,
            board: Board::new(config.width, config.height),
            current: next,
            next,
            generator,
            stats: GameStats::new(),
            state: GameState::Playing,
            mode: InputMode::Attract,
            fall_timer: FallTimer::new(config.fall_interval),
            keyboard,
            attract,
        };
        game.start();
        Ok(game)
    }

    /// Starts a new game from any state.
    ///
    /// Clears the board and the score, promotes the look-ahead piece and
    /// hands control to the attract source.
    pub fn start(&mut self) {
        self.stats = GameStats::new();
        self.fall_timer.reset();
        self.board.clear();
        self.promote_next();
        self.state = GameState::Playing;
        self.mode = InputMode::Attract;
        info!(
            width = self.config.width,
            height = self.config.height,
            "game started in attract mode"
        );
    }

    /// Hands control to the keyboard source. Board and score are kept.
    pub fn take_control(&mut self) {
        if self.mode.is_keyboard() {
            return;
        }
        self.mode = InputMode::Keyboard;
        info!(score = self.stats.score(), "player took control");
    }

    /// Advances the game by one frame that lasted `elapsed`.
    ///
    /// While playing, a due fall takes the whole tick. Otherwise at most one
    /// command is read from the active source and applied, then a confirm on
    /// the keyboard ends attract mode. Once the game is over, any command
    /// from the active source starts a new game.
    pub fn tick(&mut self, elapsed: Duration) {
        match self.state {
            GameState::Playing => {
                if self.fall_timer.advance(elapsed) {
                    self.apply(Command::SoftDrop);
                    return;
                }
                if let Some(command) = self.active_input().read_command() {
                    self.apply(command);
                }
                if self.state.is_playing() && self.mode.is_attract() && self.keyboard.take_confirm()
                {
                    self.take_control();
                }
            }
            GameState::GameOver => {
                if self.active_input().read_command().is_some() {
                    self.start();
                }
            }
        }
    }

    /// Applies a single command to the falling piece.
    ///
    /// Rejected moves and rotations leave the piece where it was. A soft drop
    /// that cannot move the piece locks it. Does nothing unless the game is
    /// [`GameState::Playing`].
    pub fn apply(&mut self, command: Command) {
        if !self.state.is_playing() {
            return;
        }
        let result = match command {
            Command::MoveLeft => self.try_move_left(),
            Command::MoveRight => self.try_move_right(),
            Command::Rotate => self.try_rotate(),
            Command::SoftDrop => {
                if self.try_soft_drop().is_err() {
                    self.lock_current();
                }
                Ok(())
            }
            Command::Confirm => Ok(()),
        };
        if let Err(PieceCollisionError) = result {
            trace!(%command, position = ?self.current.position(), "command rejected");
        }
    }

    /// Moves the piece one column left.
    ///
    /// Fails without changing anything if the target is blocked or the game
    /// is over. The same holds for the other `try_*` methods.
    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.set_current(self.current.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.set_current(self.current.right())
    }

    /// Moves the piece down one row. Does not lock it when that fails.
    pub fn try_soft_drop(&mut self) -> Result<(), PieceCollisionError> {
        self.set_current(self.current.down())
    }

    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        self.set_current(self.current.rotated())
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    /// Returns the look-ahead piece, placed at the spawn point.
    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    #[must_use]
    pub fn is_attract_mode(&self) -> bool {
        self.mode.is_attract()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &PieceCatalog {
        self.generator.catalog()
    }

    /// Gives the host access to the live source, e.g. to record key presses.
    pub fn keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }

    fn active_input(&mut self) -> &mut dyn InputSource {
        match self.mode {
            InputMode::Attract => &mut self.attract,
            InputMode::Keyboard => &mut self.keyboard,
        }
    }

    fn set_current(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if !self.state.is_playing() || !self.board.is_legal(piece) {
            return Err(PieceCollisionError);
        }
        self.current = piece;
        Ok(())
    }

    fn promote_next(&mut self) {
        self.current = self.next;
        self.next = self.generator.spawn(self.config.width);
    }

    fn lock_current(&mut self) {
        self.board.lock(self.current);
        let cleared_lines = self.board.clear_full_lines();
        let points = self.stats.complete_piece_drop(cleared_lines);
        debug!(
            kind = %self.current.kind(),
            position = ?self.current.position(),
            cleared_lines,
            points,
            score = self.stats.score(),
            "piece locked"
        );

        self.promote_next();
        if !self.board.is_legal(self.current) {
            self.state = GameState::GameOver;
            info!(
                score = self.stats.score(),
                pieces = self.stats.completed_pieces(),
                lines = self.stats.total_cleared_lines(),
                "game over"
            );
        }
    }
}
