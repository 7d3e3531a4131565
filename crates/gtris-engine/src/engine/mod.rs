//! Game engine logic and state management.
//!
//! This module drives the core data structures through a game:
//!
//! - [`Game`] - The state machine: falling piece, look-ahead, board, score, input routing
//! - [`GameConfig`] - Board dimensions and fall interval, fixed at construction
//! - [`GameStats`] - Score and line clear counters
//! - [`FallTimer`] - Accumulator for automatic downward movement
//! - [`PieceGenerator`] - Uniform random shape selection from a [`PieceCatalog`](crate::PieceCatalog)
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Build a [`Game`] from a config, a catalog, a seed and two input sources
//! 2. The host calls [`Game::tick`] once per frame
//! 3. The fall timer or the active input source produces at most one command
//! 4. A piece that cannot move down locks; full rows clear and score
//! 5. The look-ahead piece spawns; if it does not fit, the game is over
//! 6. Any input while the game is over starts a new game in attract mode
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use gtris_engine::{Command, Game, GameConfig, PieceCatalog, PieceSeed, ScriptedInput};
//!
//! let mut game = Game::new(
//!     GameConfig::default(),
//!     PieceCatalog::standard(),
//!     PieceSeed::default(),
//!     ScriptedInput::default(),
//!     ScriptedInput::new([Some(Command::MoveLeft), None, Some(Command::Rotate)]),
//! )
//! .unwrap();
//!
//! for _ in 0..3 {
//!     game.tick(Duration::ZERO);
//! }
//! assert!(game.state().is_playing());
//! ```

pub use self::{config::*, fall_timer::*, game::*, game_stats::*, piece_generator::*};

mod config;
mod fall_timer;
mod game;
mod game_stats;
mod piece_generator;
