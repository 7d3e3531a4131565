use std::{path::PathBuf, time::Duration};

use anyhow::{Context as _, ensure};
use clap::Parser;
use gtris_engine::{
    AttractInput, DEFAULT_ATTRACT_PERIOD, FallInterval, Game, GameConfig, KeyboardInput,
    PieceCatalog, PieceSeed,
};
use rand::Rng as _;
use tracing::info;

use crate::{tui::Tui, util};

use self::play::PlayApp;

mod play;

/// Game ticks per second of the classic setup.
const DEFAULT_TICK_RATE: f64 = 18.0;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Game config file (JSON); command line options override its values
    #[clap(long)]
    config: Option<PathBuf>,
    /// Board width in cells
    #[clap(long)]
    width: Option<usize>,
    /// Board height in cells
    #[clap(long)]
    height: Option<usize>,
    /// Ticks between two automatic drops
    #[clap(long)]
    fall_ticks: Option<u32>,
    /// Game ticks per second
    #[clap(long, default_value_t = DEFAULT_TICK_RATE)]
    tick_rate: f64,
    /// Seed of the piece sequence (32 hex digits); random if omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Milliseconds between two moves of the attract-mode demo
    #[clap(long, default_value_t = duration_millis(DEFAULT_ATTRACT_PERIOD))]
    attract_period_ms: u64,
    /// File receiving the log output
    #[clap(long, default_value = "gtris.log")]
    log_file: PathBuf,
}

impl CommandArgs {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("game config", path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(ticks) = self.fall_ticks {
            config.fall_interval = FallInterval::Ticks(ticks);
        }
        Ok(config)
    }
}

#[expect(clippy::cast_possible_truncation)]
const fn duration_millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    ensure!(
        args.tick_rate.is_finite() && args.tick_rate > 0.0,
        "tick rate must be a positive number, got {}",
        args.tick_rate
    );
    ensure!(
        args.attract_period_ms > 0,
        "attract period must be non-zero"
    );

    util::init_logging(&args.log_file)?;
    let config = args.game_config()?;
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!(%seed, ?config, tick_rate = args.tick_rate, "starting gtris");

    let attract = AttractInput::spawn(Duration::from_millis(args.attract_period_ms));
    let game = Game::new(
        config,
        PieceCatalog::standard(),
        seed,
        KeyboardInput::new(),
        attract,
    )
    .context("Invalid game config")?;

    let mut app = PlayApp::new(game, args.tick_rate);
    Tui::new().run(&mut app)?;

    let stats = app.game().stats();
    info!(
        score = stats.score(),
        pieces = stats.completed_pieces(),
        lines = stats.total_cleared_lines(),
        "session ended"
    );
    Ok(())
}
