use serde::{Deserialize, Serialize};

use crate::{Board, ConfigError, Piece, PieceCatalog};

use super::fall_timer::FallInterval;

/// Constructor-time parameters of a game.
///
/// Defaults match the classic setup: a 10×24 board and a piece that falls
/// one row every fifth tick.
///
/// Missing fields take their default value when deserializing:
///
/// ```
/// use gtris_engine::{FallInterval, GameConfig};
///
/// let config: GameConfig = serde_json::from_str(r#"{ "height": 20 }"#).unwrap();
/// assert_eq!(config.width, 10);
/// assert_eq!(config.height, 20);
/// assert_eq!(config.fall_interval, FallInterval::Ticks(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub fall_interval: FallInterval,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 24,
            fall_interval: FallInterval::default(),
        }
    }
}

impl GameConfig {
    /// Checks that a game can be started with this config and `catalog`.
    ///
    /// Rejects zero dimensions, a zero fall interval (the piece would fall on
    /// every tick and input would never be read) and boards on which some
    /// catalog shape does not fit at its spawn position.
    pub fn validate(&self, catalog: &PieceCatalog) -> Result<(), ConfigError> {
        let Self {
            width,
            height,
            fall_interval,
        } = *self;
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        if fall_interval.is_zero() {
            return Err(ConfigError::ZeroFallInterval);
        }
        let board = Board::new(width, height);
        if let Some(shape) = catalog
            .shapes()
            .iter()
            .find(|&&shape| !board.is_legal(Piece::spawn(shape, width)))
        {
            return Err(ConfigError::SpawnOutOfBounds {
                kind: shape.kind(),
                width,
                height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceKind;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(&PieceCatalog::standard()), Ok(()));
    }

    #[test]
    fn test_zero_dimensions_are_rejected() {
        let catalog = PieceCatalog::standard();
        let config = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(&catalog),
            Err(ConfigError::ZeroDimension {
                width: 0,
                height: 24
            })
        );
        let config = GameConfig {
            height: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(&catalog),
            Err(ConfigError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn test_zero_fall_interval_is_rejected() {
        let catalog = PieceCatalog::standard();
        for fall_interval in [FallInterval::Ticks(0), FallInterval::Millis(0)] {
            let config = GameConfig {
                fall_interval,
                ..GameConfig::default()
            };
            assert_eq!(config.validate(&catalog), Err(ConfigError::ZeroFallInterval));
        }
    }

    #[test]
    fn test_board_too_narrow_for_spawn_is_rejected() {
        // Spawn anchor x = 4 / 2 - 1 = 1, the I-piece needs columns 1..=4.
        let config = GameConfig {
            width: 4,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(&PieceCatalog::standard()),
            Err(ConfigError::SpawnOutOfBounds {
                kind: PieceKind::I,
                width: 4,
                height: 24
            })
        );

        let config = GameConfig {
            width: 5,
            height: 1,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(&PieceCatalog::standard()),
            Err(ConfigError::SpawnOutOfBounds {
                kind: PieceKind::J,
                width: 5,
                height: 1
            })
        );
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<GameConfig>(r#"{ "depth": 3 }"#).is_err());
    }
}
