pub use self::{core::*, engine::*, input::*};

pub mod core;
pub mod engine;
pub mod input;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when moving falling piece")]
pub struct PieceCollisionError;

/// Reasons a shape matrix is rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape matrix has no cells")]
    Empty,
    #[display("shape row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("shape matrix is {width}x{height}, at most {max}x{max} is supported")]
    TooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
    #[display("shape matrix has no filled cell")]
    NoFilledCell,
    #[display("invalid shape cell {ch:?}, expected 'X' or '.'")]
    InvalidCell { ch: char },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CatalogError {
    #[display("piece catalog is empty")]
    Empty,
    #[display("invalid shape for {kind} piece")]
    InvalidShape { kind: PieceKind, source: ShapeError },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[display("fall interval must be non-zero")]
    ZeroFallInterval,
    #[display("{kind} piece does not fit at the spawn position of a {width}x{height} board")]
    SpawnOutOfBounds {
        kind: PieceKind,
        width: usize,
        height: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid hex: {input}")]
    InvalidDigit { input: String },
}
