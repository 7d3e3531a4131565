use serde::{Deserialize, Serialize};

use super::shape::{Occupancy, PieceKind, Shape};

/// Grid coordinates of a piece anchor or a board cell.
///
/// - (0, 0) is the top-left cell of the board
/// - X increases rightward (columns)
/// - Y increases downward (rows)
///
/// Coordinates are signed so candidate moves past the left or top edge can be
/// represented and then rejected by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A falling piece: a shape in some orientation, anchored on the board.
///
/// The anchor is the top-left corner of the occupancy matrix's bounding box.
/// Pieces are immutable values; movement and rotation return new `Piece`s
/// and never touch the catalog shape they were spawned from.
///
/// # Example
///
/// ```
/// use gtris_engine::{PieceCatalog, Piece, Position};
///
/// let shape = PieceCatalog::standard().shapes()[0];
/// let piece = Piece::spawn(shape, 10);
/// assert_eq!(piece.position(), Position::new(4, 0));
///
/// let moved = piece.right().down();
/// assert_eq!(moved.position(), Position::new(5, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    occupancy: Occupancy,
    position: Position,
}

impl Piece {
    #[must_use]
    pub const fn new(shape: Shape, position: Position) -> Self {
        Self {
            kind: shape.kind(),
            occupancy: shape.occupancy(),
            position,
        }
    }

    /// Places `shape` at the spawn point of a board `board_width` cells wide.
    ///
    /// The anchor is `(board_width / 2 - 1, 0)` whatever the width of the
    /// shape itself.
    #[must_use]
    pub fn spawn(shape: Shape, board_width: usize) -> Self {
        Self::new(shape, spawn_position(board_width))
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the board positions covered by the piece's filled cells.
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.occupancy
            .filled_cells()
            .map(move |(dx, dy)| self.position.offset(dx as i32, dy as i32))
    }

    #[must_use]
    pub const fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            occupancy: self.occupancy,
            position: self.position.offset(dx, dy),
        }
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.moved(-1, 0)
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.moved(1, 0)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.moved(0, 1)
    }

    /// Returns the piece rotated by 90° around the same anchor.
    ///
    /// See [`Occupancy::rotated`] for the exact transform.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            kind: self.kind,
            occupancy: self.occupancy.rotated(),
            position: self.position,
        }
    }
}

fn spawn_position(board_width: usize) -> Position {
    let half = i32::try_from(board_width / 2).unwrap_or(i32::MAX);
    Position::new(half - 1, 0)
}
