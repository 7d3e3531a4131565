use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    piece::{Piece, Position},
    shape::{MAX_SHAPE_CELLS, PieceKind},
};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    /// Locked cell, tagged with the visual identifier of the piece that filled it.
    Filled(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// The game zone: a fixed `width × height` grid of locked cells.
///
/// The board is only mutated by locking a piece and by clearing full rows.
/// Its dimensions never change after construction.
///
/// # Example
///
/// ```
/// use gtris_engine::{Board, Piece, PieceCatalog};
///
/// let mut board = Board::new(10, 24);
/// let piece = Piece::spawn(PieceCatalog::standard().shapes()[0], board.width());
/// assert!(board.is_legal(piece));
///
/// board.lock(piece);
/// assert!(!board.is_legal(piece));
/// assert_eq!(board.clear_full_lines(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "board dimensions must be non-zero, got {width}x{height}"
        );
        Self {
            width,
            height,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `(x, y)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y)?.get(x).copied()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Overwrites a single cell.
    ///
    /// Meant for hosts and tests that need to set up a position directly.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the board.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::Empty);
        }
    }

    /// Returns whether `piece` can occupy its current position.
    ///
    /// Every filled cell must land inside `[0, width) × [0, height)` on an
    /// empty cell.
    #[must_use]
    pub fn is_legal(&self, piece: Piece) -> bool {
        piece.cells().all(|pos| self.empty_cell_index(pos).is_some())
    }

    /// Writes the piece's visual identifier into every cell it covers.
    ///
    /// # Panics
    ///
    /// Panics without touching the board if the placement is not legal.
    /// Callers must check [`Board::is_legal`] first; locking an illegal
    /// placement is a bug, not a game event.
    pub fn lock(&mut self, piece: Piece) {
        let cells = piece
            .cells()
            .map(|pos| {
                self.empty_cell_index(pos).unwrap_or_else(|| {
                    panic!(
                        "cannot lock {} piece at {:?}: cell {pos:?} is outside the board or occupied",
                        piece.kind(),
                        piece.position(),
                    )
                })
            })
            .collect::<ArrayVec<_, MAX_SHAPE_CELLS>>();
        for (x, y) in cells {
            self.rows[y][x] = Cell::Filled(piece.kind());
        }
    }

    /// Returns whether every cell of row `y` is occupied.
    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| !cell.is_empty()))
    }

    /// Removes all full rows and returns how many were removed.
    ///
    /// Remaining rows keep their relative order and drop down to fill the
    /// gaps; one empty row appears at the top for each removed row, so the
    /// board keeps its height. Compacting from the bottom gives the same
    /// result as collecting the full rows top to bottom first and then
    /// removing them all at once.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..self.height).rev() {
            if self.is_row_full(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows.swap(y, y + count);
            }
        }
        for row in &mut self.rows[..count] {
            row.fill(Cell::Empty);
        }
        count
    }

    fn empty_cell_index(&self, pos: Position) -> Option<(usize, usize)> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        self.cell(x, y)
            .filter(|cell| cell.is_empty())
            .map(|_| (x, y))
    }
}

#[cfg(test)]
mod tests {
    use crate::{PieceCatalog, Shape};

    use super::*;

    const WIDTH: usize = 10;
    const HEIGHT: usize = 24;

    fn shape(kind: PieceKind) -> Shape {
        *PieceCatalog::standard()
            .shapes()
            .iter()
            .find(|s| s.kind() == kind)
            .unwrap()
    }

    fn fill_row(board: &mut Board, y: usize, kind: PieceKind) {
        for x in 0..board.width() {
            board.set_cell(x, y, Cell::Filled(kind));
        }
    }

    #[test]
    fn test_initial_board_is_empty() {
        let board = Board::new(WIDTH, HEIGHT);
        assert_eq!(board.rows().count(), HEIGHT);
        for row in board.rows() {
            assert_eq!(row.len(), WIDTH);
            assert!(row.iter().all(|cell| cell.is_empty()));
        }
        assert_eq!(board.cell(WIDTH, 0), None);
        assert_eq!(board.cell(0, HEIGHT), None);
    }

    #[test]
    #[should_panic(expected = "board dimensions must be non-zero")]
    fn test_zero_width_board_panics() {
        let _ = Board::new(0, HEIGHT);
    }

    #[test]
    fn test_is_legal_rejects_out_of_bounds() {
        let board = Board::new(WIDTH, HEIGHT);
        let i = shape(PieceKind::I);

        assert!(board.is_legal(Piece::new(i, Position::new(0, 0))));
        assert!(board.is_legal(Piece::new(i, Position::new(6, HEIGHT as i32 - 1))));
        assert!(!board.is_legal(Piece::new(i, Position::new(-1, 0))));
        assert!(!board.is_legal(Piece::new(i, Position::new(7, 0))));
        assert!(!board.is_legal(Piece::new(i, Position::new(0, -1))));
        assert!(!board.is_legal(Piece::new(i, Position::new(0, HEIGHT as i32))));
    }

    #[test]
    fn test_is_legal_only_checks_filled_cells() {
        let board = Board::new(WIDTH, HEIGHT);
        let bar = Shape::from_pattern(PieceKind::I, &[".X", ".X"]).unwrap();
        assert!(board.is_legal(Piece::new(bar, Position::new(-1, 0))));
        assert!(!board.is_legal(Piece::new(bar, Position::new(-2, 0))));

        // Rotated T is "X.", "XX", "X.": its left column is filled.
        let t = Piece::new(shape(PieceKind::T), Position::new(-1, 0)).rotated();
        assert!(!board.is_legal(t));
        assert!(board.is_legal(t.right()));
    }

    #[test]
    fn test_is_legal_rejects_occupied_cells() {
        let mut board = Board::new(WIDTH, HEIGHT);
        board.set_cell(5, 1, Cell::Filled(PieceKind::O));
        let o = shape(PieceKind::O);
        assert!(!board.is_legal(Piece::new(o, Position::new(4, 0))));
        assert!(board.is_legal(Piece::new(o, Position::new(6, 0))));
    }

    #[test]
    fn test_lock_writes_visual_identifier() {
        let mut board = Board::new(WIDTH, HEIGHT);
        let piece = Piece::new(shape(PieceKind::S), Position::new(2, 10));
        board.lock(piece);

        for pos in piece.cells() {
            assert_eq!(
                board.cell(pos.x as usize, pos.y as usize),
                Some(Cell::Filled(PieceKind::S))
            );
        }
        let filled = board
            .rows()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count();
        assert_eq!(filled, 4);
    }

    #[test]
    #[should_panic(expected = "cannot lock")]
    fn test_lock_illegal_placement_panics() {
        let mut board = Board::new(WIDTH, HEIGHT);
        board.lock(Piece::new(shape(PieceKind::I), Position::new(8, 0)));
    }

    #[test]
    fn test_lock_illegal_placement_leaves_board_untouched() {
        let mut board = Board::new(WIDTH, HEIGHT);
        board.set_cell(3, 0, Cell::Filled(PieceKind::Z));
        let before = board.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            board.lock(Piece::new(shape(PieceKind::I), Position::new(0, 0)));
        }));
        assert!(result.is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_full_lines_without_full_rows_is_noop() {
        let mut board = Board::new(WIDTH, HEIGHT);
        for x in 0..WIDTH - 1 {
            board.set_cell(x, HEIGHT - 1, Cell::Filled(PieceKind::I));
        }
        board.set_cell(4, HEIGHT - 2, Cell::Filled(PieceKind::T));
        let before = board.clone();

        assert_eq!(board.clear_full_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_single_middle_row_shifts_rows_above() {
        let mut board = Board::new(WIDTH, HEIGHT);
        let k = 20;
        fill_row(&mut board, k, PieceKind::I);
        board.set_cell(0, k - 1, Cell::Filled(PieceKind::J));
        board.set_cell(1, k - 5, Cell::Filled(PieceKind::L));
        board.set_cell(2, k + 1, Cell::Filled(PieceKind::O));
        board.set_cell(3, HEIGHT - 1, Cell::Filled(PieceKind::S));
        let before = board.clone();

        assert_eq!(board.clear_full_lines(), 1);

        assert_eq!(board.width(), WIDTH);
        assert_eq!(board.height(), HEIGHT);
        assert!(board.rows().next().unwrap().iter().all(|c| c.is_empty()));
        for y in 0..k {
            let expected: Vec<_> = before.rows().nth(y).unwrap().to_vec();
            assert_eq!(board.rows().nth(y + 1).unwrap(), expected.as_slice());
        }
        for y in k + 1..HEIGHT {
            assert_eq!(board.rows().nth(y), before.rows().nth(y));
        }
        assert_eq!(board.cell(0, k), Some(Cell::Filled(PieceKind::J)));
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut board = Board::new(WIDTH, HEIGHT);
        fill_row(&mut board, HEIGHT - 1, PieceKind::I);
        board.set_cell(0, HEIGHT - 2, Cell::Filled(PieceKind::T));
        fill_row(&mut board, HEIGHT - 3, PieceKind::I);
        board.set_cell(9, HEIGHT - 4, Cell::Filled(PieceKind::Z));

        assert_eq!(board.clear_full_lines(), 2);

        assert_eq!(board.cell(0, HEIGHT - 1), Some(Cell::Filled(PieceKind::T)));
        assert_eq!(board.cell(9, HEIGHT - 2), Some(Cell::Filled(PieceKind::Z)));
        assert!(board.rows().take(HEIGHT - 2).flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn test_clear_all_rows() {
        let mut board = Board::new(WIDTH, HEIGHT);
        for y in 0..HEIGHT {
            fill_row(&mut board, y, PieceKind::O);
        }
        assert_eq!(board.clear_full_lines(), HEIGHT);
        assert_eq!(board, Board::new(WIDTH, HEIGHT));
    }

    #[test]
    fn test_clear_resets_every_cell() {
        let mut board = Board::new(WIDTH, HEIGHT);
        fill_row(&mut board, 3, PieceKind::L);
        board.clear();
        assert_eq!(board, Board::new(WIDTH, HEIGHT));
    }
}
