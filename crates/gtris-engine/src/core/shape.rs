use serde::{Deserialize, Serialize};

use crate::ShapeError;

/// Largest supported side of a shape's bounding box.
pub const MAX_SHAPE_SIDE: usize = 4;

/// Largest number of filled cells a shape can hold.
pub const MAX_SHAPE_CELLS: usize = MAX_SHAPE_SIDE * MAX_SHAPE_SIDE;

/// Visual identifier of a shape.
///
/// The board stores this tag in every locked cell; the host maps it to a
/// color or sprite.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use gtris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Rectangular matrix of filled/empty cells, at most 4×4.
///
/// Cells are packed into a 16-bit set, row-major with a fixed stride of
/// [`MAX_SHAPE_SIDE`], so the value is `Copy` and rotation never touches
/// the matrix it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupancy {
    width: u8,
    height: u8,
    bits: u16,
}

impl Occupancy {
    /// Builds an occupancy matrix from rows of cell flags.
    ///
    /// All rows must have the same length, the matrix must fit in
    /// [`MAX_SHAPE_SIDE`]×[`MAX_SHAPE_SIDE`] and at least one cell must be filled.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ShapeError>
    where
        R: AsRef<[bool]>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 || height == 0 {
            return Err(ShapeError::Empty);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(|row| row.as_ref().len())
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(ShapeError::Ragged {
                row,
                expected: width,
                found,
            });
        }
        if width > MAX_SHAPE_SIDE || height > MAX_SHAPE_SIDE {
            return Err(ShapeError::TooLarge {
                width,
                height,
                max: MAX_SHAPE_SIDE,
            });
        }

        let mut bits = 0;
        for (y, row) in rows.iter().enumerate() {
            for (x, &filled) in row.as_ref().iter().enumerate() {
                if filled {
                    bits |= bit(x, y);
                }
            }
        }
        if bits == 0 {
            return Err(ShapeError::NoFilledCell);
        }

        #[expect(clippy::cast_possible_truncation)]
        let (width, height) = (width as u8, height as u8);
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Builds an occupancy matrix from text rows, `'X'` filled and `'.'` empty.
    ///
    /// ```
    /// use gtris_engine::Occupancy;
    ///
    /// let t = Occupancy::from_pattern(&[".X.", "XXX"]).unwrap();
    /// assert_eq!((t.width(), t.height()), (3, 2));
    /// assert!(t.is_filled(1, 0));
    /// ```
    pub fn from_pattern(pattern: &[&str]) -> Result<Self, ShapeError> {
        let rows = pattern
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        'X' => Ok(true),
                        '.' => Ok(false),
                        _ => Err(ShapeError::InvalidCell { ch }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(&rows)
    }

    #[must_use]
    pub fn width(self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(self) -> usize {
        usize::from(self.height)
    }

    /// Returns whether the cell at `(x, y)` is filled. Cells outside the matrix are empty.
    #[must_use]
    pub fn is_filled(self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.bits & bit(x, y) != 0
    }

    #[must_use]
    pub fn filled_count(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns the `(x, y)` offsets of the filled cells, row by row.
    pub fn filled_cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.height())
            .flat_map(move |y| (0..self.width()).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.is_filled(x, y))
    }

    /// Returns the matrix rotated by 90°.
    ///
    /// Source cell `(x, y)` lands on row `x`, column `height - 1 - y` of the
    /// result, so a `w×h` matrix becomes `h×w`. Four rotations give back the
    /// original value.
    #[must_use]
    pub fn rotated(self) -> Self {
        let height = self.height();
        let mut bits = 0;
        for (x, y) in self.filled_cells() {
            bits |= bit(height - 1 - y, x);
        }
        Self {
            width: self.height,
            height: self.width,
            bits,
        }
    }
}

const fn bit(x: usize, y: usize) -> u16 {
    1 << (y * MAX_SHAPE_SIDE + x)
}

/// A catalog entry: an occupancy matrix tagged with its visual identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: PieceKind,
    occupancy: Occupancy,
}

impl Shape {
    #[must_use]
    pub const fn new(kind: PieceKind, occupancy: Occupancy) -> Self {
        Self { kind, occupancy }
    }

    /// Shorthand for [`Occupancy::from_pattern`] followed by [`Shape::new`].
    pub fn from_pattern(kind: PieceKind, pattern: &[&str]) -> Result<Self, ShapeError> {
        Ok(Self::new(kind, Occupancy::from_pattern(pattern)?))
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn occupancy(&self) -> Occupancy {
        self.occupancy
    }
}
