use crate::CatalogError;

use super::shape::{PieceKind, Shape};

/// Spawn orientations of the seven tetrominoes.
const STANDARD_PATTERNS: [(PieceKind, &[&str]); PieceKind::LEN] = [
    (PieceKind::I, &["XXXX"]),
    (PieceKind::J, &["X..", "XXX"]),
    (PieceKind::L, &["..X", "XXX"]),
    (PieceKind::O, &["XX", "XX"]),
    (PieceKind::S, &[".XX", "XX."]),
    (PieceKind::T, &[".X.", "XXX"]),
    (PieceKind::Z, &["XX.", ".XX"]),
];

/// Immutable, ordered set of shapes pieces are drawn from.
///
/// The catalog is built once and handed to the game at construction time.
/// It never changes afterwards and is never empty.
///
/// # Example
///
/// ```
/// use gtris_engine::{PieceCatalog, PieceKind};
///
/// let catalog = PieceCatalog::standard();
/// assert_eq!(catalog.shapes().len(), 7);
/// assert_eq!(catalog.shapes()[0].kind(), PieceKind::I);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceCatalog {
    shapes: Vec<Shape>,
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl PieceCatalog {
    /// Returns the catalog of the seven standard tetrominoes.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_patterns(&STANDARD_PATTERNS).expect("standard patterns are well-formed")
    }

    pub fn new<I>(shapes: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Shape>,
    {
        let shapes: Vec<_> = shapes.into_iter().collect();
        if shapes.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { shapes })
    }

    /// Builds a catalog from text patterns (see [`Shape::from_pattern`]).
    pub fn from_patterns(patterns: &[(PieceKind, &[&str])]) -> Result<Self, CatalogError> {
        let shapes = patterns
            .iter()
            .map(|&(kind, pattern)| {
                Shape::from_pattern(kind, pattern)
                    .map_err(|source| CatalogError::InvalidShape { kind, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(shapes)
    }

    /// Returns all shapes in catalog order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}
