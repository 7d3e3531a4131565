/// Points for each line removed by a lock.
pub const LINE_SCORE: usize = 100;

/// First bonus term for a multi-line clear; each further term doubles.
pub const MULTI_LINE_BONUS: usize = LINE_SCORE / 2;

/// Returns the points for clearing `lines` rows with a single lock.
///
/// Every line is worth [`LINE_SCORE`]. When more than one line clears at
/// once, a bonus of 50, 100, 200, ... is added once per cleared line.
///
/// | lines | points                          |
/// |-------|---------------------------------|
/// | 0     | 0                               |
/// | 1     | 100                             |
/// | 2     | 200 + 50 + 100 = 350            |
/// | 3     | 300 + 50 + 100 + 200 = 650      |
/// | 4     | 400 + 50 + 100 + 200 + 400 = 1150 |
#[must_use]
pub const fn line_clear_score(lines: usize) -> usize {
    let mut score = lines.saturating_mul(LINE_SCORE);
    if lines > 1 {
        let mut bonus = MULTI_LINE_BONUS;
        let mut i = 0;
        while i < lines && score < usize::MAX {
            score = score.saturating_add(bonus);
            bonus = bonus.saturating_mul(2);
            i += 1;
        }
    }
    score
}

/// Game statistics tracking score, lines cleared, and piece count.
///
/// # Example
///
/// ```
/// use gtris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 1150);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines cleared.
    ///
    /// Index `n` counts locks that cleared `n` lines; locks clearing more than
    /// four lines (possible with custom catalogs) are counted in `[4]`.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records a lock that cleared `cleared_lines` rows and returns the points awarded.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        let points = line_clear_score(cleared_lines);
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        let bucket = cleared_lines.min(self.line_cleared_counter.len() - 1);
        self.line_cleared_counter[bucket] += 1;
        self.score = self.score.saturating_add(points);
        points
    }
}
