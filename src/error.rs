//! Errors reported while reading puzzles, building matrices and decoding
//! solutions.

/// Error for [`Puzzle::new`](crate::puzzle::Puzzle::new),
/// [`Puzzle::from_raw`](crate::puzzle::Puzzle::from_raw) and parsing a puzzle
/// from text.
///
/// Line numbers start at 0. When parsing text they count every line of the
/// input, blank lines included; otherwise they index the given rows. The
/// final line holds the column targets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    /// The input holds no puzzle cells at all.
    #[error("puzzle is empty")]
    Empty,
    /// A token is not a non-negative integer.
    #[error("line {line} contains invalid number '{token}'")]
    InvalidNumber {
        /// The line containing the token.
        line: usize,
        /// The token which failed to parse.
        token: String,
    },
    /// A line holds the wrong number of entries.
    #[error("line {line} should have {expected} entries, found {found}")]
    WrongLineLength {
        /// The offending line.
        line: usize,
        /// Number of entries required on this line.
        expected: usize,
        /// Number of entries found on this line.
        found: usize,
    },
    /// The puzzle holds the wrong number of lines for its width.
    #[error("puzzle should have {expected} lines, found {found}")]
    WrongLineCount {
        /// Number of lines required, including the column targets line.
        expected: usize,
        /// Number of lines found.
        found: usize,
    },
    /// The row or column targets do not match the puzzle size.
    #[error("puzzle needs {expected} targets per direction, found {found}")]
    WrongTargetCount {
        /// The side length of the puzzle.
        expected: usize,
        /// The number of targets supplied.
        found: usize,
    },
}

/// Error for [`Matrix::new`](crate::matrix::Matrix::new).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// A matrix row does not span the full column space.
    #[error("matrix row {row} should have {expected} columns, found {found}")]
    WrongRowWidth {
        /// Index of the offending row.
        row: usize,
        /// The width of the matrix.
        expected: usize,
        /// The width of the row.
        found: usize,
    },
}

/// Error for solving a Sumplete puzzle and decoding its exact cover
/// solutions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The exact cover search finished without producing a solution.
    #[error("puzzle has no solution")]
    NoSolution,
    /// An exact cover solution does not assign every puzzle row exactly once.
    #[error(
        "solution assigns {covered_rows} of {size} puzzle rows using {row_candidates} row \
         candidates"
    )]
    InconsistentSolution {
        /// Number of candidates in the solution recognised as row assignments.
        row_candidates: usize,
        /// Number of distinct puzzle rows those candidates assign.
        covered_rows: usize,
        /// The side length of the puzzle.
        size: usize,
    },
}
