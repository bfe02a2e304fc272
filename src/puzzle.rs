//! A Sumplete puzzle is an `n` × `n` grid of numbers with a target sum for
//! every row and every column. Solving it means crossing out cells until the
//! cells that are kept in each row and each column add up to that line's
//! target.
//!
//! # Text format
//!
//! Puzzles are read as whitespace separated non-negative integers. Each of
//! the first `n` lines holds a row of the grid followed by that row's target,
//! and the last line holds the `n` column targets:
//!
//! ```text
//! 6 6 1 6
//! 2 7 9 9
//! 9 4 7 0
//! 2 13 0
//! ```
//!
//! Blank lines are ignored.

use crate::error::PuzzleError;
use std::{fmt, str::FromStr};

/// Instance of a Sumplete puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Puzzle {
    values: Vec<Vec<u64>>,
    row_targets: Vec<u64>,
    column_targets: Vec<u64>,
}

impl Puzzle {
    /// Create a new puzzle from its grid values and the target sums of each
    /// row and column.
    pub fn new(
        values: Vec<Vec<u64>>,
        row_targets: Vec<u64>,
        column_targets: Vec<u64>,
    ) -> Result<Self, PuzzleError> {
        let size = values.len();
        if size == 0 {
            return Err(PuzzleError::Empty);
        }

        if let Some((line, row)) = values
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != size)
        {
            return Err(PuzzleError::WrongLineLength {
                line,
                expected: size,
                found: row.len(),
            });
        }

        for targets in [&row_targets, &column_targets] {
            if targets.len() != size {
                return Err(PuzzleError::WrongTargetCount {
                    expected: size,
                    found: targets.len(),
                });
            }
        }

        Ok(Puzzle {
            values,
            row_targets,
            column_targets,
        })
    }

    /// Create a new puzzle from the raw `(n + 1)` line layout of the text
    /// format: `n` rows of `n` values each followed by the row target, then a
    /// line of `n` column targets.
    pub fn from_raw(mut raw: Vec<Vec<u64>>) -> Result<Self, PuzzleError> {
        let size = match raw.first() {
            None => return Err(PuzzleError::Empty),
            // A row needs at least one value and its target
            Some(first) if first.len() < 2 => {
                return Err(PuzzleError::WrongLineLength {
                    line: 0,
                    expected: 2,
                    found: first.len(),
                })
            }
            Some(first) => first.len() - 1,
        };

        if raw.len() != size + 1 {
            return Err(PuzzleError::WrongLineCount {
                expected: size + 1,
                found: raw.len(),
            });
        }

        let column_targets = raw.pop().unwrap_or_default();
        if column_targets.len() != size {
            return Err(PuzzleError::WrongLineLength {
                line: size,
                expected: size,
                found: column_targets.len(),
            });
        }

        let mut row_targets = Vec::with_capacity(size);
        for (line, row) in raw.iter_mut().enumerate() {
            if row.len() != size + 1 {
                return Err(PuzzleError::WrongLineLength {
                    line,
                    expected: size + 1,
                    found: row.len(),
                });
            }
            row_targets.extend(row.pop());
        }

        Puzzle::new(raw, row_targets, column_targets)
    }

    /// The side length `n` of the puzzle.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// The value of the cell at the given position.
    pub fn value(&self, row: usize, column: usize) -> u64 {
        self.values[row][column]
    }

    /// The values of one row, from left to right.
    pub fn row(&self, row: usize) -> &[u64] {
        &self.values[row]
    }

    /// The values of one column, from top to bottom.
    pub fn column(&self, column: usize) -> Vec<u64> {
        self.values.iter().map(|row| row[column]).collect()
    }

    /// The target sum of every row, from top to bottom.
    pub fn row_targets(&self) -> &[u64] {
        &self.row_targets
    }

    /// The target sum of every column, from left to right.
    pub fn column_targets(&self) -> &[u64] {
        &self.column_targets
    }

    /// Return true if keeping exactly the cells marked in `grid` makes every
    /// row and column add up to its target.
    pub fn is_solved_by(&self, grid: &KeepGrid) -> bool {
        let size = self.size();
        if grid.size() != size {
            return false;
        }

        let rows_solved = (0..size).all(|row| {
            self.kept_sum(grid, (0..size).map(|column| (row, column)))
                == Some(self.row_targets[row])
        });
        let columns_solved = (0..size).all(|column| {
            self.kept_sum(grid, (0..size).map(|row| (row, column)))
                == Some(self.column_targets[column])
        });

        rows_solved && columns_solved
    }

    fn kept_sum(&self, grid: &KeepGrid, cells: impl Iterator<Item = (usize, usize)>) -> Option<u64> {
        cells
            .filter(|(row, column)| grid.is_kept(*row, *column))
            .try_fold(0u64, |sum, (row, column)| sum.checked_add(self.value(row, column)))
    }
}

impl FromStr for Puzzle {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (line_numbers, raw): (Vec<_>, Vec<_>) = s
            .lines()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(line, text)| {
                text.split_whitespace()
                    .map(|token| {
                        token.parse::<u64>().map_err(|_| PuzzleError::InvalidNumber {
                            line,
                            token: token.to_owned(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(|values| (line, values))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .unzip();

        log::debug!("Parsed puzzle input into [{}] lines.", raw.len());

        Puzzle::from_raw(raw).map_err(|err| match err {
            PuzzleError::WrongLineLength {
                line,
                expected,
                found,
            } => PuzzleError::WrongLineLength {
                line: line_numbers[line],
                expected,
                found,
            },
            err => err,
        })
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, target) in self.values.iter().zip(&self.row_targets) {
            for value in row {
                write!(f, "{} ", value)?;
            }
            writeln!(f, "{}", target)?;
        }

        let column_targets: Vec<_> = self.column_targets.iter().map(u64::to_string).collect();
        writeln!(f, "{}", column_targets.join(" "))
    }
}

/// The decision for every cell of a solved puzzle: kept, or crossed out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeepGrid {
    size: usize,
    kept: Vec<bool>,
}

impl KeepGrid {
    /// Create a grid of the given side length with every cell crossed out.
    pub fn new(size: usize) -> Self {
        KeepGrid {
            size,
            kept: vec![false; size * size],
        }
    }

    /// Create a grid from rows of `0` (crossed out) and non-zero (kept)
    /// entries.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let size = rows.len();
        let mut grid = KeepGrid::new(size);
        for (row, entries) in rows.iter().enumerate() {
            let entries = entries.as_ref();
            assert_eq!(entries.len(), size, "Row [{}] is not [{}] wide", row, size);

            for (column, entry) in entries.iter().enumerate() {
                if *entry != 0 {
                    grid.keep(row, column);
                }
            }
        }

        grid
    }

    /// The side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Return true if the cell at the given position is kept.
    pub fn is_kept(&self, row: usize, column: usize) -> bool {
        self.kept[row * self.size + column]
    }

    pub(crate) fn keep(&mut self, row: usize, column: usize) {
        self.kept[row * self.size + column] = true;
    }

    /// Iterate over the rows of the grid, from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // `max(1)` keeps `chunks` happy for the empty grid
        self.kept.chunks(self.size.max(1))
    }

    /// Return the grid as rows of `1` (kept) and `0` (crossed out).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|kept| u8::from(*kept)).collect())
            .collect()
    }
}

impl fmt::Display for KeepGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            let row: Vec<_> = row.iter().map(u8::to_string).collect();
            writeln!(f, "{}", row.join(" "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "6 6 1 6\n2 7 9 9\n9 4 7 0\n2 13 0\n";

    #[test]
    fn parse_example() {
        let puzzle: Puzzle = EXAMPLE.parse().unwrap();

        assert_eq!(puzzle.size(), 3);
        assert_eq!(puzzle.row(1), &[2, 7, 9]);
        assert_eq!(puzzle.column(0), vec![6, 2, 9]);
        assert_eq!(puzzle.row_targets(), &[6, 9, 0]);
        assert_eq!(puzzle.column_targets(), &[2, 13, 0]);
        assert_eq!(puzzle.to_string(), EXAMPLE);
    }

    #[test]
    fn parse_skips_blank_lines() {
        let puzzle: Puzzle = "\n 1 2 3\n\n4 5 6 \n  \n5 7\n".parse().unwrap();

        assert_eq!(puzzle.size(), 2);
        assert_eq!(puzzle.value(1, 0), 4);
        assert_eq!(puzzle.row_targets(), &[3, 6]);
        assert_eq!(puzzle.column_targets(), &[5, 7]);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert_eq!("".parse::<Puzzle>(), Err(PuzzleError::Empty));
        assert_eq!("\n  \n".parse::<Puzzle>(), Err(PuzzleError::Empty));
        assert_eq!(
            "5\n".parse::<Puzzle>(),
            Err(PuzzleError::WrongLineLength {
                line: 0,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            "1 x 3\n4 5 6\n5 7".parse::<Puzzle>(),
            Err(PuzzleError::InvalidNumber {
                line: 0,
                token: "x".to_owned()
            })
        );
        assert_eq!(
            "1 -2 3\n4 5 6\n5 7".parse::<Puzzle>(),
            Err(PuzzleError::InvalidNumber {
                line: 0,
                token: "-2".to_owned()
            })
        );
        assert_eq!(
            "1 2 3\n4 5 6".parse::<Puzzle>(),
            Err(PuzzleError::WrongLineCount {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "1 2 3\n4 5\n5 7".parse::<Puzzle>(),
            Err(PuzzleError::WrongLineLength {
                line: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "1 2 3\n4 5 6\n5 7 1".parse::<Puzzle>(),
            Err(PuzzleError::WrongLineLength {
                line: 2,
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn errors_report_text_line_numbers() {
        assert_eq!(
            "\n1 2 3\n\n4 x 6\n5 7".parse::<Puzzle>(),
            Err(PuzzleError::InvalidNumber {
                line: 3,
                token: "x".to_owned()
            })
        );
        assert_eq!(
            "1 2 3\n\n\n4 5\n5 7".parse::<Puzzle>(),
            Err(PuzzleError::WrongLineLength {
                line: 3,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Puzzle::from_raw(vec![vec![1, 2, 3], vec![4, 5], vec![5, 7]]),
            Err(PuzzleError::WrongLineLength {
                line: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn new_checks_shape() {
        assert_eq!(
            Puzzle::new(vec![vec![1, 2], vec![3]], vec![1, 1], vec![1, 1]),
            Err(PuzzleError::WrongLineLength {
                line: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Puzzle::new(vec![vec![1]], vec![1], vec![]),
            Err(PuzzleError::WrongTargetCount {
                expected: 1,
                found: 0
            })
        );
    }

    #[test]
    fn check_solution() {
        let puzzle: Puzzle = EXAMPLE.parse().unwrap();

        assert!(puzzle.is_solved_by(&KeepGrid::from_rows(&[[0u8, 1, 0], [1, 1, 0], [0, 0, 0]])));
        assert!(!puzzle.is_solved_by(&KeepGrid::from_rows(&[[1u8, 0, 0], [1, 1, 0], [0, 0, 0]])));
        assert!(!puzzle.is_solved_by(&KeepGrid::new(2)));
    }

    #[test]
    fn display_keep_grid() {
        let grid = KeepGrid::from_rows(&[[0u8, 1], [1, 1]]);

        assert_eq!(grid.to_string(), "0 1\n1 1\n");
        assert_eq!(grid.to_rows(), vec![vec![0, 1], vec![1, 1]]);
        assert!(grid.is_kept(1, 0));
        assert!(!grid.is_kept(0, 0));
    }
}
