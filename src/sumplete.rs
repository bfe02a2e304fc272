//! Reduction of a [`Puzzle`] to an exact cover problem, and decoding of exact
//! cover solutions back into a [`KeepGrid`].
//!
//! # Encoding
//!
//! Every cell `(r, c)` of an `n` × `n` puzzle owns two constraints, and every
//! line owns one more:
//!
//!  - [`Constraint::RowKeep`], at dense index `r·n + c`
//!  - [`Constraint::ColumnKeep`], at dense index `n² + c·n + r`
//!  - [`Constraint::Line`], at dense index `2·n² + r` for row `r` and
//!    `2·n² + n + c` for column `c`
//!
//! Each possibility is one complete assignment of a single row or column
//! whose kept cells add up to the line's target. A row assignment covers
//! `RowKeep` for the cells it keeps and `ColumnKeep` for the cells it crosses
//! out. A column assignment does the opposite: `ColumnKeep` for kept cells
//! and `RowKeep` for crossed out cells. Every assignment also covers the
//! `Line` constraint of its own line, so each line is assigned exactly once.
//! Since every constraint must be covered exactly once, the assignment picked
//! for a row and the one picked for a column always agree on the cell they
//! share.
//!
//! # Decoding
//!
//! Every possibility carries the [`Line`] it assigns, so a solution decodes
//! by reading the kept cells off the row assignments. For raw matrix rows,
//! which carry nothing but their bits, [`classify_columns`] recovers whether a
//! row came from a puzzle row or a puzzle column from the shape of its set
//! columns, and [`decode_raw`] builds on that.

use crate::{
    error::SolveError,
    matrix::{Matrix, MatrixRow},
    puzzle::{KeepGrid, Puzzle},
    ExactCover,
};
use itertools::Itertools;
use std::{collections::BTreeSet, iter};

/// Instance of a Sumplete puzzle, encoded as an exact cover problem.
#[derive(Debug)]
pub struct Sumplete {
    puzzle: Puzzle,
    /// Every target satisfying assignment of every row, followed by every
    /// target satisfying assignment of every column.
    pub possibilities: Vec<Possibility>,
    /// The `2·n²` keep constraints followed by the `2·n` line constraints, in
    /// dense index order.
    pub constraints: Vec<Constraint>,
}

impl Sumplete {
    /// Encode the given puzzle.
    pub fn new(puzzle: Puzzle) -> Self {
        let size = puzzle.size();

        let row_possibilities = (0..size).flat_map(|row| {
            Possibility::all_for_line(
                Line::Row(row),
                puzzle.row(row).to_vec(),
                puzzle.row_targets()[row],
            )
        });
        let column_possibilities = (0..size).flat_map(|column| {
            Possibility::all_for_line(
                Line::Column(column),
                puzzle.column(column),
                puzzle.column_targets()[column],
            )
        });
        let possibilities: Vec<_> = row_possibilities.chain(column_possibilities).collect();

        log::debug!(
            "Encoded puzzle of size [{}] into [{}] possibilities.",
            size,
            possibilities.len()
        );

        Sumplete {
            possibilities,
            constraints: Constraint::all(size).collect(),
            puzzle,
        }
    }

    /// The puzzle this instance encodes.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// The side length of the puzzle.
    pub fn size(&self) -> usize {
        self.puzzle.size()
    }

    /// Return the encoding as a plain 0/1 matrix, one row per possibility in
    /// the same order, over the `2·n² + 2·n` constraint columns.
    pub fn matrix(&self) -> Matrix {
        let size = self.size();
        let rows = self
            .possibilities
            .iter()
            .enumerate()
            .map(|(index, poss)| MatrixRow::new(index, poss.to_bits(size)))
            .collect();

        Matrix::from_rows(self.constraints.len(), rows)
    }

    /// Decode one exact cover solution into the grid of kept cells.
    ///
    /// Only row assignments are read; the column assignments agree with them
    /// in any exact cover. Fails with [`SolveError::InconsistentSolution`] unless
    /// every puzzle row is assigned exactly once.
    ///
    /// # Panics
    ///
    /// Panics if a possibility refers to a line or cell outside of this
    /// puzzle.
    pub fn decode(&self, solution: &[&Possibility]) -> Result<KeepGrid, SolveError> {
        let size = self.size();
        let mut grid = KeepGrid::new(size);
        let mut assigned = vec![false; size];
        let mut row_candidates = 0;

        for poss in solution {
            if let Line::Row(row) = poss.line {
                row_candidates += 1;
                assigned[row] = true;

                for column in &poss.kept {
                    grid.keep(row, *column);
                }
            }
        }

        log::trace!("Decoded [{}] row assignments.", row_candidates);

        check_assignments(grid, &assigned, row_candidates)
    }

    /// Return an iterator over the decoded solutions of the puzzle.
    ///
    /// Solutions are searched lazily, one per call to `next`.
    pub fn solutions(&self) -> impl Iterator<Item = Result<KeepGrid, SolveError>> + '_ {
        self.solver().map(move |solution| self.decode(&solution))
    }

    /// Return the first solution of the puzzle, or
    /// [`SolveError::NoSolution`] when there is none.
    pub fn first_solution(&self) -> Result<KeepGrid, SolveError> {
        self.solutions().next().unwrap_or(Err(SolveError::NoSolution))
    }
}

impl ExactCover for Sumplete {
    type Constraint = Constraint;
    type Possibility = Possibility;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        poss.satisfies(cons)
    }

    fn is_optional(&self, _cons: &Self::Constraint) -> bool {
        false
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        &self.possibilities
    }

    fn constraints(&self) -> &[Self::Constraint] {
        &self.constraints
    }

    fn satisfied_constraint_indices(&self, poss: &Self::Possibility) -> Vec<usize> {
        poss.covered_columns(self.size())
    }
}

/// A single row or column of the puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Line {
    /// The row with the given index, counting from the top.
    Row(usize),
    /// The column with the given index, counting from the left.
    Column(usize),
}

impl Line {
    /// Return whether this is a row or a column.
    pub fn kind(self) -> LineKind {
        match self {
            Line::Row(_) => LineKind::Row,
            Line::Column(_) => LineKind::Column,
        }
    }
}

/// Whether a possibility assigns a puzzle row or a puzzle column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// The possibility assigns a row.
    Row,
    /// The possibility assigns a column.
    Column,
}

/// One complete assignment of a row or column whose kept cells add up to
/// the line's target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Possibility {
    /// The line this possibility assigns.
    pub line: Line,
    /// Positions along the line of the kept cells, in ascending order. Every
    /// other cell of the line is crossed out.
    pub kept: Vec<usize>,
}

impl Possibility {
    /// Return an iterator over every assignment of a line with the given
    /// values whose kept cells sum to `target`.
    ///
    /// Assignments are produced lazily, ordered by the number of kept cells
    /// and then lexicographically.
    pub fn all_for_line(line: Line, values: Vec<u64>, target: u64) -> impl Iterator<Item = Self> {
        let size = values.len();

        (0..=size)
            .flat_map(move |count| (0..size).combinations(count))
            .filter(move |kept| {
                kept.iter()
                    .try_fold(0u64, |sum, index| sum.checked_add(values[*index]))
                    == Some(target)
            })
            .map(move |kept| Possibility { line, kept })
    }

    /// Return true if the cell at `index` along the line is kept.
    pub fn is_kept(&self, index: usize) -> bool {
        self.kept.binary_search(&index).is_ok()
    }

    /// Return true if this `Possibility` satisfies the given `Constraint`.
    pub fn satisfies(&self, constraint: &Constraint) -> bool {
        match (self.line, *constraint) {
            (Line::Row(line), Constraint::RowKeep { row, column }) => {
                row == line && self.is_kept(column)
            }
            (Line::Row(line), Constraint::ColumnKeep { row, column }) => {
                row == line && !self.is_kept(column)
            }
            (Line::Column(line), Constraint::ColumnKeep { row, column }) => {
                column == line && self.is_kept(row)
            }
            (Line::Column(line), Constraint::RowKeep { row, column }) => {
                column == line && !self.is_kept(row)
            }
            (_, Constraint::Line(line)) => self.line == line,
        }
    }

    /// Return an iterator over the `Constraint`s satisfied by this
    /// `Possibility`: one per cell of the line, then the line itself.
    pub fn satisfied_constraints(&self, size: usize) -> impl Iterator<Item = Constraint> + '_ {
        (0..size)
            .map(move |index| match self.line {
                Line::Row(row) if self.is_kept(index) => Constraint::RowKeep { row, column: index },
                Line::Row(row) => Constraint::ColumnKeep { row, column: index },
                Line::Column(column) if self.is_kept(index) => {
                    Constraint::ColumnKeep { row: index, column }
                }
                Line::Column(column) => Constraint::RowKeep { row: index, column },
            })
            .chain(iter::once(Constraint::Line(self.line)))
    }

    /// Return the dense indices of the constraints satisfied by this
    /// `Possibility`, in ascending order.
    pub fn covered_columns(&self, size: usize) -> Vec<usize> {
        let mut columns: Vec<_> = self
            .satisfied_constraints(size)
            .map(|cons| cons.index(size))
            .collect();
        columns.sort_unstable();

        columns
    }

    /// Return this `Possibility` as a 0/1 matrix row over all `2·n² + 2·n`
    /// constraints.
    pub fn to_bits(&self, size: usize) -> Vec<bool> {
        let mut bits = vec![false; Constraint::count(size)];
        for column in self.covered_columns(size) {
            bits[column] = true;
        }

        bits
    }
}

/// A condition which must be satisfied in order to solve a Sumplete puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constraint {
    /// The cell is kept according to its row, or crossed out according to its
    /// column.
    RowKeep {
        /// The row index
        row: usize,
        /// The column index
        column: usize,
    },
    /// The cell is kept according to its column, or crossed out according to
    /// its row.
    ColumnKeep {
        /// The row index
        row: usize,
        /// The column index
        column: usize,
    },
    /// The line is assigned.
    Line(Line),
}

impl Constraint {
    /// Return an iterator over all `Constraint`s for the given `size`, in
    /// dense index order.
    pub fn all(size: usize) -> impl Iterator<Item = Constraint> {
        let row_keep_it = (0..size)
            .flat_map(move |row| (0..size).map(move |column| Constraint::RowKeep { row, column }));
        let column_keep_it = (0..size).flat_map(move |column| {
            (0..size).map(move |row| Constraint::ColumnKeep { row, column })
        });

        let line_it = (0..size)
            .map(Line::Row)
            .chain((0..size).map(Line::Column))
            .map(Constraint::Line);

        row_keep_it.chain(column_keep_it).chain(line_it)
    }

    /// The number of `Constraint`s for the given `size`.
    pub fn count(size: usize) -> usize {
        2 * size * size + 2 * size
    }

    /// Return the dense index of this `Constraint` for a puzzle of the given
    /// `size`.
    pub fn index(self, size: usize) -> usize {
        match self {
            Constraint::RowKeep { row, column } => row * size + column,
            Constraint::ColumnKeep { row, column } => size * size + column * size + row,
            Constraint::Line(Line::Row(row)) => 2 * size * size + row,
            Constraint::Line(Line::Column(column)) => 2 * size * size + size + column,
        }
    }
}

/// Classify a raw matrix row by its set column indices, as assigning a puzzle
/// row or a puzzle column. `Line` entries are ignored.
///
/// The row is taken to assign a puzzle row if its `ColumnKeep` entries span
/// more than one puzzle column, or if its `RowKeep` entries all sit in one
/// puzzle row but span more than one cell of it.
///
/// Column assignments are never reported as rows. Row assignments are always
/// recognised once `size >= 3`; below that a row assignment which keeps a
/// single cell (or any row assignment, when `size == 1`) looks like a column
/// assignment.
pub fn classify_columns(columns: &[usize], size: usize) -> LineKind {
    let block = size * size;

    let row_keep = || columns.iter().copied().filter(move |column| *column < block);
    let row_divisions: BTreeSet<_> = row_keep().map(|column| column / size).collect();
    let row_remainders: BTreeSet<_> = row_keep().map(|column| column % size).collect();
    let column_divisions: BTreeSet<_> = columns
        .iter()
        .filter(|column| (block..2 * block).contains(*column))
        .map(|column| (column - block) / size)
        .collect();

    if column_divisions.len() > 1 || (row_divisions.len() == 1 && row_remainders.len() > 1) {
        LineKind::Row
    } else {
        LineKind::Column
    }
}

/// Decode an exact cover solution given as raw matrix rows, each described by
/// its set column indices, into the grid of kept cells.
///
/// Rows are told apart with [`classify_columns`]. Fails with
/// [`SolveError::InconsistentSolution`] unless exactly one row of the solution
/// is recognised for every puzzle row, which happens for some solutions of
/// puzzles smaller than 3 × 3.
pub fn decode_raw<I, R>(rows: I, size: usize) -> Result<KeepGrid, SolveError>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[usize]>,
{
    let block = size * size;
    let mut grid = KeepGrid::new(size);
    let mut assigned = vec![false; size];
    let mut row_candidates = 0;

    for columns in rows {
        let columns = columns.as_ref();
        if classify_columns(columns, size) != LineKind::Row {
            continue;
        }
        row_candidates += 1;

        // The puzzle row shows up in `RowKeep` as the division and in
        // `ColumnKeep` as the remainder
        if let Some(first) = columns.first() {
            let row = if *first < block {
                first / size
            } else {
                (first - block) % size
            };
            assigned[row] = true;
        }

        for column in columns.iter().filter(|column| **column < block) {
            grid.keep(column / size, column % size);
        }
    }

    log::trace!("Classified [{}] raw rows as row assignments.", row_candidates);

    check_assignments(grid, &assigned, row_candidates)
}

fn check_assignments(
    grid: KeepGrid,
    assigned: &[bool],
    row_candidates: usize,
) -> Result<KeepGrid, SolveError> {
    let size = assigned.len();
    let covered_rows = assigned.iter().filter(|assigned| **assigned).count();

    if row_candidates == size && covered_rows == size {
        Ok(grid)
    } else {
        Err(SolveError::InconsistentSolution {
            row_candidates,
            covered_rows,
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense_grid::DenseGrid;
    use crate::Solver;

    fn example() -> Sumplete {
        Sumplete::new("6 6 1 6\n2 7 9 9\n9 4 7 0\n2 13 0".parse().unwrap())
    }

    fn p(line: Line, kept: &[usize]) -> Possibility {
        Possibility {
            line,
            kept: kept.to_vec(),
        }
    }

    #[test]
    fn check_generated_possibilities() {
        let sumplete = example();

        assert_eq!(
            sumplete.possibilities,
            vec![
                p(Line::Row(0), &[0]),
                p(Line::Row(0), &[1]),
                p(Line::Row(1), &[2]),
                p(Line::Row(1), &[0, 1]),
                p(Line::Row(2), &[]),
                p(Line::Column(0), &[1]),
                p(Line::Column(1), &[0, 1]),
                p(Line::Column(2), &[]),
            ]
        );
        assert_eq!(sumplete.constraints.len(), 24);
    }

    #[test]
    fn constraints_are_in_dense_order() {
        for size in 1..5 {
            let indices: Vec<_> = Constraint::all(size).map(|cons| cons.index(size)).collect();

            assert_eq!(indices, (0..Constraint::count(size)).collect::<Vec<_>>());
        }
    }

    #[test]
    fn covered_columns_of_example() {
        // Row 0 keeps its middle cell
        assert_eq!(p(Line::Row(0), &[1]).covered_columns(3), vec![1, 9, 15, 18]);
        // Column 0 keeps its middle cell
        assert_eq!(p(Line::Column(0), &[1]).covered_columns(3), vec![0, 6, 10, 21]);
    }

    #[test]
    fn covered_columns_match_satisfies() {
        let sumplete = example();

        for poss in &sumplete.possibilities {
            let expected: Vec<_> = sumplete
                .constraints
                .iter()
                .enumerate()
                .filter(|(_, cons)| poss.satisfies(cons))
                .map(|(index, _)| index)
                .collect();

            assert_eq!(poss.covered_columns(3), expected, "{:?}", poss);
        }
    }

    #[test]
    fn every_cell_is_covered_once_per_line() {
        let sumplete = example();

        for poss in &sumplete.possibilities {
            let bits = poss.to_bits(3);
            assert_eq!(bits.len(), 24);
            assert_eq!(bits[..18].iter().filter(|bit| **bit).count(), 3);
            assert_eq!(bits[18..].iter().filter(|bit| **bit).count(), 1);
        }
    }

    #[test]
    fn solve_example() {
        let sumplete = example();
        let solutions: Vec<_> = sumplete.solutions().collect();

        assert_eq!(solutions.len(), 1);
        assert_eq!(
            solutions[0].as_ref().unwrap().to_rows(),
            vec![vec![0, 1, 0], vec![1, 1, 0], vec![0, 0, 0]]
        );
    }

    #[test]
    fn solve_example_dense() {
        let sumplete = example();
        let mut solver: Solver<_, DenseGrid> = Solver::new(&sumplete);
        let solutions = solver.all_solutions();

        assert_eq!(solutions.len(), 1);
        let mut solution = solutions[0].clone();
        solution.sort();
        assert_eq!(
            solution,
            vec![
                &p(Line::Row(0), &[1]),
                &p(Line::Row(1), &[0, 1]),
                &p(Line::Row(2), &[]),
                &p(Line::Column(0), &[1]),
                &p(Line::Column(1), &[0, 1]),
                &p(Line::Column(2), &[]),
            ]
        );
    }

    #[test]
    fn full_and_empty_lines() {
        let puzzle = "1 2 3\n3 4 0\n1 2".parse().unwrap();
        let grid = Sumplete::new(puzzle).first_solution().unwrap();

        assert_eq!(grid.to_rows(), vec![vec![1, 1], vec![0, 0]]);
    }

    #[test]
    fn each_line_is_assigned_once() {
        // Both assignments of row 0 together cover each of its cells once
        let sumplete = Sumplete::new("6 6 6\n4 4 4\n10 0".parse().unwrap());
        let solutions = sumplete.solver().all_solutions();

        assert_eq!(solutions.len(), 1);
        let mut lines: Vec<_> = solutions[0].iter().map(|poss| poss.line).collect();
        lines.sort();
        assert_eq!(
            lines,
            vec![Line::Row(0), Line::Row(1), Line::Column(0), Line::Column(1)]
        );
        assert_eq!(
            sumplete.first_solution().unwrap().to_rows(),
            vec![vec![1, 0], vec![1, 0]]
        );
    }

    #[test]
    fn unreachable_target_has_no_solution() {
        let puzzle = "1 2 4\n3 4 0\n1 2".parse().unwrap();
        let sumplete = Sumplete::new(puzzle);

        assert!(sumplete.possibilities.iter().all(|poss| poss.line != Line::Row(0)));
        assert_eq!(sumplete.first_solution(), Err(SolveError::NoSolution));
    }

    #[test]
    fn classify_example_possibilities() {
        let sumplete = example();

        for poss in &sumplete.possibilities {
            assert_eq!(
                classify_columns(&poss.covered_columns(3), 3),
                poss.line.kind(),
                "{:?}",
                poss
            );
        }
    }

    #[test]
    fn classify_small_row_keeping_one_cell_as_column() {
        // A 2 × 2 row assignment keeping one cell has the same shape as a
        // column assignment
        let poss = p(Line::Row(0), &[1]);

        assert_eq!(classify_columns(&poss.covered_columns(2), 2), LineKind::Column);
    }

    #[test]
    fn matrix_rows_follow_possibilities() {
        let sumplete = example();
        let matrix = sumplete.matrix();

        assert_eq!(matrix.width(), 24);
        assert_eq!(matrix.rows().len(), sumplete.possibilities.len());
        for (row, poss) in matrix.rows().iter().zip(&sumplete.possibilities) {
            assert_eq!(row.bits(), &poss.to_bits(3)[..]);
            assert_eq!(row.set_columns(), poss.covered_columns(3));
        }
    }

    #[test]
    fn decode_raw_matches_decode() {
        let sumplete = example();
        let matrix = sumplete.matrix();
        let raw_solution = matrix.solver().next().unwrap();

        let grid = decode_raw(raw_solution.iter().map(|row| row.set_columns()), 3).unwrap();
        assert_eq!(grid, sumplete.first_solution().unwrap());
    }

    #[test]
    fn decode_raw_rejects_unrecognised_rows() {
        // Both rows keep one of their two cells
        let sumplete = Sumplete::new("1 2 2\n3 4 3\n3 2".parse().unwrap());
        let grid = sumplete.first_solution().unwrap();
        assert_eq!(grid.to_rows(), vec![vec![0, 1], vec![1, 0]]);

        let matrix = sumplete.matrix();
        let raw_solution = matrix.solver().next().unwrap();

        assert!(matches!(
            decode_raw(raw_solution.iter().map(|row| row.set_columns()), 2),
            Err(SolveError::InconsistentSolution { size: 2, .. })
        ));
    }

    #[test]
    fn decode_rejects_missing_rows() {
        let sumplete = example();
        let column_only = [&sumplete.possibilities[5], &sumplete.possibilities[6]];

        assert_eq!(
            sumplete.decode(&column_only),
            Err(SolveError::InconsistentSolution {
                row_candidates: 0,
                covered_rows: 0,
                size: 3
            })
        );

        let duplicated = [
            &sumplete.possibilities[0],
            &sumplete.possibilities[1],
            &sumplete.possibilities[2],
        ];
        assert_eq!(
            sumplete.decode(&duplicated),
            Err(SolveError::InconsistentSolution {
                row_candidates: 3,
                covered_rows: 2,
                size: 3
            })
        );
    }
}
