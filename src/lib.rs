#![deny(missing_docs)]

//! Solve [Sumplete](https://en.wikipedia.org/wiki/Sumplete) puzzles by
//! reducing them to [exact cover](https://en.wikipedia.org/wiki/Exact_cover)
//! problems and running [Dancing Links](https://en.wikipedia.org/wiki/Dancing_Links)
//! with [Algorithm X](https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X).
//!
//! ```
//! use sumplete::{puzzle::Puzzle, sumplete::Sumplete};
//!
//! let puzzle: Puzzle = "6 6 1 6\n2 7 9 9\n9 4 7 0\n2 13 0".parse().unwrap();
//! let grid = Sumplete::new(puzzle).first_solution().unwrap();
//!
//! assert_eq!(grid.to_rows(), vec![vec![0, 1, 0], vec![1, 1, 0], vec![0, 0, 0]]);
//! ```

pub mod dense_grid;
pub mod error;
pub(crate) mod grid;
pub mod matrix;
pub mod puzzle;
pub(crate) mod solver;
pub mod sparse_grid;
pub mod sumplete;

pub use error::{MatrixError, PuzzleError, SolveError};
pub use grid::Grid;
pub use solver::Solver;

/// An instance of an exact cover problem.
pub trait ExactCover {
    /// The type of values that are elements of a solution to the exact cover
    /// problem.
    type Possibility: core::fmt::Debug;

    /// The type of value that are constraints on a given instance of an exact
    /// cover problem.
    type Constraint: core::fmt::Debug;

    /// Return true if the given `Possibility` will satisfy the given
    /// `Constraint`.
    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool;

    /// Return true if the given `Constraint` is optional.
    fn is_optional(&self, cons: &Self::Constraint) -> bool;

    /// Return a list of possibilities for this instance of the problem.
    fn possibilities(&self) -> &[Self::Possibility];

    /// Return a list of constraints that must be satisfied for this instance of
    /// the problem.
    fn constraints(&self) -> &[Self::Constraint];

    /// Return the indices into [`ExactCover::constraints`] of every
    /// `Constraint` the given `Possibility` satisfies, in ascending order.
    ///
    /// The default implementation checks every constraint with
    /// [`ExactCover::satisfies`]. Problems which can compute the indices
    /// directly should override it.
    fn satisfied_constraint_indices(&self, poss: &Self::Possibility) -> Vec<usize> {
        self.constraints()
            .iter()
            .enumerate()
            .filter(|(_, cons)| self.satisfies(poss, cons))
            .map(|(index, _)| index)
            .collect()
    }

    /// Return an iterator over all solutions to this instance of the exact
    /// cover problem.
    fn solver(&self) -> Solver<'_, Self>
    where
        Self: Sized,
    {
        Solver::new(self)
    }
}

impl<E> ExactCover for &E
where
    E: ExactCover,
{
    type Constraint = E::Constraint;
    type Possibility = E::Possibility;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        <E as ExactCover>::satisfies(self, poss, cons)
    }

    fn is_optional(&self, cons: &Self::Constraint) -> bool {
        <E as ExactCover>::is_optional(self, cons)
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        <E as ExactCover>::possibilities(self)
    }

    fn constraints(&self) -> &[Self::Constraint] {
        <E as ExactCover>::constraints(self)
    }

    fn satisfied_constraint_indices(&self, poss: &Self::Possibility) -> Vec<usize> {
        <E as ExactCover>::satisfied_constraint_indices(self, poss)
    }
}
