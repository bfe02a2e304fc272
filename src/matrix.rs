//! A plain 0/1 matrix, as an exact cover problem whose possibilities are the
//! matrix rows and whose constraints are the matrix columns.
//!
//! This is the raw form an exact cover engine consumes. Solutions come back
//! as references to the selected [`MatrixRow`]s, which carry no meaning beyond
//! their bits and their position in the matrix.

use crate::{error::MatrixError, ExactCover};

/// A 0/1 matrix with a fixed number of columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<MatrixRow>,
    columns: Vec<usize>,
}

impl Matrix {
    /// Create a new matrix with `width` columns from the given rows.
    pub fn new(
        width: usize,
        rows: impl IntoIterator<Item = Vec<bool>>,
    ) -> Result<Self, MatrixError> {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, bits)| {
                if bits.len() == width {
                    Ok(MatrixRow { index, bits })
                } else {
                    Err(MatrixError::WrongRowWidth {
                        row: index,
                        expected: width,
                        found: bits.len(),
                    })
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self::from_rows(width, rows))
    }

    // Rows must already be `width` wide and indexed by position.
    pub(crate) fn from_rows(width: usize, rows: Vec<MatrixRow>) -> Self {
        Matrix {
            rows,
            columns: (0..width).collect(),
        }
    }

    /// The number of columns in the matrix.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// The rows of the matrix, in order.
    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }
}

impl ExactCover for Matrix {
    type Constraint = usize;
    type Possibility = MatrixRow;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        poss.bits[*cons]
    }

    fn is_optional(&self, _cons: &Self::Constraint) -> bool {
        false
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        &self.rows
    }

    fn constraints(&self) -> &[Self::Constraint] {
        &self.columns
    }

    fn satisfied_constraint_indices(&self, poss: &Self::Possibility) -> Vec<usize> {
        poss.set_columns()
    }
}

/// One row of a [`Matrix`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatrixRow {
    index: usize,
    bits: Vec<bool>,
}

impl MatrixRow {
    pub(crate) fn new(index: usize, bits: Vec<bool>) -> Self {
        MatrixRow { index, bits }
    }

    /// The position of this row in its matrix.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The entries of this row.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// The indices of the columns set in this row, in ascending order.
    pub fn set_columns(&self) -> Vec<usize> {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, bit)| **bit)
            .map(|(column, _)| column)
            .collect()
    }
}
