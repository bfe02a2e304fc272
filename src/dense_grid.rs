//! Dense `Grid` implementation for use in the `Solver`.
//!
//! The matrix is stored as a flat row-major array of booleans, and covering a
//! column only records which rows and columns were hidden. Easy to audit and
//! fine for the small matrices small Sumplete puzzles produce.

use std::{cell::RefCell, vec};

use crate::Grid;

/// Dense grid implementation
#[derive(Debug)]
pub struct DenseGrid(RefCell<DenseGridInner>);

#[derive(Debug)]
struct DenseGridInner {
    num_rows: usize,
    num_columns: usize,

    covered_columns: Vec<bool>,
    covered_rows: Vec<bool>,

    data: Vec<bool>,

    covers: Vec<Cover>,
}

// Record of a single `cover` call, undone by the matching `uncover`.
#[derive(Debug)]
struct Cover {
    column: usize,
    rows: Vec<usize>,
}

impl DenseGridInner {
    #[inline]
    fn to_index(&self, row: usize, column: usize) -> usize {
        row * self.num_columns + column
    }

    fn new(num_columns: usize, filled_coordinates: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let filled_coordinates: Vec<_> = filled_coordinates.into_iter().collect();

        let num_rows = filled_coordinates
            .iter()
            .map(|(row, _)| *row + 1)
            .max()
            .unwrap_or(0);

        let mut inner = DenseGridInner {
            num_rows,
            num_columns,
            covered_columns: vec![false; num_columns],
            covered_rows: vec![false; num_rows],
            data: vec![false; num_rows * num_columns],
            covers: Vec::new(),
        };

        for (row, column) in filled_coordinates {
            assert!(
                column < num_columns,
                "Column [{}] is outside of the grid width [{}]",
                column,
                num_columns
            );
            let index = inner.to_index(row, column);
            inner.data[index] = true;
        }

        inner
    }

    fn is_filled(&self, row: usize, column: usize) -> bool {
        self.data[self.to_index(row, column)]
    }

    fn cover(&mut self, column: usize) {
        assert!(
            !self.covered_columns[column],
            "Column [{}] is already covered",
            column
        );

        let rows: Vec<_> = self.uncovered_rows_in_column(column).collect();
        self.covered_columns[column] = true;
        for row in &rows {
            self.covered_rows[*row] = true;
        }

        self.covers.push(Cover { column, rows });
    }

    fn uncover(&mut self, column: usize) {
        let cover = self
            .covers
            .pop()
            .expect("mismatched number of cover & uncover");
        assert_eq!(
            cover.column, column,
            "Expected column argument to match top cover"
        );

        self.covered_columns[cover.column] = false;
        for row in cover.rows {
            self.covered_rows[row] = false;
        }
    }

    fn uncovered_columns(&self) -> vec::IntoIter<usize> {
        (0..self.num_columns)
            .filter(|column| !self.covered_columns[*column])
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn uncovered_rows_in_column(&self, column: usize) -> vec::IntoIter<usize> {
        (0..self.num_rows)
            .filter(|row| !self.covered_rows[*row] && self.is_filled(*row, column))
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn column_size(&self, column: usize) -> usize {
        (0..self.num_rows)
            .filter(|row| !self.covered_rows[*row] && self.is_filled(*row, column))
            .count()
    }

    fn uncovered_columns_in_row(&self, row: usize) -> vec::IntoIter<usize> {
        (0..self.num_columns)
            .filter(|column| !self.covered_columns[*column] && self.is_filled(row, *column))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

impl Grid for DenseGrid {
    type Column = usize;
    type Row = usize;
    type UncoveredColumnsInRowIter = vec::IntoIter<usize>;
    type UncoveredColumnsIter = vec::IntoIter<usize>;
    type UncoveredRowsIter = vec::IntoIter<usize>;

    fn new(
        num_columns: usize,
        filled_coordinates: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        DenseGrid(RefCell::new(DenseGridInner::new(
            num_columns,
            filled_coordinates,
        )))
    }

    fn cover(&self, column: Self::Column) {
        self.0.borrow_mut().cover(column)
    }

    fn uncover(&self, column: Self::Column) {
        self.0.borrow_mut().uncover(column)
    }

    fn uncovered_columns(&self) -> Self::UncoveredColumnsIter {
        self.0.borrow().uncovered_columns()
    }

    fn uncovered_rows_in_column(&self, column: Self::Column) -> Self::UncoveredRowsIter {
        self.0.borrow().uncovered_rows_in_column(column)
    }

    fn column_id(&self, column: Self::Column) -> usize {
        column
    }

    fn row_id(&self, row: Self::Row) -> usize {
        row
    }

    fn column_size(&self, column: Self::Column) -> usize {
        self.0.borrow().column_size(column)
    }

    fn uncovered_columns_in_row(&self, row: Self::Row) -> Self::UncoveredColumnsInRowIter {
        self.0.borrow().uncovered_columns_in_row(row)
    }
}
