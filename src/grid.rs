use std::fmt::Debug;

/// Storage for the 0/1 matrix of an exact cover problem, which can be
/// permuted by covering and uncovering columns while running Algorithm X.
///
/// The `Solver` only talks to the matrix through this trait, so any
/// implementation that honours the cover/uncover contract can be swapped in.
pub trait Grid {
    /// The type representing a column in the grid.
    type Column: Debug + Copy;
    /// The type of an iterator over all the uncovered columns in the grid.
    type UncoveredColumnsIter: Iterator<Item = Self::Column>;
    /// The type representing a row in the grid.
    type Row: Debug + Copy;
    /// The type of an iterator over all uncovered rows in a column.
    type UncoveredRowsIter: Iterator<Item = Self::Row>;
    /// The type of an iterator over all uncovered columns in a row.
    type UncoveredColumnsInRowIter: Iterator<Item = Self::Column>;

    /// Create a new grid with a specified number of columns, and the given
    /// `(row, column)` coordinates filled.
    ///
    /// Rows and columns are 0 indexed, and the row and column ids reported
    /// back by the grid are the same indices that were passed in here.
    fn new(
        num_columns: usize,
        filled_coordinates: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self;

    /// Cover entire column, and any rows that that appear in this column.
    ///
    /// # Panics
    ///
    /// Panics if multiple calls to `cover` are made with the same `column`
    /// value, without an intermediate `uncover` for the same column.
    fn cover(&self, column: Self::Column);

    /// Uncover entire column, and any rows that appear in this column.
    ///
    /// Columns must be uncovered in the reverse order they were covered.
    ///
    /// # Panics
    ///
    /// Panics if there was not a previous call to `cover` the same column.
    fn uncover(&self, column: Self::Column);

    /// Return an iterator over the columns that are uncovered.
    fn uncovered_columns(&self) -> Self::UncoveredColumnsIter;

    /// Return an iterator over all uncovered rows in this column.
    fn uncovered_rows_in_column(&self, column: Self::Column) -> Self::UncoveredRowsIter;

    /// Return a stable unique identifier for this column.
    fn column_id(&self, column: Self::Column) -> usize;

    /// Return a stable unique identifier for this row.
    fn row_id(&self, row: Self::Row) -> usize;

    /// Return the number of rows uncovered in this column.
    fn column_size(&self, column: Self::Column) -> usize;

    /// Return the list of columns that are uncovered in the given row.
    ///
    /// The row itself may already be covered, in which case this lists the
    /// columns of the row which are still part of the grid.
    fn uncovered_columns_in_row(&self, row: Self::Row) -> Self::UncoveredColumnsInRowIter;
}
