//! Sparse `Grid` implementation, using the dancing links technique.
//!
//! Only the filled entries of the matrix are stored, as nodes that are linked
//! to their neighbors in all four directions. Covering a column splices it and
//! the rows that intersect it out of the mesh, without freeing anything, so
//! that uncovering can splice them back in.

mod links;

use std::{cell::RefCell, iter, vec};

use self::links::{Nodes, ROOT};
use crate::Grid;

/// Dancing links grid implementation
#[derive(Debug)]
pub struct SparseGrid(RefCell<SparseGridInner>);

#[derive(Debug)]
struct SparseGridInner {
    nodes: Nodes,
    // Number of uncovered rows in each column
    sizes: Vec<usize>,
    // Stack of covered columns, to check covers are undone in order
    covers: Vec<usize>,
}

impl SparseGridInner {
    #[inline]
    fn header(column: usize) -> usize {
        column + 1
    }

    #[inline]
    fn column(header: usize) -> usize {
        header - 1
    }

    fn new(num_columns: usize, filled_coordinates: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut coordinates: Vec<_> = filled_coordinates.into_iter().collect();
        coordinates.sort_unstable();
        coordinates.dedup();

        let mut nodes = Nodes::default();
        let root = nodes.push(None, 0);
        debug_assert_eq!(root, ROOT);

        for _ in 0..num_columns {
            let header = nodes.push(None, 0);
            nodes.add_left(ROOT, header);
        }

        let mut sizes = vec![0; num_columns];
        let mut row_start: Option<(usize, usize)> = None;
        for (row, column) in coordinates {
            assert!(
                column < num_columns,
                "Column [{}] is outside of the grid width [{}]",
                column,
                num_columns
            );

            let header = Self::header(column);
            let node = nodes.push(Some(header), row);
            nodes.add_above(header, node);
            sizes[column] += 1;

            match row_start {
                Some((start_row, start)) if start_row == row => nodes.add_left(start, node),
                _ => row_start = Some((row, node)),
            }
        }

        SparseGridInner {
            nodes,
            sizes,
            covers: Vec::new(),
        }
    }

    fn cover(&mut self, column: usize) {
        assert!(
            !self.covers.contains(&column),
            "Column [{}] is already covered",
            column
        );

        let header = Self::header(column);
        self.nodes.cover_horizontal(header);

        let mut row_node = self.nodes[header].down;
        while row_node != header {
            let mut node = self.nodes[row_node].right;
            while node != row_node {
                self.nodes.cover_vertical(node);
                self.sizes[Self::column(self.nodes[node].header)] -= 1;

                node = self.nodes[node].right;
            }

            row_node = self.nodes[row_node].down;
        }

        self.covers.push(column);
    }

    fn uncover(&mut self, column: usize) {
        let covered = self
            .covers
            .pop()
            .expect("mismatched number of cover & uncover");
        assert_eq!(
            covered, column,
            "Expected column argument to match top cover"
        );

        let header = Self::header(column);
        let mut row_node = self.nodes[header].up;
        while row_node != header {
            let mut node = self.nodes[row_node].left;
            while node != row_node {
                self.sizes[Self::column(self.nodes[node].header)] += 1;
                self.nodes.uncover_vertical(node);

                node = self.nodes[node].left;
            }

            row_node = self.nodes[row_node].up;
        }

        self.nodes.uncover_horizontal(header);
    }

    fn uncovered_columns(&self) -> vec::IntoIter<usize> {
        self.nodes
            .walk_right(ROOT)
            .map(Self::column)
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn uncovered_rows_in_column(&self, column: usize) -> vec::IntoIter<usize> {
        self.nodes
            .walk_down(Self::header(column))
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn uncovered_columns_in_row(&self, row_node: usize) -> vec::IntoIter<usize> {
        iter::once(row_node)
            .chain(self.nodes.walk_right(row_node))
            .map(|node| Self::column(self.nodes[node].header))
            .filter(|column| !self.covers.contains(column))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

impl Grid for SparseGrid {
    type Column = usize;
    // Index of a data node in the row
    type Row = usize;
    type UncoveredColumnsInRowIter = vec::IntoIter<usize>;
    type UncoveredColumnsIter = vec::IntoIter<usize>;
    type UncoveredRowsIter = vec::IntoIter<usize>;

    fn new(
        num_columns: usize,
        filled_coordinates: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        SparseGrid(RefCell::new(SparseGridInner::new(
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
        self.0.borrow().nodes[row].row
    }

    fn column_size(&self, column: Self::Column) -> usize {
        self.0.borrow().sizes[column]
    }

    fn uncovered_columns_in_row(&self, row: Self::Row) -> Self::UncoveredColumnsInRowIter {
        self.0.borrow().uncovered_columns_in_row(row)
    }
}
