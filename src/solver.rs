use crate::{sparse_grid::SparseGrid, ExactCover, Grid};
use std::collections::VecDeque;

/// Solver that iteratively returns solutions to exact cover problems.
///
/// The grid type `G` stores the matrix while searching. It defaults to the
/// dancing links [`SparseGrid`], and may be swapped for any other [`Grid`],
/// like [`DenseGrid`](crate::dense_grid::DenseGrid).
#[derive(Debug)]
pub struct Solver<'e, E: ExactCover, G: Grid = SparseGrid> {
    problem: &'e E,

    // Values used to track the state of solving
    grid: G,
    partial_solution: Vec<usize>,
    stack: Vec<Frame<G::Column>>,
}

#[derive(Debug)]
enum FrameState {
    // Before covering one of the rows
    Cover,
    // After checking, before uncovering
    Uncover,
}

#[derive(Debug)]
struct Frame<C> {
    selected_rows: VecDeque<(usize, Vec<C>)>,
    state: FrameState,
}

impl<'e, E, G> Solver<'e, E, G>
where
    E: ExactCover,
    G: Grid,
{
    /// Create a new `Solver` with the given instance of an exact cover problem.
    pub fn new(problem: &'e E) -> Self {
        let grid = Self::populate_grid(problem);

        let mut solver = Self {
            problem,

            grid,
            partial_solution: Vec::new(),
            stack: Vec::new(),
        };
        solver.push_initial_frame();

        solver
    }

    /// Reset all solver state except for the stored possibilities and
    /// constraints.
    ///
    /// The next call to [`Solver::next_solution`] starts the search over from
    /// the first solution.
    pub fn reset(&mut self) {
        self.grid = Self::populate_grid(self.problem);
        self.partial_solution.clear();
        self.stack.clear();
        self.push_initial_frame();
    }

    fn push_initial_frame(&mut self) {
        // If the grid is already solved (no primary columns), don't bother to put a
        // stack frame in
        if Self::solution_test(&self.grid, self.problem) {
            return;
        }

        let selected_rows = Self::select_rows(&self.grid, self.problem);
        if !selected_rows.is_empty() {
            self.stack.push(Frame {
                state: FrameState::Cover,
                selected_rows,
            });
        }
    }

    fn populate_grid(problem: &E) -> G {
        let coordinates_iter = problem
            .possibilities()
            .iter()
            .enumerate()
            .flat_map(|(row_idx, poss)| {
                problem
                    .satisfied_constraint_indices(poss)
                    .into_iter()
                    .map(move |col_idx| (row_idx, col_idx))
            });

        log::trace!(
            "Populating grid with [{}] possibilities and [{}] constraints.",
            problem.possibilities().len(),
            problem.constraints().len()
        );

        G::new(problem.constraints().len(), coordinates_iter)
    }

    /// Return true if the current grid represents a valid solution.
    ///
    /// This implementation determines that the grid represents a solution if
    /// there are only optional columns left uncovered in the grid.
    fn solution_test(grid: &G, problem: &E) -> bool {
        !grid
            .uncovered_columns()
            .any(|column| !problem.is_optional(&problem.constraints()[grid.column_id(column)]))
    }

    /// Select a column to remove from the matrix.
    ///
    /// This implementation chooses the non-optional column that has the least
    /// number of entries uncovered in the grid.
    fn choose_column(grid: &G, problem: &E) -> Option<G::Column> {
        grid.uncovered_columns()
            .filter(|column| !problem.is_optional(&problem.constraints()[grid.column_id(*column)]))
            .min_by_key(|column| grid.column_size(*column))
    }

    /// Return a list of rows that are uncovered and present in the column
    /// chosen by [`Solver::choose_column`], each with the columns it covers.
    fn select_rows(grid: &G, problem: &E) -> VecDeque<(usize, Vec<G::Column>)> {
        match Self::choose_column(grid, problem) {
            Some(min_column) => grid
                .uncovered_rows_in_column(min_column)
                .map(|row| {
                    (
                        grid.row_id(row),
                        grid.uncovered_columns_in_row(row).collect(),
                    )
                })
                .collect(),
            None => VecDeque::new(),
        }
    }

    /// Return all possible solutions.
    pub fn all_solutions(&mut self) -> Vec<Vec<&'e E::Possibility>> {
        self.collect()
    }

    /// Compute up to the next solution, returning `None` if there are no more.
    pub fn next_solution<'s>(&'s mut self) -> Option<Vec<&'e E::Possibility>>
    where
        'e: 's,
    {
        enum StackOp<T> {
            Push(T),
            Pop,
            None,
        }

        while let Some(curr_frame) = self.stack.last_mut() {
            let (stack_op, possible_solution) = match curr_frame.state {
                // for the current row of this frame, cover the selected columns and add the row
                // to the solution.
                FrameState::Cover => {
                    let (row_index, columns) = curr_frame
                        .selected_rows
                        .front()
                        .expect("frames are popped once their rows run out");

                    self.partial_solution.push(*row_index);
                    for column in columns {
                        self.grid.cover(*column);
                    }

                    // This is where the recursion happens, but we also have to check for the
                    // solution here.
                    let stack_op = if Self::solution_test(&self.grid, self.problem) {
                        (StackOp::None, Some(self.partial_solution.clone()))
                    } else {
                        let selected_rows = Self::select_rows(&self.grid, self.problem);

                        if selected_rows.is_empty() {
                            (StackOp::None, None)
                        } else {
                            (
                                StackOp::Push(Frame {
                                    state: FrameState::Cover,
                                    selected_rows,
                                }),
                                None,
                            )
                        }
                    };

                    curr_frame.state = FrameState::Uncover;
                    stack_op
                }
                // Cleanup the current row, uncover the selected columns in reverse, remove the
                // row from the solution.
                FrameState::Uncover => {
                    let (_row_index, columns) = curr_frame
                        .selected_rows
                        .pop_front()
                        .expect("frames are popped once their rows run out");

                    for column in columns.into_iter().rev() {
                        self.grid.uncover(column);
                    }
                    self.partial_solution.pop();

                    if curr_frame.selected_rows.is_empty() {
                        (StackOp::Pop, None)
                    } else {
                        curr_frame.state = FrameState::Cover;
                        (StackOp::None, None)
                    }
                }
            };

            match stack_op {
                StackOp::Push(val) => {
                    self.stack.push(val);
                }
                StackOp::Pop => {
                    self.stack.pop();
                }
                StackOp::None => {}
            }

            if let Some(solution) = possible_solution {
                log::trace!("Found solution with rows {:?}.", solution);

                return Some(
                    solution
                        .into_iter()
                        .map(|row_index| &self.problem.possibilities()[row_index])
                        .collect(),
                );
            }
        }

        None
    }
}

impl<'e, E, G> Iterator for Solver<'e, E, G>
where
    E: ExactCover,
    G: Grid,
{
    type Item = Vec<&'e E::Possibility>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_solution()
    }
}
