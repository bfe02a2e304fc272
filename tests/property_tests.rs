mod common;

use common::{init_logging, planted_puzzle};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::collections::BTreeSet;
use sumplete::{
    dense_grid::DenseGrid,
    sumplete::{decode_raw, Line, Possibility, Sumplete},
    ExactCover, SolveError, Solver,
};

const SEEDS_PER_SIZE: u64 = 40;

fn sizes_and_seeds(sizes: std::ops::RangeInclusive<usize>) -> Vec<(usize, u64)> {
    sizes
        .flat_map(|size| (0..SEEDS_PER_SIZE).map(move |seed| (size, seed)))
        .collect()
}

#[test]
fn planted_grid_is_always_found() {
    init_logging();

    sizes_and_seeds(1..=5)
        .into_par_iter()
        .for_each(|(size, seed)| {
            let planted = planted_puzzle(seed, size, 9);
            let sumplete = Sumplete::new(planted.puzzle.clone());

            let solutions: Vec<_> = sumplete
                .solutions()
                .collect::<Result<_, _>>()
                .unwrap_or_else(|err| panic!("seed [{}] size [{}]: {}", seed, size, err));

            assert!(
                solutions.contains(&planted.planted),
                "seed [{}] size [{}] is missing its planted grid",
                seed,
                size
            );
            for grid in &solutions {
                assert_eq!(grid.size(), size);
                assert!(planted.puzzle.is_solved_by(grid), "seed [{}]:\n{}", seed, grid);
            }
        });
}

#[test]
fn possibilities_are_exactly_the_target_subsets() {
    sizes_and_seeds(1..=6)
        .into_par_iter()
        .for_each(|(size, seed)| {
            let planted = planted_puzzle(seed, size, 5);
            let puzzle = &planted.puzzle;
            let sumplete = Sumplete::new(puzzle.clone());

            let lines = (0..size)
                .map(|row| {
                    (
                        Line::Row(row),
                        puzzle.row(row).to_vec(),
                        puzzle.row_targets()[row],
                    )
                })
                .chain((0..size).map(|column| {
                    (
                        Line::Column(column),
                        puzzle.column(column),
                        puzzle.column_targets()[column],
                    )
                }));

            for (line, values, target) in lines {
                let expected: BTreeSet<Vec<usize>> = (0..1u32 << size)
                    .map(|mask| {
                        (0..size)
                            .filter(|index| mask & (1 << index) != 0)
                            .collect::<Vec<_>>()
                    })
                    .filter(|kept| kept.iter().map(|index| values[*index]).sum::<u64>() == target)
                    .collect();

                let actual: BTreeSet<Vec<usize>> = sumplete
                    .possibilities
                    .iter()
                    .filter(|poss| poss.line == line)
                    .map(|poss| poss.kept.clone())
                    .collect();

                assert_eq!(actual, expected, "seed [{}] line {:?}", seed, line);
            }
        });
}

#[test]
fn raw_decoding_agrees_with_tagged_decoding() {
    sizes_and_seeds(1..=5)
        .into_par_iter()
        .for_each(|(size, seed)| {
            let planted = planted_puzzle(seed, size, 9);
            let sumplete = Sumplete::new(planted.puzzle);
            let matrix = sumplete.matrix();

            for raw_solution in matrix.solver() {
                let tagged: Vec<&Possibility> = raw_solution
                    .iter()
                    .map(|row| &sumplete.possibilities[row.index()])
                    .collect();
                let expected = sumplete.decode(&tagged).unwrap();

                match decode_raw(raw_solution.iter().map(|row| row.set_columns()), size) {
                    Ok(grid) => assert_eq!(grid, expected, "seed [{}] size [{}]", seed, size),
                    Err(SolveError::InconsistentSolution { .. }) if size < 3 => {}
                    Err(err) => panic!("seed [{}] size [{}]: {}", seed, size, err),
                }
            }
        });
}

#[test]
fn sparse_and_dense_grids_agree() {
    sizes_and_seeds(1..=4)
        .into_par_iter()
        .for_each(|(size, seed)| {
            let planted = planted_puzzle(seed, size, 9);
            let sumplete = Sumplete::new(planted.puzzle);

            let normalize = |solutions: Vec<Vec<&Possibility>>| -> BTreeSet<Vec<Possibility>> {
                solutions
                    .into_iter()
                    .map(|solution| {
                        let mut solution: Vec<_> = solution.into_iter().cloned().collect();
                        solution.sort();
                        solution
                    })
                    .collect()
            };

            let sparse = normalize(sumplete.solver().all_solutions());
            let mut dense_solver: Solver<_, DenseGrid> = Solver::new(&sumplete);
            let dense = normalize(dense_solver.all_solutions());

            assert!(!sparse.is_empty());
            assert_eq!(sparse, dense, "seed [{}] size [{}]", seed, size);
        });
}
