use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{fs, path::PathBuf};
use sumplete::puzzle::{KeepGrid, Puzzle};

/// Read a puzzle from `tests/data`.
///
/// # Panics
///  - If the file cannot be read or does not hold a valid puzzle.
#[allow(dead_code)]
pub fn read_puzzle(name: &str) -> Puzzle {
    let mut puzzle_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    puzzle_path.push("tests");
    puzzle_path.push("data");
    puzzle_path.push(name);

    log::debug!("Reading puzzle from [{}].", puzzle_path.display());

    let text = fs::read_to_string(&puzzle_path)
        .unwrap_or_else(|err| panic!("Unable to read [{}]: {}", puzzle_path.display(), err));

    text.parse()
        .unwrap_or_else(|err| panic!("Unable to parse [{}]: {}", puzzle_path.display(), err))
}

/// A puzzle whose targets were computed from a known grid of kept cells.
#[derive(Debug)]
#[allow(dead_code)]
pub struct PlantedPuzzle {
    pub puzzle: Puzzle,
    pub planted: KeepGrid,
}

/// Generate a random puzzle of the given size with values in
/// `1..=max_value`, which is solved at least by its planted grid.
#[allow(dead_code)]
pub fn planted_puzzle(seed: u64, size: usize, max_value: u64) -> PlantedPuzzle {
    let mut rng = StdRng::seed_from_u64(seed);

    let values: Vec<Vec<u64>> = (0..size)
        .map(|_| (0..size).map(|_| rng.gen_range(1..=max_value)).collect())
        .collect();
    let kept: Vec<Vec<u8>> = (0..size)
        .map(|_| (0..size).map(|_| u8::from(rng.gen_bool(0.5))).collect())
        .collect();

    let row_targets = (0..size)
        .map(|row| {
            (0..size)
                .filter(|column| kept[row][*column] == 1)
                .map(|column| values[row][column])
                .sum::<u64>()
        })
        .collect();
    let column_targets = (0..size)
        .map(|column| {
            (0..size)
                .filter(|row| kept[*row][column] == 1)
                .map(|row| values[row][column])
                .sum::<u64>()
        })
        .collect();

    PlantedPuzzle {
        puzzle: Puzzle::new(values, row_targets, column_targets)
            .expect("generated puzzles are square"),
        planted: KeepGrid::from_rows(&kept),
    }
}

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
