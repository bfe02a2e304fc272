#![no_main]

use libfuzzer_sys::fuzz_target;
use sumplete::{puzzle::Puzzle, sumplete::Sumplete};

#[derive(Debug)]
struct Sumplete3x3Input {
    puzzle: Puzzle,
}

impl<'a> arbitrary::Arbitrary<'a> for Sumplete3x3Input {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let values = u
            .arbitrary::<[[u8; 3]; 3]>()?
            .into_iter()
            .map(|row| row.into_iter().map(|value| u64::from(value % 10)).collect())
            .collect();
        let row_targets = u
            .arbitrary::<[u8; 3]>()?
            .into_iter()
            .map(|target| u64::from(target % 28))
            .collect();
        let column_targets = u
            .arbitrary::<[u8; 3]>()?
            .into_iter()
            .map(|target| u64::from(target % 28))
            .collect();

        let puzzle = Puzzle::new(values, row_targets, column_targets)
            .expect("fixed size input is always square");

        Ok(Sumplete3x3Input { puzzle })
    }
}

fuzz_target!(|data: Sumplete3x3Input| {
    let sumplete = Sumplete::new(data.puzzle.clone());

    for grid in sumplete.solutions() {
        let grid = grid.expect("solutions of a 3 x 3 puzzle always decode");
        assert!(data.puzzle.is_solved_by(&grid));
    }
});
