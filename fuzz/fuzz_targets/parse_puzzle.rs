#![no_main]

use libfuzzer_sys::fuzz_target;
use sumplete::puzzle::Puzzle;

fuzz_target!(|input: &str| {
    if let Ok(puzzle) = input.parse::<Puzzle>() {
        let reparsed: Puzzle = puzzle.to_string().parse().unwrap();
        assert_eq!(reparsed, puzzle);
    }
});
