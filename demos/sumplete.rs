//! Run Sumplete solver
//! Usage:
//!
//! ```bash
//! cargo run --release --example sumplete tests/data/example_3x3.txt
//! cargo run --release --example sumplete -- --all tests/data/example_3x3.txt
//! ```
//!
//! Set `RUST_LOG=debug` to see how the puzzle was encoded.

use std::{fs, process};
use sumplete::{puzzle::Puzzle, sumplete::Sumplete};

fn main() {
    env_logger::init();

    let mut all = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--all" => all = true,
            _ => path = Some(arg),
        }
    }

    let Some(path) = path else {
        eprintln!("puzzle file needed");
        process::exit(1);
    };

    let puzzle: Puzzle = match fs::read_to_string(&path) {
        Ok(text) => match text.parse() {
            Ok(puzzle) => puzzle,
            Err(err) => {
                eprintln!("invalid puzzle in {}: {}", path, err);
                process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("unable to read {}: {}", path, err);
            process::exit(1);
        }
    };

    let sumplete = Sumplete::new(puzzle);
    let mut found = 0;
    for solution in sumplete.solutions() {
        match solution {
            Ok(grid) => {
                found += 1;
                println!("{}", grid);
            }
            Err(err) => {
                eprintln!("{}", err);
                process::exit(1);
            }
        }

        if !all {
            break;
        }
    }

    if found == 0 {
        eprintln!("no solution");
        process::exit(1);
    }
}
