#![deny(clippy::all, clippy::cargo, clippy::expect_used, clippy::unwrap_used)]
#![deny(clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(clippy::unimplemented, clippy::redundant_type_annotations)]

use anyhow::Result;
use std::io::BufRead;

pub mod algo;
pub mod core;
pub mod data;

/// Runs the given solver on the instance read from reader and writes the
/// solution to stdout. Also writes the makespan to stdout.
///
/// # Errors
/// - If the instance could not be read from the reader.
/// - If the solution could not be written to stdout.
///
/// # Panics
///  - If the solution is invalid in debug mode.
pub fn run_reader(solver: &mut dyn core::Solver, reader: &mut impl BufRead) -> Result<()> {
    let instance: core::Instance = data::deserialize(reader)?;
    let solution = solver.solve(&instance);

    debug_assert!(
        solution.verify(&instance),
        "Solution is invalid: {solution:?}"
    );

    println!("{}", data::to_string(&solution)?);
    println!("{}", solution.makespan());

    Ok(())
}
