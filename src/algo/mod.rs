mod annealing;
mod branch_bound;
mod genetic;
mod grasp;
mod ils;
mod local_search;
mod neh;
mod tabu;

pub use annealing::Annealing;
pub use branch_bound::BranchBound;
pub use genetic::Genetic;
pub use grasp::Grasp;
pub use ils::Ils;
pub use local_search::LocalSearch;
pub use neh::Neh;
pub use tabu::Tabu;

use crate::core::Solver;

/// Registry of the available solvers.
/// Every solver file contributes a constructor with default parameters.
#[allow(unsafe_code)]
#[linkme::distributed_slice]
pub static SOLVERS: [fn() -> Box<dyn Solver>];
