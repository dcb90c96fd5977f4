mod makespan;
mod problem;
mod solution;
mod util;

pub use makespan::*;
pub use problem::*;
pub use solution::*;
pub use util::*;

/// Orders the jobs of an instance.
pub trait Solver {
    /// Finds a processing order for the jobs of the given instance.
    fn solve(&mut self, instance: &Instance) -> Solution;

    /// Returns the maximum number of jobs the solver can handle.
    fn max_jobs(&self) -> usize {
        usize::MAX
    }

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}
