use rand::prelude::*;

use crate::core::{Deadline, Instance, Solution, Solver};

/// Performs an iterated local search.
/// The walk perturbs the current sequence with random swaps, refines it with
/// the reinsertion descent and continues from the refined sequence; the best
/// sequence seen is returned.
#[derive(Clone, Debug)]
pub struct Ils {
    /// Number of perturbation rounds.
    pub iterations: usize,
    /// Number of random swaps per perturbation.
    pub swaps: usize,
    /// Ends the walk at the first improving round instead of running the
    /// full budget.
    pub stop_at_first_improvement: bool,
    /// Seed of the per-run randomness.
    pub seed: u64,
    /// Wall-clock budget.
    pub deadline: Deadline,
}

impl Ils {
    /// Creates a new search with the given budget and perturbation strength.
    #[must_use]
    pub const fn new(iterations: usize, swaps: usize, seed: u64) -> Self {
        Self {
            iterations,
            swaps,
            stop_at_first_improvement: false,
            seed,
            deadline: Deadline::unlimited(),
        }
    }
}

impl Default for Ils {
    fn default() -> Self {
        Self::new(30, 5, 0)
    }
}

impl Solver for Ils {
    fn solve(&mut self, instance: &Instance) -> Solution {
        if instance.jobs() == 0 {
            return Solution::empty();
        }
        if instance.jobs() == 1 {
            return Solution::new(vec![0], instance);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut current = super::neh::construct(instance);
        let mut best = super::local_search::improve(&mut current, instance, self.deadline);
        let mut sequence = current.clone();

        for _ in 0..self.iterations {
            if self.deadline.expired() {
                break;
            }

            for _ in 0..self.swaps {
                let first = rng.gen_range(0..current.len());
                let second = rng.gen_range(0..current.len());
                current.swap(first, second);
            }

            let value = super::local_search::improve(&mut current, instance, self.deadline);
            if value < best {
                best = value;
                sequence = current.clone();

                if self.stop_at_first_improvement {
                    break;
                }
            }
        }

        Solution::new(sequence, instance)
    }

    fn name(&self) -> &'static str {
        "ILS"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SOLVERS)]
static INSTANCE: fn() -> Box<dyn Solver> = || Box::new(Ils::default());
