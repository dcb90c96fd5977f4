use rand::prelude::*;

use crate::core::{makespan, Deadline, Instance, Solution, Solver};

/// Builds one randomized greedy sequence.
/// Each step appends a job drawn uniformly from the candidates whose append
/// cost is within `alpha` of the cheapest one.
#[allow(clippy::cast_precision_loss)]
fn construct(instance: &Instance, alpha: f64, rng: &mut StdRng) -> Vec<usize> {
    let mut remaining: Vec<_> = (0..instance.jobs()).collect();
    let mut sequence = Vec::with_capacity(instance.jobs());

    while !remaining.is_empty() {
        let costs: Vec<_> = remaining
            .iter()
            .map(|&job| {
                sequence.push(job);
                let cost = makespan(&sequence, instance);
                sequence.pop();
                cost
            })
            .collect();

        let Some(&cheapest) = costs.iter().min() else {
            unreachable!("at least one job remains");
        };
        let Some(&dearest) = costs.iter().max() else {
            unreachable!("at least one job remains");
        };

        let limit = alpha.mul_add((dearest - cheapest) as f64, cheapest as f64);
        let allowed: Vec<_> = (0..remaining.len())
            .filter(|&candidate| costs[candidate] as f64 <= limit)
            .collect();

        let Some(&pick) = allowed.choose(rng) else {
            unreachable!("the cheapest candidate is always allowed");
        };

        sequence.push(remaining.remove(pick));
    }

    sequence
}

/// Performs the greedy randomized adaptive search procedure.
/// Every restart builds a randomized greedy sequence, refines it with the
/// reinsertion descent and keeps the best result.
#[derive(Clone, Debug)]
pub struct Grasp {
    /// Number of restarts.
    pub iterations: usize,
    /// Width of the restricted candidate list, 0 greedy, 1 fully random.
    pub alpha: f64,
    /// Seed of the per-run randomness.
    pub seed: u64,
    /// Wall-clock budget.
    pub deadline: Deadline,
}

impl Grasp {
    /// Creates a new search with the given restart budget and list width.
    #[must_use]
    pub const fn new(iterations: usize, alpha: f64, seed: u64) -> Self {
        Self {
            iterations,
            alpha,
            seed,
            deadline: Deadline::unlimited(),
        }
    }
}

impl Default for Grasp {
    fn default() -> Self {
        Self::new(50, 0.3, 0)
    }
}

impl Solver for Grasp {
    fn solve(&mut self, instance: &Instance) -> Solution {
        if instance.jobs() == 0 {
            return Solution::empty();
        }

        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut sequence = construct(instance, self.alpha, &mut rng);
        let mut best = super::local_search::improve(&mut sequence, instance, self.deadline);

        for _ in 1..self.iterations {
            if self.deadline.expired() {
                break;
            }

            let mut candidate = construct(instance, self.alpha, &mut rng);
            let value = super::local_search::improve(&mut candidate, instance, self.deadline);

            if value < best {
                best = value;
                sequence = candidate;
            }
        }

        Solution::new(sequence, instance)
    }

    fn name(&self) -> &'static str {
        "GRASP"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SOLVERS)]
static INSTANCE: fn() -> Box<dyn Solver> = || Box::new(Grasp::default());
