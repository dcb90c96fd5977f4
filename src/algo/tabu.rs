use std::collections::VecDeque;

use crate::core::{makespan, reinsert, Deadline, Instance, Solution, Solver};

/// One reinsertion, keyed by the moved job and its destination.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Move {
    job: usize,
    destination: usize,
}

/// Performs a tabu search over the reinsertion neighborhood.
/// Applied moves stay tabu for `tenure` iterations; a tabu move is still
/// admissible when it beats the best makespan seen so far (aspiration). The
/// walk is deterministic and may pass through worse sequences.
#[derive(Clone, Debug)]
pub struct Tabu {
    /// Number of iterations.
    pub iterations: usize,
    /// Number of iterations a move stays tabu.
    pub tenure: usize,
    /// Number of consecutive non-improving iterations before giving up.
    pub stagnation: usize,
    /// Wall-clock budget.
    pub deadline: Deadline,
}

impl Tabu {
    /// Creates a new search with the given budgets.
    #[must_use]
    pub const fn new(iterations: usize, tenure: usize, stagnation: usize) -> Self {
        Self {
            iterations,
            tenure,
            stagnation,
            deadline: Deadline::unlimited(),
        }
    }
}

impl Default for Tabu {
    fn default() -> Self {
        Self::new(10_000, 7, 1_000)
    }
}

impl Solver for Tabu {
    fn solve(&mut self, instance: &Instance) -> Solution {
        let mut current = super::neh::construct(instance);
        let mut best = makespan(&current, instance);
        let mut sequence = current.clone();

        let mut list = VecDeque::with_capacity(self.tenure + 1);
        let mut stalled = 0;

        for iteration in 0..self.iterations {
            if self.deadline.expired() {
                break;
            }

            let mut best_move = None;
            let mut best_value = u64::MAX;

            for from in 0..current.len() {
                for to in 0..current.len() {
                    if from == to {
                        continue;
                    }

                    let key = Move {
                        job: current[from],
                        destination: to,
                    };

                    reinsert(&mut current, from, to);
                    let value = makespan(&current, instance);
                    reinsert(&mut current, to, from);

                    if list.contains(&key) && value >= best {
                        continue;
                    }

                    if value < best_value {
                        best_value = value;
                        best_move = Some((from, to, key));
                    }
                }
            }

            let Some((from, to, key)) = best_move else {
                break;
            };

            reinsert(&mut current, from, to);
            list.push_back(key);
            if list.len() > self.tenure {
                list.pop_front();
            }

            if best_value < best {
                best = best_value;
                sequence = current.clone();
                stalled = 0;
            } else {
                stalled += 1;
                if stalled >= self.stagnation {
                    log::debug!("tabu search stalled after {iteration} iterations");
                    break;
                }
            }
        }

        Solution::new(sequence, instance)
    }

    fn name(&self) -> &'static str {
        "Tabu"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SOLVERS)]
static INSTANCE: fn() -> Box<dyn Solver> = || Box::new(Tabu::default());
