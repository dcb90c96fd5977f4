use serde::Serialize;

use super::{makespan, Instance};

/// A solver's answer: a processing order over all jobs and its makespan.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Solution {
    sequence: Vec<usize>,
    makespan: u64,
}

impl Solution {
    /// Creates a solution from a sequence, computing its makespan.
    #[must_use]
    pub fn new(sequence: Vec<usize>, instance: &Instance) -> Self {
        let makespan = makespan(&sequence, instance);
        Self { sequence, makespan }
    }

    /// Creates the solution of the instance without jobs.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            sequence: Vec::new(),
            makespan: 0,
        }
    }

    /// Returns the processing order of the jobs.
    #[must_use]
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Returns the completion time of the last job on the last machine.
    #[must_use]
    pub const fn makespan(&self) -> u64 {
        self.makespan
    }

    /// Checks that the sequence is a permutation of the instance's jobs and
    /// that the stored makespan matches the recomputed one.
    #[must_use]
    pub fn verify(&self, instance: &Instance) -> bool {
        if self.sequence.len() != instance.jobs() {
            return false;
        }

        let mut seen = vec![false; instance.jobs()];
        for &job in &self.sequence {
            if job >= instance.jobs() || seen[job] {
                return false;
            }
            seen[job] = true;
        }

        self.makespan == makespan(&self.sequence, instance)
    }
}
