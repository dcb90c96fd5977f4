use crate::core::{makespan, Instance, Solution, Solver};

/// Builds a sequence with the insertion heuristic of Nawaz, Enscore and Ham.
/// Jobs are taken longest total processing time first, ties by job index, and
/// each is inserted at the first position with the lowest partial makespan.
pub(super) fn construct(instance: &Instance) -> Vec<usize> {
    let mut order: Vec<_> = (0..instance.jobs()).collect();
    order.sort_by_key(|&job| std::cmp::Reverse(instance.total_time(job)));

    let mut sequence = Vec::with_capacity(instance.jobs());
    for &job in &order {
        let mut best_position = 0;
        let mut best_makespan = u64::MAX;

        for position in 0..=sequence.len() {
            sequence.insert(position, job);
            let value = makespan(&sequence, instance);
            if value < best_makespan {
                best_position = position;
                best_makespan = value;
            }
            sequence.remove(position);
        }

        sequence.insert(best_position, job);
    }

    sequence
}

/// Performs the NEH insertion heuristic.
#[derive(Clone, Debug, Default)]
pub struct Neh;

impl Solver for Neh {
    fn solve(&mut self, instance: &Instance) -> Solution {
        Solution::new(construct(instance), instance)
    }

    fn name(&self) -> &'static str {
        "NEH"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SOLVERS)]
static INSTANCE: fn() -> Box<dyn Solver> = || Box::new(Neh);
