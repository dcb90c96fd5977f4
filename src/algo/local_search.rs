use crate::core::{makespan, reinsert, Deadline, Instance, Solution, Solver};

/// Improves a sequence by steepest descent over reinsertion moves.
/// Every pass evaluates all (from, to) pairs and applies the single best
/// strictly improving one, until a fixpoint or the deadline. Returns the
/// makespan of the final sequence.
pub(super) fn improve(sequence: &mut Vec<usize>, instance: &Instance, deadline: Deadline) -> u64 {
    let mut best = makespan(sequence, instance);

    while !deadline.expired() {
        let mut best_move = None;

        for from in 0..sequence.len() {
            for to in 0..sequence.len() {
                if from == to {
                    continue;
                }

                reinsert(sequence, from, to);
                let value = makespan(sequence, instance);
                reinsert(sequence, to, from);

                if value < best {
                    best = value;
                    best_move = Some((from, to));
                }
            }
        }

        let Some((from, to)) = best_move else {
            break;
        };
        reinsert(sequence, from, to);
    }

    best
}

/// Performs steepest descent from an NEH starting sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSearch {
    /// Wall-clock budget.
    pub deadline: Deadline,
}

impl Solver for LocalSearch {
    fn solve(&mut self, instance: &Instance) -> Solution {
        let mut sequence = super::neh::construct(instance);
        improve(&mut sequence, instance, self.deadline);
        Solution::new(sequence, instance)
    }

    fn name(&self) -> &'static str {
        "LS"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SOLVERS)]
static INSTANCE: fn() -> Box<dyn Solver> = || Box::new(LocalSearch::default());

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::samples;

    fn five_jobs() -> Instance {
        Instance::new(vec![
            vec![3, 4, 2],
            vec![5, 1, 3],
            vec![2, 6, 4],
            vec![4, 2, 5],
            vec![1, 3, 2],
        ])
        .unwrap_or_else(|_| unreachable!("matrix is rectangular"))
    }

    #[test]
    fn never_worsens_the_start() {
        let instance = five_jobs();
        let mut sequence = super::super::neh::construct(&instance);
        let start = crate::core::makespan(&sequence, &instance);

        let improved = improve(&mut sequence, &instance, Deadline::unlimited());
        assert!(improved <= start);
        assert!(Solution::new(sequence, &instance).verify(&instance));
    }

    #[test]
    fn descent_reaches_a_fixpoint() {
        let instance = five_jobs();
        let mut sequence = super::super::neh::construct(&instance);

        let first = improve(&mut sequence, &instance, Deadline::unlimited());
        let settled = sequence.clone();
        let second = improve(&mut sequence, &instance, Deadline::unlimited());

        assert_eq!(first, second);
        assert_eq!(sequence, settled);
    }

    #[test]
    fn expired_deadline_returns_the_start() {
        let instance = five_jobs();
        let mut sequence = vec![0, 1, 2, 3, 4];
        let start = crate::core::makespan(&sequence, &instance);

        let value = improve(
            &mut sequence,
            &instance,
            Deadline::new(std::time::Duration::ZERO),
        );
        assert_eq!(value, start);
        assert_eq!(sequence, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_local_search() {
        assert!(samples(false, &mut LocalSearch::default()).is_ok());
    }
}
