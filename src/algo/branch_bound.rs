use crate::core::{Deadline, Instance, Solution, Solver};

/// One partial sequence of the search tree.
struct SearchNode {
    sequence: Vec<usize>,
    scheduled: Vec<bool>,
    machines: Vec<u64>,
}

impl SearchNode {
    fn root(instance: &Instance) -> Self {
        Self {
            sequence: Vec::with_capacity(instance.jobs()),
            scheduled: vec![false; instance.jobs()],
            machines: vec![0; instance.machines()],
        }
    }

    /// Extends the partial sequence with one job, updating the per-machine
    /// completion times in one pass.
    fn child(&self, job: usize, instance: &Instance) -> Self {
        let mut sequence = self.sequence.clone();
        sequence.push(job);

        let mut scheduled = self.scheduled.clone();
        scheduled[job] = true;

        let mut machines = self.machines.clone();
        let mut previous = 0;
        for (machine, time) in machines.iter_mut().enumerate() {
            *time = (*time).max(previous) + instance.time(job, machine);
            previous = *time;
        }

        Self {
            sequence,
            scheduled,
            machines,
        }
    }

    fn completed(&self, instance: &Instance) -> bool {
        self.sequence.len() == instance.jobs()
    }

    fn cost(&self) -> u64 {
        self.machines.last().copied().unwrap_or_default()
    }

    /// Lower bound on any completion of this node: per machine, its current
    /// completion time plus all unscheduled work on it, maximized.
    fn bound(&self, instance: &Instance) -> u64 {
        let mut bound = 0;
        for machine in 0..instance.machines() {
            let mut tail = self.machines[machine];
            for job in 0..instance.jobs() {
                if !self.scheduled[job] {
                    tail += instance.time(job, machine);
                }
            }
            bound = bound.max(tail);
        }
        bound
    }
}

struct SearchContext {
    incumbent: Option<(Vec<usize>, u64)>,
    nodes: u64,
    pruned: u64,
    deadline: Deadline,
}

fn explore(node: &SearchNode, instance: &Instance, context: &mut SearchContext) {
    if context.deadline.expired() {
        return;
    }

    context.nodes += 1;

    if node.completed(instance) {
        let cost = node.cost();
        let improving = match &context.incumbent {
            Some((_, best)) => cost < *best,
            None => true,
        };

        if improving {
            context.incumbent = Some((node.sequence.clone(), cost));
        }
        return;
    }

    for job in 0..instance.jobs() {
        if node.scheduled[job] {
            continue;
        }

        let child = node.child(job, instance);
        let keep = match &context.incumbent {
            Some((_, best)) => child.bound(instance) < *best,
            None => true,
        };

        if keep {
            explore(&child, instance, context);
        } else {
            context.pruned += 1;
        }
    }
}

/// Finds an optimal sequence by branch and bound.
/// Children extend the partial sequence one job at a time in index order and
/// a branch is cut when its bound cannot beat the incumbent. Exhaustive, so
/// only small instances are advertised through `max_jobs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BranchBound {
    /// Wall-clock budget.
    pub deadline: Deadline,
}

impl Solver for BranchBound {
    fn solve(&mut self, instance: &Instance) -> Solution {
        let mut context = SearchContext {
            incumbent: None,
            nodes: 0,
            pruned: 0,
            deadline: self.deadline,
        };

        explore(&SearchNode::root(instance), instance, &mut context);

        log::debug!(
            "branch and bound explored {} nodes, pruned {}",
            context.nodes,
            context.pruned
        );

        match context.incumbent {
            Some((sequence, _)) => Solution::new(sequence, instance),
            None => Solution::new((0..instance.jobs()).collect(), instance),
        }
    }

    fn max_jobs(&self) -> usize {
        12
    }

    fn name(&self) -> &'static str {
        "BB"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SOLVERS)]
static INSTANCE: fn() -> Box<dyn Solver> = || Box::new(BranchBound::default());

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::makespan;
    use crate::data::samples;

    fn brute_force(instance: &Instance) -> u64 {
        fn visit(instance: &Instance, sequence: &mut Vec<usize>, used: &mut [bool], best: &mut u64) {
            if sequence.len() == instance.jobs() {
                *best = (*best).min(makespan(sequence, instance));
                return;
            }

            for job in 0..instance.jobs() {
                if !used[job] {
                    used[job] = true;
                    sequence.push(job);
                    visit(instance, sequence, used, best);
                    sequence.pop();
                    used[job] = false;
                }
            }
        }

        let mut best = u64::MAX;
        let mut used = vec![false; instance.jobs()];
        visit(instance, &mut Vec::new(), &mut used, &mut best);
        best
    }

    #[test]
    fn finds_the_known_optimum() {
        let instance = Instance::new(vec![vec![2, 3], vec![4, 1], vec![1, 5]])
            .unwrap_or_else(|_| unreachable!("matrix is rectangular"));
        let solution = BranchBound::default().solve(&instance);
        assert_eq!(solution.makespan(), 10);
        assert_eq!(solution.makespan(), brute_force(&instance));
        assert!(solution.verify(&instance));
    }

    #[test]
    fn matches_brute_force_on_five_jobs() {
        let instance = Instance::new(vec![
            vec![3, 4, 2],
            vec![5, 1, 3],
            vec![2, 6, 4],
            vec![4, 2, 5],
            vec![1, 3, 2],
        ])
        .unwrap_or_else(|_| unreachable!("matrix is rectangular"));

        let solution = BranchBound::default().solve(&instance);
        assert_eq!(solution.makespan(), brute_force(&instance));
        assert!(solution.verify(&instance));
    }

    #[test]
    fn matches_brute_force_on_six_jobs() {
        let instance = Instance::new(vec![
            vec![2, 20, 28, 27, 3],
            vec![26, 2, 1, 30, 27],
            vec![7, 15, 20, 9, 11],
            vec![11, 22, 22, 10, 29],
            vec![10, 7, 12, 8, 10],
            vec![19, 21, 6, 7, 12],
        ])
        .unwrap_or_else(|_| unreachable!("matrix is rectangular"));

        let solution = BranchBound::default().solve(&instance);
        assert_eq!(solution.makespan(), brute_force(&instance));
    }

    #[test]
    fn expired_deadline_falls_back_to_the_identity() {
        let instance = Instance::new(vec![vec![2, 3], vec![4, 1], vec![1, 5]])
            .unwrap_or_else(|_| unreachable!("matrix is rectangular"));
        let mut solver = BranchBound {
            deadline: Deadline::new(std::time::Duration::ZERO),
        };
        let solution = solver.solve(&instance);
        assert_eq!(solution.sequence(), [0, 1, 2]);
        assert!(solution.verify(&instance));
    }

    #[test]
    fn empty_instance() -> anyhow::Result<()> {
        let instance = Instance::new(vec![])?;
        let solution = BranchBound::default().solve(&instance);
        assert!(solution.sequence().is_empty());
        assert_eq!(solution.makespan(), 0);
        Ok(())
    }

    #[test]
    fn test_branch_bound() {
        assert!(samples(true, &mut BranchBound::default()).is_ok());
    }
}
