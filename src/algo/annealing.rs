use rand::prelude::*;

use crate::core::{makespan, reinsert, Deadline, Instance, Solution, Solver};

/// Performs simulated annealing over the reinsertion neighborhood.
/// Worse neighbors are accepted with probability `exp(-delta / (scale * t))`
/// where the scale is derived from the target initial acceptance rate; the
/// best sequence seen is tracked separately from the walk.
#[derive(Clone, Debug)]
pub struct Annealing {
    /// Number of temperature levels.
    pub levels: usize,
    /// Fraction of the temperature lost per level.
    pub evaporation: f64,
    /// Number of neighbors tried per level.
    pub moves_per_level: usize,
    /// Initial temperature.
    pub temperature: f64,
    /// Probability of accepting a unit worsening at temperature one.
    pub acceptance_rate: f64,
    /// Temperature at which the walk stops.
    pub floor: f64,
    /// Seed of the per-run randomness.
    pub seed: u64,
    /// Wall-clock budget.
    pub deadline: Deadline,
}

impl Annealing {
    /// Creates a new walk with the given level budget.
    #[must_use]
    pub const fn new(levels: usize, seed: u64) -> Self {
        Self {
            levels,
            evaporation: 7e-5,
            moves_per_level: 10,
            temperature: 0.2,
            acceptance_rate: 0.99,
            floor: 0.01,
            seed,
            deadline: Deadline::unlimited(),
        }
    }
}

impl Default for Annealing {
    fn default() -> Self {
        Self::new(100_000, 0)
    }
}

impl Solver for Annealing {
    #[allow(clippy::cast_precision_loss)]
    fn solve(&mut self, instance: &Instance) -> Solution {
        if instance.jobs() == 0 {
            return Solution::empty();
        }
        if instance.jobs() == 1 {
            return Solution::new(vec![0], instance);
        }

        let scale = 1.0 / (1.0 / self.acceptance_rate).ln();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut temperature = self.temperature;

        let mut current = super::neh::construct(instance);
        let mut cost = makespan(&current, instance);
        let mut sequence = current.clone();
        let mut best = cost;

        for _ in 0..self.levels {
            if temperature <= self.floor || self.deadline.expired() {
                break;
            }

            for _ in 0..self.moves_per_level {
                let from = rng.gen_range(0..current.len());
                let mut to = rng.gen_range(0..current.len());
                while to == from {
                    to = rng.gen_range(0..current.len());
                }

                reinsert(&mut current, from, to);
                let value = makespan(&current, instance);

                let accept = if value < cost {
                    true
                } else {
                    let delta = (value - cost) as f64;
                    rng.gen::<f64>() < (-delta / (scale * temperature)).exp()
                };

                if accept {
                    cost = value;
                    if cost < best {
                        best = cost;
                        sequence = current.clone();
                    }
                } else {
                    reinsert(&mut current, to, from);
                }
            }

            temperature *= 1.0 - self.evaporation;
        }

        Solution::new(sequence, instance)
    }

    fn name(&self) -> &'static str {
        "SA"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SOLVERS)]
static INSTANCE: fn() -> Box<dyn Solver> = || Box::new(Annealing::default());

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::Neh;
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
    fn same_seed_gives_the_same_solution() {
        let instance = five_jobs();
        let first = Annealing::new(500, 3).solve(&instance);
        let second = Annealing::new(500, 3).solve(&instance);
        assert_eq!(first, second);
    }

    #[test]
    fn never_worse_than_the_start() {
        let instance = five_jobs();
        let start = Neh.solve(&instance);
        let annealed = Annealing::new(500, 1).solve(&instance);
        assert!(annealed.makespan() <= start.makespan());
        assert!(annealed.verify(&instance));
    }

    #[test]
    fn single_job_instance() -> anyhow::Result<()> {
        let instance = Instance::new(vec![vec![3, 1, 2]])?;
        let solution = Annealing::default().solve(&instance);
        assert_eq!(solution.sequence(), [0]);
        assert_eq!(solution.makespan(), 6);
        Ok(())
    }

    #[test]
    fn test_annealing() {
        assert!(samples(false, &mut Annealing::new(1_000, 0)).is_ok());
    }
}
