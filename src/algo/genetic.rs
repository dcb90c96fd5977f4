use rand::distributions::WeightedIndex;
use rand::prelude::*;

use crate::core::{makespan, Deadline, Instance, Solution, Solver};

/// Performs a genetic algorithm over permutations.
/// Parents are drawn by roulette over `1 / (1 + makespan)`, children come
/// from segment crossover with repair and inversion mutation, and each
/// generation replaces the previous one wholesale.
#[derive(Clone, Debug)]
pub struct Genetic {
    /// Number of individuals per generation, at least two.
    pub population: usize,
    /// Probability of crossing a selected pair.
    pub crossover: f64,
    /// Probability of mutating a child.
    pub mutation: f64,
    /// Number of generations.
    pub generations: usize,
    /// Seed of the per-run randomness.
    pub seed: u64,
    /// Wall-clock budget.
    pub deadline: Deadline,
}

impl Genetic {
    /// Creates a new evolution with the given generation budget.
    #[must_use]
    pub const fn new(seed: u64, generations: usize) -> Self {
        Self {
            population: 60,
            crossover: 0.8,
            mutation: 0.15,
            generations,
            seed,
            deadline: Deadline::unlimited(),
        }
    }
}

impl Default for Genetic {
    fn default() -> Self {
        Self::new(0, 200)
    }
}

impl Solver for Genetic {
    fn solve(&mut self, instance: &Instance) -> Solution {
        if instance.jobs() == 0 {
            return Solution::empty();
        }
        if instance.jobs() == 1 {
            return Solution::new(vec![0], instance);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut population: Vec<_> = (0..self.population.max(2))
            .map(|_| Individual::random(&mut rng, instance))
            .collect();

        let Some(mut best) = population.iter().min_by_key(|one| one.makespan).cloned() else {
            unreachable!("the population is never empty");
        };

        for _ in 0..self.generations {
            if self.deadline.expired() {
                break;
            }

            let weights = population.iter().map(|one| fitness(one.makespan));
            let weights = WeightedIndex::new(weights)
                .unwrap_or_else(|_| unreachable!("fitness is always positive"));

            let mut next = Vec::with_capacity(population.len());
            while next.len() < population.len() {
                let first = &population[weights.sample(&mut rng)];
                let second = &population[weights.sample(&mut rng)];

                let (mut left, mut right) = if rng.gen_bool(self.crossover) {
                    cross(first, second, &mut rng, instance.jobs())
                } else {
                    (first.sequence.clone(), second.sequence.clone())
                };

                if rng.gen_bool(self.mutation) {
                    invert(&mut left, &mut rng);
                }
                if rng.gen_bool(self.mutation) {
                    invert(&mut right, &mut rng);
                }

                next.push(Individual::new(left, instance));
                if next.len() < population.len() {
                    next.push(Individual::new(right, instance));
                }
            }

            population = next;

            if let Some(challenger) = population.iter().min_by_key(|one| one.makespan) {
                if challenger.makespan < best.makespan {
                    best = challenger.clone();
                }
            }
        }

        Solution::new(best.sequence, instance)
    }

    fn name(&self) -> &'static str {
        "Genetic"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SOLVERS)]
static INSTANCE: fn() -> Box<dyn Solver> = || Box::new(Genetic::default());

#[derive(Clone, Debug)]
struct Individual {
    sequence: Vec<usize>,
    makespan: u64,
}

impl Individual {
    fn new(sequence: Vec<usize>, instance: &Instance) -> Self {
        let makespan = makespan(&sequence, instance);
        Self { sequence, makespan }
    }

    fn random(rng: &mut StdRng, instance: &Instance) -> Self {
        let mut sequence: Vec<_> = (0..instance.jobs()).collect();
        sequence.shuffle(rng);
        Self::new(sequence, instance)
    }
}

#[allow(clippy::cast_precision_loss)]
fn fitness(value: u64) -> f64 {
    1.0 / (1.0 + value as f64)
}

/// Copies a random contiguous segment of each parent into the other and
/// repairs both children.
fn cross(
    first: &Individual,
    second: &Individual,
    rng: &mut StdRng,
    jobs: usize,
) -> (Vec<usize>, Vec<usize>) {
    let one = rng.gen_range(0..jobs);
    let two = rng.gen_range(0..jobs);
    let (low, high) = (one.min(two), one.max(two));

    let mut left = first.sequence.clone();
    let mut right = second.sequence.clone();
    left[low..=high].copy_from_slice(&second.sequence[low..=high]);
    right[low..=high].copy_from_slice(&first.sequence[low..=high]);

    repair(&mut left, jobs);
    repair(&mut right, jobs);

    (left, right)
}

/// Reverses a random contiguous segment.
fn invert(sequence: &mut [usize], rng: &mut StdRng) {
    let one = rng.gen_range(0..sequence.len());
    let two = rng.gen_range(0..sequence.len());
    sequence[one.min(two)..=one.max(two)].reverse();
}

/// Restores the permutation invariant after a crossover.
/// Earlier occurrences of duplicated jobs and out-of-range entries are
/// replaced by the missing jobs in ascending order, keeping the last
/// occurrence of each duplicate.
fn repair(sequence: &mut [usize], jobs: usize) {
    let mut counts = vec![0_usize; jobs];
    for &job in sequence.iter() {
        if job < jobs {
            counts[job] += 1;
        }
    }

    let missing: Vec<_> = (0..jobs).filter(|&job| counts[job] == 0).collect();
    let mut missing = missing.into_iter();

    for entry in sequence.iter_mut() {
        if *entry < jobs && counts[*entry] == 1 {
            continue;
        }

        if *entry < jobs {
            counts[*entry] -= 1;
        }
        if let Some(job) = missing.next() {
            *entry = job;
        }
    }
}

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

    fn is_permutation(sequence: &[usize], jobs: usize) -> bool {
        let mut sorted = sequence.to_vec();
        sorted.sort_unstable();
        sorted.into_iter().eq(0..jobs)
    }

    #[test]
    fn repair_restores_a_permutation() {
        let mut broken = vec![0, 2, 2, 9, 4];
        repair(&mut broken, 5);
        assert_eq!(broken, [0, 1, 2, 3, 4]);

        let mut broken = vec![3, 3, 3, 3];
        repair(&mut broken, 4);
        assert!(is_permutation(&broken, 4));
    }

    #[test]
    fn crossover_children_are_permutations() {
        let instance = five_jobs();
        let mut rng = StdRng::seed_from_u64(11);
        let first = Individual::random(&mut rng, &instance);
        let second = Individual::random(&mut rng, &instance);

        for _ in 0..50 {
            let (left, right) = cross(&first, &second, &mut rng, instance.jobs());
            assert!(is_permutation(&left, instance.jobs()));
            assert!(is_permutation(&right, instance.jobs()));
        }
    }

    #[test]
    fn same_seed_gives_the_same_solution() {
        let instance = five_jobs();
        let first = Genetic::new(8, 30).solve(&instance);
        let second = Genetic::new(8, 30).solve(&instance);
        assert_eq!(first, second);
    }

    #[test]
    fn solution_is_valid() {
        let instance = five_jobs();
        assert!(Genetic::new(0, 30).solve(&instance).verify(&instance));
    }

    #[test]
    fn single_job_instance() -> anyhow::Result<()> {
        let instance = Instance::new(vec![vec![7]])?;
        let solution = Genetic::default().solve(&instance);
        assert_eq!(solution.sequence(), [0]);
        assert_eq!(solution.makespan(), 7);
        Ok(())
    }

    #[test]
    fn test_genetic() {
        assert!(samples(false, &mut Genetic::new(10, 20)).is_ok());
    }
}
