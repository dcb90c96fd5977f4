use crate::core::Instance;

const MULTIPLIER: i64 = 16807;
const MODULUS: i64 = 2_147_483_647;
const QUOTIENT: i64 = 127_773;
const REMAINDER: i64 = 2836;

/// The linear congruential generator of Taillard's benchmark suite.
/// Matrices generated from the published seeds reproduce the published
/// benchmark instances.
#[derive(Clone, Debug)]
pub struct TaillardRng {
    state: i64,
}

impl TaillardRng {
    /// Creates a generator, folding the seed into the valid LCG range.
    /// Seeds already in `1..2^31 - 1` are used as the state unchanged.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let range = u64::try_from(MODULUS - 1).unwrap_or_else(|_| unreachable!("positive modulus"));
        let folded = match seed % range {
            // A zero state would be a fixpoint of the recurrence.
            0 => 1,
            state => state,
        };
        let state =
            i64::try_from(folded).unwrap_or_else(|_| unreachable!("folded below the modulus"));
        Self { state }
    }

    /// Returns the next number in `(0, 1)`.
    #[allow(clippy::cast_precision_loss)]
    pub fn next_double(&mut self) -> f64 {
        let k = self.state / QUOTIENT;
        self.state = MULTIPLIER * (self.state % QUOTIENT) - REMAINDER * k;
        if self.state < 0 {
            self.state += MODULUS;
        }
        self.state as f64 / MODULUS as f64
    }

    /// Returns the next number in `[low, high]`.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn next_int(&mut self, low: u64, high: u64) -> u64 {
        low + (self.next_double() * (high - low + 1) as f64) as u64
    }
}

/// Generates an instance with processing times uniform in `[1, 99]`.
/// Times are drawn machine by machine, the order the benchmark suite uses,
/// and stored job by job.
#[must_use]
pub fn generate(jobs: usize, machines: usize, seed: u64) -> Instance {
    let mut rng = TaillardRng::new(seed);
    let mut times = vec![vec![0; machines]; jobs];

    for machine in 0..machines {
        for row in times.iter_mut() {
            row[machine] = rng.next_int(1, 99);
        }
    }

    Instance::new(times).unwrap_or_else(|_| unreachable!("generated matrix is rectangular"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_draws_from_the_unit_seed() {
        // By hand: 16807 / 2147483647, then 16807^2 / 2147483647.
        let mut rng = TaillardRng::new(1);
        assert_eq!(rng.next_int(1, 99), 1);
        assert_eq!(rng.next_int(1, 99), 14);
    }

    #[test]
    fn same_seed_gives_the_same_instance() {
        assert_eq!(generate(10, 5, 873_654_221), generate(10, 5, 873_654_221));
    }

    #[test]
    fn folded_seeds_coincide() {
        let modulus = 2_147_483_646_u64;
        assert_eq!(generate(4, 3, 5), generate(4, 3, 5 + modulus));
    }

    #[test]
    fn times_stay_in_range() {
        let instance = generate(20, 5, 1_909);
        assert_eq!(instance.jobs(), 20);
        assert_eq!(instance.machines(), 5);

        for job in 0..instance.jobs() {
            for machine in 0..instance.machines() {
                let time = instance.time(job, machine);
                assert!((1..=99).contains(&time));
            }
        }
    }
}
