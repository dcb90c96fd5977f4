use clap::{Parser, ValueEnum};
use permutation_flowshop::core::Solver;
use permutation_flowshop::{algo, data, run_reader};
use std::io::Write;
use std::num::NonZero;

#[derive(Copy, Clone, Debug)]
struct Algorithm(usize, &'static str);

impl From<Algorithm> for Box<dyn Solver> {
    fn from(value: Algorithm) -> Box<dyn Solver> {
        algo::SOLVERS[value.0]()
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.1)
    }
}

impl ValueEnum for Algorithm {
    fn value_variants<'a>() -> &'a [Self] {
        static ALGORITHMS: std::sync::LazyLock<Vec<Algorithm>> = std::sync::LazyLock::new(|| {
            let iter = algo::SOLVERS.iter().enumerate();
            iter.map(|(i, init)| Algorithm(i, init().name())).collect()
        });

        ALGORITHMS.as_slice()
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.1))
    }
}

/// Application solving the permutation flow-shop scheduling problem.
#[derive(Debug, Parser)]
enum Application {
    /// Run one of the implemented algorithms.
    Run { algorithm: Algorithm },
    /// Run benchmarks on a set of instances.
    Bench {
        /// The input directory.
        input: String,
        /// Exclude algorithms.
        #[clap(short, long, value_delimiter = ',')]
        exclude: Vec<Algorithm>,
        /// Check makespans against the filename references.
        #[clap(short, long, default_value = "false")]
        valid: bool,
    },
    /// Generate test cases with the Taillard generator.
    Gen {
        /// The number of jobs.
        jobs: NonZero<usize>,
        /// The number of machines.
        machines: NonZero<usize>,
        /// Seed of the first instance. Later instances use consecutive seeds.
        #[clap(short, long, default_value = "873654221")]
        seed: u64,
        /// Number of test cases to generate.
        #[clap(short, long, default_value = "1")]
        amount: NonZero<u64>,
        /// Path to output the generated instances. If the directory does not exist, it will be created.
        #[clap(short, long, default_value = "output")]
        output: String,
    },
}

fn solvers(exclude: &[Algorithm]) -> impl Iterator<Item = Box<dyn Solver>> + '_ {
    let iter = algo::SOLVERS.iter().map(|init| init());
    iter.filter(|solver| !exclude.iter().any(|name| name.1 == solver.name()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Application::parse() {
        Application::Run { algorithm } => {
            let mut solver = Box::<dyn Solver>::from(algorithm);
            run_reader(solver.as_mut(), &mut std::io::stdin().lock())
        }
        Application::Bench {
            input,
            exclude,
            valid,
        } => {
            for mut solver in solvers(&exclude) {
                println!("{}", data::run(&input, valid, solver.as_mut())?);
            }
            Ok(())
        }
        Application::Gen {
            jobs,
            machines,
            seed,
            amount,
            output,
        } => {
            let output = std::path::Path::new(&output);
            if !output.try_exists()? {
                std::fs::create_dir_all(output)?;
            }

            for i in 0..amount.get() {
                let instance = data::taillard::generate(jobs.get(), machines.get(), seed.wrapping_add(i));
                let filename = format!("{}x{}_0_{i}.in", jobs.get(), machines.get());
                std::fs::File::create(output.join(filename))?
                    .write_all(data::to_string(&instance)?.as_bytes())?;
            }
            Ok(())
        }
    }
}
