use crate::core::Solver;
use crate::data::deserialize;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};
use std::fs::File;
use std::io::BufReader;

/// Report of running a directory of samples.
#[derive(Debug, Deserialize, Serialize)]
pub struct Report {
    solver: String,
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Create a new report.
    fn new(solver: String) -> Self {
        let entries = Vec::new();
        Self { solver, entries }
    }

    /// Get the solver name.
    #[must_use]
    pub fn solver_name(&self) -> &str {
        &self.solver
    }

    /// Get the entries.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Solver: {}", self.solver)?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f, "-------------------")
    }
}

/// Report of running a single sample.
#[non_exhaustive]
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub makespan: u64,
    pub time: f64,
}

impl Display for ReportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}: {} in {:.2} sec", self.name, self.makespan, self.time)
    }
}

/// Run all samples in the `samples` directory.
/// Print the report to stdout.
///
/// # Arguments
/// - `valid` is true, check the makespan against the filename reference.
/// - `solver` is the solver to run.
///
/// # Errors
/// - If a file cannot be read.
/// - If no samples are found.
///
/// # Panics
/// - If a solution is invalid.
/// - If the makespan differs from a nonzero reference and `valid` is true.
pub fn samples(valid: bool, solver: &mut dyn Solver) -> anyhow::Result<()> {
    run("samples", valid, solver).and_then(|report| {
        if report.entries.is_empty() {
            Err(anyhow!("No samples found"))
        } else {
            println!("{report}");
            Ok(())
        }
    })
}

/// Run all samples in the `dir` directory.
/// Instances with more jobs than the solver handles are skipped. A zero
/// reference in the filename means the best makespan is unknown and is never
/// checked.
///
/// # Arguments
/// - `valid` is true, check the makespan against the filename reference.
/// - `solver` is the solver to run.
///
/// # Errors
/// - If a file cannot be read.
///
/// # Panics
/// - If a solution is invalid.
/// - If the makespan differs from a nonzero reference and `valid` is true.
pub fn run(dir: &str, valid: bool, solver: &mut dyn Solver) -> anyhow::Result<Report> {
    let mut report = Report::new(solver.name().into());

    for file in std::fs::read_dir(dir)? {
        let file = file?;
        let (name, jobs, reference) = parse_filename(&file.file_name())?;

        if jobs <= solver.max_jobs() {
            let instance = deserialize(&mut BufReader::new(File::open(file.path())?))?;

            let time = std::time::Instant::now();
            let solution = solver.solve(&instance);
            let time = time.elapsed().as_secs_f64();

            assert!(solution.verify(&instance), "Invalid solution created");

            let makespan = solution.makespan();
            if valid && reference != 0 {
                assert_eq!(makespan, reference, "Invalid makespan {name}");
            }

            report.entries.push(ReportEntry {
                name,
                makespan,
                time,
            });
        }
    }

    Ok(report)
}

fn parse_filename(filename: &std::ffi::OsString) -> anyhow::Result<(String, usize, u64)> {
    static NAME_ERR: &str = "Cannot read filename";

    let name = filename.to_str().ok_or_else(|| anyhow!(NAME_ERR))?;
    let mut parts = name.split('.');
    let mut parts = parts.next().ok_or_else(|| anyhow!(NAME_ERR))?.split('_');

    let mut size = parts.next().ok_or_else(|| anyhow!(NAME_ERR))?.split('x');
    let jobs = size.next().ok_or_else(|| anyhow!(NAME_ERR))?.parse()?;
    let _: usize = size.next().ok_or_else(|| anyhow!(NAME_ERR))?.parse()?;

    let reference = parts.next().ok_or_else(|| anyhow!(NAME_ERR))?.parse()?;
    let _: usize = parts.next().ok_or_else(|| anyhow!(NAME_ERR))?.parse()?;

    Ok((name.into(), jobs, reference))
}
