use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a processing-time matrix cannot form a valid instance.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InstanceError {
    /// A job row has a different number of entries than the first row.
    #[error("job {job} has {len} processing times, expected {machines}")]
    RaggedMatrix {
        job: usize,
        len: usize,
        machines: usize,
    },
}

/// An instance of the permutation flow-shop problem.
/// Every job visits every machine in the same order; `times[job][machine]`
/// is the processing time. The matrix is never mutated after construction.
#[derive(Clone, Debug, Deserialize, Eq, Serialize, PartialEq)]
#[serde(try_from = "Vec<Vec<u64>>", into = "Vec<Vec<u64>>")]
pub struct Instance {
    machines: usize,
    times: Vec<Vec<u64>>,
}

impl Instance {
    /// Creates an instance from a `jobs x machines` processing-time matrix.
    /// The machine count is taken from the first row; an empty matrix is the
    /// degenerate zero-job instance.
    ///
    /// # Errors
    /// - If any job row has a different number of entries than the first.
    pub fn new(times: Vec<Vec<u64>>) -> Result<Self, InstanceError> {
        let machines = times.first().map_or(0, Vec::len);
        for (job, row) in times.iter().enumerate() {
            if row.len() != machines {
                return Err(InstanceError::RaggedMatrix {
                    job,
                    len: row.len(),
                    machines,
                });
            }
        }
        Ok(Self { machines, times })
    }

    /// Returns the number of jobs.
    #[must_use]
    pub fn jobs(&self) -> usize {
        self.times.len()
    }

    /// Returns the number of machines.
    #[must_use]
    pub const fn machines(&self) -> usize {
        self.machines
    }

    /// Returns the processing time of a job on a machine.
    #[must_use]
    pub fn time(&self, job: usize, machine: usize) -> u64 {
        self.times[job][machine]
    }

    /// Returns the total processing time of a job across all machines.
    #[must_use]
    pub fn total_time(&self, job: usize) -> u64 {
        self.times[job].iter().sum()
    }
}

impl TryFrom<Vec<Vec<u64>>> for Instance {
    type Error = InstanceError;

    fn try_from(times: Vec<Vec<u64>>) -> Result<Self, Self::Error> {
        Self::new(times)
    }
}

impl From<Instance> for Vec<Vec<u64>> {
    fn from(instance: Instance) -> Self {
        instance.times
    }
}
