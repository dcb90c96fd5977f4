mod run;
pub mod taillard;

pub use run::*;

use std::io::BufRead;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Error of reading or writing instances and solutions.
#[derive(Debug, Error)]
pub enum DataError {
    /// The payload is not valid JSON or fails validation.
    #[error("malformed data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Serializes a value to its JSON representation.
///
/// # Errors
/// - If the value cannot be represented as JSON.
pub fn to_string<T: Serialize>(value: &T) -> Result<String, DataError> {
    Ok(serde_json::to_string(value)?)
}

/// Reads a JSON value from the reader.
///
/// # Errors
/// - If the payload is malformed or fails validation.
pub fn deserialize<T: DeserializeOwned>(reader: &mut impl BufRead) -> Result<T, DataError> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::Instance;

    #[test]
    fn instances_round_trip() -> anyhow::Result<()> {
        let instance = Instance::new(vec![vec![2, 3], vec![4, 1], vec![1, 5]])?;
        let serialized = to_string(&instance)?;
        let read: Instance = deserialize(&mut serialized.as_bytes())?;
        assert_eq!(instance, read);
        Ok(())
    }

    #[test]
    fn ragged_payloads_are_rejected() {
        let result: Result<Instance, _> = deserialize(&mut "[[1,2],[3]]".as_bytes());
        assert!(result.is_err());
    }
}
