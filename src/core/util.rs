use std::time::{Duration, Instant};

/// A wall-clock budget for a solver run.
/// Construction records the moment the clock starts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// Creates a deadline expiring after the given duration.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self(Instant::now().checked_add(budget))
    }

    /// Creates a deadline that never expires.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self(None)
    }

    /// Checks whether the budget is spent.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.0.is_some_and(|instant| Instant::now() >= instant)
    }
}

/// Moves the element at `from` to position `to`, shifting everything in
/// between. `to` addresses the vector after removal, so the move is undone
/// by `reinsert(sequence, to, from)`.
pub fn reinsert<T>(sequence: &mut Vec<T>, from: usize, to: usize) {
    let element = sequence.remove(from);
    sequence.insert(to, element);
}
