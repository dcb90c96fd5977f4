use super::Instance;

/// Computes the makespan of a sequence: the completion time of the last job
/// on the last machine. Accepts full permutations as well as the partial
/// sequences evaluated by the constructive heuristics; an empty sequence has
/// makespan 0. Only the last row of the completion table is kept.
#[must_use]
pub fn makespan(sequence: &[usize], instance: &Instance) -> u64 {
    let machines = instance.machines();
    let mut row = vec![0_u64; machines + 1];

    for &job in sequence {
        for machine in 1..=machines {
            row[machine] = row[machine].max(row[machine - 1]) + instance.time(job, machine - 1);
        }
    }

    row[machines]
}

/// Builds the full completion-time table for a sequence, with a zero first
/// row and column: `table[i][j] = max(table[i-1][j], table[i][j-1]) +
/// times[sequence[i-1]][j-1]`. The bottom-right cell equals [`makespan`].
#[must_use]
pub fn completion_matrix(sequence: &[usize], instance: &Instance) -> Vec<Vec<u64>> {
    let machines = instance.machines();
    let mut table = vec![vec![0_u64; machines + 1]; sequence.len() + 1];

    for (i, &job) in sequence.iter().enumerate() {
        for machine in 1..=machines {
            table[i + 1][machine] =
                table[i][machine].max(table[i + 1][machine - 1]) + instance.time(job, machine - 1);
        }
    }

    table
}

#[cfg(test)]
mod test {
    use super::*;

    fn small() -> Instance {
        Instance::new(vec![vec![2, 3], vec![4, 1], vec![1, 5]])
            .unwrap_or_else(|_| unreachable!("matrix is rectangular"))
    }

    #[test]
    fn empty_sequence_has_zero_makespan() {
        assert_eq!(makespan(&[], &small()), 0);
    }

    #[test]
    fn known_makespans() {
        let instance = small();
        assert_eq!(makespan(&[0, 1, 2], &instance), 12);
        assert_eq!(makespan(&[0, 2, 1], &instance), 11);
        assert_eq!(makespan(&[2, 0, 1], &instance), 10);
        assert_eq!(makespan(&[2, 1, 0], &instance), 10);
    }

    #[test]
    fn matrix_corner_matches_makespan() {
        let instance = small();
        let sequence = [1, 2, 0];
        let table = completion_matrix(&sequence, &instance);
        assert_eq!(
            table[sequence.len()][instance.machines()],
            makespan(&sequence, &instance)
        );
    }

    #[test]
    fn partial_sequences_evaluate() {
        let instance = small();
        assert_eq!(makespan(&[2], &instance), 6);
        assert_eq!(makespan(&[2, 0], &instance), 9);
    }

    #[test]
    fn no_machines_means_zero() -> anyhow::Result<()> {
        let instance = Instance::new(vec![vec![], vec![]])?;
        assert_eq!(makespan(&[0, 1], &instance), 0);
        Ok(())
    }
}
