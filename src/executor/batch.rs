//! Batch planning
//!
//! Splits test targets into contiguous groups, one group per destination.

/// Partition `targets` into at most `destination_count` contiguous batches
///
/// Every batch holds `ceil(len / destination_count)` targets except the
/// last, which may be shorter. A destination count of zero is treated as one.
pub fn plan<T: Clone>(targets: &[T], destination_count: usize) -> Vec<Vec<T>> {
    if targets.is_empty() {
        return Vec::new();
    }

    let batch_size = targets.len().div_ceil(destination_count.max(1));
    targets.chunks(batch_size).map(<[T]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("T{i}")).collect()
    }

    #[test]
    fn test_empty_targets() {
        assert!(plan::<String>(&[], 4).is_empty());
    }

    #[test]
    fn test_five_targets_two_destinations() {
        let batches = plan(&targets(5), 2);
        let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 2]);
        assert_eq!(batches[0], vec!["T1", "T2", "T3"]);
        assert_eq!(batches[1], vec!["T4", "T5"]);
    }

    #[test]
    fn test_more_destinations_than_targets() {
        let batches = plan(&targets(3), 8);
        assert_eq!(batches, vec![vec!["T1"], vec!["T2"], vec!["T3"]]);
    }

    #[test]
    fn test_single_destination() {
        let batches = plan(&targets(4), 1);
        assert_eq!(batches, vec![targets(4)]);
    }

    #[test]
    fn test_zero_destinations_treated_as_one() {
        assert_eq!(plan(&targets(3), 0).len(), 1);
    }

    #[test]
    fn test_partition_properties() {
        for n in 0..40 {
            let input = targets(n);
            for d in 1..12 {
                let batches = plan(&input, d);

                assert!(batches.len() <= d, "n={n} d={d}");
                assert!(batches.iter().all(|b| !b.is_empty()), "n={n} d={d}");
                assert_eq!(batches.iter().map(Vec::len).sum::<usize>(), n);
                assert_eq!(batches.concat(), input, "n={n} d={d}");

                if let Some((last, rest)) = batches.split_last() {
                    let size = n.div_ceil(d);
                    assert!(rest.iter().all(|b| b.len() == size));
                    assert!(last.len() <= size);
                }
            }
        }
    }
}
