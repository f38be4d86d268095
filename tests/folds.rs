//! Integration tests for round-robin fold assignment.

use topicscore::error::EvalError;
use topicscore::folds::{fold_mask, partition_indices};

// ---------------------------------------------------------------------------
// Partition properties
// ---------------------------------------------------------------------------

#[test]
fn folds_partition_every_index_exactly_once() {
    for &(folds, len) in &[(2usize, 10usize), (3, 10), (5, 5), (7, 23), (10, 101)] {
        let mut seen = vec![0usize; len];
        for fold in 1..=folds {
            let mask = fold_mask(fold, folds, len).unwrap();
            assert_eq!(mask.len(), len);
            for (i, &held_out) in mask.iter().enumerate() {
                if held_out {
                    seen[i] += 1;
                }
            }
        }
        assert!(
            seen.iter().all(|&count| count == 1),
            "k={} n={}: some index not covered exactly once",
            folds,
            len
        );
    }
}

#[test]
fn fold_sizes_differ_by_at_most_one() {
    for &(folds, len) in &[(3usize, 10usize), (4, 10), (10, 12), (6, 23)] {
        let sizes: Vec<usize> = (1..=folds)
            .map(|fold| {
                fold_mask(fold, folds, len)
                    .unwrap()
                    .iter()
                    .filter(|&&held_out| held_out)
                    .count()
            })
            .collect();
        let min = sizes.iter().min().unwrap();
        let max = sizes.iter().max().unwrap();
        assert!(
            max - min <= 1,
            "k={} n={}: fold sizes {:?} differ by more than 1",
            folds,
            len,
            sizes
        );
    }
}

// ---------------------------------------------------------------------------
// Boundary and error cases
// ---------------------------------------------------------------------------

#[test]
fn first_fold_of_ten_over_twelve_rows() {
    let mask = fold_mask(1, 10, 12).unwrap();
    let positions: Vec<usize> = mask
        .iter()
        .enumerate()
        .filter_map(|(i, &held_out)| if held_out { Some(i) } else { None })
        .collect();
    assert_eq!(positions, vec![0, 10]);
}

#[test]
fn fold_may_be_empty_when_n_below_fold() {
    // Fold 5 of 5 over 3 rows holds no index.
    let mask = fold_mask(5, 5, 3).unwrap();
    assert!(mask.iter().all(|&held_out| !held_out));
}

#[test]
fn fold_index_above_count_errors() {
    let err = fold_mask(11, 10, 100).unwrap_err();
    assert_eq!(
        err,
        EvalError::InvalidFoldIndex {
            fold: 11,
            folds: 10
        }
    );
}

#[test]
fn last_fold_index_is_valid() {
    assert!(fold_mask(10, 10, 100).is_ok());
}

#[test]
fn partition_indices_are_disjoint_and_ordered() {
    let mask = fold_mask(2, 4, 11).unwrap();
    let (train, test) = partition_indices(&mask);
    assert_eq!(test, vec![1, 5, 9]);
    for idx in &test {
        assert!(!train.contains(idx));
    }
    let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
    all.sort_unstable();
    assert_eq!(all, (0..11).collect::<Vec<usize>>());
}
