//! Round-robin fold assignment for cross-validation.
//!
//! Folds interleave rows by stride rather than cutting contiguous blocks:
//! source corpora are often sorted by speech or date, and a contiguous block
//! could draw an entire test fold from a single speech or period.

use crate::error::EvalError;

/// Boolean membership mask for one cross-validation fold.
///
/// Position `i` is `true` iff `i % folds == fold - 1`, i.e. fold `fold`
/// holds every `folds`-th row starting at row `fold - 1`. Fold indices are
/// 1-based; `fold == 0` or `fold > folds` is an error. The mask may be all
/// `false` when `len < fold`.
pub fn fold_mask(fold: usize, folds: usize, len: usize) -> Result<Vec<bool>, EvalError> {
    if fold == 0 || fold > folds {
        return Err(EvalError::InvalidFoldIndex { fold, folds });
    }
    Ok((0..len).map(|i| i % folds == fold - 1).collect())
}

/// Split a fold mask into (train, test) row indices.
///
/// Test rows are the `true` positions; every other row is training data.
pub fn partition_indices(mask: &[bool]) -> (Vec<usize>, Vec<usize>) {
    let mut train = Vec::with_capacity(mask.len());
    let mut test = Vec::new();
    for (i, &held_out) in mask.iter().enumerate() {
        if held_out {
            test.push(i);
        } else {
            train.push(i);
        }
    }
    (train, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_is_round_robin() {
        let mask = fold_mask(2, 3, 7).unwrap();
        assert_eq!(mask, vec![false, true, false, false, true, false, false]);
    }

    #[test]
    fn fold_index_zero_rejected() {
        assert_eq!(
            fold_mask(0, 5, 10),
            Err(EvalError::InvalidFoldIndex { fold: 0, folds: 5 })
        );
    }

    #[test]
    fn partition_covers_all_rows() {
        let mask = fold_mask(1, 4, 10).unwrap();
        let (train, test) = partition_indices(&mask);
        assert_eq!(train.len() + test.len(), 10);
        assert_eq!(test, vec![0, 4, 8]);
    }
}
