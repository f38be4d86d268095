//! Confusion counts and classification metrics with positive-class selection.

use std::fmt;

use crate::error::EvalError;

/// Raw confusion-matrix cells for a chosen positive class.
///
/// Counts come from a positional comparison of a predicted-label vector
/// against a ground-truth vector of equal length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionCounts {
    /// Tally counts against `positive_class`. Inputs are assumed validated
    /// (equal lengths, labels drawn from the known class set).
    pub fn from_labels(predicted: &[String], truth: &[String], positive_class: &str) -> Self {
        let mut counts = ConfusionCounts::default();
        for (pred, actual) in predicted.iter().zip(truth.iter()) {
            let pred_pos = pred == positive_class;
            let actual_pos = actual == positive_class;
            match (pred_pos, actual_pos) {
                (true, true) => counts.true_positives += 1,
                (true, false) => counts.false_positives += 1,
                (false, true) => counts.false_negatives += 1,
                (false, false) => counts.true_negatives += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// True instances of the positive class in the ground truth.
    pub fn positive_support(&self) -> usize {
        self.true_positives + self.false_negatives
    }
}

/// Fixed-shape metric record computed from [`ConfusionCounts`].
///
/// Every ratio with a zero denominator is defined as 0 rather than NaN, so
/// that per-fold records can always be averaged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub specificity: f64,
    pub f_measure: f64,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl Metrics {
    pub fn from_counts(counts: &ConfusionCounts) -> Self {
        let tp = counts.true_positives;
        let fp = counts.false_positives;
        let tn = counts.true_negatives;
        let fn_count = counts.false_negatives;

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_count);
        let f_measure = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        Metrics {
            accuracy: ratio(tp + tn, counts.total()),
            precision,
            recall,
            specificity: ratio(tn, tn + fp),
            f_measure,
        }
    }

    /// Elementwise arithmetic mean over per-fold metric records.
    ///
    /// Cross-validated scores are the mean of the per-fold records, not a
    /// pooled confusion matrix. An empty slice yields the all-zero record.
    pub fn mean(runs: &[Metrics]) -> Metrics {
        if runs.is_empty() {
            return Metrics::default();
        }
        let n = runs.len() as f64;
        let mut sum = Metrics::default();
        for m in runs {
            sum.accuracy += m.accuracy;
            sum.precision += m.precision;
            sum.recall += m.recall;
            sum.specificity += m.specificity;
            sum.f_measure += m.f_measure;
        }
        Metrics {
            accuracy: sum.accuracy / n,
            precision: sum.precision / n,
            recall: sum.recall / n,
            specificity: sum.specificity / n,
            f_measure: sum.f_measure / n,
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "accuracy={:.4} precision={:.4} recall={:.4} specificity={:.4} f={:.4}",
            self.accuracy, self.precision, self.recall, self.specificity, self.f_measure
        )
    }
}

/// Compare predictions against ground truth for the given positive class.
///
/// `classes` is the known label set; both vectors must consist of its
/// members and have equal length. Swapping the positive class swaps which
/// confusion cell counts as a true positive and changes every metric
/// accordingly.
pub fn evaluate(
    predicted: &[String],
    truth: &[String],
    positive_class: &str,
    classes: &[String],
) -> Result<Metrics, EvalError> {
    if predicted.len() != truth.len() {
        return Err(EvalError::LengthMismatch {
            predicted: predicted.len(),
            expected: truth.len(),
        });
    }
    if !classes.iter().any(|c| c == positive_class) {
        return Err(EvalError::UnknownLabel(positive_class.to_string()));
    }
    for label in predicted.iter().chain(truth.iter()) {
        if !classes.iter().any(|c| c == label) {
            return Err(EvalError::UnknownLabel(label.clone()));
        }
    }

    let counts = ConfusionCounts::from_labels(predicted, truth, positive_class);
    Ok(Metrics::from_counts(&counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn counts_tally_by_position() {
        let truth = labels(&["a", "b", "a", "b"]);
        let predicted = labels(&["a", "a", "a", "b"]);
        let counts = ConfusionCounts::from_labels(&predicted, &truth, "b");
        assert_eq!(counts.true_positives, 1);
        assert_eq!(counts.false_positives, 0);
        assert_eq!(counts.false_negatives, 1);
        assert_eq!(counts.true_negatives, 2);
    }

    #[test]
    fn zero_denominators_clamp_to_zero() {
        let counts = ConfusionCounts {
            true_positives: 0,
            false_positives: 0,
            true_negatives: 3,
            false_negatives: 0,
        };
        let m = Metrics::from_counts(&counts);
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f_measure, 0.0);
        assert_eq!(m.specificity, 1.0);
        assert_eq!(m.accuracy, 1.0);
    }
}
