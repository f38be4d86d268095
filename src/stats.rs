//! Co-occurrence statistics for term pairs.
//!
//! Association between two terms over a document collection reduces to a
//! 2x2 contingency table of per-document presence, scored with the G²
//! log-likelihood ratio (Dunning 1993). G² is asymptotically χ²-distributed
//! with one degree of freedom, which gives the p-value.

use ndarray::Array2;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::error::EvalError;

/// 2x2 contingency table of joint presence counts for a term pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContingencyTable {
    /// Documents containing both terms.
    pub both: usize,
    /// Documents containing only the first term.
    pub left_only: usize,
    /// Documents containing only the second term.
    pub right_only: usize,
    /// Documents containing neither term.
    pub neither: usize,
}

impl ContingencyTable {
    pub fn total(&self) -> usize {
        self.both + self.left_only + self.right_only + self.neither
    }
}

/// Cross-tabulate two per-document presence vectors.
///
/// # Arguments
///
/// * `left` - Presence of the first term per document.
/// * `right` - Presence of the second term per document, same length.
pub fn cooccurrence_table(left: &[bool], right: &[bool]) -> Result<ContingencyTable, EvalError> {
    if left.len() != right.len() {
        return Err(EvalError::LengthMismatch {
            predicted: left.len(),
            expected: right.len(),
        });
    }

    let mut table = ContingencyTable {
        both: 0,
        left_only: 0,
        right_only: 0,
        neither: 0,
    };
    for (&l, &r) in left.iter().zip(right.iter()) {
        match (l, r) {
            (true, true) => table.both += 1,
            (true, false) => table.left_only += 1,
            (false, true) => table.right_only += 1,
            (false, false) => table.neither += 1,
        }
    }
    Ok(table)
}

/// G² log-likelihood ratio for a 2x2 contingency table.
///
/// G² = 2 · Σ O · ln(O / E), with expected counts under independence and
/// zero-count cells contributing nothing. Returns 0 for an empty table.
pub fn log_likelihood_ratio(table: &ContingencyTable) -> f64 {
    let n = table.total() as f64;
    if n == 0.0 {
        return 0.0;
    }

    let observed = [
        table.both as f64,
        table.left_only as f64,
        table.right_only as f64,
        table.neither as f64,
    ];
    let row = [
        (table.both + table.left_only) as f64,
        (table.right_only + table.neither) as f64,
    ];
    let col = [
        (table.both + table.right_only) as f64,
        (table.left_only + table.neither) as f64,
    ];

    let mut g2 = 0.0;
    for (idx, &obs) in observed.iter().enumerate() {
        if obs == 0.0 {
            continue;
        }
        let expected = row[idx / 2] * col[idx % 2] / n;
        g2 += obs * (obs / expected).ln();
    }
    2.0 * g2
}

/// Upper-tail χ²(1) p-value for a G² statistic.
pub fn log_likelihood_p_value(g2: f64) -> f64 {
    if g2 <= 0.0 {
        return 1.0;
    }
    let chi = ChiSquared::new(1.0).unwrap();
    1.0 - chi.cdf(g2)
}

/// Presence vector for one feature column (value > 0 counts as present).
pub fn presence_column(x: &Array2<f64>, col: usize) -> Vec<bool> {
    x.column(col).iter().map(|&v| v > 0.0).collect()
}
