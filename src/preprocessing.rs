//! Feature-matrix preprocessing shared by the CLI and tests.
//!
//! Provides a simple per-column standard scaler. Linear backends converge
//! faster on standardized columns, and the cost grid keeps a comparable
//! meaning across feature scales.

use ndarray::{Array2, Axis};

/// Simple standard scaler (per-column mean/std).
#[derive(Clone, Debug)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Scaler {
    /// Minimum stddev to avoid division by zero when transforming.
    const MIN_STD: f64 = 1e-9;
}

/// Fit a `Scaler` from an `Array2<f64>` where rows are samples and
/// columns are features.
pub fn fit_scaler(x: &Array2<f64>) -> Scaler {
    assert!(
        x.nrows() > 0 && x.ncols() > 0,
        "fit_scaler requires non-empty matrix"
    );

    let mean = x
        .mean_axis(Axis(0))
        .expect("non-empty matrix has column means")
        .to_vec();
    let std = x
        .std_axis(Axis(0), 0.0)
        .iter()
        .map(|&s| s.max(Scaler::MIN_STD))
        .collect();

    Scaler { mean, std }
}

/// Transform all rows using the provided `Scaler` and return a new matrix.
pub fn transform_all(x: &Array2<f64>, scaler: &Scaler) -> Array2<f64> {
    let mut out = x.clone();
    for (col, mut column) in out.axis_iter_mut(Axis(1)).enumerate() {
        let mean = scaler.mean[col];
        let std = scaler.std[col];
        column.mapv_inplace(|v| (v - mean) / std);
    }
    out
}

/// Fit scaler and return the transformed matrix in one call.
pub fn fit_transform(x: &Array2<f64>) -> Array2<f64> {
    let scaler = fit_scaler(x);
    transform_all(x, &scaler)
}
