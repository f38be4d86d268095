use anyhow::Result;
use ndarray::Array2;

/// Small trait abstraction for the classifier backends driven by the
/// cross-validator. Implementations wrap an external solver; this crate
/// never implements the optimization routine itself.
pub trait Classifier {
    /// Fit the model. `y` uses the crate convention (1 for the positive
    /// class, -1 for the negative class). `cost` is the inverse
    /// regularization strength: larger values fit the training rows more
    /// tightly.
    fn fit(&mut self, x: &Array2<f64>, y: &[i32], cost: f64) -> Result<()>;

    /// Hard ±1 label per row of `x`.
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>>;

    /// Probability of the positive class (0..1) per row of `x`.
    /// Implementations that only produce margins should convert
    /// appropriately.
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
