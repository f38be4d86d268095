//! K-fold cross-validation and cost-parameter grid search.
//!
//! The validator owns no state across calls: every fold trains a fresh
//! model from the factory, per-fold metric records are folded into an
//! elementwise mean, and the grid search keeps the full cost/score curve
//! so callers can report more than the winner.

use anyhow::Result;
use rayon::prelude::*;

use crate::config::ModelConfig;
use crate::data_handling::Dataset;
use crate::error::EvalError;
use crate::folds::{fold_mask, partition_indices};
use crate::metrics::{evaluate, Metrics};
use crate::models::factory::ClassifierFactory;

/// Cross-validated score for one candidate cost value.
#[derive(Debug, Clone, Copy)]
pub struct CostScore {
    pub cost: f64,
    pub metrics: Metrics,
}

/// Result of a cost grid search: the full curve in candidate order plus
/// the index of the winner. Immutable after construction.
#[derive(Debug, Clone)]
pub struct CostSearch {
    curve: Vec<CostScore>,
    best: usize,
}

impl CostSearch {
    pub fn curve(&self) -> &[CostScore] {
        &self.curve
    }

    pub fn best(&self) -> &CostScore {
        &self.curve[self.best]
    }

    pub fn best_cost(&self) -> f64 {
        self.best().cost
    }

    pub fn best_f_measure(&self) -> f64 {
        self.best().metrics.f_measure
    }
}

/// Orchestrates k-fold evaluation of a classifier backend.
pub struct CrossValidator {
    factory: Box<dyn ClassifierFactory>,
    folds: usize,
    positive_class: String,
    probability_threshold: Option<f64>,
}

impl CrossValidator {
    /// Create a new CrossValidator.
    ///
    /// # Arguments
    ///
    /// * `model` - Backend configuration; a fresh model is built per fold
    /// * `folds` - Number of cross-validation folds
    /// * `positive_class` - Label treated as the signal class for
    ///   precision/recall/F
    pub fn new(model: ModelConfig, folds: usize, positive_class: impl Into<String>) -> Self {
        Self::from_factory(Box::new(model), folds, positive_class)
    }

    /// Create a CrossValidator around a custom classifier factory.
    pub fn from_factory(
        factory: Box<dyn ClassifierFactory>,
        folds: usize,
        positive_class: impl Into<String>,
    ) -> Self {
        CrossValidator {
            factory,
            folds,
            positive_class: positive_class.into(),
            probability_threshold: None,
        }
    }

    /// Label test rows positive iff the backend's positive-class
    /// probability reaches `threshold`, instead of taking hard labels.
    pub fn with_probability_threshold(mut self, threshold: f64) -> Self {
        self.probability_threshold = Some(threshold);
        self
    }

    /// Train on `train`, predict on `test`, and score against the true
    /// test labels. Also the single-split entry point for holdout
    /// evaluation.
    pub fn evaluate_split(&self, train: &Dataset, test: &Dataset, cost: f64) -> Result<Metrics> {
        let negative_class = train.negative_class(&self.positive_class)?.to_string();

        let y_train: Vec<i32> = train
            .y
            .iter()
            .map(|label| if label == &self.positive_class { 1 } else { -1 })
            .collect();

        let mut model = self.factory.build();
        model.fit(&train.x, &y_train, cost)?;

        let predicted_signs: Vec<i32> = match self.probability_threshold {
            Some(threshold) => model
                .predict_proba(&test.x)?
                .iter()
                .map(|&p| if p >= threshold { 1 } else { -1 })
                .collect(),
            None => model.predict(&test.x)?,
        };

        let predicted: Vec<String> = predicted_signs
            .iter()
            .map(|&sign| {
                if sign == 1 {
                    self.positive_class.clone()
                } else {
                    negative_class.clone()
                }
            })
            .collect();

        if !test.y.iter().any(|label| label == &self.positive_class) {
            log::warn!(
                "Test set contains no '{}' rows; precision/recall/F default to 0",
                self.positive_class
            );
        }

        Ok(evaluate(
            &predicted,
            &test.y,
            &self.positive_class,
            &train.classes,
        )?)
    }

    /// Average metrics over `folds` round-robin folds at a fixed cost.
    ///
    /// The reported record is the elementwise mean of the per-fold metric
    /// records, not a pooled confusion matrix.
    pub fn cross_validate(&self, data: &Dataset, cost: f64) -> Result<Metrics> {
        if self.folds == 0 {
            anyhow::bail!("Fold count must be at least 1");
        }

        let mut per_fold = Vec::with_capacity(self.folds);
        for fold in 1..=self.folds {
            let mask = fold_mask(fold, self.folds, data.len())?;
            let (train_idx, test_idx) = partition_indices(&mask);

            log::trace!(
                "Cross-validation fold {}: {} training rows, {} test rows",
                fold,
                train_idx.len(),
                test_idx.len()
            );

            let train = data.select_rows(&train_idx);
            let test = data.select_rows(&test_idx);
            let metrics = self.evaluate_split(&train, &test, cost)?;

            log::trace!("Fold {}: {}", fold, metrics);
            per_fold.push(metrics);
        }

        Ok(Metrics::mean(&per_fold))
    }

    /// Grid search over candidate cost values.
    ///
    /// Candidates are independent and run on a worker pool; results are
    /// collected in candidate order, and ties on F-measure resolve to the
    /// first (smallest-index) candidate, so the winner is deterministic.
    /// This does not interpolate between tried values.
    pub fn optimize_cost(&self, data: &Dataset, costs: &[f64]) -> Result<CostSearch> {
        if costs.is_empty() {
            return Err(EvalError::EmptyCostGrid.into());
        }

        let curve: Vec<CostScore> = costs
            .par_iter()
            .map(|&cost| {
                self.cross_validate(data, cost)
                    .map(|metrics| CostScore { cost, metrics })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut best = 0;
        for (idx, score) in curve.iter().enumerate() {
            if score.metrics.f_measure > curve[best].metrics.f_measure {
                best = idx;
            }
        }

        log::debug!(
            "Cost search over {} candidates: best cost {} with F {:.4}",
            curve.len(),
            curve[best].cost,
            curve[best].metrics.f_measure
        );

        Ok(CostSearch { curve, best })
    }
}
