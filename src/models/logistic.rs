use anyhow::{anyhow, Result};
use linfa::prelude::*;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::{Array1, Array2};

use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::Classifier;

/// Logistic-regression classifier backed by `linfa-logistic`.
///
/// The cost parameter handed to `fit` is the inverse of the ridge penalty:
/// `alpha = 1 / cost`, matching the C convention of liblinear-style tools.
pub struct LogisticClassifier {
    model: Option<FittedLogisticRegression<f64, bool>>,
    config: ModelConfig,
}

impl LogisticClassifier {
    pub fn new(config: ModelConfig) -> Self {
        LogisticClassifier {
            model: None,
            config,
        }
    }

    fn fitted(&self) -> Result<&FittedLogisticRegression<f64, bool>> {
        self.model
            .as_ref()
            .ok_or_else(|| anyhow!("LogisticClassifier used before fit"))
    }
}

impl Classifier for LogisticClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32], cost: f64) -> Result<()> {
        if cost <= 0.0 {
            return Err(anyhow!("Cost parameter must be positive, got {}", cost));
        }

        let (max_iterations, gradient_tolerance, fit_intercept) = match &self.config.model_type {
            ModelType::Logistic {
                max_iterations,
                gradient_tolerance,
                fit_intercept,
            } => (*max_iterations, *gradient_tolerance, *fit_intercept),
            #[cfg(feature = "svm")]
            _ => {
                return Err(anyhow!(
                    "Expected ModelType::Logistic params, got {:?}",
                    self.config.model_type
                ))
            }
        };

        // bool targets: `true` sorts above `false`, so linfa treats the
        // positive class as the probability column we expose.
        let targets = Array1::from_vec(y.iter().map(|&l| l == 1).collect::<Vec<bool>>());
        let dataset = Dataset::new(x.to_owned(), targets);

        let fitted = LogisticRegression::default()
            .alpha(1.0 / cost)
            .max_iterations(max_iterations)
            .gradient_tolerance(gradient_tolerance)
            .with_intercept(fit_intercept)
            .fit(&dataset)
            .map_err(|e| anyhow!("Logistic regression training failed: {}", e))?;

        self.model = Some(fitted);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        let labels = self.fitted()?.predict(x);
        Ok(labels.iter().map(|&pos| if pos { 1 } else { -1 }).collect())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        let probs = self.fitted()?.predict_probabilities(x);
        Ok(probs.to_vec())
    }

    fn name(&self) -> &str {
        "logistic"
    }
}
