use anyhow::{anyhow, Result};
use linfa::dataset::Pr;
use linfa::traits::Predict;
use linfa::Dataset;
use linfa_svm::{Svm, SvmParams};
use ndarray::{Array1, Array2};

use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::Classifier;

/// SVM classifier backed by `linfa-svm`, with Platt-scaled probability
/// output. The cost parameter maps onto equal positive/negative class
/// weights.
pub struct SvmClassifier {
    model: Option<Svm<f64, Pr>>,
    config: ModelConfig,
}

impl SvmClassifier {
    pub fn new(config: ModelConfig) -> Self {
        SvmClassifier {
            model: None,
            config,
        }
    }

    fn fitted(&self) -> Result<&Svm<f64, Pr>> {
        self.model
            .as_ref()
            .ok_or_else(|| anyhow!("SvmClassifier used before fit"))
    }
}

impl Classifier for SvmClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32], cost: f64) -> Result<()> {
        if cost <= 0.0 {
            return Err(anyhow!("Cost parameter must be positive, got {}", cost));
        }

        let ModelType::Svm {
            eps,
            kernel,
            gaussian_kernel_eps,
            polynomial_kernel_constant,
            polynomial_kernel_degree,
        } = &self.config.model_type
        else {
            return Err(anyhow!(
                "Expected ModelType::Svm params, got {:?}",
                self.config.model_type
            ));
        };

        let targets = Array1::from_vec(y.iter().map(|&l| l == 1).collect::<Vec<bool>>());
        let dataset = Dataset::new(x.to_owned(), targets);

        let mut params: SvmParams<f64, Pr> = Svm::<f64, Pr>::params()
            .eps(*eps)
            .pos_neg_weights(cost, cost);

        params = match kernel.as_str() {
            "linear" => params.linear_kernel(),
            "gauss" => params.gaussian_kernel(*gaussian_kernel_eps),
            "poly" => params
                .polynomial_kernel(*polynomial_kernel_constant, *polynomial_kernel_degree),
            other => {
                return Err(anyhow!(
                    "Unsupported kernel type: {}. Valid options are: linear, gauss, poly",
                    other
                ))
            }
        };

        let fitted = <SvmParams<f64, Pr> as linfa::traits::Fit<_, _, _>>::fit(&params, &dataset)
            .map_err(|e| anyhow!("SVM training failed: {}", e))?;

        self.model = Some(fitted);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        let probs = self.predict_proba(x)?;
        Ok(probs
            .iter()
            .map(|&p| if p > 0.5 { 1 } else { -1 })
            .collect())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        let predictions = self.fitted()?.predict(x.to_owned());
        let targets: Vec<Pr> = predictions.targets().to_vec();
        Ok(targets.iter().map(|&v| *v as f64).collect())
    }

    fn name(&self) -> &str {
        "svm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_svm_classifier() {
        let x = Array2::from_shape_vec(
            (8, 2),
            vec![
                -2.0, 0.3, -1.8, -0.1, -2.2, 0.2, -1.9, 0.0, 2.1, 0.1, 1.9, -0.2, 2.0, 0.3, 2.2,
                0.0,
            ],
        )
        .unwrap();
        let y = vec![-1, -1, -1, -1, 1, 1, 1, 1];

        let config = ModelConfig::new(ModelType::from_str("svm").unwrap());
        let mut classifier = SvmClassifier::new(config);
        classifier.fit(&x, &y, 1.0).unwrap();

        let probs = classifier.predict_proba(&x).unwrap();
        assert_eq!(probs.len(), 8);

        let predictions = classifier.predict(&x).unwrap();
        assert_eq!(predictions.len(), 8);
        assert!(predictions.iter().all(|&p| p == 1 || p == -1));
    }
}
