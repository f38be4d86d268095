use crate::config::ModelConfig;
use crate::models::classifier_trait::Classifier;

/// Build a boxed classifier backend from a `ModelConfig`.
/// Currently this is a thin factory implemented as a single function.
pub fn build_model(config: ModelConfig) -> Box<dyn Classifier> {
    match config.model_type {
        crate::config::ModelType::Logistic { .. } => {
            Box::new(crate::models::logistic::LogisticClassifier::new(config))
        }

        #[cfg(feature = "svm")]
        crate::config::ModelType::Svm { .. } => {
            Box::new(crate::models::svm::SvmClassifier::new(config))
        } // `ModelType` only contains the variants enabled by features, so
          // the above arms are exhaustive for the compiled enum.
    }
}

/// Source of fresh classifier instances for the cross-validator, which
/// trains one model per fold. `Sync` because grid-search candidates share
/// the factory across worker threads.
pub trait ClassifierFactory: Sync {
    fn build(&self) -> Box<dyn Classifier>;
}

impl ClassifierFactory for ModelConfig {
    fn build(&self) -> Box<dyn Classifier> {
        build_model(self.clone())
    }
}
