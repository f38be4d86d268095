pub mod classifier_trait;
pub mod factory;
pub mod logistic;
#[cfg(feature = "svm")]
pub mod svm;

pub use classifier_trait::Classifier;
