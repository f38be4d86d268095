//! topicscore: evaluation helpers for binary speech-topic classification.
//!
//! This crate provides k-fold cross-validation with cost-parameter grid
//! search for binary text classifiers (e.g. domestic vs foreign affairs
//! paragraphs), confusion-matrix metrics with positive-class selection,
//! data handling and preprocessing utilities, and CSV loading for
//! pre-vectorized feature matrices.
//!
//! The classifier itself lives behind a small trait so implementations can
//! be swapped; a logistic-regression backend is built in and an SVM backend
//! is available behind the `svm` feature to avoid pulling in extra
//! dependencies unless explicitly enabled.
pub mod config;
pub mod cross_validation;
pub mod data_handling;
pub mod error;
pub mod folds;
pub mod io;
pub mod metrics;
pub mod models;
pub mod preprocessing;
pub mod stats;
