//! Data structures for labeled feature-matrix datasets.
//!
//! This module defines `Dataset` and `DocMetadata` and contains helpers for
//! row selection, class bookkeeping, and the shuffled holdout split used
//! before cross-validation. How the matrix was vectorized (tokenization,
//! vocabulary selection) is outside this crate; rows arrive already numeric.

use std::collections::HashMap;

use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::EvalError;

/// Per-row document metadata carried alongside the feature matrix.
#[derive(Debug, Clone, Default)]
pub struct DocMetadata {
    /// Document identifiers, aligned with matrix rows (may be empty).
    pub doc_id: Vec<String>,
    /// Feature (column) names (may be empty).
    pub feature_names: Vec<String>,
}

/// A feature matrix with aligned labels.
///
/// Row order is the join key between `x`, `y`, and `metadata.doc_id`;
/// `classes` records the distinct labels in first-appearance order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f64>,
    pub y: Vec<String>,
    pub classes: Vec<String>,
    pub metadata: DocMetadata,
}

impl Dataset {
    pub fn new(x: Array2<f64>, y: Vec<String>, metadata: DocMetadata) -> anyhow::Result<Self> {
        if x.nrows() != y.len() {
            anyhow::bail!(
                "Feature matrix has {} rows but label vector has {} entries",
                x.nrows(),
                y.len()
            );
        }
        if !metadata.doc_id.is_empty() && metadata.doc_id.len() != y.len() {
            anyhow::bail!(
                "Document ids ({}) do not align with rows ({})",
                metadata.doc_id.len(),
                y.len()
            );
        }
        if !metadata.feature_names.is_empty() && metadata.feature_names.len() != x.ncols() {
            anyhow::bail!(
                "Feature names ({}) do not align with columns ({})",
                metadata.feature_names.len(),
                x.ncols()
            );
        }

        let mut classes: Vec<String> = Vec::new();
        for label in &y {
            if !classes.iter().any(|c| c == label) {
                classes.push(label.clone());
            }
        }

        Ok(Dataset {
            x,
            y,
            classes,
            metadata,
        })
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Number of rows carrying each class label.
    pub fn class_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for label in &self.y {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// The class that is not `positive_class` in a two-class dataset.
    pub fn negative_class(&self, positive_class: &str) -> Result<&str, EvalError> {
        if self.classes.len() != 2 {
            return Err(EvalError::NotBinary(self.classes.len()));
        }
        if !self.classes.iter().any(|c| c == positive_class) {
            return Err(EvalError::UnknownLabel(positive_class.to_string()));
        }
        let negative = self
            .classes
            .iter()
            .find(|c| c.as_str() != positive_class)
            .ok_or(EvalError::NotBinary(self.classes.len()))?;
        Ok(negative)
    }

    pub fn log_input_data_summary(&self) {
        log::info!("----- Input Data Summary -----");
        for class in &self.classes {
            let count = self.y.iter().filter(|l| l.as_str() == class).count();
            log::info!("Info: {} '{}' paragraphs", count, class);
        }
        log::info!("Info: {} feature scores (columns)", self.x.ncols());
        log::info!("-------------------------------");
    }

    /// New dataset holding only the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Dataset {
        Dataset {
            x: self.x.select(Axis(0), indices),
            y: indices.iter().map(|&i| self.y[i].clone()).collect(),
            classes: self.classes.clone(),
            metadata: self.metadata.select_rows(indices),
        }
    }

    /// New dataset holding only rows where `mask[i]` is true.
    pub fn filter(&self, mask: &[bool]) -> Dataset {
        let selected: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| if keep { Some(i) } else { None })
            .collect();
        self.select_rows(&selected)
    }

    /// Shuffled single train/test split.
    ///
    /// Shuffles row indices with a seeded RNG and puts the first
    /// `train_fraction` of them in the training set. This is the one
    /// randomized partition in the crate; cross-validation folds use the
    /// deterministic round-robin masks instead.
    pub fn split_holdout(&self, train_fraction: f64, seed: u64) -> (Dataset, Dataset) {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let n_train = (self.len() as f64 * train_fraction) as usize;
        let (train_idx, test_idx) = indices.split_at(n_train);

        log::debug!(
            "Holdout split: {} training rows, {} test rows (seed {})",
            train_idx.len(),
            test_idx.len(),
            seed
        );

        (self.select_rows(train_idx), self.select_rows(test_idx))
    }
}

impl DocMetadata {
    pub fn select_rows(&self, indices: &[usize]) -> DocMetadata {
        let doc_id = if self.doc_id.is_empty() {
            Vec::new()
        } else {
            indices.iter().map(|&i| self.doc_id[i].clone()).collect()
        };
        DocMetadata {
            doc_id,
            feature_names: self.feature_names.clone(),
        }
    }
}
