//! CSV reader for labeled feature matrices.
//!
//! Expects one row per document with a label column, an optional document
//! id column, and numeric feature columns. Vectorization happened upstream;
//! this reader only assembles the matrix.
use std::collections::HashSet;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;
use ndarray::Array2;

use crate::data_handling::{Dataset, DocMetadata};

/// Configuration for reading feature-matrix CSV files.
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// Column name holding class labels.
    pub label_column: String,
    /// Optional column name for document identifiers.
    pub doc_id_column: Option<String>,
    /// Optional list of feature columns to load (in order).
    /// When `None`, all non-metadata columns are treated as features.
    pub feature_columns: Option<Vec<String>>,
    /// Columns to ignore when auto-selecting features.
    pub ignore_columns: Vec<String>,
    /// Field delimiter (`,` by default).
    pub delimiter: u8,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            label_column: "label".to_string(),
            doc_id_column: None,
            feature_columns: None,
            ignore_columns: vec![
                "label".to_string(),
                "doc_id".to_string(),
                "id".to_string(),
                "text".to_string(),
                "speech".to_string(),
                "speaker".to_string(),
                "date".to_string(),
            ],
            delimiter: b',',
        }
    }
}

/// Read a labeled feature-matrix CSV with the default configuration.
pub fn read_feature_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    read_feature_csv_with_config(path, &CsvReaderConfig::default())
}

/// Read a labeled feature-matrix CSV using a custom configuration.
pub fn read_feature_csv_with_config<P: AsRef<Path>>(
    path: P,
    config: &CsvReaderConfig,
) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open CSV file: {}", path.as_ref().display()))?;

    let headers = reader
        .headers()
        .context("Failed to read CSV header row")?
        .clone();

    let label_idx = find_column(&headers, &config.label_column)
        .ok_or_else(|| anyhow!("Missing label column '{}'", config.label_column))?;

    let doc_id_idx = match &config.doc_id_column {
        Some(name) => find_column(&headers, name),
        None => find_any_column(&headers, &["doc_id", "id", "docid"]),
    };

    let feature_indices = resolve_feature_indices(&headers, config, label_idx, doc_id_idx)?;
    if feature_indices.is_empty() {
        return Err(anyhow!("No feature columns detected in CSV header"));
    }

    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut doc_ids = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let label = record
            .get(label_idx)
            .ok_or_else(|| anyhow!("Missing label value at row {}", row_idx + 1))?
            .trim();
        if label.is_empty() {
            return Err(anyhow!("Empty label at row {}", row_idx + 1));
        }
        labels.push(label.to_string());

        let doc_id = doc_id_idx
            .and_then(|idx| record.get(idx))
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| format!("row{}", row_idx + 1));
        doc_ids.push(doc_id);

        for &idx in &feature_indices {
            let value = record
                .get(idx)
                .ok_or_else(|| anyhow!("Missing feature value at row {}", row_idx + 1))?;
            let parsed = value.trim().parse::<f64>().with_context(|| {
                format!(
                    "Invalid feature '{}' at row {}",
                    headers.get(idx).unwrap_or(""),
                    row_idx + 1
                )
            })?;
            features.push(parsed);
        }
    }

    let n_samples = labels.len();
    let n_features = feature_indices.len();
    let x = Array2::from_shape_vec((n_samples, n_features), features)
        .context("Failed to build feature matrix")?;

    let feature_names = feature_indices
        .iter()
        .map(|&idx| headers.get(idx).unwrap_or("").to_string())
        .collect();

    Dataset::new(
        x,
        labels,
        DocMetadata {
            doc_id: doc_ids,
            feature_names,
        },
    )
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}

fn find_any_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|name| find_column(headers, name))
}

fn resolve_feature_indices(
    headers: &StringRecord,
    config: &CsvReaderConfig,
    label_idx: usize,
    doc_id_idx: Option<usize>,
) -> Result<Vec<usize>> {
    if let Some(names) = &config.feature_columns {
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let idx = find_column(headers, name)
                .ok_or_else(|| anyhow!("Missing feature column '{}'", name))?;
            indices.push(idx);
        }
        return Ok(indices);
    }

    let mut ignore = HashSet::new();
    for name in &config.ignore_columns {
        ignore.insert(name.to_ascii_lowercase());
    }

    let mut indices = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        if idx == label_idx || Some(idx) == doc_id_idx {
            continue;
        }
        if ignore.contains(&header.to_ascii_lowercase()) {
            continue;
        }
        indices.push(idx);
    }
    Ok(indices)
}
