//! Integration tests for the CSV reader and the feature scaler.

use std::io::Write;

use ndarray::Array2;

use topicscore::io::{read_feature_csv, read_feature_csv_with_config, CsvReaderConfig};
use topicscore::preprocessing::{fit_scaler, fit_transform, transform_all};

// ---------------------------------------------------------------------------
// CSV reading
// ---------------------------------------------------------------------------

fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("features.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    (dir, path)
}

#[test]
fn reads_labels_ids_and_features() {
    let (_dir, path) = write_csv(
        "doc_id,label,war,tax\n\
         p1,foreign,1.0,0.0\n\
         p2,domestic,0.0,2.5\n\
         p3,foreign,0.5,0.5\n",
    );

    let data = read_feature_csv(&path).unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data.x.ncols(), 2);
    assert_eq!(data.y, vec!["foreign", "domestic", "foreign"]);
    assert_eq!(data.classes, vec!["foreign", "domestic"]);
    assert_eq!(data.metadata.doc_id, vec!["p1", "p2", "p3"]);
    assert_eq!(data.metadata.feature_names, vec!["war", "tax"]);
    assert_eq!(data.x[(1, 1)], 2.5);
}

#[test]
fn missing_label_column_errors() {
    let (_dir, path) = write_csv("doc_id,war,tax\np1,1.0,0.0\n");
    assert!(read_feature_csv(&path).is_err());
}

#[test]
fn non_numeric_feature_errors() {
    let (_dir, path) = write_csv("doc_id,label,war\np1,foreign,abc\n");
    assert!(read_feature_csv(&path).is_err());
}

#[test]
fn custom_label_column_and_explicit_features() {
    let (_dir, path) = write_csv(
        "id,topic,war,tax,noise\n\
         p1,foreign,1.0,0.0,9.9\n\
         p2,domestic,0.0,1.0,9.9\n",
    );

    let config = CsvReaderConfig {
        label_column: "topic".to_string(),
        feature_columns: Some(vec!["war".to_string(), "tax".to_string()]),
        ..CsvReaderConfig::default()
    };
    let data = read_feature_csv_with_config(&path, &config).unwrap();
    assert_eq!(data.x.ncols(), 2);
    assert_eq!(data.metadata.feature_names, vec!["war", "tax"]);
}

#[test]
fn ignored_columns_are_skipped() {
    let (_dir, path) = write_csv(
        "doc_id,label,text,war\n\
         p1,foreign,some words,1.0\n\
         p2,domestic,more words,0.0\n",
    );

    let data = read_feature_csv(&path).unwrap();
    assert_eq!(data.metadata.feature_names, vec!["war"]);
}

// ---------------------------------------------------------------------------
// Scaler fit / transform
// ---------------------------------------------------------------------------

#[test]
fn fit_scaler_computes_mean_and_std() {
    let x = Array2::from_shape_vec((4, 2), vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0])
        .unwrap();

    let scaler = fit_scaler(&x);
    assert_eq!(scaler.mean.len(), 2);
    assert!((scaler.mean[0] - 2.5).abs() < 1e-9);
    assert!((scaler.mean[1] - 25.0).abs() < 1e-9);
    assert!(scaler.std[0] > 0.0);
    assert!(scaler.std[1] > 0.0);
}

#[test]
fn transform_all_centers_data() {
    let x = Array2::from_shape_vec((4, 1), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let scaler = fit_scaler(&x);
    let t = transform_all(&x, &scaler);

    let col_mean: f64 = (0..4).map(|r| t[(r, 0)]).sum::<f64>() / 4.0;
    assert!(
        col_mean.abs() < 1e-9,
        "column mean after transform should be ~0, got {}",
        col_mean
    );
}

#[test]
fn fit_transform_standardizes_each_column() {
    let x = Array2::from_shape_vec((4, 2), vec![1.0, 100.0, 2.0, 200.0, 3.0, 300.0, 4.0, 400.0])
        .unwrap();

    let t = fit_transform(&x);
    assert_eq!(t.dim(), (4, 2));

    for c in 0..2 {
        let mean: f64 = (0..4).map(|r| t[(r, c)]).sum::<f64>() / 4.0;
        let var: f64 = (0..4).map(|r| (t[(r, c)] - mean).powi(2)).sum::<f64>() / 4.0;
        assert!(mean.abs() < 1e-9, "col {} mean {}", c, mean);
        assert!((var - 1.0).abs() < 1e-9, "col {} variance {}", c, var);
    }
}

#[test]
fn constant_column_does_not_divide_by_zero() {
    let x = Array2::from_shape_vec((3, 1), vec![5.0, 5.0, 5.0]).unwrap();
    let t = fit_transform(&x);
    for r in 0..3 {
        assert!(t[(r, 0)].abs() < 1e-6);
    }
}
