use std::error::Error;
use std::fmt;

/// Errors raised by the evaluation core.
///
/// Backend (model) failures are not wrapped here; they propagate unchanged
/// through `anyhow::Result` from the classifier trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Requested fold index lies outside `1..=folds`.
    InvalidFoldIndex { fold: usize, folds: usize },
    /// Predicted and true label vectors differ in length.
    LengthMismatch { predicted: usize, expected: usize },
    /// A label value does not belong to the known class set.
    UnknownLabel(String),
    /// The dataset does not carry exactly two classes.
    NotBinary(usize),
    /// The cost grid handed to the optimizer is empty.
    EmptyCostGrid,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::InvalidFoldIndex { fold, folds } => {
                write!(f, "Fold index {} is outside 1..={}", fold, folds)
            }
            EvalError::LengthMismatch {
                predicted,
                expected,
            } => write!(
                f,
                "Predicted labels ({}) and true labels ({}) must have equal length",
                predicted, expected
            ),
            EvalError::UnknownLabel(label) => {
                write!(f, "Label '{}' is not in the known class set", label)
            }
            EvalError::NotBinary(n) => {
                write!(f, "Expected exactly 2 classes, found {}", n)
            }
            EvalError::EmptyCostGrid => write!(f, "Candidate cost list is empty"),
        }
    }
}

impl Error for EvalError {}
