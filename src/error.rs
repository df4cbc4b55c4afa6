//! Error types for scoring.

use thiserror::Error;

use crate::score::Formula;

/// A rounded score that falls outside the age table.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("score {score:.2} rounds to {rounded}, which has no age mapping (expected 1-14)")]
pub struct UnmappedScore {
    pub score: f64,
    pub rounded: i64,
}

/// Errors raised while computing a single formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("{formula}: cannot divide by zero {denominator} count")]
    DivisionByZero {
        formula: Formula,
        denominator: &'static str,
    },
    #[error("{formula}: {source}")]
    UnmappedScore {
        formula: Formula,
        #[source]
        source: UnmappedScore,
    },
}

impl ScoreError {
    /// The formula that failed.
    pub fn formula(&self) -> Formula {
        match self {
            ScoreError::DivisionByZero { formula, .. } => *formula,
            ScoreError::UnmappedScore { formula, .. } => *formula,
        }
    }
}

/// An answer to the score prompt that names no formula.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized score choice {0:?}, expected one of ARI, FK, SMOG, CL, all")]
pub struct ChoiceError(pub String);
