//! Readability - text readability scoring.
//!
//! Computes surface statistics of a text and applies four readability
//! formulas, each mapped to an approximate reader age.
//!
//! # Architecture
//!
//! The crate is a linear pipeline:
//!
//! - `text`: Tokenization and counting, producing [`TextMetrics`]
//! - `score`: ARI, Flesch–Kincaid, SMOG and Coleman–Liau formulas and their dispatch
//! - `age`: Score to reader-age lookup
//! - `error`: Typed errors for scoring and choice parsing
//! - `report`: Output formatting (plain, JSON)
//! - `cli`: Argument parsing, file input and the score prompt

pub mod age;
pub mod cli;
pub mod error;
pub mod report;
pub mod score;
pub mod text;

pub use age::score_to_age;
pub use error::{ChoiceError, ScoreError, UnmappedScore};
pub use score::{Assessment, Formula, ReadabilityResult, ScoreChoice};
pub use text::TextMetrics;
