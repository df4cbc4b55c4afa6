//! Readability formulas and their dispatch.
//!
//! Each formula is a pure function of [`TextMetrics`]. Denominators are
//! checked up front so degenerate text is reported instead of producing
//! NaN or infinite scores.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use crate::age;
use crate::error::{ChoiceError, ScoreError};
use crate::text::TextMetrics;

/// Formula coefficients.
pub mod coefficients {
    pub const ARI_CHARS: f64 = 4.71;
    pub const ARI_WORDS: f64 = 0.5;
    pub const ARI_CONSTANT: f64 = 21.43;

    pub const FK_WORDS: f64 = 0.39;
    pub const FK_SYLLABLES: f64 = 11.8;
    pub const FK_CONSTANT: f64 = 15.59;

    pub const SMOG_FACTOR: f64 = 1.043;
    pub const SMOG_SAMPLE: f64 = 30.0;
    pub const SMOG_CONSTANT: f64 = 3.1291;

    pub const CL_LETTERS: f64 = 0.0588;
    pub const CL_SENTENCES: f64 = 0.296;
    pub const CL_CONSTANT: f64 = 15.8;
}

use coefficients::*;

/// A readability formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    #[serde(rename = "ARI")]
    Ari,
    #[serde(rename = "FK")]
    FleschKincaid,
    #[serde(rename = "SMOG")]
    Smog,
    #[serde(rename = "CL")]
    ColemanLiau,
}

impl Formula {
    /// All formulas in reporting order.
    pub const ALL: [Formula; 4] = [
        Formula::Ari,
        Formula::FleschKincaid,
        Formula::Smog,
        Formula::ColemanLiau,
    ];

    /// Short code accepted at the prompt.
    pub fn code(&self) -> &'static str {
        match self {
            Formula::Ari => "ARI",
            Formula::FleschKincaid => "FK",
            Formula::Smog => "SMOG",
            Formula::ColemanLiau => "CL",
        }
    }

    /// Full name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Formula::Ari => "Automated Readability Index",
            Formula::FleschKincaid => "Flesch–Kincaid readability tests",
            Formula::Smog => "Simple Measure of Gobbledygook",
            Formula::ColemanLiau => "Coleman–Liau index",
        }
    }

    /// Compute the raw score.
    pub fn score(&self, metrics: &TextMetrics) -> Result<f64, ScoreError> {
        let formula = *self;
        let nonzero = |count: usize, denominator: &'static str| {
            if count == 0 {
                Err(ScoreError::DivisionByZero {
                    formula,
                    denominator,
                })
            } else {
                Ok(count as f64)
            }
        };

        match self {
            Formula::Ari => {
                let words = nonzero(metrics.words, "word")?;
                let sentences = nonzero(metrics.sentences, "sentence")?;
                Ok(automated_readability_index(
                    metrics.characters as f64,
                    words,
                    sentences,
                ))
            }
            Formula::FleschKincaid => {
                let words = nonzero(metrics.words, "word")?;
                let sentences = nonzero(metrics.sentences, "sentence")?;
                Ok(flesch_kincaid(metrics.syllables as f64, words, sentences))
            }
            Formula::Smog => {
                let sentences = nonzero(metrics.sentences, "sentence")?;
                Ok(smog(metrics.polysyllables as f64, sentences))
            }
            Formula::ColemanLiau => {
                let words = nonzero(metrics.words, "word")?;
                Ok(coleman_liau(
                    metrics.characters as f64,
                    words,
                    metrics.sentences as f64,
                ))
            }
        }
    }

    /// Compute the score and map it to an age label.
    pub fn assess(&self, metrics: &TextMetrics) -> Result<ReadabilityResult, ScoreError> {
        let score = self.score(metrics)?;
        let age = age::score_to_age(score).map_err(|source| ScoreError::UnmappedScore {
            formula: *self,
            source,
        })?;
        Ok(ReadabilityResult {
            formula: *self,
            score,
            age: age.to_string(),
        })
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Formula {
    type Err = ChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::ALL
            .into_iter()
            .find(|f| f.code() == s)
            .ok_or_else(|| ChoiceError(s.to_string()))
    }
}

/// Automated Readability Index.
pub fn automated_readability_index(characters: f64, words: f64, sentences: f64) -> f64 {
    ARI_CHARS * characters / words + ARI_WORDS * words / sentences - ARI_CONSTANT
}

/// Flesch–Kincaid grade level.
pub fn flesch_kincaid(syllables: f64, words: f64, sentences: f64) -> f64 {
    FK_WORDS * words / sentences + FK_SYLLABLES * syllables / words - FK_CONSTANT
}

/// Simple Measure of Gobbledygook.
pub fn smog(polysyllables: f64, sentences: f64) -> f64 {
    SMOG_FACTOR * (polysyllables * SMOG_SAMPLE / sentences).sqrt() + SMOG_CONSTANT
}

/// Coleman–Liau index, via letters and sentences per hundred words.
pub fn coleman_liau(characters: f64, words: f64, sentences: f64) -> f64 {
    let letters_per_100 = 100.0 * characters / words;
    let sentences_per_100 = 100.0 * sentences / words;
    CL_LETTERS * letters_per_100 - CL_SENTENCES * sentences_per_100 - CL_CONSTANT
}

/// The formulas requested at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreChoice {
    Single(Formula),
    All,
}

impl ScoreChoice {
    pub fn formulas(&self) -> Vec<Formula> {
        match self {
            ScoreChoice::Single(formula) => vec![*formula],
            ScoreChoice::All => Formula::ALL.to_vec(),
        }
    }
}

impl FromStr for ScoreChoice {
    type Err = ChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(ScoreChoice::All);
        }
        s.parse().map(ScoreChoice::Single)
    }
}

/// One formula's score and age label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityResult {
    pub formula: Formula,
    pub score: f64,
    pub age: String,
}

/// Per-formula outcomes for one choice, in reporting order.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub outcomes: Vec<Result<ReadabilityResult, ScoreError>>,
}

impl Assessment {
    /// Run every formula in `choice`. One failure does not stop the rest.
    pub fn evaluate(choice: ScoreChoice, metrics: &TextMetrics) -> Self {
        let outcomes = choice
            .formulas()
            .into_iter()
            .map(|formula| {
                let outcome = formula.assess(metrics);
                if let Err(e) = &outcome {
                    warn!(formula = formula.code(), error = %e, "formula failed");
                }
                outcome
            })
            .collect();
        Assessment { outcomes }
    }

    pub fn results(&self) -> impl Iterator<Item = &ReadabilityResult> {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    pub fn errors(&self) -> impl Iterator<Item = &ScoreError> {
        self.outcomes.iter().filter_map(|o| o.as_ref().err())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn metrics(
        words: usize,
        sentences: usize,
        characters: usize,
        syllables: usize,
        polysyllables: usize,
    ) -> TextMetrics {
        TextMetrics {
            words,
            sentences,
            characters,
            syllables,
            polysyllables,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_formula_values() {
        let m = metrics(134, 14, 644, 194, 13);
        assert_close(Formula::Ari.score(&m).unwrap(), 5.991833688699359);
        assert_close(Formula::FleschKincaid.score(&m).unwrap(), 5.226439232409383);
        assert_close(Formula::Smog.score(&m).unwrap(), 8.634040054169528);
        assert_close(Formula::ColemanLiau.score(&m).unwrap(), 9.366567164179102);
    }

    #[test]
    fn test_coleman_liau_matches_direct_substitution() {
        let (c, w, s) = (644.0, 134.0, 14.0);
        let direct = 0.0588 * (100.0 * c / w) - 0.296 * (100.0 * s / w) - 15.8;
        assert_close(coleman_liau(c, w, s), direct);
    }

    #[test]
    fn test_smog_without_polysyllables() {
        let m = metrics(3, 1, 10, 3, 0);
        assert_close(Formula::Smog.score(&m).unwrap(), SMOG_CONSTANT);
    }

    #[test]
    fn test_division_by_zero_words() {
        let m = metrics(0, 1, 0, 0, 0);
        assert_eq!(
            Formula::Ari.score(&m),
            Err(ScoreError::DivisionByZero {
                formula: Formula::Ari,
                denominator: "word",
            })
        );
        assert!(Formula::FleschKincaid.score(&m).is_err());
        assert!(Formula::ColemanLiau.score(&m).is_err());
        // SMOG never divides by the word count.
        assert!(Formula::Smog.score(&m).is_ok());
    }

    #[test]
    fn test_division_by_zero_sentences() {
        let m = metrics(3, 0, 10, 3, 0);
        let err = Formula::Smog.score(&m).unwrap_err();
        assert_eq!(err.formula(), Formula::Smog);
        assert!(err.to_string().contains("sentence"));
        assert!(Formula::Ari.score(&m).is_err());
        assert!(Formula::FleschKincaid.score(&m).is_err());
        // Coleman–Liau only has sentences in the numerator.
        assert!(Formula::ColemanLiau.score(&m).is_ok());
    }

    #[test]
    fn test_assess_maps_age() {
        let m = metrics(134, 14, 644, 194, 13);
        let result = Formula::Ari.assess(&m).unwrap();
        assert_eq!(result.formula, Formula::Ari);
        assert_eq!(result.age, "12");
    }

    #[test]
    fn test_assess_reports_unmapped_score() {
        // "The cat sat." scores well below the table.
        let m = metrics(3, 1, 10, 3, 0);
        match Formula::Ari.assess(&m) {
            Err(ScoreError::UnmappedScore { formula, source }) => {
                assert_eq!(formula, Formula::Ari);
                assert_eq!(source.rounded, -4);
            }
            other => panic!("expected unmapped score, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!("ARI".parse::<ScoreChoice>(), Ok(ScoreChoice::Single(Formula::Ari)));
        assert_eq!("FK".parse::<ScoreChoice>(), Ok(ScoreChoice::Single(Formula::FleschKincaid)));
        assert_eq!("SMOG".parse::<ScoreChoice>(), Ok(ScoreChoice::Single(Formula::Smog)));
        assert_eq!("CL".parse::<ScoreChoice>(), Ok(ScoreChoice::Single(Formula::ColemanLiau)));
        assert_eq!("all".parse::<ScoreChoice>(), Ok(ScoreChoice::All));
    }

    #[test]
    fn test_parse_choice_is_case_sensitive() {
        assert_eq!(
            "ari".parse::<ScoreChoice>(),
            Err(ChoiceError("ari".to_string()))
        );
        assert!("ALL".parse::<ScoreChoice>().is_err());
        assert!("".parse::<ScoreChoice>().is_err());
    }

    #[test]
    fn test_evaluate_all_keeps_order() {
        let m = metrics(134, 14, 644, 194, 13);
        let assessment = Assessment::evaluate(ScoreChoice::All, &m);
        let formulas: Vec<Formula> = assessment.results().map(|r| r.formula).collect();
        assert_eq!(formulas, Formula::ALL.to_vec());
        assert!(!assessment.has_errors());
    }

    #[test]
    fn test_evaluate_failures_are_independent() {
        // "Hello, world! How are you?"
        let m = metrics(5, 2, 22, 6, 0);
        let assessment = Assessment::evaluate(ScoreChoice::All, &m);
        assert_eq!(assessment.outcomes.len(), 4);

        let ok: Vec<Formula> = assessment.results().map(|r| r.formula).collect();
        assert_eq!(ok, vec![Formula::Ari, Formula::Smog]);

        let failed: Vec<Formula> = assessment.errors().map(|e| e.formula()).collect();
        assert_eq!(failed, vec![Formula::FleschKincaid, Formula::ColemanLiau]);
    }
}
