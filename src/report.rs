//! Output formatting for readability results.
//!
//! Supports two output formats:
//! - Plain: the line-oriented console format (echoed text, counts, one line per formula)
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::error::ScoreError;
use crate::score::{Assessment, ReadabilityResult};
use crate::text::TextMetrics;

/// Prompt shown when the score choice is read interactively.
pub const PROMPT: &str = "Enter the score you want to calculate (ARI, FK, SMOG, CL, all): ";

// =============================================================================
// Plain Format
// =============================================================================

/// Write the echoed text block.
pub fn write_text<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "The text is:")?;
    writeln!(out, "{}", text)
}

/// Write the metric counts, preceded by a blank line.
pub fn write_metrics<W: Write>(out: &mut W, metrics: &TextMetrics) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Words: {}", metrics.words)?;
    writeln!(out, "Sentences: {}", metrics.sentences)?;
    writeln!(out, "Characters: {}", metrics.characters)?;
    writeln!(out, "Syllables: {}", metrics.syllables)?;
    writeln!(out, "Polysyllables: {}", metrics.polysyllables)
}

/// Format a score with two decimals, rounding half up on its shortest
/// decimal form (`0.125` prints as `0.13`, `1.005` as `1.01`).
pub fn format_score(score: f64) -> String {
    if !score.is_finite() {
        return format!("{:.2}", score);
    }

    // Display yields the shortest round-tripping decimal, never an exponent.
    let shortest = format!("{}", score.abs());
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().collect();
    let mut frac: Vec<u8> = frac_part.bytes().take(2).collect();
    frac.resize(2, b'0');
    digits.extend_from_slice(&frac);

    if frac_part.as_bytes().get(2).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - 2;
    let sign = if score.is_sign_negative() { "-" } else { "" };
    format!(
        "{}{}.{}",
        sign,
        String::from_utf8_lossy(&digits[..split]),
        String::from_utf8_lossy(&digits[split..])
    )
}

/// Format one result line.
pub fn format_result(result: &ReadabilityResult) -> String {
    format!(
        "{}: {} (about {} year olds).",
        result.formula.name(),
        format_score(result.score),
        result.age
    )
}

/// Write one line per successful formula.
pub fn write_results<W: Write>(out: &mut W, assessment: &Assessment) -> io::Result<()> {
    for result in assessment.results() {
        writeln!(out, "{}", format_result(result))?;
    }
    Ok(())
}

/// Write one line per failed formula.
pub fn write_errors<W: Write>(err: &mut W, assessment: &Assessment) -> io::Result<()> {
    for e in assessment.errors() {
        writeln!(err, "{} {}", "error:".red().bold(), e)?;
    }
    Ok(())
}

/// Write a warning line.
pub fn write_warning<W: Write>(err: &mut W, message: &str) -> io::Result<()> {
    writeln!(err, "{} {}", "warning:".yellow().bold(), message)
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub metrics: TextMetrics,
    pub results: Vec<JsonResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

/// A successful formula in the JSON report.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResult {
    pub formula: String,
    pub code: String,
    pub score: f64,
    pub age: String,
}

/// A failed formula in the JSON report.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonError {
    pub formula: String,
    pub message: String,
}

impl JsonReport {
    pub fn new(path: &str, metrics: &TextMetrics, assessment: &Assessment) -> Self {
        JsonReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: path.to_string(),
            metrics: *metrics,
            results: assessment.results().map(result_to_json).collect(),
            errors: assessment.errors().map(error_to_json).collect(),
        }
    }
}

fn result_to_json(r: &ReadabilityResult) -> JsonResult {
    JsonResult {
        formula: r.formula.name().to_string(),
        code: r.formula.code().to_string(),
        score: r.score,
        age: r.age.clone(),
    }
}

fn error_to_json(e: &ScoreError) -> JsonError {
    JsonError {
        formula: e.formula().code().to_string(),
        message: e.to_string(),
    }
}

/// Write results in JSON format.
pub fn write_json<W: Write>(
    out: &mut W,
    path: &str,
    metrics: &TextMetrics,
    assessment: &Assessment,
) -> anyhow::Result<()> {
    let report = JsonReport::new(path, metrics, assessment);
    let json = serde_json::to_string_pretty(&report)?;
    writeln!(out, "{}", json)?;
    Ok(())
}
