//! Command-line interface for readability.

use anyhow::Context;
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::report;
use crate::score::{Assessment, ScoreChoice};
use crate::text::TextMetrics;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Score readability of a text file.
///
/// Counts words, sentences, characters, syllables and polysyllables, then
/// applies the Automated Readability Index, Flesch–Kincaid, SMOG and
/// Coleman–Liau formulas and maps each score to an approximate reader age.
#[derive(Parser, Debug)]
#[command(name = "readability")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Text file to analyze
    pub path: PathBuf,

    /// Score to calculate: ARI, FK, SMOG, CL or all (default: ask on stdin)
    #[arg(short, long)]
    pub score: Option<String>,

    /// Output format: plain or json
    #[arg(short, long, default_value = "plain")]
    pub format: String,

    /// Do not echo the input text
    #[arg(long)]
    pub no_echo: bool,
}

/// Read the whole input file.
fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

/// Read the next whitespace-delimited token, skipping blank lines.
pub fn read_choice<R: BufRead>(input: &mut R) -> anyhow::Result<String> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("no score choice given on standard input");
        }
        if let Some(token) = line.split_whitespace().next() {
            return Ok(token.to_string());
        }
    }
}

/// Run against the process's standard streams.
pub fn run(args: &Cli) -> anyhow::Result<i32> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    run_with_io(args, &mut stdin.lock(), &mut stdout.lock(), &mut stderr.lock())
}

/// Run with explicit input, output and error streams.
pub fn run_with_io<R: BufRead, W: Write, E: Write>(
    args: &Cli,
    input: &mut R,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<i32> {
    // Validate format
    let json = match args.format.as_str() {
        "plain" => false,
        "json" => true,
        other => {
            writeln!(err, "Error: invalid format {:?}, must be 'plain' or 'json'", other)?;
            return Ok(EXIT_ERROR);
        }
    };

    let text = match read_text(&args.path) {
        Ok(t) => t,
        Err(e) => {
            writeln!(err, "Error: {:#}", e)?;
            return Ok(EXIT_ERROR);
        }
    };
    info!(path = %args.path.display(), bytes = text.len(), "loaded text");

    let metrics = TextMetrics::analyze(&text);

    if !json {
        if !args.no_echo {
            report::write_text(out, &text)?;
        }
        report::write_metrics(out, &metrics)?;
    }

    // Resolve the score choice, prompting if it wasn't given
    let answer = match &args.score {
        Some(s) => s.clone(),
        None => {
            if json {
                write!(err, "{}", report::PROMPT)?;
                err.flush()?;
            } else {
                write!(out, "{}", report::PROMPT)?;
                out.flush()?;
            }
            match read_choice(input) {
                Ok(a) => a,
                Err(e) => {
                    if !json {
                        writeln!(out)?;
                    }
                    writeln!(err, "Error: {}", e)?;
                    return Ok(EXIT_ERROR);
                }
            }
        }
    };

    if !json {
        writeln!(out)?;
    }

    let choice: ScoreChoice = match answer.parse() {
        Ok(c) => c,
        Err(e) => {
            report::write_warning(err, &e.to_string())?;
            return Ok(EXIT_FAILED);
        }
    };

    let assessment = Assessment::evaluate(choice, &metrics);

    if json {
        let path = args.path.to_string_lossy().to_string();
        report::write_json(out, &path, &metrics, &assessment)?;
    } else {
        report::write_results(out, &assessment)?;
        report::write_errors(err, &assessment)?;
    }

    if assessment.has_errors() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}
