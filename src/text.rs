//! Text analysis: word and sentence splitting, character counts and the
//! syllable heuristic.
//!
//! Splitting is deliberately regex-based rather than linguistic. Words are
//! separated by whitespace, optionally preceded by one of `?`, `!`, `.` or
//! `,`. Sentences are separated by any single `.`, `!` or `?`. Trailing
//! empty segments are dropped after a split, while leading and interior
//! ones are kept, so `"Hi!! Bye."` counts three sentences.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

lazy_static! {
    /// Word delimiter: one optional terminal punctuation mark, then whitespace.
    static ref WORD_DELIMITER: Regex = Regex::new(r"[?!.,]?\s+").unwrap();

    /// Sentence delimiter: any single terminal punctuation mark.
    static ref SENTENCE_DELIMITER: Regex = Regex::new(r"[.!?]").unwrap();
}

/// Characters treated as vowels by the syllable heuristic.
const VOWELS: &[char] = &['a', 'A', 'e', 'E', 'i', 'I', 'o', 'O', 'u', 'U', 'y', 'Y'];

/// Words with more syllables than this are polysyllabic.
pub const POLYSYLLABLE_THRESHOLD: usize = 2;

/// Surface statistics of a text, derived once and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextMetrics {
    pub words: usize,
    pub sentences: usize,
    /// Non-whitespace characters, punctuation included.
    pub characters: usize,
    pub syllables: usize,
    pub polysyllables: usize,
}

impl TextMetrics {
    /// Derive all counts from `text`.
    pub fn analyze(text: &str) -> Self {
        let words = tokenize_words(text);

        let mut syllables = 0;
        let mut polysyllables = 0;
        for word in &words {
            let count = count_syllables(word);
            syllables += count;
            if count > POLYSYLLABLE_THRESHOLD {
                polysyllables += 1;
            }
        }

        let metrics = TextMetrics {
            words: words.len(),
            sentences: count_sentences(text),
            characters: count_chars(text),
            syllables,
            polysyllables,
        };
        debug!(
            words = metrics.words,
            sentences = metrics.sentences,
            characters = metrics.characters,
            syllables = metrics.syllables,
            polysyllables = metrics.polysyllables,
            "analyzed text"
        );
        metrics
    }
}

/// Split `text` on `pattern`, discarding trailing empty segments.
fn split_dropping_trailing_empty<'t>(text: &'t str, pattern: &Regex) -> Vec<&'t str> {
    let mut parts: Vec<&str> = pattern.split(text).collect();
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts
}

/// Split text into word tokens.
///
/// Tokens may carry punctuation that is not followed by whitespace (the last
/// word of `"The cat sat."` is `"sat."`), and a text starting with whitespace
/// yields a leading empty token.
pub fn tokenize_words(text: &str) -> Vec<&str> {
    split_dropping_trailing_empty(text, &WORD_DELIMITER)
}

/// Split text into sentence segments.
pub fn split_sentences(text: &str) -> Vec<&str> {
    split_dropping_trailing_empty(text, &SENTENCE_DELIMITER)
}

/// Number of sentence segments in `text`.
pub fn count_sentences(text: &str) -> usize {
    split_sentences(text).len()
}

/// Number of characters once all whitespace is removed.
pub fn count_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Estimate the syllables in a single word.
///
/// Counts vowel groups, drops one for a trailing lowercase `e`, and never
/// returns less than 1. An empty token counts as one syllable.
pub fn count_syllables(word: &str) -> usize {
    let mut count: usize = 0;
    let mut previous_is_vowel = false;
    for c in word.chars() {
        let vowel = is_vowel(c);
        if vowel && !previous_is_vowel {
            count += 1;
        }
        previous_is_vowel = vowel;
    }

    if word.ends_with('e') {
        count = count.saturating_sub(1);
    }

    count.max(1)
}

/// Total syllables over every word token of `text`.
pub fn count_text_syllables(text: &str) -> usize {
    tokenize_words(text).iter().map(|w| count_syllables(w)).sum()
}

/// Number of word tokens with more than two syllables.
pub fn count_polysyllables(text: &str) -> usize {
    tokenize_words(text)
        .iter()
        .filter(|w| count_syllables(w) > POLYSYLLABLE_THRESHOLD)
        .count()
}
