//! Mapping from readability scores to approximate reader ages.

use crate::error::UnmappedScore;

/// Age labels for rounded scores 1 through 14.
const AGE_TABLE: [&str; 14] = [
    "6", "7", "9", "10", "11", "12", "13", "14", "15", "16", "17", "18", "24", "24",
];

/// Look up the age label for `score`.
///
/// The score is rounded half away from zero. Scores that round outside
/// 1-14 are reported rather than clamped.
pub fn score_to_age(score: f64) -> Result<&'static str, UnmappedScore> {
    let rounded = score.round() as i64;
    usize::try_from(rounded)
        .ok()
        .and_then(|r| r.checked_sub(1))
        .and_then(|index| AGE_TABLE.get(index).copied())
        .ok_or(UnmappedScore { score, rounded })
}
