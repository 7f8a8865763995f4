//! Duplicate-block excision.
//!
//! A block that was accidentally pasted twice is delimited by two occurrences
//! of the same sentinel comment. Excision deletes the half-open line range
//! `[first, second)` -- the first marker line and everything after it, up to
//! but not including the second marker line -- so exactly one copy of the
//! block (starting at the second marker) survives.

use serde::Serialize;
use tracing::{debug, info};

use crate::document::Document;

/// Outcome of a duplicate-block excision attempt.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ExciseOutcome {
    /// The range between the first two marker occurrences was removed.
    Removed {
        /// 1-based line number of the first marker line (first line deleted).
        start_line: usize,
        /// 1-based line number of the last line deleted.
        end_line: usize,
        /// Number of lines deleted (`end - start` in index terms).
        lines_removed: usize,
    },
    /// Fewer than two marker occurrences; the document is unchanged.
    NotEnoughMarkers {
        /// How many marker lines were found (0 or 1).
        found: usize,
    },
}

impl ExciseOutcome {
    /// `true` if the document was modified.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }
}

/// Remove the duplicate block delimited by the first two lines containing
/// `marker` as a substring.
///
/// Matching is substring containment on the raw line text, not full-line
/// equality. Occurrences past the second are irrelevant: the kept tail starts
/// at the second marker line, so they survive untouched. With fewer than two
/// occurrences the input document is returned unchanged.
pub fn excise_duplicate_block(doc: &Document, marker: &str) -> (Document, ExciseOutcome) {
    let indices: Vec<usize> = doc
        .lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| line.contains(marker))
        .map(|(i, _)| i)
        .collect();
    debug!(occurrences = indices.len(), "scanned for duplicate marker");

    if indices.len() < 2 {
        info!(found = indices.len(), "fewer than two marker occurrences, no change");
        return (
            doc.clone(),
            ExciseOutcome::NotEnoughMarkers {
                found: indices.len(),
            },
        );
    }

    let start = indices[0];
    let end = indices[1];

    // Everything before the first marker, then everything from the second
    // marker onward.
    let mut kept: Vec<String> = Vec::with_capacity(doc.line_count() - (end - start));
    kept.extend_from_slice(&doc.lines()[..start]);
    kept.extend_from_slice(&doc.lines()[end..]);

    info!(
        start_line = start + 1,
        end_line = end,
        lines_removed = end - start,
        "duplicate block excised"
    );

    (
        Document::from_lines(kept),
        ExciseOutcome::Removed {
            start_line: start + 1,
            end_line: end,
            lines_removed: end - start,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines(lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn test_excises_between_first_two_markers() {
        // Scenario: the marker line itself and the block after it go, the
        // second marker line stays.
        let input = doc(&["a\n", "MARK\n", "b\n", "MARK\n", "c\n"]);
        let (result, outcome) = excise_duplicate_block(&input, "MARK");

        assert_eq!(result.lines(), &["a\n", "MARK\n", "c\n"]);
        assert_eq!(
            outcome,
            ExciseOutcome::Removed {
                start_line: 2,
                end_line: 3,
                lines_removed: 2,
            }
        );
    }

    #[test]
    fn test_zero_occurrences_is_noop() {
        let input = doc(&["x\n"]);
        let (result, outcome) = excise_duplicate_block(&input, "MARK");

        assert_eq!(result, input);
        assert_eq!(outcome, ExciseOutcome::NotEnoughMarkers { found: 0 });
    }

    #[test]
    fn test_one_occurrence_is_noop() {
        let input = doc(&["x\n", "has MARK here\n", "y\n"]);
        let (result, outcome) = excise_duplicate_block(&input, "MARK");

        assert_eq!(result, input);
        assert_eq!(outcome, ExciseOutcome::NotEnoughMarkers { found: 1 });
    }

    #[test]
    fn test_substring_match_not_full_line() {
        let input = doc(&["// --- MARK ---\n", "dup\n", "prefix MARK suffix\n", "tail\n"]);
        let (result, _) = excise_duplicate_block(&input, "MARK");
        assert_eq!(result.lines(), &["prefix MARK suffix\n", "tail\n"]);
    }

    #[test]
    fn test_third_occurrence_ignored_and_preserved() {
        let input = doc(&["MARK\n", "a\n", "MARK\n", "b\n", "MARK\n"]);
        let (result, _) = excise_duplicate_block(&input, "MARK");
        assert_eq!(result.lines(), &["MARK\n", "b\n", "MARK\n"]);
    }

    #[test]
    fn test_adjacent_markers_remove_one_line() {
        let input = doc(&["MARK\n", "MARK\n", "x\n"]);
        let (result, outcome) = excise_duplicate_block(&input, "MARK");
        assert_eq!(result.lines(), &["MARK\n", "x\n"]);
        assert_eq!(
            outcome,
            ExciseOutcome::Removed {
                start_line: 1,
                end_line: 1,
                lines_removed: 1,
            }
        );
    }

    #[test]
    fn test_line_count_decreases_by_range_width() {
        let input = doc(&["a\n", "MARK\n", "b\n", "c\n", "d\n", "MARK\n", "e\n"]);
        let (result, outcome) = excise_duplicate_block(&input, "MARK");
        match outcome {
            ExciseOutcome::Removed { lines_removed, .. } => {
                assert_eq!(input.line_count() - result.line_count(), lines_removed);
                assert_eq!(lines_removed, 4);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let outcome = ExciseOutcome::NotEnoughMarkers { found: 1 };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "not_enough_markers");
        assert_eq!(json["found"], 1);
    }

    #[test]
    fn test_idempotent_after_success() {
        let input = doc(&["a\n", "MARK\n", "b\n", "MARK\n", "c\n"]);
        let (once, _) = excise_duplicate_block(&input, "MARK");
        let (twice, outcome) = excise_duplicate_block(&once, "MARK");

        assert_eq!(once, twice);
        assert_eq!(outcome, ExciseOutcome::NotEnoughMarkers { found: 1 });
    }
}
