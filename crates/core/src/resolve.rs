//! Conflict-marker resolution.
//!
//! Walks a document with an explicit three-state scanner and keeps only the
//! "incoming" side of each conflict region: the begin / separator / end
//! marker lines and the head (current) section are dropped, everything else
//! passes through untouched.
//!
//! Marker recognition is a prefix match on the whitespace-trimmed line;
//! the original untrimmed line is what gets emitted when a line is kept.
//! Region membership is driven solely by marker lines, never by content.

use serde::Serialize;
use tracing::{debug, info};

use crate::document::Document;

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// The three prefix tokens that delimit a conflict region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictMarkers {
    /// Opens a region; the head (current) section follows.
    pub begin: String,
    /// Switches from the head section to the incoming section.
    pub separator: String,
    /// Closes the region.
    pub end: String,
}

impl Default for ConflictMarkers {
    /// Standard Git-style markers.
    fn default() -> Self {
        Self {
            begin: "<<<<<<<".to_string(),
            separator: "=======".to_string(),
            end: ">>>>>>>".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scanner state machine
// ---------------------------------------------------------------------------

/// Scanner position while walking the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Not inside any conflict region.
    Outside,
    /// Inside a region, before the separator (head / current section).
    InHead,
    /// Inside a region, after the separator (incoming section).
    InIncoming,
}

/// One transition of the scanner: next state, plus whether to emit the line.
///
/// A begin-marker is recognized in every state: encountering one while
/// already inside a region unconditionally re-enters `InHead`, which can
/// silently discard an unterminated head section. That is the defined
/// best-effort behavior for malformed input, not an error. Separator and
/// end markers are only special inside a region; outside one they are
/// ordinary content and get emitted.
pub fn step(state: ScanState, line: &str, markers: &ConflictMarkers) -> (ScanState, bool) {
    let trimmed = line.trim();

    if trimmed.starts_with(&markers.begin) {
        return (ScanState::InHead, false);
    }

    match state {
        ScanState::Outside => (ScanState::Outside, true),
        ScanState::InHead => {
            if trimmed.starts_with(&markers.separator) {
                (ScanState::InIncoming, false)
            } else if trimmed.starts_with(&markers.end) {
                (ScanState::Outside, false)
            } else {
                (ScanState::InHead, false)
            }
        }
        ScanState::InIncoming => {
            if trimmed.starts_with(&markers.end) {
                (ScanState::Outside, false)
            } else if trimmed.starts_with(&markers.separator) {
                // Redundant separator inside the incoming section: dropped,
                // state unchanged.
                (ScanState::InIncoming, false)
            } else {
                (ScanState::InIncoming, true)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Summary of one resolution pass.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResolveReport {
    /// Number of conflict regions closed by an end-marker.
    pub regions_resolved: usize,
    /// Total lines dropped (markers plus head-section content).
    pub lines_discarded: usize,
}

impl ResolveReport {
    /// `true` if the document was modified.
    pub fn changed(&self) -> bool {
        self.lines_discarded > 0
    }
}

/// Resolve all conflict regions in `doc`, keeping the incoming side.
pub fn resolve_conflicts(doc: &Document, markers: &ConflictMarkers) -> (Document, ResolveReport) {
    let mut kept: Vec<String> = Vec::with_capacity(doc.line_count());
    let mut state = ScanState::Outside;
    let mut regions_resolved = 0usize;

    for line in doc.lines() {
        let (next, emit) = step(state, line, markers);
        if state != ScanState::Outside && next == ScanState::Outside {
            regions_resolved += 1;
        }
        if emit {
            kept.push(line.clone());
        } else {
            debug!(line = line.trim(), ?state, "line discarded");
        }
        state = next;
    }

    let report = ResolveReport {
        regions_resolved,
        lines_discarded: doc.line_count() - kept.len(),
    };
    info!(
        regions = report.regions_resolved,
        discarded = report.lines_discarded,
        "conflict resolution pass complete"
    );

    (Document::from_lines(kept), report)
}
