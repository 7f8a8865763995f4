//! markfix core library.
//!
//! Marker-delimited line transformations over a single text file: duplicate
//! block excision and conflict-marker resolution. The pipeline is always
//! read -> transform -> commit; transformations are pure functions from
//! [`Document`] to [`Document`], and the write is a separate final phase.

pub mod dedupe;
pub mod document;
pub mod errors;
pub mod resolve;

// Re-exports for convenience.
pub use dedupe::{excise_duplicate_block, ExciseOutcome};
pub use document::{Document, WriteMode};
pub use errors::EditError;
pub use resolve::{resolve_conflicts, ConflictMarkers, ResolveReport, ScanState};
