//! Fatal error kinds for a report run.

use thiserror::Error;

/// Failures that terminate the run with a non-zero exit status.
///
/// An empty cohort is deliberately not an error: per-metric cells over an
/// empty cohort come out as `NaN` and the run continues.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The snapshot bytes could not be decoded into records.
    #[error("snapshot decode failed: {0}")]
    Load(#[from] serde_json::Error),

    /// The snapshot does not contain exactly one www home-page record.
    /// Any other cardinality means the export is broken and the report
    /// would silently compare against the wrong baseline.
    #[error("expected exactly one www home page record, found {0}")]
    WwwHomeCardinality(usize),
}
