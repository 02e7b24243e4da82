//! Error types for the insight-dashboard library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ReportError`]: **Fatal.** The caller did something the library cannot
//!   honour (invalid configuration, a record that breaks its own invariants)
//!   or the boundary fetch of the raw response failed. Returned as
//!   `Err(ReportError)` from constructors and the `generate*` functions.
//!
//! * [`PipelineWarning`]: **Non-fatal.** The upstream text was unreliable and
//!   the pipeline degraded gracefully (fallback record, a wrongly shaped
//!   field, content dropped at a page boundary). Stored inside
//!   [`crate::output::Report`] so callers can inspect how much was recovered.
//!
//! Malformed model output never produces a `ReportError`: the pure stages
//! always terminate with a usable record and three pages.

use thiserror::Error;

/// All fatal errors returned by the insight-dashboard library.
///
/// Degradations caused by malformed model output use [`PipelineWarning`]
/// and are stored in [`crate::output::Report`] rather than propagated here.
#[derive(Debug, Error)]
pub enum ReportError {
    // ── Construction errors ───────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A record was constructed with values that violate its invariants.
    #[error("Invalid report record: {0}")]
    InvalidRecord(String),

    // ── Boundary errors ───────────────────────────────────────────────────
    /// The response source could not deliver a raw response.
    #[error("Response source '{source_name}' failed: {detail}")]
    SourceFailed { source_name: String, detail: String },

    /// The response source did not answer within the configured timeout.
    #[error("Response source '{source_name}' timed out after {secs}s\nIncrease the source timeout.")]
    SourceTimeout { source_name: String, secs: u64 },

    /// The caller cancelled the fetch before the source answered.
    #[error("Fetch from response source '{source_name}' was cancelled")]
    Cancelled { source_name: String },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal degradation recorded while building a report.
///
/// Every variant is resolved inside the pipeline (empty text, fallback
/// record, default field value, truncated page) and is only reported so the
/// caller can decide whether the result is good enough to ship.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum PipelineWarning {
    /// The response tree contained no model-authored text.
    #[error("Response contained no model-authored text")]
    ExtractionEmpty,

    /// No repair strategy produced a parseable block; the fallback record was used.
    #[error("No parseable record after {attempts} attempt(s); using fallback record")]
    RecoveryExhausted { attempts: usize },

    /// A field had the wrong shape and was replaced by its default.
    #[error("Field '{field}' ignored: expected {expected}")]
    FieldShapeMismatch { field: String, expected: String },

    /// Elements did not fit on a page and were dropped.
    #[error("Page {page}: {dropped} element(s) did not fit and were dropped")]
    LayoutOverflow { page: usize, dropped: usize },
}
