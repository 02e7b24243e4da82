//! # insight-dashboard
//!
//! Turn the unreliable text output of a language model into a structured
//! dashboard report laid out on exactly three pages.
//!
//! ## Why this crate?
//!
//! Asking a model to "return only a JSON object" works most of the time.
//! The rest of the time the object arrives inside a markdown fence, behind a
//! sentence of prose, with curly quotes, with a trailing comma, with bare
//! keys, or not at all. This crate never gives up on such output: every
//! response yields a usable report, and how much had to be repaired is
//! reported alongside it.
//!
//! ## Pipeline Overview
//!
//! ```text
//! provider response (JSON)
//!  │
//!  ├─ 1. Fetch      ResponseSource, bounded by a timeout (the only I/O)
//!  ├─ 2. Extract    concatenate model-authored text fragments
//!  ├─ 3. Normalize  fences, invisible chars, smart quotes, whitespace
//!  ├─ 4. Recover    balanced-brace scan, repair chain, field coercion
//!  ├─ 5. Layout     cover + summary + recommendations pages
//!  └─ 6. Output     Report { record, pages, warnings, stats, filename }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use insight_dashboard::{build_report_from_json, ReportConfig};
//! use serde_json::json;
//!
//! let response = json!({
//!     "output": [{
//!         "type": "message",
//!         "content": [{
//!             "type": "output_text",
//!             "text": "```json\n{\"title\": \"Q3 Sales\", \"kpis\": [{\"label\": \"Revenue\", \"value\": \"$1.2M\"},],}\n```"
//!         }]
//!     }]
//! });
//!
//! let report = build_report_from_json(&response, &ReportConfig::default());
//! assert_eq!(report.record.title(), "Q3 Sales");
//! assert_eq!(report.pages.len(), 3);
//! assert_eq!(report.filename, "Q3-Sales.pdf");
//! ```
//!
//! Rendering pages into bytes is left to the caller: [`Page`] holds plain
//! positioned text runs and rectangles and serialises to JSON.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod source;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{LayoutConfig, ReportConfig, ReportConfigBuilder};
pub use error::{PipelineWarning, ReportError};
pub use generate::{build_report, build_report_from_json, generate, generate_sync, generate_until};
pub use output::{
    suggested_filename, Color, FontWeight, Page, PageKind, Primitive, Recovery, Report, ReportStats,
    PAGE_COUNT,
};
pub use pipeline::extract::{extract_text, ResponseNode};
pub use pipeline::layout::{layout_report, wrap};
pub use pipeline::normalize::normalize;
pub use pipeline::recover::parse_report;
pub use record::{Metric, ReportRecord};
pub use source::{FileSource, ResponseSource, StaticSource};
