//! Report generation entry points.
//!
//! [`build_report`] runs the pure pipeline on a response that is already in
//! hand. [`generate`] adds the one I/O step, fetching the response from a
//! [`ResponseSource`] under the configured timeout, and [`generate_until`]
//! lets the caller cancel that fetch.
//!
//! Only the fetch can fail. Once a response exists the run always ends with
//! a [`Report`]; degradations are listed in [`Report::warnings`].

use crate::config::ReportConfig;
use crate::error::{PipelineWarning, ReportError};
use crate::output::{suggested_filename, Report, ReportStats};
use crate::pipeline::extract::{extract_text, ResponseNode};
use crate::pipeline::layout::layout_report_with_diagnostics;
use crate::pipeline::recover::parse_report_with_diagnostics;
use crate::source::ResponseSource;
use serde_json::Value;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Run extraction, recovery and layout on a typed response tree.
///
/// Pure and total: never fails, never panics, performs no I/O.
pub fn build_report(response: &ResponseNode, config: &ReportConfig) -> Report {
    let mut warnings = Vec::new();

    // ── Step 1: Extract model text ───────────────────────────────────────
    let text = extract_text(response);
    let extracted_chars = text.chars().count();
    if text.trim().is_empty() {
        warn!("{}", PipelineWarning::ExtractionEmpty);
        warnings.push(PipelineWarning::ExtractionEmpty);
    } else {
        debug!("Extracted {} characters of model text", extracted_chars);
    }

    // ── Step 2: Recover the record ───────────────────────────────────────
    let parsed = parse_report_with_diagnostics(&text);
    warnings.extend(parsed.warnings);

    // ── Step 3: Lay out the pages ────────────────────────────────────────
    let laid_out = layout_report_with_diagnostics(&parsed.record, &config.layout);
    for warning in &laid_out.warnings {
        warn!("{}", warning);
    }
    warnings.extend(laid_out.warnings);

    let filename = suggested_filename(parsed.record.title(), &config.filename_extension);

    Report {
        stats: ReportStats {
            extracted_chars,
            recovery: parsed.recovery,
            metrics_on_cover: laid_out.metrics_on_cover,
            dropped_elements: laid_out.dropped,
        },
        record: parsed.record,
        pages: laid_out.pages,
        warnings,
        filename,
    }
}

/// [`build_report`] on a raw JSON response.
pub fn build_report_from_json(response: &Value, config: &ReportConfig) -> Report {
    build_report(&ResponseNode::from_json(response), config)
}

/// Fetch a response from `source` and build the report.
///
/// # Errors
/// - [`ReportError::SourceTimeout`] when the source does not answer within
///   [`ReportConfig::source_timeout_secs`]
/// - any error the source itself returns, typically
///   [`ReportError::SourceFailed`]
pub async fn generate(source: &dyn ResponseSource, config: &ReportConfig) -> Result<Report, ReportError> {
    let start = Instant::now();
    info!("Generating report from source '{}'", source.name());

    let secs = config.source_timeout_secs;
    let response = tokio::time::timeout(Duration::from_secs(secs), source.fetch())
        .await
        .map_err(|_| {
            warn!("Source '{}' timed out after {}s", source.name(), secs);
            ReportError::SourceTimeout {
                source_name: source.name().to_string(),
                secs,
            }
        })??;

    let report = build_report_from_json(&response, config);

    info!(
        "Report '{}' ready in {}ms ({} chars extracted, recovery: {:?}, {} warning(s))",
        report.filename,
        start.elapsed().as_millis(),
        report.stats.extracted_chars,
        report.stats.recovery,
        report.warnings.len()
    );
    Ok(report)
}

/// [`generate`], abandoned as soon as `cancel` completes.
///
/// ```rust,no_run
/// use insight_dashboard::{generate_until, FileSource, ReportConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = FileSource::new("response.json");
/// let config = ReportConfig::default();
/// let report = generate_until(&source, &config, tokio::signal::ctrl_c()).await?;
/// println!("{}", report.filename);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
/// [`ReportError::Cancelled`] when `cancel` wins, otherwise as [`generate`].
pub async fn generate_until<F>(
    source: &dyn ResponseSource,
    config: &ReportConfig,
    cancel: F,
) -> Result<Report, ReportError>
where
    F: Future,
{
    tokio::select! {
        result = generate(source, config) => result,
        _ = cancel => {
            warn!("Fetch from source '{}' cancelled", source.name());
            Err(ReportError::Cancelled {
                source_name: source.name().to_string(),
            })
        }
    }
}

/// Synchronous wrapper around [`generate`].
///
/// Creates a temporary tokio runtime internally.
///
/// # Panics
/// When called from within a tokio runtime, since the temporary runtime
/// cannot block on a thread that is already driving async tasks. Use
/// [`generate`] from async code.
pub fn generate_sync(source: &dyn ResponseSource, config: &ReportConfig) -> Result<Report, ReportError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ReportError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(generate(source, config))
}
