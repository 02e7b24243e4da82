//! The validated report record: the parser's output and the layout engine's input.
//!
//! A [`ReportRecord`] is always fully populated. Collections may be empty and
//! the summary may be blank, but the title is never blank and no collection
//! exceeds its cap. The fields are private so that invariant cannot be broken
//! after construction; callers build records through [`ReportRecord::new`]
//! (which fails fast) and the recovery parser builds them through a
//! truncating constructor that can never fail.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum number of key metrics kept in a record.
pub const MAX_METRICS: usize = 6;

/// Maximum number of insight bullets kept in a record.
pub const MAX_INSIGHTS: usize = 8;

/// Maximum number of recommendation bullets kept in a record.
pub const MAX_RECOMMENDATIONS: usize = 8;

/// Title used when the model omitted one, and by the fallback record.
pub const PLACEHOLDER_TITLE: &str = "Insight Dashboard";

/// Summary carried by the fallback record.
pub const RETRY_SUMMARY: &str =
    "The generated response could not be read as a report. Please retry the generation.";

/// A labelled key metric, e.g. `("Revenue", "$1.2M")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A complete dashboard report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRecord {
    title: String,
    summary: String,
    metrics: Vec<Metric>,
    insights: Vec<String>,
    recommendations: Vec<String>,
}

impl ReportRecord {
    /// Build a record, rejecting values that break the record's invariants.
    ///
    /// # Errors
    /// [`ReportError::InvalidRecord`] when the title is blank or a collection
    /// exceeds its cap ([`MAX_METRICS`], [`MAX_INSIGHTS`],
    /// [`MAX_RECOMMENDATIONS`]).
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        metrics: Vec<Metric>,
        insights: Vec<String>,
        recommendations: Vec<String>,
    ) -> Result<Self, ReportError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ReportError::InvalidRecord("title must not be blank".into()));
        }
        check_cap("metrics", metrics.len(), MAX_METRICS)?;
        check_cap("insights", insights.len(), MAX_INSIGHTS)?;
        check_cap("recommendations", recommendations.len(), MAX_RECOMMENDATIONS)?;

        Ok(Self {
            title,
            summary: summary.into(),
            metrics,
            insights,
            recommendations,
        })
    }

    /// Build a record from untrusted parts: blank titles fall back to
    /// [`PLACEHOLDER_TITLE`] and collections are truncated to their caps,
    /// keeping the leading entries in order.
    pub(crate) fn from_recovered(
        title: Option<String>,
        summary: Option<String>,
        mut metrics: Vec<Metric>,
        mut insights: Vec<String>,
        mut recommendations: Vec<String>,
    ) -> Self {
        truncate_to_cap("metrics", &mut metrics, MAX_METRICS);
        truncate_to_cap("insights", &mut insights, MAX_INSIGHTS);
        truncate_to_cap("recommendations", &mut recommendations, MAX_RECOMMENDATIONS);

        Self {
            title: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
            summary: summary.unwrap_or_default(),
            metrics,
            insights,
            recommendations,
        }
    }

    /// The safe default returned when nothing could be recovered.
    pub fn fallback() -> Self {
        Self {
            title: PLACEHOLDER_TITLE.to_string(),
            summary: RETRY_SUMMARY.to_string(),
            metrics: Vec::new(),
            insights: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Whether this record is the fallback record.
    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn insights(&self) -> &[String] {
        &self.insights
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

fn check_cap(field: &str, len: usize, cap: usize) -> Result<(), ReportError> {
    if len > cap {
        return Err(ReportError::InvalidRecord(format!(
            "{field} holds {len} entries, at most {cap} allowed"
        )));
    }
    Ok(())
}

fn truncate_to_cap<T>(field: &str, items: &mut Vec<T>, cap: usize) {
    if items.len() > cap {
        debug!("Truncating {} from {} to {} entries", field, items.len(), cap);
        items.truncate(cap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_valid_record() {
        let record = ReportRecord::new(
            "Q3 Sales",
            "Strong quarter",
            vec![Metric::new("Revenue", "$1.2M")],
            vec!["Growth in EMEA".into()],
            vec![],
        )
        .unwrap();
        assert_eq!(record.title(), "Q3 Sales");
        assert_eq!(record.metrics()[0].value, "$1.2M");
        assert!(record.recommendations().is_empty());
    }

    #[test]
    fn new_rejects_blank_title() {
        let err = ReportRecord::new("   ", "", vec![], vec![], vec![]).unwrap_err();
        assert!(matches!(err, ReportError::InvalidRecord(_)));
    }

    #[test]
    fn new_rejects_over_cap_metrics() {
        let metrics = (0..7).map(|i| Metric::new(format!("m{i}"), "1")).collect();
        let err = ReportRecord::new("T", "", metrics, vec![], vec![]).unwrap_err();
        assert!(err.to_string().contains("metrics"), "got: {err}");
    }

    #[test]
    fn from_recovered_truncates_in_order() {
        let insights: Vec<String> = (0..12).map(|i| format!("i{i}")).collect();
        let record = ReportRecord::from_recovered(None, None, vec![], insights, vec![]);
        assert_eq!(record.insights().len(), MAX_INSIGHTS);
        assert_eq!(record.insights()[0], "i0");
        assert_eq!(record.insights()[7], "i7");
    }

    #[test]
    fn from_recovered_substitutes_blank_title() {
        let record =
            ReportRecord::from_recovered(Some("  ".into()), None, vec![], vec![], vec![]);
        assert_eq!(record.title(), PLACEHOLDER_TITLE);
        assert_eq!(record.summary(), "");
        assert!(!record.is_fallback());
    }

    #[test]
    fn fallback_shape() {
        let record = ReportRecord::fallback();
        assert_eq!(record.title(), PLACEHOLDER_TITLE);
        assert_eq!(record.summary(), RETRY_SUMMARY);
        assert!(record.metrics().is_empty());
        assert!(record.insights().is_empty());
        assert!(record.recommendations().is_empty());
        assert!(record.is_fallback());
    }
}
