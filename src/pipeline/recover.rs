//! Tolerant recovery of a [`ReportRecord`] from untrusted model text.
//!
//! The recovery parser is a defence-in-depth decoder, not a validator. It
//! never fails: whatever the input, the caller receives a fully populated
//! record, either recovered from the text or the fallback record.
//!
//! ## Stages
//!
//! ```text
//! text ─▶ normalize ─▶ balanced scan ─▶ strict ─▶ trailing commas ─▶ bare keys ─▶ coerce
//!         (fences,     (first top-      parse     repair + parse     repair +      fields
//!          quotes, ws)  level {…})                                    parse
//! ```
//!
//! Repairs are cumulative and ordered by invasiveness; the chain stops at the
//! first strategy whose output parses as a JSON object. When none does, the
//! fallback record is returned and a [`PipelineWarning::RecoveryExhausted`]
//! is recorded.

use crate::error::PipelineWarning;
use crate::output::Recovery;
use crate::pipeline::normalize::normalize;
use crate::record::{Metric, ReportRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// A record recovered from text, with how it was recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub record: ReportRecord,
    pub recovery: Recovery,
    pub warnings: Vec<PipelineWarning>,
}

/// Recover a record from model text. Total: never panics, never errors.
pub fn parse_report(text: &str) -> ReportRecord {
    parse_report_with_diagnostics(text).record
}

/// Recover a record from model text, reporting the strategy used and any
/// soft warnings raised along the way.
pub fn parse_report_with_diagnostics(text: &str) -> ParseOutcome {
    let normalized = normalize(text);

    let block = find_balanced_block(&normalized);
    let parsed = block.and_then(|block| {
        debug!("Candidate block: {} of {} bytes", block.len(), normalized.len());
        parse_with_repairs(block)
    });

    match parsed {
        Some((object, recovery)) => {
            debug!("Recovered record via {:?}", recovery);
            let mut warnings = Vec::new();
            let record = coerce_record(&object, &mut warnings);
            ParseOutcome {
                record,
                recovery,
                warnings,
            }
        }
        None => {
            let warning = PipelineWarning::RecoveryExhausted {
                attempts: if block.is_some() { STRATEGIES.len() } else { 0 },
            };
            warn!("{}", warning);
            ParseOutcome {
                record: ReportRecord::fallback(),
                recovery: Recovery::Fallback,
                warnings: vec![warning],
            }
        }
    }
}

// ── Balanced-block scan ─────────────────────────────────────────────────────

/// The first top-level `{…}` span, ignoring braces inside double-quoted
/// strings.
///
/// The span starts at the first `{` in the text. Anything after it closes (a
/// second object, closing remarks) is ignored. If it never closes, as with a
/// response cut off mid-object, there is no candidate: an object nested inside
/// the unclosed one is never promoted to the top level. One linear pass.
pub(crate) fn find_balanced_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    balanced_end(&text[start..]).map(|end| &text[start..start + end])
}

/// Byte length of the balanced object starting at the first byte of `s`.
fn balanced_end(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

// ── Strict parse + repair chain ─────────────────────────────────────────────

/// One step of the escalation chain: a pure text repair.
struct Strategy {
    recovery: Recovery,
    repair: fn(&str) -> String,
}

/// Ordered by invasiveness. The first entry is the identity (strict parse).
const STRATEGIES: [Strategy; 3] = [
    Strategy {
        recovery: Recovery::Strict,
        repair: identity,
    },
    Strategy {
        recovery: Recovery::TrailingCommas,
        repair: remove_trailing_commas,
    },
    Strategy {
        recovery: Recovery::BareKeys,
        repair: quote_bare_keys,
    },
];

fn identity(text: &str) -> String {
    text.to_string()
}

/// Apply the strategies cumulatively, returning the first object that parses.
fn parse_with_repairs(block: &str) -> Option<(Map<String, Value>, Recovery)> {
    let mut text = block.to_string();
    STRATEGIES.iter().find_map(|strategy| {
        text = (strategy.repair)(&text);
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Some((map, strategy.recovery)),
            Ok(_) => None,
            Err(e) => {
                debug!("{:?} parse failed: {}", strategy.recovery, e);
                None
            }
        }
    })
}

/// Apply `f` to every stretch of `text` that lies outside a double-quoted
/// string, copying string literals (quotes included) through untouched.
fn map_outside_strings(text: &str, f: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut segment_start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
                out.push_str(&text[segment_start..=i]);
                segment_start = i + 1;
            }
        } else if c == '"' {
            out.push_str(&f(&text[segment_start..i]));
            in_string = true;
            segment_start = i;
        }
    }

    let tail = &text[segment_start..];
    if in_string {
        out.push_str(tail);
    } else {
        out.push_str(&f(tail));
    }
    out
}

// ── Repair (a): trailing commas ──────────────────────────────────────────────

static RE_TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*([}\]])").unwrap());

fn remove_trailing_commas(text: &str) -> String {
    map_outside_strings(text, |segment| {
        RE_TRAILING_COMMA.replace_all(segment, "$1").into_owned()
    })
}

// ── Repair (b): bare keys ────────────────────────────────────────────────────

static RE_BARE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([{,]\s*)([A-Za-z_$][A-Za-z0-9_$\-]*)(\s*:)").unwrap());

fn quote_bare_keys(text: &str) -> String {
    map_outside_strings(text, |segment| {
        RE_BARE_KEY
            .replace_all(segment, "${1}\"${2}\"${3}")
            .into_owned()
    })
}

// ── Field coercion ───────────────────────────────────────────────────────────

/// Map a parsed object onto a record. Wrongly shaped fields are treated as
/// absent and reported; missing fields silently take their defaults.
fn coerce_record(object: &Map<String, Value>, warnings: &mut Vec<PipelineWarning>) -> ReportRecord {
    let title = string_field(object, &["title"], warnings);
    let summary = string_field(object, &["executive_summary", "summary"], warnings);
    let metrics = metric_list(object, &["kpis", "metrics"], warnings);
    let insights = string_list(object, &["insights"], warnings);
    let recommendations = string_list(object, &["recommendations"], warnings);

    ReportRecord::from_recovered(title, summary, metrics, insights, recommendations)
}

/// First present key among `keys` (aliases in priority order).
fn lookup<'a>(object: &'a Map<String, Value>, keys: &[&'static str]) -> Option<(&'static str, &'a Value)> {
    keys.iter()
        .find_map(|key| object.get(*key).map(|value| (*key, value)))
}

fn mismatch(field: impl Into<String>, expected: &str, warnings: &mut Vec<PipelineWarning>) {
    let warning = PipelineWarning::FieldShapeMismatch {
        field: field.into(),
        expected: expected.to_string(),
    };
    warn!("{}", warning);
    warnings.push(warning);
}

fn string_field(
    object: &Map<String, Value>,
    keys: &[&'static str],
    warnings: &mut Vec<PipelineWarning>,
) -> Option<String> {
    match lookup(object, keys)? {
        (_, Value::String(s)) => Some(s.trim().to_string()),
        (_, Value::Null) => None,
        (key, _) => {
            mismatch(key, "a string", warnings);
            None
        }
    }
}

fn string_list(
    object: &Map<String, Value>,
    keys: &[&'static str],
    warnings: &mut Vec<PipelineWarning>,
) -> Vec<String> {
    let (key, items) = match lookup(object, keys) {
        None | Some((_, Value::Null)) => return Vec::new(),
        Some((key, Value::Array(items))) => (key, items),
        Some((key, _)) => {
            mismatch(key, "an array of strings", warnings);
            return Vec::new();
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item {
            Value::String(s) if !s.trim().is_empty() => out.push(s.trim().to_string()),
            Value::String(_) => {}
            _ => mismatch(format!("{key}[{i}]"), "a string", warnings),
        }
    }
    out
}

fn metric_list(
    object: &Map<String, Value>,
    keys: &[&'static str],
    warnings: &mut Vec<PipelineWarning>,
) -> Vec<Metric> {
    let (key, items) = match lookup(object, keys) {
        None | Some((_, Value::Null)) => return Vec::new(),
        Some((key, Value::Array(items))) => (key, items),
        Some((key, _)) => {
            mismatch(key, "an array of {label, value} objects", warnings);
            return Vec::new();
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match metric(item) {
            Some(m) => out.push(m),
            None => mismatch(format!("{key}[{i}]"), "a {label, value} object", warnings),
        }
    }
    out
}

/// A metric needs a non-blank string label; numeric and boolean values are
/// rendered as text, a missing value becomes an empty string.
fn metric(item: &Value) -> Option<Metric> {
    let entry = item.as_object()?;
    let label = ["label", "name"]
        .iter()
        .find_map(|k| entry.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .filter(|l| !l.is_empty())?;

    let value = match entry.get("value") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(_) | Value::Object(_)) => return None,
    };

    Some(Metric::new(label, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{PLACEHOLDER_TITLE, RETRY_SUMMARY};

    #[test]
    fn balanced_scan_skips_prose_and_second_object() {
        let text = r#"Sure! {"a": {"b": 1}} and also {"c": 2}"#;
        assert_eq!(find_balanced_block(text), Some(r#"{"a": {"b": 1}}"#));
    }

    #[test]
    fn balanced_scan_ignores_braces_in_strings() {
        let text = r#"{"a": "}{ \" }", "b": 1} tail"#;
        assert_eq!(find_balanced_block(text), Some(r#"{"a": "}{ \" }", "b": 1}"#));
    }

    #[test]
    fn balanced_scan_never_promotes_a_nested_object() {
        let text = r#"{"title": "Q3", "kpis": [{"label": "A", "value": "1"}], "insights": ["i"]"#;
        assert_eq!(find_balanced_block(text), None);
    }

    #[test]
    fn balanced_scan_is_linear_on_brace_runs() {
        let text = "{".repeat(200_000);
        let start = std::time::Instant::now();
        assert_eq!(find_balanced_block(&text), None);
        assert!(start.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn balanced_scan_handles_multibyte_text() {
        let text = "Résumé → {\"título\": \"ñ\"} fin";
        assert_eq!(find_balanced_block(text), Some("{\"título\": \"ñ\"}"));
    }

    #[test]
    fn balanced_scan_without_braces() {
        assert_eq!(find_balanced_block("no structure here"), None);
        assert_eq!(find_balanced_block("{ never closed"), None);
    }

    #[test]
    fn trailing_commas_removed_outside_strings_only() {
        let text = r#"{"a": [1, 2, ], "b": "x, }", }"#;
        assert_eq!(remove_trailing_commas(text), r#"{"a": [1, 2], "b": "x, }"}"#);
    }

    #[test]
    fn bare_keys_quoted_outside_strings_only() {
        let text = r#"{title: "a, b: c", kpis: [], $ref: 1}"#;
        assert_eq!(
            quote_bare_keys(text),
            r#"{"title": "a, b: c", "kpis": [], "$ref": 1}"#
        );
    }

    #[test]
    fn quoted_keys_untouched_by_bare_key_repair() {
        let text = r#"{"title": "T", "n": 1}"#;
        assert_eq!(quote_bare_keys(text), text);
    }

    #[test]
    fn strategies_escalate_cumulatively() {
        let (_, recovery) = parse_with_repairs(r#"{"a": 1}"#).unwrap();
        assert_eq!(recovery, Recovery::Strict);

        let (_, recovery) = parse_with_repairs(r#"{"a": [1,],}"#).unwrap();
        assert_eq!(recovery, Recovery::TrailingCommas);

        let (map, recovery) = parse_with_repairs(r#"{a: [1,], b: "x",}"#).unwrap();
        assert_eq!(recovery, Recovery::BareKeys);
        assert_eq!(map["b"], "x");
    }

    #[test]
    fn unrepairable_block_yields_none() {
        assert!(parse_with_repairs(r#"{"a": 'single'}"#).is_none());
    }

    #[test]
    fn coercion_treats_wrong_shapes_as_absent() {
        let outcome = parse_report_with_diagnostics(
            r#"{"title": 7, "executive_summary": "S", "kpis": "none", "insights": ["ok", 3, ""], "recommendations": {"a": 1}}"#,
        );
        let record = &outcome.record;
        assert_eq!(record.title(), PLACEHOLDER_TITLE);
        assert_eq!(record.summary(), "S");
        assert!(record.metrics().is_empty());
        assert_eq!(record.insights(), ["ok".to_string()]);
        assert!(record.recommendations().is_empty());

        let fields: Vec<String> = outcome
            .warnings
            .iter()
            .filter_map(|w| match w {
                PipelineWarning::FieldShapeMismatch { field, .. } => Some(field.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(fields, ["title", "kpis", "insights[1]", "recommendations"]);
    }

    #[test]
    fn metric_coercion() {
        let record = parse_report(
            r#"{"title": "T", "kpis": [
                {"label": "Revenue", "value": 1200.5},
                {"name": "Churn", "value": "2%"},
                {"label": "Flag", "value": true},
                {"label": "Empty"},
                {"value": "no label"},
                {"label": "Nested", "value": {"x": 1}},
                "loose"
            ]}"#,
        );
        let metrics = record.metrics();
        assert_eq!(metrics.len(), 4);
        assert_eq!(metrics[0], Metric::new("Revenue", "1200.5"));
        assert_eq!(metrics[1], Metric::new("Churn", "2%"));
        assert_eq!(metrics[2], Metric::new("Flag", "true"));
        assert_eq!(metrics[3], Metric::new("Empty", ""));
    }

    #[test]
    fn aliases_used_when_primary_keys_absent() {
        let record = parse_report(
            r#"{"title": "T", "summary": "alias", "metrics": [{"label": "A", "value": "1"}]}"#,
        );
        assert_eq!(record.summary(), "alias");
        assert_eq!(record.metrics().len(), 1);
    }

    #[test]
    fn primary_key_wins_over_alias() {
        let record = parse_report(r#"{"executive_summary": "primary", "summary": "alias"}"#);
        assert_eq!(record.summary(), "primary");
    }

    #[test]
    fn null_fields_are_absent_without_warning() {
        let outcome = parse_report_with_diagnostics(r#"{"title": null, "insights": null}"#);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.record.title(), PLACEHOLDER_TITLE);
    }

    #[test]
    fn fallback_on_prose() {
        let outcome = parse_report_with_diagnostics("I'm sorry, I can't build that dashboard.");
        assert_eq!(outcome.recovery, Recovery::Fallback);
        assert_eq!(outcome.record.summary(), RETRY_SUMMARY);
        assert_eq!(
            outcome.warnings,
            [PipelineWarning::RecoveryExhausted { attempts: 0 }]
        );
    }

    #[test]
    fn truncated_response_falls_back() {
        let text = r#"```json
{"title": "Q3", "executive_summary": "Strong", "kpis": [{"label": "A", "value": "1"}], "insights": ["i"]"#;
        let outcome = parse_report_with_diagnostics(text);
        assert_eq!(outcome.recovery, Recovery::Fallback);
        assert!(outcome.record.is_fallback());
        assert_eq!(outcome.record.summary(), RETRY_SUMMARY);
        assert_eq!(
            outcome.warnings,
            [PipelineWarning::RecoveryExhausted { attempts: 0 }]
        );
    }

    #[test]
    fn fallback_after_all_strategies_fail() {
        let outcome = parse_report_with_diagnostics("{title: 'T'}");
        assert_eq!(outcome.recovery, Recovery::Fallback);
        assert_eq!(
            outcome.warnings,
            [PipelineWarning::RecoveryExhausted { attempts: 3 }]
        );
    }

    #[test]
    fn raw_newlines_inside_strings_are_flattened() {
        let record = parse_report("{\"title\": \"Q3\nReport\", \"executive_summary\": \"a\r\n\r\nb\"}");
        assert_eq!(record.title(), "Q3 Report");
        assert_eq!(record.summary(), "a b");
    }
}
