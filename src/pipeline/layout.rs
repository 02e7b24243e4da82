//! Bounded pagination: lay a [`ReportRecord`] out onto exactly three pages.
//!
//! ## Why exactly three pages?
//!
//! The artifact is a dashboard, not a document: readers expect the cover with
//! the key numbers, one page of narrative and one page of actions. Content
//! that does not fit is dropped at the page where it overflows instead of
//! spilling onto a fourth page.
//!
//! ## Flow model
//!
//! Each page is a list of [`Element`]s placed top to bottom by a tiny state
//! machine. [`place`] is pure: given the current [`FlowState`] and an
//! element it returns the next state and, when the element fits above the
//! bottom margin, the primitives to draw. Once one element has not fit, the
//! page is full and every later element on that page is dropped, so the
//! reading order never has holes filled by smaller trailing items.
//!
//! Text width is estimated with a fixed-width model: wrapping works in
//! characters against the column budgets of [`LayoutConfig`], capped at what
//! fits the content width for the font size. Single-line elements (headers,
//! headings, placeholders, metric labels) are shortened with an ellipsis
//! instead of wrapped.

use crate::config::LayoutConfig;
use crate::error::PipelineWarning;
use crate::output::{Color, FontWeight, Page, PageKind, Primitive, CHAR_WIDTH_FACTOR, PAGE_COUNT};
use crate::record::{Metric, ReportRecord};
use tracing::debug;

/// Metrics shown on the cover page, whatever the record holds.
pub const COVER_METRIC_LIMIT: usize = 4;

/// Columns in the cover metrics grid.
const METRIC_GRID_COLUMNS: usize = 2;

const BULLET_MARKER: &str = "\u{2022}";
const RULE_THICKNESS: f32 = 2.0;
const METRIC_BOX_PADDING: f32 = 10.0;

/// Pages plus what the layout had to give up.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutcome {
    pub pages: [Page; PAGE_COUNT],
    /// Metric boxes actually drawn on the cover.
    pub metrics_on_cover: usize,
    /// Elements dropped across all pages.
    pub dropped: usize,
    pub warnings: Vec<PipelineWarning>,
}

/// Lay out a record onto its three pages.
pub fn layout_report(record: &ReportRecord, config: &LayoutConfig) -> [Page; PAGE_COUNT] {
    layout_report_with_diagnostics(record, config).pages
}

/// Lay out a record, reporting overflow per page.
pub fn layout_report_with_diagnostics(record: &ReportRecord, config: &LayoutConfig) -> LayoutOutcome {
    let mut warnings = Vec::new();
    let mut dropped_total = 0;
    let mut metrics_on_cover = 0;

    let pages = PageKind::ALL.map(|kind| {
        let elements = match kind {
            PageKind::Cover => cover_elements(record, config),
            PageKind::Summary => summary_elements(record, config),
            PageKind::Recommendations => recommendation_elements(record, config),
        };
        let built = lay_out_page(kind, &elements, config);

        if built.dropped > 0 {
            debug!(
                "Page {}: {} of {} elements dropped",
                built.page.number(),
                built.dropped,
                elements.len()
            );
            warnings.push(PipelineWarning::LayoutOverflow {
                page: built.page.number(),
                dropped: built.dropped,
            });
        }
        dropped_total += built.dropped;
        if kind == PageKind::Cover {
            metrics_on_cover = built.metrics_shown;
        }
        built.page
    });

    LayoutOutcome {
        pages,
        metrics_on_cover,
        dropped: dropped_total,
        warnings,
    }
}

// ── Wrapping ─────────────────────────────────────────────────────────────────

/// Greedy word wrap.
///
/// Words are accumulated while the line stays within `columns` characters.
/// A word longer than `columns` gets a line of its own and is never split.
/// Blank input yields no lines.
pub fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if line_chars == 0 {
            line.push_str(word);
            line_chars = word_chars;
        } else if line_chars + 1 + word_chars <= columns {
            line.push(' ');
            line.push_str(word);
            line_chars += 1 + word_chars;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_chars = word_chars;
        }
    }
    if line_chars > 0 {
        lines.push(line);
    }
    lines
}

/// Shorten `text` to `columns` characters, marking the cut with an ellipsis.
fn fit(text: &str, columns: usize) -> String {
    if text.chars().count() <= columns {
        return text.to_string();
    }
    let mut out: String = text.chars().take(columns.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

fn columns_for(width: f32, size: f32) -> usize {
    ((width / (size * CHAR_WIDTH_FACTOR)).floor() as usize).max(1)
}

/// `text` shortened to one line of `size` text across the content width.
fn one_line(text: &str, size: f32, c: &LayoutConfig) -> String {
    fit(text, columns_for(c.content_width(), size))
}

fn title_columns(c: &LayoutConfig) -> usize {
    c.title_columns.min(columns_for(c.content_width(), c.title_size))
}

fn body_columns(c: &LayoutConfig) -> usize {
    c.body_columns.min(columns_for(c.content_width(), c.body_size))
}

fn bullet_columns(c: &LayoutConfig) -> usize {
    c.bullet_columns
        .min(columns_for(c.content_width() - c.bullet_indent, c.body_size))
}

// ── Elements and the flow state machine ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Element {
    /// One line of the cover title.
    Title(String),
    /// Small muted line: subtitles, running headers, notes.
    Meta(String),
    /// Accent rule under the cover header.
    Rule,
    /// Section heading, preceded by section spacing.
    Heading(String),
    /// One wrapped paragraph line; `last` adds paragraph spacing.
    Line { text: String, last: bool },
    /// One wrapped bullet line; `first` draws the marker.
    Bullet { text: String, first: bool, last: bool },
    /// Stand-in for an empty section.
    Placeholder(String),
    /// One row of the metrics grid.
    MetricRow(Vec<Metric>),
}

impl Element {
    /// Vertical space consumed: line height plus the element's own spacing.
    fn height(&self, c: &LayoutConfig) -> f32 {
        match self {
            Element::Title(_) => c.line_height(c.title_size),
            Element::Meta(_) => c.line_height(c.small_size),
            Element::Rule => RULE_THICKNESS + c.section_spacing / 2.0,
            Element::Heading(_) => c.section_spacing + c.line_height(c.heading_size),
            Element::Line { last, .. } | Element::Bullet { last, .. } => {
                c.line_height(c.body_size) + if *last { c.paragraph_spacing } else { 0.0 }
            }
            Element::Placeholder(_) => c.line_height(c.body_size) + c.paragraph_spacing,
            Element::MetricRow(_) => c.metric_box_height + c.metric_gap,
        }
    }

    /// Primitives for this element with its top edge at `top`.
    fn render(&self, top: f32, c: &LayoutConfig) -> Vec<Primitive> {
        let x = c.margin_x;
        match self {
            Element::Title(text) => vec![text_run(x, top - c.title_size, c.title_size, FontWeight::Bold, Color::INK, text)],
            Element::Meta(text) => vec![text_run(
                x,
                top - c.small_size,
                c.small_size,
                FontWeight::Regular,
                Color::MUTED,
                &one_line(text, c.small_size, c),
            )],
            Element::Rule => {
                let mid = top - self.height(c) / 2.0;
                vec![Primitive::Rect {
                    x,
                    y: mid - RULE_THICKNESS / 2.0,
                    width: c.content_width(),
                    height: RULE_THICKNESS,
                    fill: Color::ACCENT,
                    stroke: None,
                }]
            }
            Element::Heading(text) => {
                let y = top - c.section_spacing - c.heading_size;
                vec![text_run(x, y, c.heading_size, FontWeight::Bold, Color::ACCENT, &one_line(text, c.heading_size, c))]
            }
            Element::Line { text, .. } => {
                vec![text_run(x, top - c.body_size, c.body_size, FontWeight::Regular, Color::INK, text)]
            }
            Element::Bullet { text, first, .. } => {
                let y = top - c.body_size;
                let mut out = Vec::with_capacity(2);
                if *first {
                    out.push(text_run(x, y, c.body_size, FontWeight::Bold, Color::ACCENT, BULLET_MARKER));
                }
                out.push(text_run(x + c.bullet_indent, y, c.body_size, FontWeight::Regular, Color::INK, text));
                out
            }
            Element::Placeholder(text) => {
                vec![text_run(x, top - c.body_size, c.body_size, FontWeight::Regular, Color::MUTED, &one_line(text, c.body_size, c))]
            }
            Element::MetricRow(metrics) => metric_row(metrics, top, c),
        }
    }
}

fn text_run(x: f32, y: f32, size: f32, weight: FontWeight, color: Color, text: &str) -> Primitive {
    Primitive::Text {
        x,
        y,
        size,
        weight,
        color,
        text: text.to_string(),
    }
}

fn metric_row(metrics: &[Metric], top: f32, c: &LayoutConfig) -> Vec<Primitive> {
    let gaps = (METRIC_GRID_COLUMNS - 1) as f32 * c.metric_gap;
    let box_width = ((c.content_width() - gaps) / METRIC_GRID_COLUMNS as f32).max(0.0);
    let inner = (box_width - 2.0 * METRIC_BOX_PADDING).max(0.0);
    let bottom = top - c.metric_box_height;

    let mut out = Vec::with_capacity(metrics.len() * 3);
    for (i, metric) in metrics.iter().take(METRIC_GRID_COLUMNS).enumerate() {
        let x = c.margin_x + i as f32 * (box_width + c.metric_gap);
        out.push(Primitive::Rect {
            x,
            y: bottom,
            width: box_width,
            height: c.metric_box_height,
            fill: Color::PANEL,
            stroke: Some(Color::BORDER),
        });
        out.push(text_run(
            x + METRIC_BOX_PADDING,
            top - METRIC_BOX_PADDING - c.small_size,
            c.small_size,
            FontWeight::Regular,
            Color::MUTED,
            &fit(&metric.label, columns_for(inner, c.small_size)),
        ));
        out.push(text_run(
            x + METRIC_BOX_PADDING,
            bottom + METRIC_BOX_PADDING,
            c.metric_value_size,
            FontWeight::Bold,
            Color::INK,
            &fit(&metric.value, columns_for(inner, c.metric_value_size)),
        ));
    }
    out
}

/// Layout cursor for one page.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FlowState {
    page_index: usize,
    cursor_y: f32,
    full: bool,
}

impl FlowState {
    fn start(page_index: usize, c: &LayoutConfig) -> Self {
        Self {
            page_index,
            cursor_y: c.content_top(),
            full: false,
        }
    }
}

/// Place one element. Returns the advanced state and the primitives drawn,
/// or `None` when the element (or an earlier one) did not fit.
fn place(state: FlowState, element: &Element, c: &LayoutConfig) -> (FlowState, Option<Vec<Primitive>>) {
    if state.full {
        return (state, None);
    }
    let next_y = state.cursor_y - element.height(c);
    if next_y < c.margin_bottom {
        return (FlowState { full: true, ..state }, None);
    }
    let primitives = element.render(state.cursor_y, c);
    (FlowState { cursor_y: next_y, ..state }, Some(primitives))
}

struct BuiltPage {
    page: Page,
    dropped: usize,
    metrics_shown: usize,
}

fn lay_out_page(kind: PageKind, elements: &[Element], c: &LayoutConfig) -> BuiltPage {
    let index = PageKind::ALL.iter().position(|k| *k == kind).unwrap_or(0);
    let mut state = FlowState::start(index, c);
    let mut primitives = Vec::new();
    let mut dropped = 0;
    let mut metrics_shown = 0;

    for element in elements {
        let (next, placed) = place(state, element, c);
        state = next;
        match placed {
            Some(drawn) => {
                if let Element::MetricRow(row) = element {
                    metrics_shown += row.len();
                }
                primitives.extend(drawn);
            }
            None => dropped += 1,
        }
    }

    let number = state.page_index + 1;
    primitives.push(text_run(
        c.margin_x,
        c.margin_bottom / 2.0,
        c.small_size,
        FontWeight::Regular,
        Color::MUTED,
        &one_line(&format!("Page {number} of {PAGE_COUNT}"), c.small_size, c),
    ));

    BuiltPage {
        page: Page::new(number, kind, c.page_width, c.page_height, primitives),
        dropped,
        metrics_shown,
    }
}

// ── Page composition ─────────────────────────────────────────────────────────

fn paragraph(text: &str, columns: usize) -> Vec<Element> {
    let lines = wrap(text, columns);
    let count = lines.len();
    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| Element::Line {
            text,
            last: i + 1 == count,
        })
        .collect()
}

fn bullets(items: &[String], columns: usize) -> Vec<Element> {
    items
        .iter()
        .flat_map(|item| {
            let lines = wrap(item, columns);
            let count = lines.len();
            lines.into_iter().enumerate().map(move |(i, text)| Element::Bullet {
                text,
                first: i == 0,
                last: i + 1 == count,
            })
        })
        .collect()
}

fn or_placeholder(elements: Vec<Element>, placeholder: &str) -> Vec<Element> {
    if elements.is_empty() {
        vec![Element::Placeholder(placeholder.to_string())]
    } else {
        elements
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn cover_elements(record: &ReportRecord, c: &LayoutConfig) -> Vec<Element> {
    let mut out: Vec<Element> = wrap(record.title(), title_columns(c))
        .into_iter()
        .map(Element::Title)
        .collect();

    out.push(Element::Meta(format!(
        "Executive dashboard \u{00B7} {}, {}, {}",
        plural(record.metrics().len(), "metric"),
        plural(record.insights().len(), "insight"),
        plural(record.recommendations().len(), "recommendation"),
    )));
    out.push(Element::Rule);
    out.push(Element::Heading("Key metrics".into()));

    let shown = &record.metrics()[..record.metrics().len().min(COVER_METRIC_LIMIT)];
    let rows: Vec<Element> = shown
        .chunks(METRIC_GRID_COLUMNS)
        .map(|row| Element::MetricRow(row.to_vec()))
        .collect();
    out.extend(or_placeholder(rows, "No metrics available."));

    let hidden = record.metrics().len() - shown.len();
    if hidden > 0 {
        out.push(Element::Meta(format!(
            "{} not shown on the cover",
            plural(hidden, "further metric")
        )));
    }
    out
}

fn summary_elements(record: &ReportRecord, c: &LayoutConfig) -> Vec<Element> {
    let mut out = vec![
        Element::Meta(record.title().to_string()),
        Element::Heading("Executive summary".into()),
    ];
    out.extend(or_placeholder(
        paragraph(record.summary(), body_columns(c)),
        "No summary available.",
    ));
    out.push(Element::Heading("Key insights".into()));
    out.extend(or_placeholder(
        bullets(record.insights(), bullet_columns(c)),
        "No insights available.",
    ));
    out
}

fn recommendation_elements(record: &ReportRecord, c: &LayoutConfig) -> Vec<Element> {
    let mut out = vec![
        Element::Meta(record.title().to_string()),
        Element::Heading("Recommendations".into()),
    ];
    out.extend(or_placeholder(
        bullets(record.recommendations(), bullet_columns(c)),
        "No recommendations available.",
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(metrics: usize, insights: usize, recommendations: usize) -> ReportRecord {
        ReportRecord::new(
            "Quarterly Performance Review",
            "Revenue grew on the back of strong enterprise renewals.",
            (0..metrics).map(|i| Metric::new(format!("Metric {i}"), format!("{i}0%"))).collect(),
            (0..insights).map(|i| format!("Insight number {i}")).collect(),
            (0..recommendations).map(|i| format!("Recommendation number {i}")).collect(),
        )
        .unwrap()
    }

    fn texts(page: &Page) -> Vec<&str> {
        page.texts().collect()
    }

    #[test]
    fn wrap_greedy() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            ["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn wrap_exact_fit_stays_on_one_line() {
        assert_eq!(wrap("abcd efgh", 9), ["abcd efgh"]);
        assert_eq!(wrap("abcd efgh", 8), ["abcd", "efgh"]);
    }

    #[test]
    fn wrap_long_word_alone() {
        assert_eq!(
            wrap("a supercalifragilistic b", 5),
            ["a", "supercalifragilistic", "b"]
        );
        assert_eq!(wrap("supercalifragilistic", 5), ["supercalifragilistic"]);
    }

    #[test]
    fn wrap_counts_characters_not_bytes() {
        assert_eq!(wrap("ñañaña ñañaña", 13), ["ñañaña ñañaña"]);
    }

    #[test]
    fn wrap_blank_input() {
        assert!(wrap("   \n ", 10).is_empty());
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn fit_adds_ellipsis() {
        assert_eq!(fit("Revenue", 10), "Revenue");
        assert_eq!(fit("Monthly recurring revenue", 8), "Monthly\u{2026}");
    }

    #[test]
    fn place_advances_cursor() {
        let c = LayoutConfig::default();
        let start = FlowState::start(0, &c);
        let element = Element::Line { text: "hello".into(), last: false };
        let (next, drawn) = place(start, &element, &c);
        assert!(drawn.is_some());
        assert_eq!(next.cursor_y, start.cursor_y - c.line_height(c.body_size));
        assert!(!next.full);
    }

    #[test]
    fn place_drops_after_first_overflow() {
        let c = LayoutConfig::default();
        let near_bottom = FlowState {
            page_index: 1,
            cursor_y: c.margin_bottom + 20.0,
            full: false,
        };
        let (state, drawn) = place(near_bottom, &Element::MetricRow(vec![Metric::new("a", "1")]), &c);
        assert!(drawn.is_none());
        assert!(state.full);

        // A smaller element that would fit is still dropped.
        let (state, drawn) = place(state, &Element::Meta("tiny".into()), &c);
        assert!(drawn.is_none());
        assert_eq!(state.cursor_y, c.margin_bottom + 20.0);
    }

    #[test]
    fn always_three_pages_in_order() {
        let c = LayoutConfig::default();
        let pages = layout_report(&record(6, 8, 8), &c);
        let kinds: Vec<PageKind> = pages.iter().map(Page::kind).collect();
        assert_eq!(kinds, PageKind::ALL);
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.number(), i + 1);
            assert_eq!(page.width(), c.page_width);
            assert_eq!(page.height(), c.page_height);
            assert!(page.is_within_bounds(), "page {} out of bounds", i + 1);
        }
    }

    #[test]
    fn cover_shows_at_most_four_metrics() {
        let c = LayoutConfig::default();
        let outcome = layout_report_with_diagnostics(&record(6, 0, 0), &c);
        assert_eq!(outcome.metrics_on_cover, COVER_METRIC_LIMIT);

        let boxes = outcome.pages[0]
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Rect { stroke: Some(_), .. }))
            .count();
        assert_eq!(boxes, 4);
        assert!(texts(&outcome.pages[0]).contains(&"2 further metrics not shown on the cover"));
    }

    #[test]
    fn metric_grid_has_two_columns() {
        let c = LayoutConfig::default();
        let pages = layout_report(&record(3, 0, 0), &c);
        let boxes: Vec<(f32, f32)> = pages[0]
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Rect { x, y, stroke: Some(_), .. } => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0].1, boxes[1].1, "first row shares a baseline");
        assert!(boxes[0].0 < boxes[1].0);
        assert_eq!(boxes[2].0, boxes[0].0, "third box starts a new row");
        assert!(boxes[2].1 < boxes[0].1);
    }

    #[test]
    fn empty_record_gets_placeholders() {
        let c = LayoutConfig::default();
        let empty = ReportRecord::new("T", "", vec![], vec![], vec![]).unwrap();
        let pages = layout_report(&empty, &c);
        assert!(texts(&pages[0]).contains(&"No metrics available."));
        assert!(texts(&pages[1]).contains(&"No summary available."));
        assert!(texts(&pages[1]).contains(&"No insights available."));
        assert!(texts(&pages[2]).contains(&"No recommendations available."));
    }

    #[test]
    fn bullet_continuation_lines_align_with_text() {
        let c = LayoutConfig::default();
        let long = "word ".repeat(40);
        let r = ReportRecord::new("T", "", vec![], vec![], vec![long]).unwrap();
        let pages = layout_report(&r, &c);

        let mut markers = 0;
        let mut text_xs = Vec::new();
        for p in pages[2].primitives() {
            if let Primitive::Text { x, text, .. } = p {
                if text == BULLET_MARKER {
                    markers += 1;
                    assert_eq!(*x, c.margin_x);
                } else if text.starts_with("word") {
                    text_xs.push(*x);
                }
            }
        }
        assert_eq!(markers, 1);
        assert!(text_xs.len() > 1);
        assert!(text_xs.iter().all(|x| *x == c.margin_x + c.bullet_indent));
    }

    #[test]
    fn overflow_is_truncated_and_reported() {
        let c = LayoutConfig::default();
        let huge = "lorem ipsum dolor sit amet ".repeat(400);
        let r = ReportRecord::new("T", huge, vec![], vec!["kept?".into()], vec![]).unwrap();
        let outcome = layout_report_with_diagnostics(&r, &c);

        assert!(outcome.dropped > 0);
        assert!(outcome
            .warnings
            .iter()
            .any(|w| matches!(w, PipelineWarning::LayoutOverflow { page: 2, .. })));
        // The insights heading came after the overflow, so it is gone too.
        assert!(!texts(&outcome.pages[1]).contains(&"Key insights"));
        assert!(outcome.pages[1].is_within_bounds());
        for p in outcome.pages[1].primitives() {
            if let Primitive::Text { y, text, .. } = p {
                if !text.starts_with("Page ") {
                    assert!(*y >= c.margin_bottom, "{text:?} placed at {y}");
                }
            }
        }
    }

    #[test]
    fn footer_on_every_page() {
        let c = LayoutConfig::default();
        let pages = layout_report(&record(0, 0, 0), &c);
        for (i, page) in pages.iter().enumerate() {
            let footer = format!("Page {} of 3", i + 1);
            assert!(texts(page).contains(&footer.as_str()));
        }
    }

    #[test]
    fn long_title_wraps_on_cover() {
        let c = LayoutConfig::default();
        let title = "A very long dashboard title that certainly needs more than one line";
        let r = ReportRecord::new(title, "", vec![], vec![], vec![]).unwrap();
        let pages = layout_report(&r, &c);
        let title_lines: Vec<&str> = pages[0]
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { size, text, .. } if *size == c.title_size => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(title_lines.len() > 1);
        assert!(title_lines.iter().all(|l| l.chars().count() <= c.title_columns));
        assert_eq!(title_lines.join(" "), title);
    }

    fn right_edges_within(page: &Page) -> bool {
        page.primitives().iter().all(|p| match p {
            Primitive::Text { x, size, text, .. } if text.contains(' ') => {
                x + crate::output::text_width(text, *size) <= page.width() + 0.01
            }
            _ => true,
        })
    }

    #[test]
    fn running_header_is_shortened_to_page_width() {
        let c = LayoutConfig::default();
        let title = "Consolidated regional performance review for the retail, wholesale and online channels across EMEA and APAC in Q3";
        assert!(title.chars().count() > 110);
        let pages = layout_report(&ReportRecord::new(title, "", vec![], vec![], vec![]).unwrap(), &c);

        for page in &pages[1..] {
            let header = texts(page)[0];
            assert!(header.ends_with('\u{2026}'), "header not shortened: {header:?}");
            assert!(right_edges_within(page));
            assert!(page.is_within_bounds());
        }
    }

    #[test]
    fn oversized_column_budgets_are_capped_by_width() {
        let c = LayoutConfig {
            title_columns: 500,
            body_columns: 500,
            bullet_columns: 500,
            ..LayoutConfig::default()
        };
        let long = "word ".repeat(300);
        let r = ReportRecord::new(long.clone(), long.clone(), vec![], vec![long.clone()], vec![long]).unwrap();
        let pages = layout_report(&r, &c);
        for page in &pages {
            assert!(right_edges_within(page), "page {} overflows", page.number());
            assert!(page.is_within_bounds());
        }
    }
}
