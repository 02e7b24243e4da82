//! Output types: laid-out pages and the assembled report.
//!
//! A [`Page`] is a fixed-size canvas holding positioned drawing primitives.
//! Serialising pages into bytes (PDF, PPTX, SVG, …) is the job of an external
//! renderer; everything here is plain data and derives `Serialize` so a
//! renderer in another process can consume it as JSON.

use crate::error::PipelineWarning;
use crate::record::ReportRecord;
use serde::{Deserialize, Serialize};

/// Number of pages in every report.
pub const PAGE_COUNT: usize = 3;

/// Average glyph advance as a fraction of the font size, used to estimate
/// text width without font metrics.
pub const CHAR_WIDTH_FACTOR: f32 = 0.5;

/// Slack for float rounding in bounds checks.
const BOUNDS_EPSILON: f32 = 0.01;

/// Estimated advance width of `text` set at `size`.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * CHAR_WIDTH_FACTOR
}

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const INK: Color = Color::rgb(0x1f, 0x29, 0x37);
    pub const MUTED: Color = Color::rgb(0x6b, 0x72, 0x80);
    pub const ACCENT: Color = Color::rgb(0x25, 0x63, 0xeb);
    pub const PANEL: Color = Color::rgb(0xf3, 0xf4, 0xf6);
    pub const BORDER: Color = Color::rgb(0xd1, 0xd5, 0xdb);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// A positioned drawing primitive.
///
/// Text positions are baselines; rectangle positions are bottom-left corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Color,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Color,
        stroke: Option<Color>,
    },
}

impl Primitive {
    /// The text carried by a text run, `None` for shapes.
    pub fn text(&self) -> Option<&str> {
        match self {
            Primitive::Text { text, .. } => Some(text),
            Primitive::Rect { .. } => None,
        }
    }

    /// Whether the primitive lies inside a `width × height` canvas.
    ///
    /// Text runs are checked by anchor and estimated width (see
    /// [`text_width`]). A run holding a single word is only checked by its
    /// anchor, since words are never split and may be longer than a line.
    pub fn within(&self, width: f32, height: f32) -> bool {
        match *self {
            Primitive::Text {
                x, y, size, ref text, ..
            } => {
                let anchored = (0.0..=width).contains(&x) && (0.0..=height).contains(&y);
                let single_word = !text.trim().contains(char::is_whitespace);
                anchored && (single_word || x + text_width(text, size) <= width + BOUNDS_EPSILON)
            }
            Primitive::Rect {
                x,
                y,
                width: w,
                height: h,
                ..
            } => x >= 0.0 && y >= 0.0 && w >= 0.0 && h >= 0.0 && x + w <= width && y + h <= height,
        }
    }
}

/// Which of the three fixed pages a [`Page`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Title, metadata and the key-metrics grid.
    Cover,
    /// Executive summary and key insights.
    Summary,
    /// Recommendations.
    Recommendations,
}

impl PageKind {
    pub const ALL: [PageKind; PAGE_COUNT] =
        [PageKind::Cover, PageKind::Summary, PageKind::Recommendations];
}

/// One laid-out page. Immutable once built by the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    number: usize,
    kind: PageKind,
    width: f32,
    height: f32,
    primitives: Vec<Primitive>,
}

impl Page {
    pub(crate) fn new(
        number: usize,
        kind: PageKind,
        width: f32,
        height: f32,
        primitives: Vec<Primitive>,
    ) -> Self {
        Self {
            number,
            kind,
            width,
            height,
            primitives,
        }
    }

    /// 1-indexed page number.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// All text runs on the page, in placement order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(Primitive::text)
    }

    /// Whether every primitive lies inside the canvas.
    pub fn is_within_bounds(&self) -> bool {
        self.primitives
            .iter()
            .all(|p| p.within(self.width, self.height))
    }
}

/// Where the record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recovery {
    /// The candidate block parsed as-is.
    Strict,
    /// Parsed after removing trailing commas.
    TrailingCommas,
    /// Parsed after quoting bare keys.
    BareKeys,
    /// Nothing parsed; the fallback record was used.
    Fallback,
}

/// Aggregate statistics for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    /// Characters of model-authored text found in the response.
    pub extracted_chars: usize,
    /// Which recovery strategy produced the record.
    pub recovery: Recovery,
    /// Metrics shown on the cover page.
    pub metrics_on_cover: usize,
    /// Layout elements dropped because a page was full.
    pub dropped_elements: usize,
}

/// The result of one pipeline run: the record, its three pages and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub record: ReportRecord,
    pub pages: [Page; PAGE_COUNT],
    pub warnings: Vec<PipelineWarning>,
    pub stats: ReportStats,
    /// Suggested artifact filename, see [`suggested_filename`].
    pub filename: String,
}

impl Report {
    /// Whether the run degraded in any way.
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Derive an artifact filename from a report title.
///
/// Every character that is not ASCII alphanumeric becomes `-`. A title with
/// no alphanumeric characters at all yields the stem `report`.
///
/// ```rust
/// use insight_dashboard::output::suggested_filename;
///
/// assert_eq!(suggested_filename("Q3 Sales: EMEA", "pdf"), "Q3-Sales--EMEA.pdf");
/// ```
pub fn suggested_filename(title: &str, extension: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let stem = if stem.chars().any(|c| c.is_ascii_alphanumeric()) {
        stem
    } else {
        "report".to_string()
    };
    format!("{stem}.{extension}")
}
