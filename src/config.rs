//! Configuration types for report generation.
//!
//! All behaviour is controlled through [`ReportConfig`], built via its
//! [`ReportConfigBuilder`]. The geometry of the three output pages lives in
//! [`LayoutConfig`]; the boundary fetch is bounded by
//! [`ReportConfig::source_timeout_secs`].
//!
//! Invalid configurations are programming errors on the caller's side, so
//! they are rejected once in [`ReportConfigBuilder::build`] instead of being
//! discovered half-way through a layout.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};

/// Page geometry, typography and wrapping budgets for the layout engine.
///
/// Coordinates follow the PDF convention: the origin is the bottom-left
/// corner of the page and `y` grows upwards, so the layout cursor starts
/// below the top margin and decreases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Canvas width in layout units. Default: 595 (A4 portrait, points).
    pub page_width: f32,

    /// Canvas height in layout units. Default: 842.
    pub page_height: f32,

    /// Left and right margin. Default: 50.
    pub margin_x: f32,

    /// Top margin; the cursor starts here. Default: 60.
    pub margin_top: f32,

    /// Bottom margin; nothing in the flow may be placed below it. Default: 60.
    ///
    /// The page footer is drawn inside this margin.
    pub margin_bottom: f32,

    /// Font size of the cover title. Default: 26.
    pub title_size: f32,

    /// Font size of section headings. Default: 16.
    pub heading_size: f32,

    /// Font size of paragraph and bullet text. Default: 11.
    pub body_size: f32,

    /// Font size of metadata lines, metric labels and footers. Default: 9.
    pub small_size: f32,

    /// Font size of metric values. Default: 18.
    pub metric_value_size: f32,

    /// Line height as a multiple of the font size. Default: 1.4.
    pub line_height_factor: f32,

    /// Character budget for one title line. Default: 36.
    pub title_columns: usize,

    /// Character budget for one paragraph line. Default: 86.
    pub body_columns: usize,

    /// Character budget for one bullet line (after the marker). Default: 82.
    pub bullet_columns: usize,

    /// Horizontal offset of bullet text from the bullet marker. Default: 14.
    pub bullet_indent: f32,

    /// Height of one metric box. Default: 64.
    pub metric_box_height: f32,

    /// Gap between metric boxes, horizontally and vertically. Default: 14.
    pub metric_gap: f32,

    /// Extra space after a paragraph or a bullet entry. Default: 4.
    pub paragraph_spacing: f32,

    /// Extra space before a new section. Default: 18.
    pub section_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin_x: 50.0,
            margin_top: 60.0,
            margin_bottom: 60.0,
            title_size: 26.0,
            heading_size: 16.0,
            body_size: 11.0,
            small_size: 9.0,
            metric_value_size: 18.0,
            line_height_factor: 1.4,
            title_columns: 36,
            body_columns: 86,
            bullet_columns: 82,
            bullet_indent: 14.0,
            metric_box_height: 64.0,
            metric_gap: 14.0,
            paragraph_spacing: 4.0,
            section_spacing: 18.0,
        }
    }
}

impl LayoutConfig {
    /// Width available between the horizontal margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin_x
    }

    /// Initial cursor position on every page.
    pub fn content_top(&self) -> f32 {
        self.page_height - self.margin_top
    }

    /// Line height for a given font size.
    pub fn line_height(&self, size: f32) -> f32 {
        size * self.line_height_factor
    }

    fn validate(&self) -> Result<(), ReportError> {
        let dimensions = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("margin_x", self.margin_x),
            ("margin_top", self.margin_top),
            ("margin_bottom", self.margin_bottom),
            ("title_size", self.title_size),
            ("heading_size", self.heading_size),
            ("body_size", self.body_size),
            ("small_size", self.small_size),
            ("metric_value_size", self.metric_value_size),
            ("line_height_factor", self.line_height_factor),
            ("bullet_indent", self.bullet_indent),
            ("metric_box_height", self.metric_box_height),
            ("metric_gap", self.metric_gap),
            ("paragraph_spacing", self.paragraph_spacing),
            ("section_spacing", self.section_spacing),
        ];
        if let Some((name, value)) = dimensions.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ReportError::InvalidConfig(format!(
                "{name} must be a finite number, got {value}"
            )));
        }
        let spacings = [
            ("bullet_indent", self.bullet_indent),
            ("metric_gap", self.metric_gap),
            ("paragraph_spacing", self.paragraph_spacing),
            ("section_spacing", self.section_spacing),
        ];
        if let Some((name, value)) = spacings.iter().find(|(_, v)| *v < 0.0) {
            return Err(ReportError::InvalidConfig(format!(
                "{name} must not be negative, got {value}"
            )));
        }
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(ReportError::InvalidConfig(format!(
                "Page size must be positive, got {}×{}",
                self.page_width, self.page_height
            )));
        }
        if self.margin_x < 0.0 || self.margin_top < 0.0 || self.margin_bottom < 0.0 {
            return Err(ReportError::InvalidConfig("Margins must not be negative".into()));
        }
        if self.content_width() <= 0.0 {
            return Err(ReportError::InvalidConfig(format!(
                "Horizontal margins ({}) leave no content width on a {}-wide page",
                self.margin_x, self.page_width
            )));
        }
        if self.bullet_indent >= self.content_width() {
            return Err(ReportError::InvalidConfig(format!(
                "Bullet indent ({}) leaves no room for bullet text in a content width of {}",
                self.bullet_indent,
                self.content_width()
            )));
        }
        if self.margin_top + self.margin_bottom >= self.page_height {
            return Err(ReportError::InvalidConfig(format!(
                "Vertical margins ({} + {}) leave no content height on a {}-high page",
                self.margin_top, self.margin_bottom, self.page_height
            )));
        }
        let sizes = [
            self.title_size,
            self.heading_size,
            self.body_size,
            self.small_size,
            self.metric_value_size,
            self.metric_box_height,
        ];
        if sizes.iter().any(|s| *s <= 0.0) {
            return Err(ReportError::InvalidConfig(
                "Font sizes and metric box height must be positive".into(),
            ));
        }
        if self.line_height_factor < 1.0 {
            return Err(ReportError::InvalidConfig(format!(
                "Line height factor must be ≥ 1.0, got {}",
                self.line_height_factor
            )));
        }
        if self.title_columns == 0 || self.body_columns == 0 || self.bullet_columns == 0 {
            return Err(ReportError::InvalidConfig(
                "Column budgets must be ≥ 1".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for a report generation run.
///
/// Built via [`ReportConfig::builder()`] or using [`ReportConfig::default()`].
///
/// # Example
/// ```rust
/// use insight_dashboard::ReportConfig;
///
/// let config = ReportConfig::builder()
///     .source_timeout_secs(30)
///     .body_columns(80)
///     .build()
///     .unwrap();
/// assert_eq!(config.layout.body_columns, 80);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Page geometry and typography.
    pub layout: LayoutConfig,

    /// Upper bound for the boundary fetch of the raw response, in seconds. Default: 120.
    ///
    /// Generation calls that attach a document routinely take tens of seconds;
    /// two minutes leaves room for that without hanging a request forever.
    pub source_timeout_secs: u64,

    /// Extension appended to the suggested artifact filename. Default: "pdf".
    pub filename_extension: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            source_timeout_secs: 120,
            filename_extension: "pdf".to_string(),
        }
    }
}

impl ReportConfig {
    /// Create a new builder for `ReportConfig`.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ReportConfig`].
#[derive(Debug)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn page_size(mut self, width: f32, height: f32) -> Self {
        self.config.layout.page_width = width;
        self.config.layout.page_height = height;
        self
    }

    pub fn margins(mut self, horizontal: f32, top: f32, bottom: f32) -> Self {
        self.config.layout.margin_x = horizontal;
        self.config.layout.margin_top = top;
        self.config.layout.margin_bottom = bottom;
        self
    }

    pub fn title_columns(mut self, n: usize) -> Self {
        self.config.layout.title_columns = n.max(1);
        self
    }

    pub fn body_columns(mut self, n: usize) -> Self {
        self.config.layout.body_columns = n.max(1);
        self
    }

    pub fn bullet_columns(mut self, n: usize) -> Self {
        self.config.layout.bullet_columns = n.max(1);
        self
    }

    pub fn line_height_factor(mut self, factor: f32) -> Self {
        self.config.layout.line_height_factor = factor.clamp(1.0, 4.0);
        self
    }

    pub fn source_timeout_secs(mut self, secs: u64) -> Self {
        self.config.source_timeout_secs = secs;
        self
    }

    pub fn filename_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.filename_extension = ext.into().trim_start_matches('.').to_string();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ReportConfig, ReportError> {
        let c = &self.config;
        c.layout.validate()?;
        if c.source_timeout_secs == 0 {
            return Err(ReportError::InvalidConfig(
                "Source timeout must be ≥ 1 second".into(),
            ));
        }
        if c.filename_extension.is_empty()
            || !c.filename_extension.chars().all(|ch| ch.is_ascii_alphanumeric())
        {
            return Err(ReportError::InvalidConfig(format!(
                "Filename extension must be ASCII alphanumeric, got '{}'",
                c.filename_extension
            )));
        }
        Ok(self.config)
    }
}
