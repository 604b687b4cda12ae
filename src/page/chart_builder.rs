use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{
    BandScale, LinearScale, PlotArea, PlotMargins, ValueScaleTuning, Viewport,
    project_category_bars, project_line_points, project_scatter_dots, segments_from_points,
};
use crate::error::{LabError, LabResult};
use crate::page::ChartStyle;
use crate::render::{
    CirclePrimitive, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

/// One labelled sample drawn by a page chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDatum {
    pub label: String,
    pub value: f64,
}

impl ChartDatum {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Optional titles drawn inside a chart frame.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisTitles {
    pub plot: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
}

/// Scales resolved for one chart pass.
#[derive(Debug, Clone, Copy)]
struct Canvas {
    plot: PlotArea,
    bands: BandScale,
    values: LinearScale,
}

/// Turns chart data into validated, backend-agnostic render frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrameBuilder {
    viewport: Viewport,
    margins: PlotMargins,
    style: ChartStyle,
}

impl ChartFrameBuilder {
    pub fn new(viewport: Viewport, margins: PlotMargins, style: ChartStyle) -> LabResult<Self> {
        PlotArea::from_viewport(viewport, margins)?;
        Ok(Self {
            viewport,
            margins,
            style: style.validate()?,
        })
    }

    /// Vertical bars from a zero baseline, one band per datum.
    pub fn bar_chart(&self, data: &[ChartDatum], titles: &AxisTitles) -> LabResult<RenderFrame> {
        let canvas = self.canvas(data.len(), data.iter().map(|d| d.value), true)?;
        let values: Vec<f64> = data.iter().map(|d| d.value).collect();
        let bars = project_category_bars(
            &values,
            canvas.bands,
            canvas.values,
            canvas.plot,
            self.style.bar_width_ratio,
        )?;

        let mut frame = self.frame_with_grid(canvas);
        for bar in bars {
            frame = frame.with_rect(RectPrimitive::new(
                bar.x_left,
                bar.y_top,
                bar.width(),
                bar.height(),
                self.style.bar_color,
            ));
        }

        let labels: Vec<&str> = data.iter().map(|d| d.label.as_str()).collect();
        self.finish(frame, canvas, &labels, titles)
    }

    /// Polyline through band centers with a marker on every vertex.
    pub fn line_chart(&self, data: &[ChartDatum], titles: &AxisTitles) -> LabResult<RenderFrame> {
        let canvas = self.canvas(data.len(), data.iter().map(|d| d.value), true)?;
        let values: Vec<f64> = data.iter().map(|d| d.value).collect();
        let points = project_line_points(&values, canvas.bands, canvas.values, canvas.plot)?;

        let mut frame = self.frame_with_grid(canvas);
        for segment in segments_from_points(&points) {
            frame = frame.with_line(LinePrimitive::new(
                segment.x1,
                segment.y1,
                segment.x2,
                segment.y2,
                self.style.series_line_width,
                self.style.line_color,
            ));
        }
        for point in &points {
            frame = frame.with_circle(CirclePrimitive::new(
                point.x,
                point.y,
                self.style.line_marker_radius_px,
                self.style.line_color,
            ));
        }

        let labels: Vec<&str> = data.iter().map(|d| d.label.as_str()).collect();
        self.finish(frame, canvas, &labels, titles)
    }

    /// Scatter markers on a categorical x axis.
    ///
    /// Data sharing a label share one band, in first-appearance order.
    pub fn scatter_chart(
        &self,
        data: &[ChartDatum],
        titles: &AxisTitles,
    ) -> LabResult<RenderFrame> {
        let mut band_of: IndexMap<&str, usize> = IndexMap::new();
        let mut samples = Vec::with_capacity(data.len());
        for datum in data {
            let next = band_of.len();
            let band = *band_of.entry(datum.label.as_str()).or_insert(next);
            samples.push((band, datum.value));
        }

        let canvas = self.canvas(band_of.len(), data.iter().map(|d| d.value), false)?;
        let dots = project_scatter_dots(
            &samples,
            canvas.bands,
            canvas.values,
            canvas.plot,
            self.style.scatter_radius_px,
        )?;

        let mut frame = self.frame_with_grid(canvas);
        for dot in dots {
            frame = frame.with_circle(CirclePrimitive::new(
                dot.center_x,
                dot.center_y,
                dot.radius,
                self.style.scatter_color,
            ));
        }

        let labels: Vec<&str> = band_of.keys().copied().collect();
        self.finish(frame, canvas, &labels, titles)
    }

    fn canvas(
        &self,
        band_count: usize,
        values: impl IntoIterator<Item = f64>,
        include_zero: bool,
    ) -> LabResult<Canvas> {
        if band_count == 0 {
            return Err(LabError::InvalidData(
                "chart needs at least one datum".to_owned(),
            ));
        }

        let plot = PlotArea::from_viewport(self.viewport, self.margins)?;
        let bands = BandScale::new(band_count, plot.left, plot.right())?;
        let values = LinearScale::from_values(
            values,
            ValueScaleTuning {
                include_zero,
                ..ValueScaleTuning::default()
            },
        )?;
        Ok(Canvas {
            plot,
            bands,
            values,
        })
    }

    fn frame_with_grid(&self, canvas: Canvas) -> RenderFrame {
        let plot = canvas.plot;
        let mut frame = RenderFrame::new(self.viewport).with_rect(RectPrimitive::new(
            0.0,
            0.0,
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
            self.style.background_color,
        ));

        for tick in canvas.values.ticks(self.style.value_tick_intervals) {
            let Ok(y) = canvas.values.domain_to_pixel(tick, plot.bottom(), plot.top) else {
                continue;
            };
            frame = frame.with_line(LinePrimitive::new(
                plot.left,
                y,
                plot.right(),
                y,
                self.style.grid_line_width,
                self.style.grid_color,
            ));
        }
        frame
    }

    fn finish(
        &self,
        mut frame: RenderFrame,
        canvas: Canvas,
        band_labels: &[&str],
        titles: &AxisTitles,
    ) -> LabResult<RenderFrame> {
        let plot = canvas.plot;
        let style = self.style;

        frame = frame
            .with_line(LinePrimitive::new(
                plot.left,
                plot.bottom(),
                plot.right(),
                plot.bottom(),
                style.axis_line_width,
                style.axis_color,
            ))
            .with_line(LinePrimitive::new(
                plot.left,
                plot.top,
                plot.left,
                plot.bottom(),
                style.axis_line_width,
                style.axis_color,
            ));

        for tick in canvas.values.ticks(style.value_tick_intervals) {
            let y = canvas.values.domain_to_pixel(tick, plot.bottom(), plot.top)?;
            frame = frame.with_text(TextPrimitive::new(
                format_tick(tick),
                plot.left - 6.0,
                y + style.font_size_px * 0.35,
                style.font_size_px,
                style.text_color,
                TextHAlign::Right,
            ));
        }

        let max_chars = max_label_chars(canvas.bands.band_width(), style.font_size_px);
        for (index, label) in band_labels.iter().enumerate() {
            if label.is_empty() {
                continue;
            }
            frame = frame.with_text(TextPrimitive::new(
                truncate_label(label, max_chars),
                canvas.bands.center(index)?,
                plot.bottom() + style.font_size_px + 6.0,
                style.font_size_px,
                style.text_color,
                TextHAlign::Center,
            ));
        }

        if let Some(title) = non_empty(titles.plot.as_deref()) {
            frame = frame.with_text(TextPrimitive::new(
                title,
                plot.left + plot.width / 2.0,
                plot.top - style.axis_title_font_size_px,
                style.axis_title_font_size_px,
                style.text_color,
                TextHAlign::Center,
            ));
        }
        if let Some(title) = non_empty(titles.x.as_deref()) {
            frame = frame.with_text(TextPrimitive::new(
                title,
                plot.left + plot.width / 2.0,
                f64::from(self.viewport.height) - 6.0,
                style.axis_title_font_size_px,
                style.text_color,
                TextHAlign::Center,
            ));
        }
        if let Some(title) = non_empty(titles.y.as_deref()) {
            frame = frame.with_text(TextPrimitive::new(
                title,
                4.0,
                style.axis_title_font_size_px + 2.0,
                style.axis_title_font_size_px,
                style.text_color,
                TextHAlign::Left,
            ));
        }

        frame.validate()?;
        Ok(frame)
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.trim().is_empty())
}

fn max_label_chars(band_width: f64, font_size_px: f64) -> usize {
    let approx_char_width = font_size_px * 0.6;
    ((band_width / approx_char_width).floor() as usize).max(1)
}

fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_owned();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Formats an axis tick with at most two decimals.
#[must_use]
pub fn format_tick(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    if rounded.fract() == 0.0 {
        return format!("{rounded:.0}");
    }
    format!("{rounded:.2}").trim_end_matches('0').to_owned()
}
