use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabResult};
use crate::render::Color;

/// Colors and sizing shared by the three page charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub background_color: Color,
    pub axis_color: Color,
    pub grid_color: Color,
    pub text_color: Color,
    pub bar_color: Color,
    pub line_color: Color,
    pub scatter_color: Color,
    pub font_size_px: f64,
    pub axis_title_font_size_px: f64,
    pub axis_line_width: f64,
    pub grid_line_width: f64,
    pub series_line_width: f64,
    pub bar_width_ratio: f64,
    pub line_marker_radius_px: f64,
    pub scatter_radius_px: f64,
    pub value_tick_intervals: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb(1.0, 1.0, 1.0),
            axis_color: Color::rgb(0.35, 0.35, 0.38),
            grid_color: Color::rgba(0.35, 0.35, 0.38, 0.18),
            text_color: Color::rgb(0.16, 0.16, 0.18),
            bar_color: Color::rgb(0.16, 0.47, 0.71),
            line_color: Color::rgb(0.16, 0.47, 0.71),
            // matplotlib "orange"
            scatter_color: Color::rgb(1.0, 0.647, 0.0),
            font_size_px: 11.0,
            axis_title_font_size_px: 12.0,
            axis_line_width: 1.0,
            grid_line_width: 1.0,
            series_line_width: 2.0,
            bar_width_ratio: 0.7,
            line_marker_radius_px: 3.0,
            scatter_radius_px: 5.0,
            value_tick_intervals: 5,
        }
    }
}

impl ChartStyle {
    pub fn validate(self) -> LabResult<Self> {
        for color in [
            self.background_color,
            self.axis_color,
            self.grid_color,
            self.text_color,
            self.bar_color,
            self.line_color,
            self.scatter_color,
        ] {
            color.validate()?;
        }

        for (name, value) in [
            ("font_size_px", self.font_size_px),
            ("axis_title_font_size_px", self.axis_title_font_size_px),
            ("axis_line_width", self.axis_line_width),
            ("grid_line_width", self.grid_line_width),
            ("series_line_width", self.series_line_width),
            ("line_marker_radius_px", self.line_marker_radius_px),
            ("scatter_radius_px", self.scatter_radius_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LabError::InvalidData(format!(
                    "chart style `{name}` must be finite and > 0"
                )));
            }
        }

        if !self.bar_width_ratio.is_finite()
            || self.bar_width_ratio <= 0.0
            || self.bar_width_ratio > 1.0
        {
            return Err(LabError::InvalidData(
                "chart style `bar_width_ratio` must be in (0, 1]".to_owned(),
            ));
        }
        if self.value_tick_intervals == 0 {
            return Err(LabError::InvalidData(
                "chart style `value_tick_intervals` must be > 0".to_owned(),
            ));
        }

        Ok(self)
    }
}
