use crate::core::{BandScale, LinearScale, PlotArea};
use crate::error::{LabError, LabResult};
use serde::{Deserialize, Serialize};

/// Deterministic bar geometry for one category band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub x_center: f64,
    pub x_left: f64,
    pub x_right: f64,
    pub y_top: f64,
    pub y_bottom: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn width(self) -> f64 {
        self.x_right - self.x_left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y_bottom - self.y_top
    }
}

/// Projects one value per category band into vertical bars.
///
/// Bars span from the zero baseline (clamped into the value domain) to the
/// sample value. `bar_width_ratio` is the share of each band a bar covers.
pub fn project_category_bars(
    values: &[f64],
    bands: BandScale,
    value_scale: LinearScale,
    plot: PlotArea,
    bar_width_ratio: f64,
) -> LabResult<Vec<BarGeometry>> {
    if !bar_width_ratio.is_finite() || bar_width_ratio <= 0.0 || bar_width_ratio > 1.0 {
        return Err(LabError::InvalidData(
            "bar width ratio must be finite and in (0, 1]".to_owned(),
        ));
    }
    if values.len() > bands.band_count() {
        return Err(LabError::InvalidData(format!(
            "{} values do not fit into {} bands",
            values.len(),
            bands.band_count()
        )));
    }

    if values.is_empty() {
        return Ok(Vec::new());
    }

    let baseline_y = value_scale.domain_to_pixel(value_scale.clamp(0.0), plot.bottom(), plot.top)?;
    let half_width = bands.band_width() * bar_width_ratio * 0.5;

    let mut bars = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        let x_center = bands.center(index)?;
        let y_value = value_scale.domain_to_pixel(*value, plot.bottom(), plot.top)?;
        bars.push(BarGeometry {
            x_center,
            x_left: x_center - half_width,
            x_right: x_center + half_width,
            y_top: y_value.min(baseline_y),
            y_bottom: y_value.max(baseline_y),
        });
    }

    Ok(bars)
}
