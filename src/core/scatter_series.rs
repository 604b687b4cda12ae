use crate::core::{BandScale, LinearScale, PlotArea};
use crate::error::{LabError, LabResult};
use serde::{Deserialize, Serialize};

/// One scatter marker in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterDot {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

/// Projects `(band index, value)` samples into scatter markers.
///
/// Several samples may share a band; they stack vertically by value.
pub fn project_scatter_dots(
    samples: &[(usize, f64)],
    bands: BandScale,
    value_scale: LinearScale,
    plot: PlotArea,
    radius_px: f64,
) -> LabResult<Vec<ScatterDot>> {
    if !radius_px.is_finite() || radius_px <= 0.0 {
        return Err(LabError::InvalidData(
            "scatter radius must be finite and > 0".to_owned(),
        ));
    }

    let mut dots = Vec::with_capacity(samples.len());
    for (band, value) in samples {
        dots.push(ScatterDot {
            center_x: bands.center(*band)?,
            center_y: value_scale.domain_to_pixel(*value, plot.bottom(), plot.top)?,
            radius: radius_px,
        });
    }
    Ok(dots)
}
