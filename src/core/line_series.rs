use crate::core::{BandScale, LinearScale, PixelPoint, PlotArea};
use crate::error::{LabError, LabResult};
use serde::{Deserialize, Serialize};

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Projects one value per category band into line vertices at band centers.
pub fn project_line_points(
    values: &[f64],
    bands: BandScale,
    value_scale: LinearScale,
    plot: PlotArea,
) -> LabResult<Vec<PixelPoint>> {
    if values.len() > bands.band_count() {
        return Err(LabError::InvalidData(format!(
            "{} values do not fit into {} bands",
            values.len(),
            bands.band_count()
        )));
    }

    let mut points = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        let x = bands.center(index)?;
        let y = value_scale.domain_to_pixel(*value, plot.bottom(), plot.top)?;
        points.push(PixelPoint::new(x, y));
    }
    Ok(points)
}

/// Joins adjacent vertices into segments; fewer than two vertices yield none.
#[must_use]
pub fn segments_from_points(points: &[PixelPoint]) -> Vec<LineSegment> {
    points
        .windows(2)
        .map(|pair| LineSegment {
            x1: pair[0].x,
            y1: pair[0].y,
            x2: pair[1].x,
            y2: pair[1].y,
        })
        .collect()
}
