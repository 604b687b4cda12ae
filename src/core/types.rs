use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> LabResult<Self> {
        if !self.is_valid() {
            return Err(LabError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Space reserved around the plot for title, axes and category labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for PlotMargins {
    fn default() -> Self {
        Self {
            top: 36.0,
            right: 16.0,
            bottom: 44.0,
            left: 56.0,
        }
    }
}

/// Pixel rectangle inside a viewport where series geometry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn from_viewport(viewport: Viewport, margins: PlotMargins) -> LabResult<Self> {
        viewport.validate()?;
        for (name, value) in [
            ("top", margins.top),
            ("right", margins.right),
            ("bottom", margins.bottom),
            ("left", margins.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LabError::InvalidData(format!(
                    "plot margin `{name}` must be finite and >= 0"
                )));
            }
        }

        let width = f64::from(viewport.width) - margins.left - margins.right;
        let height = f64::from(viewport.height) - margins.top - margins.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(LabError::InvalidData(
                "plot margins leave no drawable area".to_owned(),
            ));
        }

        Ok(Self {
            left: margins.left,
            top: margins.top,
            width,
            height,
        })
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// Projected point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
