use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabResult};

/// Linear mapping from a value domain onto an arbitrary pixel span.
///
/// Passing `pixel_start > pixel_end` yields an inverted axis, which is how the
/// vertical value axis maps larger values closer to the top of the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

/// Tuning controls for value-domain autoscaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScaleTuning {
    pub padding_ratio: f64,
    pub include_zero: bool,
    pub min_span_absolute: f64,
}

impl Default for ValueScaleTuning {
    fn default() -> Self {
        Self {
            padding_ratio: 0.10,
            include_zero: true,
            min_span_absolute: 1.0,
        }
    }
}

impl ValueScaleTuning {
    fn validate(self) -> LabResult<Self> {
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            return Err(LabError::InvalidData(
                "value scale padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_span_absolute.is_finite() || self.min_span_absolute <= 0.0 {
            return Err(LabError::InvalidData(
                "value scale min span must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> LabResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(LabError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    /// Computes a padded domain covering every value in `values`.
    pub fn from_values(
        values: impl IntoIterator<Item = f64>,
        tuning: ValueScaleTuning,
    ) -> LabResult<Self> {
        let tuning = tuning.validate()?;

        let mut min = None::<OrderedFloat<f64>>;
        let mut max = None::<OrderedFloat<f64>>;
        for value in values {
            if !value.is_finite() {
                return Err(LabError::InvalidData(
                    "scale values must be finite".to_owned(),
                ));
            }
            let value = OrderedFloat(value);
            min = Some(min.map_or(value, |current| current.min(value)));
            max = Some(max.map_or(value, |current| current.max(value)));
        }

        let (Some(min), Some(max)) = (min, max) else {
            return Err(LabError::InvalidData(
                "scale cannot be built from empty data".to_owned(),
            ));
        };

        let (mut min, mut max) = (min.into_inner(), max.into_inner());
        if tuning.include_zero {
            min = min.min(0.0);
            max = max.max(0.0);
        }

        let span = max - min;
        if span < tuning.min_span_absolute {
            let half = (tuning.min_span_absolute - span) * 0.5;
            min -= half;
            max += half;
        }

        let padding = (max - min) * tuning.padding_ratio;
        // Zero stays pinned to the axis when it bounds the data.
        let start = if tuning.include_zero && min == 0.0 {
            0.0
        } else {
            min - padding
        };
        let end = if tuning.include_zero && max == 0.0 {
            0.0
        } else {
            max + padding
        };

        Self::new(start, end)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Clamps `value` into the scale domain.
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        let lo = self.domain_start.min(self.domain_end);
        let hi = self.domain_start.max(self.domain_end);
        value.clamp(lo, hi)
    }

    pub fn domain_to_pixel(self, value: f64, pixel_start: f64, pixel_end: f64) -> LabResult<f64> {
        validate_pixel_span(pixel_start, pixel_end)?;
        if !value.is_finite() {
            return Err(LabError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(pixel_start + normalized * (pixel_end - pixel_start))
    }

    pub fn pixel_to_domain(self, pixel: f64, pixel_start: f64, pixel_end: f64) -> LabResult<f64> {
        validate_pixel_span(pixel_start, pixel_end)?;
        if !pixel.is_finite() {
            return Err(LabError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (pixel - pixel_start) / (pixel_end - pixel_start);
        Ok(self.domain_start + normalized * span)
    }

    /// Evenly spaced tick values from domain start to domain end (inclusive).
    #[must_use]
    pub fn ticks(self, intervals: usize) -> Vec<f64> {
        if intervals == 0 {
            return vec![self.domain_start];
        }
        let step = (self.domain_end - self.domain_start) / intervals as f64;
        (0..=intervals)
            .map(|i| self.domain_start + step * i as f64)
            .collect()
    }
}

fn validate_pixel_span(pixel_start: f64, pixel_end: f64) -> LabResult<()> {
    if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start == pixel_end {
        return Err(LabError::InvalidData(
            "pixel span must be finite and non-zero".to_owned(),
        ));
    }
    Ok(())
}

/// Categorical axis that splits a pixel span into equal bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    band_count: usize,
    pixel_start: f64,
    pixel_end: f64,
}

impl BandScale {
    pub fn new(band_count: usize, pixel_start: f64, pixel_end: f64) -> LabResult<Self> {
        if band_count == 0 {
            return Err(LabError::InvalidData(
                "band scale needs at least one band".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_end <= pixel_start {
            return Err(LabError::InvalidData(
                "band scale pixel span must be finite and increasing".to_owned(),
            ));
        }

        Ok(Self {
            band_count,
            pixel_start,
            pixel_end,
        })
    }

    #[must_use]
    pub fn band_count(self) -> usize {
        self.band_count
    }

    #[must_use]
    pub fn band_width(self) -> f64 {
        (self.pixel_end - self.pixel_start) / self.band_count as f64
    }

    pub fn center(self, index: usize) -> LabResult<f64> {
        if index >= self.band_count {
            return Err(LabError::InvalidData(format!(
                "band index {index} out of range for {} bands",
                self.band_count
            )));
        }
        Ok(self.pixel_start + self.band_width() * (index as f64 + 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::{BandScale, LinearScale, ValueScaleTuning};

    #[test]
    fn autoscale_pins_zero_baseline_for_positive_values() {
        let scale = LinearScale::from_values([2.0, 8.0], ValueScaleTuning::default())
            .expect("scale from values");
        let (start, end) = scale.domain();
        assert_eq!(start, 0.0);
        assert!((end - 8.8).abs() <= 1e-9);
    }

    #[test]
    fn autoscale_widens_degenerate_domain() {
        let tuning = ValueScaleTuning {
            include_zero: false,
            ..ValueScaleTuning::default()
        };
        let scale = LinearScale::from_values([3.0, 3.0], tuning).expect("scale from values");
        let (start, end) = scale.domain();
        assert!(start < 3.0 && end > 3.0);
    }

    #[test]
    fn band_centers_are_evenly_spaced() {
        let bands = BandScale::new(4, 0.0, 400.0).expect("bands");
        assert_eq!(bands.band_width(), 100.0);
        assert_eq!(bands.center(0).expect("center"), 50.0);
        assert_eq!(bands.center(3).expect("center"), 350.0);
        assert!(bands.center(4).is_err());
    }
}
