//! Interaction state that survives page re-renders within one session.
//!
//! The state is an explicit context object handed to the page renderer. Each
//! value has exactly one mutation point, the widget bound to it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LabError, LabResult};

/// Bounds and default of the threshold slider widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSlider {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl Default for ThresholdSlider {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 5.0,
            default: 2.0,
            step: 0.01,
        }
    }
}

impl ThresholdSlider {
    pub fn validate(self) -> LabResult<Self> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(LabError::InvalidData(
                "slider bounds must be finite with min < max".to_owned(),
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(LabError::InvalidData(
                "slider step must be finite and > 0".to_owned(),
            ));
        }
        self.check(self.default)?;
        Ok(self)
    }

    /// Rejects values the slider could not produce.
    pub fn check(self, value: f64) -> LabResult<f64> {
        if !value.is_finite() || value < self.min || value > self.max {
            return Err(LabError::OutOfRange {
                name: "usage threshold",
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }

    /// Rounds an in-range `value` to the nearest position the slider can take.
    #[must_use]
    pub fn snap(self, value: f64) -> f64 {
        let steps = ((value - self.min) / self.step).round();
        let snapped = (self.min + steps * self.step).clamp(self.min, self.max);
        // Drop float noise left by the step multiplication.
        let places = (-self.step.log10()).ceil().clamp(0.0, 12.0) as i32;
        let scale = 10f64.powi(places);
        (snapped * scale).round() / scale
    }
}

/// Keyword and threshold values bound to the page widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    filter_keyword: String,
    usage_threshold: f64,
    slider: ThresholdSlider,
    revision: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        let slider = ThresholdSlider::default();
        Self {
            filter_keyword: String::new(),
            usage_threshold: slider.default,
            slider,
            revision: 0,
        }
    }
}

impl SessionState {
    /// Creates state with an empty keyword and the slider default threshold.
    pub fn new(slider: ThresholdSlider) -> LabResult<Self> {
        let slider = slider.validate()?;
        Ok(Self {
            filter_keyword: String::new(),
            usage_threshold: slider.default,
            slider,
            revision: 0,
        })
    }

    #[must_use]
    pub fn filter_keyword(&self) -> &str {
        &self.filter_keyword
    }

    #[must_use]
    pub fn usage_threshold(&self) -> f64 {
        self.usage_threshold
    }

    #[must_use]
    pub fn slider(&self) -> ThresholdSlider {
        self.slider
    }

    /// Number of accepted widget mutations since the session started.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Text-input widget binding. Returns whether the value changed.
    pub fn set_filter_keyword(&mut self, keyword: impl Into<String>) -> bool {
        let keyword = keyword.into();
        if keyword == self.filter_keyword {
            return false;
        }
        debug!(from = %self.filter_keyword, to = %keyword, "filter keyword changed");
        self.filter_keyword = keyword;
        self.revision += 1;
        true
    }

    /// Slider widget binding. Returns whether the value changed.
    ///
    /// Accepted values are snapped to the slider step.
    pub fn set_usage_threshold(&mut self, threshold: f64) -> LabResult<bool> {
        let threshold = self.slider.snap(self.slider.check(threshold)?);
        if threshold == self.usage_threshold {
            return Ok(false);
        }
        debug!(
            from = self.usage_threshold,
            to = threshold,
            "usage threshold changed"
        );
        self.usage_threshold = threshold;
        self.revision += 1;
        Ok(true)
    }
}

/// Formats a threshold the way it appears in titles: integral values keep one
/// decimal (`2.0`), others use the shortest round-trip form.
#[must_use]
pub fn format_threshold(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionState, ThresholdSlider, format_threshold};
    use crate::error::LabError;

    #[test]
    fn defaults_match_widget_initial_values() {
        let state = SessionState::default();
        assert_eq!(state.filter_keyword(), "");
        assert_eq!(state.usage_threshold(), 2.0);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn unchanged_values_do_not_bump_revision() {
        let mut state = SessionState::default();
        assert!(!state.set_filter_keyword(""));
        assert!(!state.set_usage_threshold(2.0).expect("in range"));
        assert_eq!(state.revision(), 0);

        assert!(state.set_filter_keyword("sleep"));
        assert!(state.set_usage_threshold(3.25).expect("in range"));
        assert_eq!(state.revision(), 2);
    }

    #[test]
    fn slider_rejects_out_of_range_values() {
        let mut state = SessionState::default();
        let err = state.set_usage_threshold(5.5).expect_err("above max");
        assert!(matches!(err, LabError::OutOfRange { .. }));
        assert!(state.set_usage_threshold(f64::NAN).is_err());
        assert_eq!(state.usage_threshold(), 2.0);
    }

    #[test]
    fn threshold_snaps_to_slider_step() {
        let mut state = SessionState::default();
        assert!(state.set_usage_threshold(2.333).expect("in range"));
        assert_eq!(state.usage_threshold(), 2.33);
        assert!(!state.set_usage_threshold(2.3312).expect("in range"));
        assert_eq!(state.revision(), 1);

        let coarse = ThresholdSlider {
            step: 0.5,
            ..ThresholdSlider::default()
        };
        assert_eq!(coarse.snap(4.9), 5.0);
        assert_eq!(coarse.snap(1.2), 1.0);
        assert_eq!(coarse.snap(0.1), 0.0);
    }

    #[test]
    fn invalid_slider_bounds_are_rejected() {
        let slider = ThresholdSlider {
            min: 3.0,
            max: 1.0,
            ..ThresholdSlider::default()
        };
        assert!(SessionState::new(slider).is_err());
    }

    #[test]
    fn threshold_formatting_keeps_one_decimal_for_integers() {
        assert_eq!(format_threshold(2.0), "2.0");
        assert_eq!(format_threshold(2.5), "2.5");
        assert_eq!(format_threshold(0.1 + 0.2), "0.30000000000000004");
    }
}
