use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{PlotMargins, Viewport};
use crate::error::{LabError, LabResult};
use crate::page::ChartStyle;
use crate::session::{SessionState, ThresholdSlider};

/// Page bootstrap configuration.
///
/// This type is serializable so hosts can keep page setup in a JSON file;
/// every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_csv_file_name")]
    pub csv_file_name: String,
    #[serde(default = "default_json_file_name")]
    pub json_file_name: String,
    #[serde(default = "default_chart_viewport")]
    pub chart_viewport: Viewport,
    #[serde(default)]
    pub plot_margins: PlotMargins,
    #[serde(default)]
    pub threshold_slider: ThresholdSlider,
    #[serde(default)]
    pub chart_style: ChartStyle,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}

impl PageConfig {
    /// Creates a config reading `data.csv` and `data.json` from `data_dir`.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            csv_file_name: default_csv_file_name(),
            json_file_name: default_json_file_name(),
            chart_viewport: default_chart_viewport(),
            plot_margins: PlotMargins::default(),
            threshold_slider: ThresholdSlider::default(),
            chart_style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    #[must_use]
    pub fn with_chart_viewport(mut self, viewport: Viewport) -> Self {
        self.chart_viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_threshold_slider(mut self, slider: ThresholdSlider) -> Self {
        self.threshold_slider = slider;
        self
    }

    pub fn from_json_str(input: &str) -> LabResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| LabError::InvalidData(format!("failed to parse page config: {e}")))?;
        config.validate()
    }

    pub fn from_json_file(path: &Path) -> LabResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| LabError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw).map_err(|err| match err {
            LabError::InvalidData(message) => LabError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    pub fn to_json_pretty(&self) -> LabResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LabError::InvalidData(format!("failed to serialize page config: {e}")))
    }

    pub fn validate(self) -> LabResult<Self> {
        self.chart_viewport.validate()?;
        self.threshold_slider.validate()?;
        self.chart_style.validate()?;
        for (name, value) in [
            ("csv_file_name", &self.csv_file_name),
            ("json_file_name", &self.json_file_name),
        ] {
            if value.trim().is_empty() {
                return Err(LabError::InvalidData(format!("`{name}` must not be empty")));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.data_dir.join(&self.csv_file_name)
    }

    #[must_use]
    pub fn json_path(&self) -> PathBuf {
        self.data_dir.join(&self.json_file_name)
    }

    /// Fresh session state bound to this page's slider bounds.
    pub fn initial_session(&self) -> LabResult<SessionState> {
        SessionState::new(self.threshold_slider)
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_csv_file_name() -> String {
    "data.csv".to_owned()
}

fn default_json_file_name() -> String {
    "data.json".to_owned()
}

fn default_chart_viewport() -> Viewport {
    Viewport::new(640, 360)
}
