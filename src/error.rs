use std::path::PathBuf;

use thiserror::Error;

pub type LabResult<T> = Result<T, LabError>;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("file not found: {}", path.display())]
    FileMissing { path: PathBuf },

    #[error("failed to parse `{}`: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl LabError {
    /// Short cause text used in viewer-facing status banners.
    #[must_use]
    pub fn cause_text(&self) -> String {
        match self {
            Self::Parse { message, .. } => message.clone(),
            Self::Io { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}
