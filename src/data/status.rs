use serde::{Deserialize, Serialize};

/// Severity of a viewer-facing status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl StatusLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    #[must_use]
    pub fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(StatusLevel::Success, text)
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(StatusLevel::Info, text)
    }

    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(StatusLevel::Warning, text)
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(StatusLevel::Error, text)
    }
}
