use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PageConfig;
use crate::data::{DocumentData, StatusMessage, TabularData};
use crate::error::{LabError, LabResult};

/// Which of the two page sources a load refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Tabular,
    Document,
}

impl SourceKind {
    /// Format name shown to the viewer.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Tabular => "CSV",
            Self::Document => "JSON",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadOutcome {
    Loaded,
    Missing,
    Failed,
}

/// Result of one source load: always a usable value plus a status banner.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub source: SourceKind,
    pub outcome: LoadOutcome,
    pub data: T,
    pub status: StatusMessage,
}

impl<T> Loaded<T> {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.outcome == LoadOutcome::Loaded
    }
}

impl<T: Default> Loaded<T> {
    fn from_result(source: SourceKind, path: &Path, result: LabResult<T>) -> Self {
        let name = source.display_name();
        match result {
            Ok(data) => Self {
                source,
                outcome: LoadOutcome::Loaded,
                data,
                status: StatusMessage::success(format!("{name} data loaded successfully.")),
            },
            Err(LabError::FileMissing { .. }) => {
                warn!(path = %path.display(), source = name, "data source not found");
                Self {
                    source,
                    outcome: LoadOutcome::Missing,
                    data: T::default(),
                    status: StatusMessage::warning(format!("{name} file not found.")),
                }
            }
            Err(err) => {
                warn!(path = %path.display(), source = name, error = %err, "data source failed to load");
                Self {
                    source,
                    outcome: LoadOutcome::Failed,
                    data: T::default(),
                    status: StatusMessage::error(format!(
                        "Error loading {name}: {}",
                        err.cause_text()
                    )),
                }
            }
        }
    }
}

/// Reads and parses the tabular source, propagating every failure.
pub fn read_tabular(path: &Path) -> LabResult<TabularData> {
    let file = open_source(path)?;
    TabularData::from_reader(BufReader::new(file)).map_err(|err| into_parse_error(path, err))
}

/// Reads and parses the document source, propagating every failure.
pub fn read_document(path: &Path) -> LabResult<DocumentData> {
    let raw = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    DocumentData::from_json_str(&raw).map_err(|err| into_parse_error(path, err))
}

/// Loads the tabular source, substituting an empty data set on any failure.
#[must_use]
pub fn load_tabular(path: &Path) -> Loaded<TabularData> {
    let result = read_tabular(path);
    if let Ok(data) = &result {
        debug!(path = %path.display(), rows = data.len(), "loaded tabular source");
    }
    Loaded::from_result(SourceKind::Tabular, path, result)
}

/// Loads the document source, substituting an empty document on any failure.
#[must_use]
pub fn load_document(path: &Path) -> Loaded<DocumentData> {
    let result = read_document(path);
    if let Ok(data) = &result {
        debug!(path = %path.display(), records = data.len(), "loaded document source");
    }
    Loaded::from_result(SourceKind::Document, path, result)
}

fn open_source(path: &Path) -> LabResult<File> {
    File::open(path).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: io::Error) -> LabError {
    if source.kind() == io::ErrorKind::NotFound {
        LabError::FileMissing {
            path: path.to_path_buf(),
        }
    } else {
        LabError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn into_parse_error(path: &Path, err: LabError) -> LabError {
    match err {
        LabError::InvalidData(message) => LabError::Parse {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    }
}

/// Both page sources, loaded once per render.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSources {
    pub tabular: Loaded<TabularData>,
    pub document: Loaded<DocumentData>,
}

impl DataSources {
    #[must_use]
    pub fn load(csv_path: &Path, json_path: &Path) -> Self {
        Self {
            tabular: load_tabular(csv_path),
            document: load_document(json_path),
        }
    }

    #[must_use]
    pub fn load_from_config(config: &PageConfig) -> Self {
        Self::load(&config.csv_path(), &config.json_path())
    }

    /// Per-source banners in load order.
    #[must_use]
    pub fn statuses(&self) -> [&StatusMessage; 2] {
        [&self.tabular.status, &self.document.status]
    }

    /// Summary banner emitted after both loads.
    #[must_use]
    pub fn readiness_status(&self) -> StatusMessage {
        let unavailable: Vec<&str> = [
            (self.tabular.is_loaded(), self.tabular.source),
            (self.document.is_loaded(), self.document.source),
        ]
        .into_iter()
        .filter(|(loaded, _)| !loaded)
        .map(|(_, source)| source.display_name())
        .collect();

        if unavailable.is_empty() {
            StatusMessage::success("All data sources are ready for visualization!")
        } else {
            StatusMessage::warning(format!(
                "Unavailable data sources: {}. Graphs that depend on them are skipped.",
                unavailable.join(", ")
            ))
        }
    }
}
