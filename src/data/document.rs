use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::coerce_numeric;
use crate::error::{LabError, LabResult};

/// One `{label, value}` entry of the document source.
///
/// Keys other than `label` and `value` are preserved in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDocumentRecord")]
pub struct DocumentRecord {
    pub label: String,
    pub value: Option<f64>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl DocumentRecord {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value: Some(value).filter(|value| value.is_finite()),
            extra: IndexMap::new(),
        }
    }
}

#[derive(Deserialize)]
struct RawDocumentRecord {
    #[serde(default)]
    label: Value,
    #[serde(default)]
    value: Value,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

impl From<RawDocumentRecord> for DocumentRecord {
    fn from(raw: RawDocumentRecord) -> Self {
        let label = match raw.label {
            Value::Null => String::new(),
            Value::String(text) => text,
            other => other.to_string(),
        };
        let value = match raw.value {
            Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
            Value::String(text) => coerce_numeric(&text),
            _ => None,
        };
        Self {
            label,
            value,
            extra: raw.extra,
        }
    }
}

#[derive(Deserialize)]
struct DocumentFile {
    data_points: Vec<DocumentRecord>,
}

/// Records of the document source, in document order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentData {
    records: Vec<DocumentRecord>,
}

impl DocumentData {
    #[must_use]
    pub fn from_records(records: Vec<DocumentRecord>) -> Self {
        Self { records }
    }

    /// Parses a JSON object holding a `data_points` array.
    pub fn from_json_str(input: &str) -> LabResult<Self> {
        let file: DocumentFile =
            serde_json::from_str(input).map_err(|err| LabError::InvalidData(err.to_string()))?;
        Ok(Self {
            records: file.data_points,
        })
    }

    #[must_use]
    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
