use std::io::Read;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabResult};

pub const CATEGORY_FIELD: &str = "category";
pub const VALUE_FIELD: &str = "value";

/// One record of the tabular source, keyed by header name in column order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TabularRow {
    fields: IndexMap<String, String>,
}

impl TabularRow {
    /// Builds a row carrying only the `category` and `value` fields.
    #[must_use]
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        let mut fields = IndexMap::with_capacity(2);
        fields.insert(CATEGORY_FIELD.to_owned(), category.into());
        fields.insert(VALUE_FIELD.to_owned(), value.into());
        Self { fields }
    }

    #[must_use]
    pub fn from_fields(fields: IndexMap<String, String>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Category text; an empty cell counts as absent.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.field(CATEGORY_FIELD).filter(|category| !category.is_empty())
    }

    #[must_use]
    pub fn raw_value(&self) -> Option<&str> {
        self.field(VALUE_FIELD)
    }

    /// `value` coerced to a finite number; `None` when coercion fails.
    #[must_use]
    pub fn numeric_value(&self) -> Option<f64> {
        self.raw_value().and_then(coerce_numeric)
    }
}

/// Coerces numeric text into a finite `f64`, ignoring surrounding whitespace.
#[must_use]
pub fn coerce_numeric(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Ordered rows of the tabular source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TabularData {
    headers: Vec<String>,
    rows: Vec<TabularRow>,
}

impl TabularData {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a data set from rows created with [`TabularRow::new`].
    #[must_use]
    pub fn from_rows(rows: Vec<TabularRow>) -> Self {
        Self {
            headers: vec![CATEGORY_FIELD.to_owned(), VALUE_FIELD.to_owned()],
            rows,
        }
    }

    /// Parses CSV with a header row that must include `category` and `value`.
    ///
    /// Short rows keep the cells they have; missing trailing cells are absent
    /// fields. Rows with more cells than the header are rejected.
    pub fn from_reader<R: Read>(reader: R) -> LabResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|err| LabError::InvalidData(err.to_string()))?
            .iter()
            .map(str::to_owned)
            .collect();

        for required in [CATEGORY_FIELD, VALUE_FIELD] {
            if !headers.iter().any(|header| header == required) {
                return Err(LabError::InvalidData(format!(
                    "missing required column `{required}`"
                )));
            }
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| LabError::InvalidData(err.to_string()))?;
            if record.len() > headers.len() {
                let line = record.position().map_or(0, |position| position.line());
                return Err(LabError::InvalidData(format!(
                    "line {line} has {} fields but the header has {}",
                    record.len(),
                    headers.len()
                )));
            }
            let mut fields = IndexMap::with_capacity(headers.len());
            for (header, cell) in headers.iter().zip(record.iter()) {
                // First occurrence wins for duplicated header names.
                fields
                    .entry(header.clone())
                    .or_insert_with(|| cell.to_owned());
            }
            rows.push(TabularRow::from_fields(fields));
        }

        Ok(Self { headers, rows })
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[TabularRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{TabularData, coerce_numeric};

    #[test]
    fn parses_rows_in_file_order_and_keeps_extra_columns() {
        let input = "timestamp,category,value\n1,Sleep,7\n2,Study, 3.5 \n";
        let data = TabularData::from_reader(input.as_bytes()).expect("parse csv");

        assert_eq!(data.headers(), ["timestamp", "category", "value"]);
        assert_eq!(data.len(), 2);
        assert_eq!(data.rows()[0].category(), Some("Sleep"));
        assert_eq!(data.rows()[1].field("timestamp"), Some("2"));
        assert_eq!(data.rows()[1].numeric_value(), Some(3.5));
    }

    #[test]
    fn missing_value_column_is_rejected() {
        let err = TabularData::from_reader("category\nSleep\n".as_bytes())
            .expect_err("value column is required");
        assert!(err.to_string().contains("`value`"));
    }

    #[test]
    fn rows_longer_than_header_are_rejected() {
        let input = "category,value\nSleep,7,extra\n";
        let err = TabularData::from_reader(input.as_bytes()).expect_err("extra field");
        assert!(err.to_string().contains("line 2 has 3 fields"));
    }

    #[test]
    fn short_rows_keep_present_cells_and_leave_the_rest_absent() {
        let input = "category,value\nSleep,7\nStudy,3\nFood\n";
        let data = TabularData::from_reader(input.as_bytes()).expect("parse csv");

        assert_eq!(data.len(), 3);
        let food = &data.rows()[2];
        assert_eq!(food.category(), Some("Food"));
        assert_eq!(food.raw_value(), None);
        assert_eq!(food.numeric_value(), None);
    }

    #[test]
    fn header_only_input_yields_no_rows() {
        let data = TabularData::from_reader("category,value\n".as_bytes()).expect("parse csv");
        assert!(data.is_empty());
    }

    #[test]
    fn coercion_rejects_text_and_non_finite_values() {
        assert_eq!(coerce_numeric(" 4 "), Some(4.0));
        assert_eq!(coerce_numeric("four"), None);
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("NaN"), None);
        assert_eq!(coerce_numeric("inf"), None);
    }
}
