//! Data sources for the graphs page.
//!
//! The tabular (`data.csv`) and document (`data.json`) collections are loaded
//! independently and never merged. Loading never fails: missing or malformed
//! input degrades into an empty collection plus a status banner.

mod document;
mod loader;
mod status;
mod tabular;

pub use document::{DocumentData, DocumentRecord};
pub use loader::{
    DataSources, LoadOutcome, Loaded, SourceKind, load_document, load_tabular, read_document,
    read_tabular,
};
pub use status::{StatusLevel, StatusMessage};
pub use tabular::{CATEGORY_FIELD, TabularData, TabularRow, VALUE_FIELD, coerce_numeric};
