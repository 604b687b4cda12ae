//! chart-lab: a data visualization page rendered from local CSV/JSON sources.
//!
//! Every render re-executes the page top to bottom: both sources are loaded,
//! the derived views are recomputed from the session state, and the charts are
//! laid out as backend-agnostic frames.

pub mod aggregate;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod page;
pub mod render;
pub mod session;
pub mod telemetry;

pub use config::PageConfig;
pub use error::{LabError, LabResult};
pub use page::{GraphsPage, Page};
pub use session::SessionState;
