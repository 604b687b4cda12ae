//! Presenter: lays out status banners, widgets and charts for one render.

mod chart_builder;
mod html;
mod json_contract;
mod model;
mod presenter;
mod style;

pub use chart_builder::{AxisTitles, ChartDatum, ChartFrameBuilder, format_tick};
pub use json_contract::{PAGE_JSON_SCHEMA_V1, PageJsonContractV1};
pub use model::{ChartBlock, ChartKind, Page, PageBlock};
pub use presenter::{
    CSV_EMPTY_STATUS, GraphsPage, JSON_MISSING_STATUS, KEYWORD_INPUT_LABEL, NO_MATCH_STATUS,
    NOTHING_ABOVE_THRESHOLD_STATUS, PAGE_ICON, PAGE_TITLE, THRESHOLD_SLIDER_LABEL,
    TOTALS_OVERFLOW_STATUS,
};
pub use style::ChartStyle;
