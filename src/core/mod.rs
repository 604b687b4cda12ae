pub mod bar_series;
pub mod line_series;
pub mod scale;
pub mod scatter_series;
pub mod types;

pub use bar_series::{BarGeometry, project_category_bars};
pub use line_series::{LineSegment, project_line_points, segments_from_points};
pub use scale::{BandScale, LinearScale, ValueScaleTuning};
pub use scatter_series::{ScatterDot, project_scatter_dots};
pub use types::{PixelPoint, PlotArea, PlotMargins, Viewport};
