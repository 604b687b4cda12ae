mod frame;
mod null_renderer;
mod primitives;
mod svg_backend;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use svg_backend::{SvgRenderStats, SvgRenderer};

pub(crate) use svg_backend::escape_xml;

use crate::error::LabResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from data loading and aggregation.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> LabResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
