use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use tracing::debug;

use crate::core::Viewport;
use crate::error::{LabError, LabResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Draws chart frames into an offscreen ARGB surface that can be saved as PNG.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    background: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: u32, height: u32) -> LabResult<Self> {
        let (Ok(surface_width), Ok(surface_height)) = (i32::try_from(width), i32::try_from(height))
        else {
            return Err(LabError::InvalidViewport { width, height });
        };
        if surface_width == 0 || surface_height == 0 {
            return Err(LabError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, surface_width, surface_height)
            .map_err(|err| cairo_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            background: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    /// Surface sized to a chart viewport.
    pub fn for_viewport(viewport: Viewport) -> LabResult<Self> {
        let viewport = viewport.validate()?;
        Self::new(viewport.width, viewport.height)
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn write_png(&self, path: &Path) -> LabResult<()> {
        let mut file = File::create(path).map_err(|source| LabError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| LabError::InvalidData(format!("failed to encode png: {err}")))?;
        debug!(path = %path.display(), "chart png written");
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> LabResult<()> {
        frame.validate()?;
        let context = Context::new(&self.surface)
            .map_err(|err| cairo_error("failed to create cairo context", err))?;

        set_color(&context, self.background);
        context
            .paint()
            .map_err(|err| cairo_error("failed to clear surface", err))?;

        for rect in &frame.rects {
            draw_rect(&context, rect)?;
        }
        for line in &frame.lines {
            draw_line(&context, line)?;
        }
        for circle in &frame.circles {
            draw_circle(&context, circle)?;
        }
        for text in &frame.texts {
            draw_text(&context, text);
        }

        self.last_stats = CairoRenderStats {
            rects_drawn: frame.rects.len(),
            lines_drawn: frame.lines.len(),
            circles_drawn: frame.circles.len(),
            texts_drawn: frame.texts.len(),
        };
        Ok(())
    }
}

fn set_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn draw_rect(context: &Context, rect: &RectPrimitive) -> LabResult<()> {
    rect_path(context, rect);
    set_color(context, rect.fill_color);
    if rect.border_width <= 0.0 {
        return context
            .fill()
            .map_err(|err| cairo_error("failed to fill rectangle", err));
    }

    context
        .fill_preserve()
        .map_err(|err| cairo_error("failed to fill rectangle", err))?;
    set_color(context, rect.border_color);
    context.set_line_width(rect.border_width);
    context
        .stroke()
        .map_err(|err| cairo_error("failed to stroke rectangle border", err))
}

fn rect_path(context: &Context, rect: &RectPrimitive) {
    let radius = rect
        .corner_radius
        .min(rect.width / 2.0)
        .min(rect.height / 2.0);
    if radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let (left, top) = (rect.x, rect.y);
    let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);
    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn draw_line(context: &Context, line: &LinePrimitive) -> LabResult<()> {
    set_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| cairo_error("failed to stroke line", err))
}

fn draw_circle(context: &Context, circle: &CirclePrimitive) -> LabResult<()> {
    context.new_sub_path();
    context.arc(circle.center_x, circle.center_y, circle.radius, 0.0, TAU);
    set_color(context, circle.fill_color);
    context
        .fill()
        .map_err(|err| cairo_error("failed to fill circle", err))
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font = FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
    layout.set_font_description(Some(&font));
    layout.set_text(&text.text);

    let width = f64::from(layout.pixel_size().0);
    let left = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - width / 2.0,
        TextHAlign::Right => text.x - width,
    };
    // y is a baseline; pango positions layouts by their top edge.
    let ascent = f64::from(layout.baseline()) / f64::from(pango::SCALE);

    set_color(context, text.color);
    context.move_to(left, text.y - ascent);
    pangocairo::functions::show_layout(context, &layout);
}

fn cairo_error(context: &str, err: cairo::Error) -> LabError {
    LabError::InvalidData(format!("{context}: {err}"))
}
