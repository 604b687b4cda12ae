use std::fmt::Write as _;

use crate::error::{LabError, LabResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderer that serializes frames into standalone SVG markup.
///
/// Every `render` call replaces the previously produced document.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    background: Color,
    last_svg: String,
    last_stats: SvgRenderStats,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            background: Color::rgb(1.0, 1.0, 1.0),
            last_svg: String::new(),
            last_stats: SvgRenderStats::default(),
        }
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn last_svg(&self) -> &str {
        &self.last_svg
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    /// Renders `frame` and returns the SVG document.
    pub fn render_to_string(&mut self, frame: &RenderFrame) -> LabResult<String> {
        self.render(frame)?;
        Ok(self.last_svg.clone())
    }

    fn write_frame(&self, out: &mut String, frame: &RenderFrame) -> std::fmt::Result {
        let width = frame.viewport.width;
        let height = frame.viewport.height;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        writeln!(
            out,
            r#"  <rect x="0" y="0" width="{width}" height="{height}" {}/>"#,
            fill_attrs(self.background)
        )?;

        for rect in &frame.rects {
            write!(
                out,
                r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" {}"#,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                fill_attrs(rect.fill_color)
            )?;
            if rect.corner_radius > 0.0 {
                write!(out, r#" rx="{:.2}""#, rect.corner_radius)?;
            }
            if rect.border_width > 0.0 {
                write!(
                    out,
                    r#" stroke-width="{:.2}" {}"#,
                    rect.border_width,
                    stroke_attrs(rect.border_color)
                )?;
            }
            writeln!(out, "/>")?;
        }

        for line in &frame.lines {
            writeln!(
                out,
                r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke-width="{:.2}" {}/>"#,
                line.x1,
                line.y1,
                line.x2,
                line.y2,
                line.stroke_width,
                stroke_attrs(line.color)
            )?;
        }

        for circle in &frame.circles {
            writeln!(
                out,
                r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" {}/>"#,
                circle.center_x,
                circle.center_y,
                circle.radius,
                fill_attrs(circle.fill_color)
            )?;
        }

        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            writeln!(
                out,
                r#"  <text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{:.1}" text-anchor="{anchor}" {}>{}</text>"#,
                text.x,
                text.y,
                text.font_size_px,
                fill_attrs(text.color),
                escape_xml(&text.text)
            )?;
        }

        writeln!(out, "</svg>")
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> LabResult<()> {
        frame.validate()?;
        self.background.validate()?;

        let mut out = String::new();
        self.write_frame(&mut out, frame)
            .map_err(|err| LabError::InvalidData(format!("failed to write svg: {err}")))?;

        self.last_stats = SvgRenderStats {
            rects_drawn: frame.rects.len(),
            lines_drawn: frame.lines.len(),
            circles_drawn: frame.circles.len(),
            texts_drawn: frame.texts.len(),
        };
        self.last_svg = out;
        Ok(())
    }
}

fn fill_attrs(color: Color) -> String {
    if color.alpha >= 1.0 {
        format!(r#"fill="{}""#, color.to_hex_rgb())
    } else {
        format!(
            r#"fill="{}" fill-opacity="{:.3}""#,
            color.to_hex_rgb(),
            color.alpha
        )
    }
}

fn stroke_attrs(color: Color) -> String {
    if color.alpha >= 1.0 {
        format!(r#"stroke="{}""#, color.to_hex_rgb())
    } else {
        format!(
            r#"stroke="{}" stroke-opacity="{:.3}""#,
            color.to_hex_rgb(),
            color.alpha
        )
    }
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::{SvgRenderer, escape_xml};
    use crate::core::Viewport;
    use crate::render::{Color, RenderFrame, Renderer, TextHAlign, TextPrimitive};

    #[test]
    fn escapes_markup_in_labels() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &#39;c&#39;");
    }

    #[test]
    fn rejects_invalid_frame_without_touching_previous_output() {
        let mut renderer = SvgRenderer::default();
        let ok = RenderFrame::new(Viewport::new(10, 10)).with_text(TextPrimitive::new(
            "x",
            1.0,
            1.0,
            10.0,
            Color::rgb(0.0, 0.0, 0.0),
            TextHAlign::Left,
        ));
        renderer.render(&ok).expect("valid frame");
        let previous = renderer.last_svg().to_owned();

        let bad = RenderFrame::new(Viewport::new(0, 10));
        assert!(renderer.render(&bad).is_err());
        assert_eq!(renderer.last_svg(), previous);
    }
}
