use std::fmt::Write as _;

use crate::error::{LabError, LabResult};
use crate::page::{Page, PageBlock};
use crate::render::{SvgRenderer, escape_xml};

const PAGE_CSS: &str = r#"
body { font-family: sans-serif; max-width: 760px; margin: 2rem auto; color: #29292e; }
hr { border: none; border-top: 1px solid #ddd; margin: 1.5rem 0; }
.status { padding: 0.6rem 0.9rem; border-radius: 6px; margin: 0.5rem 0; }
.status-success { background: #e6f4ea; color: #1e6b34; }
.status-info { background: #e8f0fe; color: #1a4b8c; }
.status-warning { background: #fff8e1; color: #7a5a00; }
.status-error { background: #fdecea; color: #8c1d18; }
.widget { margin: 0.75rem 0; }
.widget label { display: block; font-size: 0.9rem; margin-bottom: 0.3rem; }
.caption { color: #6b6b73; font-size: 0.85rem; }
"#;

impl Page {
    /// Renders the page as a standalone HTML document with inline SVG charts.
    pub fn to_html(&self) -> LabResult<String> {
        let mut svg = SvgRenderer::default();
        let mut chart_markup = Vec::new();
        for chart in self.charts() {
            chart_markup.push(svg.render_to_string(&chart.frame)?);
        }

        let mut out = String::new();
        self.write_html(&mut out, &chart_markup)
            .map_err(|err| LabError::InvalidData(format!("failed to write html: {err}")))?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String, chart_markup: &[String]) -> std::fmt::Result {
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"en\">")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(
            out,
            "<title>{} {}</title>",
            escape_xml(&self.icon),
            escape_xml(&self.title)
        )?;
        writeln!(out, "<style>{PAGE_CSS}</style>")?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;

        let mut charts = chart_markup.iter();
        for block in &self.blocks {
            match block {
                PageBlock::Title { text } => writeln!(out, "<h1>{}</h1>", escape_xml(text))?,
                PageBlock::Text { text } => writeln!(out, "<p>{}</p>", escape_xml(text))?,
                PageBlock::Divider => writeln!(out, "<hr>")?,
                PageBlock::Header { text } => writeln!(out, "<h2>{}</h2>", escape_xml(text))?,
                PageBlock::Subheader { text } => writeln!(out, "<h3>{}</h3>", escape_xml(text))?,
                PageBlock::Status(status) => writeln!(
                    out,
                    "<div class=\"status status-{}\">{}</div>",
                    status.level.as_str(),
                    escape_xml(&status.text)
                )?,
                PageBlock::TextInput { label, value } => writeln!(
                    out,
                    "<div class=\"widget\"><label>{}</label><input type=\"text\" value=\"{}\" readonly></div>",
                    escape_xml(label),
                    escape_xml(value)
                )?,
                PageBlock::Slider {
                    label,
                    min,
                    max,
                    step,
                    value,
                } => writeln!(
                    out,
                    "<div class=\"widget\"><label>{}</label><input type=\"range\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" disabled> <output>{value:.2}</output></div>",
                    escape_xml(label)
                )?,
                PageBlock::Chart(chart) => {
                    writeln!(out, "<figure>")?;
                    out.push_str(charts.next().map_or("", String::as_str));
                    writeln!(
                        out,
                        "<figcaption class=\"caption\">{}</figcaption>\n</figure>",
                        escape_xml(&chart.caption)
                    )?;
                }
            }
        }

        writeln!(out, "</body>")?;
        writeln!(out, "</html>")
    }
}
