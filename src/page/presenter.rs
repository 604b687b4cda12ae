use tracing::{debug, warn};

use crate::aggregate::DerivedViews;
use crate::config::PageConfig;
use crate::data::{DataSources, StatusMessage};
use crate::error::LabResult;
use crate::page::{
    AxisTitles, ChartBlock, ChartDatum, ChartFrameBuilder, ChartKind, Page, PageBlock,
};
use crate::render::RenderFrame;
use crate::session::{SessionState, format_threshold};

pub const PAGE_TITLE: &str = "Visualizations";
pub const PAGE_ICON: &str = "📈";
pub const KEYWORD_INPUT_LABEL: &str =
    "Enter a keyword to filter entries (e.g., 'Sleep', 'Study', 'Food'):";
pub const THRESHOLD_SLIDER_LABEL: &str = "Highlight entries with values above:";

pub const CSV_EMPTY_STATUS: &str = "CSV data is empty or missing.";
pub const NO_MATCH_STATUS: &str = "No matching categories found.";
pub const JSON_MISSING_STATUS: &str = "JSON data is missing or invalid.";
pub const NOTHING_ABOVE_THRESHOLD_STATUS: &str = "No data points exceed the threshold.";
pub const TOTALS_OVERFLOW_STATUS: &str = "Category totals are too large to chart.";

/// The graphs page: load, derive, present, re-executed on every render.
#[derive(Debug, Clone)]
pub struct GraphsPage {
    config: PageConfig,
    charts: ChartFrameBuilder,
}

impl GraphsPage {
    pub fn new(config: PageConfig) -> LabResult<Self> {
        let config = config.validate()?;
        let charts = ChartFrameBuilder::new(
            config.chart_viewport,
            config.plot_margins,
            config.chart_style,
        )?;
        Ok(Self { config, charts })
    }

    /// Fresh session state bound to this page's widgets.
    pub fn new_session(&self) -> LabResult<SessionState> {
        self.config.initial_session()
    }

    /// Runs one full render: both sources are re-read and every view recomputed.
    #[must_use]
    pub fn render(&self, session: &SessionState) -> Page {
        debug!(
            revision = session.revision(),
            keyword = session.filter_keyword(),
            threshold = session.usage_threshold(),
            "rendering graphs page"
        );
        let sources = DataSources::load_from_config(&self.config);
        let views = DerivedViews::compute(&sources.tabular.data, &sources.document.data, session);
        self.present(&sources, &views, session)
    }

    /// Lays out the page from already loaded sources and computed views.
    #[must_use]
    pub fn present(
        &self,
        sources: &DataSources,
        views: &DerivedViews,
        session: &SessionState,
    ) -> Page {
        let mut page = Page::new(PAGE_TITLE, PAGE_ICON);
        page.push(PageBlock::Title {
            text: format!("Data Visualizations {PAGE_ICON}"),
        });
        page.push(PageBlock::Text {
            text: "This page displays graphs based on the collected data.".to_owned(),
        });

        page.push(PageBlock::Divider);
        page.push(PageBlock::Header {
            text: "Load Data".to_owned(),
        });
        for status in sources.statuses() {
            page.push(PageBlock::Status(status.clone()));
        }
        page.push(PageBlock::Status(sources.readiness_status()));

        page.push(PageBlock::Divider);
        page.push(PageBlock::Header {
            text: "Graphs".to_owned(),
        });

        self.present_frequency(&mut page, sources, views);
        self.present_keyword_totals(&mut page, views, session);
        self.present_threshold_subset(&mut page, sources, views, session);
        page
    }

    fn present_frequency(&self, page: &mut Page, sources: &DataSources, views: &DerivedViews) {
        page.push(PageBlock::Subheader {
            text: "Graph 1: Frequency of Reported Topics".to_owned(),
        });

        if sources.tabular.data.is_empty() || views.frequency.is_empty() {
            page.push(PageBlock::Status(StatusMessage::warning(CSV_EMPTY_STATUS)));
            return;
        }

        let data: Vec<ChartDatum> = views
            .frequency
            .iter()
            .map(|entry| ChartDatum::new(entry.category.clone(), entry.count as f64))
            .collect();
        let titles = AxisTitles {
            x: Some("category".to_owned()),
            y: Some("count".to_owned()),
            ..AxisTitles::default()
        };
        let frame = self.charts.bar_chart(&data, &titles);
        push_chart(
            page,
            ChartKind::Bar,
            data,
            frame,
            "This bar chart shows how often each topic or category was reported in the survey."
                .to_owned(),
        );
    }

    fn present_keyword_totals(&self, page: &mut Page, views: &DerivedViews, session: &SessionState) {
        let keyword = session.filter_keyword();
        page.push(PageBlock::Subheader {
            text: format!("Graph 2: Total Values for Entries Matching '{keyword}'"),
        });
        page.push(PageBlock::TextInput {
            label: KEYWORD_INPUT_LABEL.to_owned(),
            value: keyword.to_owned(),
        });

        if views.keyword_totals.is_empty() {
            page.push(PageBlock::Status(StatusMessage::warning(NO_MATCH_STATUS)));
            return;
        }
        if let Some(entry) = views
            .keyword_totals
            .iter()
            .find(|entry| !entry.total.is_finite())
        {
            warn!(category = %entry.category, "keyword total overflowed");
            page.push(PageBlock::Status(StatusMessage::error(
                TOTALS_OVERFLOW_STATUS,
            )));
            return;
        }

        let data: Vec<ChartDatum> = views
            .keyword_totals
            .iter()
            .map(|entry| ChartDatum::new(entry.category.clone(), entry.total))
            .collect();
        let titles = AxisTitles {
            x: Some("category".to_owned()),
            y: Some("value".to_owned()),
            ..AxisTitles::default()
        };
        let frame = self.charts.line_chart(&data, &titles);
        push_chart(
            page,
            ChartKind::Line,
            data,
            frame,
            format!(
                "This line chart shows the total values for categories that include the keyword '{keyword}'."
            ),
        );
    }

    fn present_threshold_subset(
        &self,
        page: &mut Page,
        sources: &DataSources,
        views: &DerivedViews,
        session: &SessionState,
    ) {
        let threshold = format_threshold(session.usage_threshold());
        page.push(PageBlock::Subheader {
            text: format!("Graph 3: Data Points Above Threshold of {threshold}"),
        });

        if !sources.document.is_loaded() {
            page.push(PageBlock::Status(StatusMessage::warning(JSON_MISSING_STATUS)));
            return;
        }

        let slider = session.slider();
        page.push(PageBlock::Slider {
            label: THRESHOLD_SLIDER_LABEL.to_owned(),
            min: slider.min,
            max: slider.max,
            step: slider.step,
            value: session.usage_threshold(),
        });

        let data: Vec<ChartDatum> = views
            .above_threshold
            .iter()
            .filter_map(|record| {
                record
                    .value
                    .map(|value| ChartDatum::new(record.label.clone(), value))
            })
            .collect();
        if data.is_empty() {
            page.push(PageBlock::Status(StatusMessage::info(
                NOTHING_ABOVE_THRESHOLD_STATUS,
            )));
            return;
        }

        let titles = AxisTitles {
            plot: Some("Reported Values Above Threshold".to_owned()),
            x: Some("Category or Day".to_owned()),
            y: Some("Reported Value".to_owned()),
        };
        let frame = self.charts.scatter_chart(&data, &titles);
        push_chart(
            page,
            ChartKind::Scatter,
            data,
            frame,
            format!("This scatter plot shows data points where the value exceeds {threshold}."),
        );
    }
}

fn push_chart(
    page: &mut Page,
    kind: ChartKind,
    data: Vec<ChartDatum>,
    frame: LabResult<RenderFrame>,
    caption: String,
) {
    match frame {
        Ok(frame) => page.push(PageBlock::Chart(ChartBlock {
            kind,
            data,
            frame,
            caption,
        })),
        Err(err) => {
            warn!(?kind, error = %err, "chart frame could not be built");
            page.push(PageBlock::Status(StatusMessage::error(format!(
                "Failed to draw chart: {err}"
            ))));
        }
    }
}
