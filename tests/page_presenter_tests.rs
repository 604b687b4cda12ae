use std::fs;

use chart_lab::data::StatusLevel;
use chart_lab::page::{
    CSV_EMPTY_STATUS, ChartKind, JSON_MISSING_STATUS, NO_MATCH_STATUS,
    NOTHING_ABOVE_THRESHOLD_STATUS, PageBlock, TOTALS_OVERFLOW_STATUS,
};
use chart_lab::render::NullRenderer;
use chart_lab::{GraphsPage, Page, PageConfig};
use tempfile::TempDir;

const SURVEY_CSV: &str = "category,value\nSleep,7\nStudy,3\nFood,2\nSleep,6\nStudy,4\n";
const POINTS_JSON: &str = r#"{"data_points":[
    {"label":"Mon","value":1.0},
    {"label":"Tue","value":3.0},
    {"label":"Wed","value":4.5}
]}"#;

fn page_with(csv: Option<&str>, json: Option<&str>) -> (TempDir, GraphsPage) {
    let dir = TempDir::new().expect("temp dir");
    if let Some(csv) = csv {
        fs::write(dir.path().join("data.csv"), csv).expect("write csv");
    }
    if let Some(json) = json {
        fs::write(dir.path().join("data.json"), json).expect("write json");
    }
    let page = GraphsPage::new(PageConfig::new(dir.path())).expect("page");
    (dir, page)
}

fn position_of(page: &Page, predicate: impl Fn(&PageBlock) -> bool) -> usize {
    page.blocks
        .iter()
        .position(|block| predicate(block))
        .expect("block present")
}

#[test]
fn page_without_sources_still_renders_every_section() {
    let (_dir, page) = page_with(None, None);
    let session = page.new_session().expect("session");
    let rendered = page.render(&session);

    assert_eq!(rendered.charts().count(), 0);
    assert!(rendered.has_status(StatusLevel::Warning, "CSV file not found."));
    assert!(rendered.has_status(StatusLevel::Warning, "JSON file not found."));
    assert!(rendered.has_status(StatusLevel::Warning, CSV_EMPTY_STATUS));
    assert!(rendered.has_status(StatusLevel::Warning, NO_MATCH_STATUS));
    assert!(rendered.has_status(StatusLevel::Warning, JSON_MISSING_STATUS));
    assert_eq!(rendered.subheaders().count(), 3);
    assert!(
        !rendered
            .blocks
            .iter()
            .any(|block| matches!(block, PageBlock::Slider { .. }))
    );
}

#[test]
fn full_sources_render_three_charts_in_fixed_order() {
    let (_dir, page) = page_with(Some(SURVEY_CSV), Some(POINTS_JSON));
    let session = page.new_session().expect("session");
    let rendered = page.render(&session);

    let kinds: Vec<ChartKind> = rendered.charts().map(|chart| chart.kind).collect();
    assert_eq!(kinds, [ChartKind::Bar, ChartKind::Line, ChartKind::Scatter]);
    assert!(rendered.has_status(
        StatusLevel::Success,
        "All data sources are ready for visualization!"
    ));

    let bar = rendered.chart(ChartKind::Bar).expect("bar chart");
    let labels: Vec<&str> = bar.data.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, ["Sleep", "Study", "Food"]);
    assert_eq!(bar.frame.rects.len(), 1 + 3, "background plus one bar per category");

    let scatter = rendered.chart(ChartKind::Scatter).expect("scatter chart");
    let above: Vec<&str> = scatter.data.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(above, ["Tue", "Wed"]);
    assert_eq!(scatter.frame.circles.len(), 2);

    let mut renderer = NullRenderer::default();
    assert_eq!(rendered.draw_charts(&mut renderer).expect("draw"), 3);
    assert_eq!(renderer.frames_rendered, 3);
}

#[test]
fn widget_blocks_precede_their_charts() {
    let (_dir, page) = page_with(Some(SURVEY_CSV), Some(POINTS_JSON));
    let rendered = page.render(&page.new_session().expect("session"));

    let input = position_of(&rendered, |b| matches!(b, PageBlock::TextInput { .. }));
    let line = position_of(&rendered, |b| {
        matches!(b, PageBlock::Chart(c) if c.kind == ChartKind::Line)
    });
    let slider = position_of(&rendered, |b| matches!(b, PageBlock::Slider { .. }));
    let scatter = position_of(&rendered, |b| {
        matches!(b, PageBlock::Chart(c) if c.kind == ChartKind::Scatter)
    });
    assert!(input < line && line < slider && slider < scatter);
}

#[test]
fn titles_embed_current_state_and_rerender_follows_mutations() {
    let (_dir, page) = page_with(Some(SURVEY_CSV), Some(POINTS_JSON));
    let mut session = page.new_session().expect("session");

    let first = page.render(&session);
    let headings: Vec<&str> = first.subheaders().collect();
    assert_eq!(
        headings,
        [
            "Graph 1: Frequency of Reported Topics",
            "Graph 2: Total Values for Entries Matching ''",
            "Graph 3: Data Points Above Threshold of 2.0",
        ]
    );

    session.set_filter_keyword("stu");
    session.set_usage_threshold(4.0).expect("slider value");
    let second = page.render(&session);
    let headings: Vec<&str> = second.subheaders().collect();
    assert_eq!(headings[1], "Graph 2: Total Values for Entries Matching 'stu'");
    assert_eq!(headings[2], "Graph 3: Data Points Above Threshold of 4.0");

    let line = second.chart(ChartKind::Line).expect("line chart");
    assert_eq!(line.data.len(), 1);
    assert_eq!(line.data[0].label, "Study");
    assert_eq!(line.data[0].value, 7.0);
    assert!(line.caption.contains("'stu'"));

    let scatter = second.chart(ChartKind::Scatter).expect("scatter chart");
    assert_eq!(scatter.data.len(), 1);
    assert_eq!(scatter.data[0].label, "Wed");
}

#[test]
fn unmatched_keyword_shows_status_instead_of_line_chart() {
    let (_dir, page) = page_with(Some(SURVEY_CSV), Some(POINTS_JSON));
    let mut session = page.new_session().expect("session");
    session.set_filter_keyword("exercise");

    let rendered = page.render(&session);
    assert!(rendered.chart(ChartKind::Line).is_none());
    assert!(rendered.has_status(StatusLevel::Warning, NO_MATCH_STATUS));
    assert!(rendered.chart(ChartKind::Bar).is_some());
}

#[test]
fn threshold_above_every_record_suppresses_scatter() {
    let (_dir, page) = page_with(Some(SURVEY_CSV), Some(POINTS_JSON));
    let mut session = page.new_session().expect("session");
    session.set_usage_threshold(5.0).expect("slider max");

    let rendered = page.render(&session);
    assert!(rendered.chart(ChartKind::Scatter).is_none());
    assert!(rendered.has_status(StatusLevel::Info, NOTHING_ABOVE_THRESHOLD_STATUS));
    assert!(
        rendered
            .blocks
            .iter()
            .any(|block| matches!(block, PageBlock::Slider { value, .. } if *value == 5.0))
    );
}

#[test]
fn malformed_json_keeps_tabular_charts() {
    let (_dir, page) = page_with(Some(SURVEY_CSV), Some("[1, 2, 3]"));
    let rendered = page.render(&page.new_session().expect("session"));

    assert!(rendered.chart(ChartKind::Bar).is_some());
    assert!(rendered.chart(ChartKind::Line).is_some());
    assert!(rendered.chart(ChartKind::Scatter).is_none());
    assert!(
        rendered
            .statuses()
            .any(|s| s.level == StatusLevel::Error && s.text.starts_with("Error loading JSON"))
    );
    assert!(rendered.has_status(StatusLevel::Warning, JSON_MISSING_STATUS));
}

#[test]
fn header_only_csv_reports_empty_data() {
    let (_dir, page) = page_with(Some("category,value\n"), None);
    let rendered = page.render(&page.new_session().expect("session"));
    assert!(rendered.has_status(StatusLevel::Success, "CSV data loaded successfully."));
    assert!(rendered.has_status(StatusLevel::Warning, CSV_EMPTY_STATUS));
}

#[test]
fn html_output_inlines_one_svg_per_chart() {
    let (_dir, page) = page_with(Some(SURVEY_CSV), Some(POINTS_JSON));
    let rendered = page.render(&page.new_session().expect("session"));
    let html = rendered.to_html().expect("html");

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert_eq!(html.matches("<svg ").count(), 3);
    assert!(html.contains("Graph 3: Data Points Above Threshold of 2.0"));
    assert!(html.contains("status-success"));
}

#[test]
fn page_json_contract_round_trips() {
    let (_dir, page) = page_with(Some(SURVEY_CSV), Some(POINTS_JSON));
    let rendered = page.render(&page.new_session().expect("session"));

    let json = rendered.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 1"));
    let restored = Page::from_json_compat_str(&json).expect("parse");
    assert_eq!(restored.blocks.len(), rendered.blocks.len());
    assert_eq!(
        restored.subheaders().collect::<Vec<_>>(),
        rendered.subheaders().collect::<Vec<_>>()
    );
    for (restored, original) in restored.charts().zip(rendered.charts()) {
        assert_eq!(restored.kind, original.kind);
        assert_eq!(restored.data, original.data);
        assert_eq!(restored.frame.circles.len(), original.frame.circles.len());
    }
}

#[test]
fn overflowing_keyword_total_reports_its_own_status() {
    let (_dir, page) = page_with(Some("category,value\nBig,1e308\nBig,1e308\n"), None);
    let rendered = page.render(&page.new_session().expect("session"));

    assert!(rendered.chart(ChartKind::Bar).is_some());
    assert!(rendered.chart(ChartKind::Line).is_none());
    assert!(rendered.has_status(StatusLevel::Error, TOTALS_OVERFLOW_STATUS));
    assert!(
        !rendered
            .statuses()
            .any(|status| status.text.starts_with("Failed to draw chart"))
    );
}
