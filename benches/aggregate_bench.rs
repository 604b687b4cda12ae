use chart_lab::SessionState;
use chart_lab::aggregate::{DerivedViews, category_frequency, keyword_filtered_sum};
use chart_lab::core::{PlotMargins, Viewport};
use chart_lab::data::{DocumentData, DocumentRecord, TabularData, TabularRow};
use chart_lab::page::{AxisTitles, ChartDatum, ChartFrameBuilder, ChartStyle};
use chart_lab::render::SvgRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const CATEGORIES: [&str; 6] = ["Sleep", "Study", "Food", "Exercise", "Social", "Sleep in"];

fn survey_rows(count: usize) -> TabularData {
    TabularData::from_rows(
        (0..count)
            .map(|i| {
                let value = if i % 17 == 0 {
                    "n/a".to_owned()
                } else {
                    format!("{:.2}", (i % 9) as f64 * 0.75)
                };
                TabularRow::new(CATEGORIES[i % CATEGORIES.len()], value)
            })
            .collect(),
    )
}

fn usage_points(count: usize) -> DocumentData {
    DocumentData::from_records(
        (0..count)
            .map(|i| DocumentRecord::new(format!("day-{}", i % 7), (i % 50) as f64 * 0.1))
            .collect(),
    )
}

fn bench_category_frequency_10k(c: &mut Criterion) {
    let data = survey_rows(10_000);
    c.bench_function("category_frequency_10k", |b| {
        b.iter(|| category_frequency(black_box(&data)))
    });
}

fn bench_keyword_filtered_sum_10k(c: &mut Criterion) {
    let data = survey_rows(10_000);
    c.bench_function("keyword_filtered_sum_10k", |b| {
        b.iter(|| keyword_filtered_sum(black_box(&data), black_box("sleep")))
    });
}

fn bench_derived_views_5k(c: &mut Criterion) {
    let tabular = survey_rows(5_000);
    let document = usage_points(5_000);
    let mut session = SessionState::default();
    session.set_filter_keyword("s");

    c.bench_function("derived_views_5k", |b| {
        b.iter(|| DerivedViews::compute(black_box(&tabular), black_box(&document), &session))
    });
}

fn bench_scatter_svg_2k(c: &mut Criterion) {
    let builder = ChartFrameBuilder::new(
        Viewport::new(1280, 720),
        PlotMargins::default(),
        ChartStyle::default(),
    )
    .expect("builder");
    let data: Vec<ChartDatum> = usage_points(2_000)
        .records()
        .iter()
        .filter_map(|record| {
            record
                .value
                .map(|value| ChartDatum::new(record.label.clone(), value))
        })
        .collect();
    let mut renderer = SvgRenderer::default();

    c.bench_function("scatter_svg_2k", |b| {
        b.iter(|| {
            let frame = builder
                .scatter_chart(black_box(&data), &AxisTitles::default())
                .expect("scatter frame");
            let _ = renderer.render_to_string(&frame).expect("svg");
        })
    });
}

criterion_group!(
    benches,
    bench_category_frequency_10k,
    bench_keyword_filtered_sum_10k,
    bench_derived_views_5k,
    bench_scatter_svg_2k
);
criterion_main!(benches);
