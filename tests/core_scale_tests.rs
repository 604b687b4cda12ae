use approx::assert_relative_eq;
use chart_lab::core::{
    BandScale, LinearScale, PlotArea, PlotMargins, ValueScaleTuning, Viewport,
    project_category_bars, project_line_points, project_scatter_dots, segments_from_points,
};

#[test]
fn scale_round_trip_within_tolerance() {
    let scale = LinearScale::new(10.0, 110.0).expect("valid scale");

    let px = scale.domain_to_pixel(42.5, 0.0, 1000.0).expect("to pixel");
    let recovered = scale.pixel_to_domain(px, 0.0, 1000.0).expect("from pixel");
    assert_relative_eq!(recovered, 42.5, epsilon = 1e-9);
}

#[test]
fn inverted_pixel_span_maps_larger_values_upwards() {
    let scale = LinearScale::new(0.0, 10.0).expect("valid scale");
    let bottom = scale.domain_to_pixel(0.0, 300.0, 20.0).expect("to pixel");
    let top = scale.domain_to_pixel(10.0, 300.0, 20.0).expect("to pixel");
    assert_relative_eq!(bottom, 300.0);
    assert_relative_eq!(top, 20.0);
}

#[test]
fn degenerate_inputs_are_rejected() {
    assert!(LinearScale::new(1.0, 1.0).is_err());
    assert!(LinearScale::new(0.0, f64::NAN).is_err());
    let scale = LinearScale::new(0.0, 1.0).expect("valid scale");
    assert!(scale.domain_to_pixel(0.5, 10.0, 10.0).is_err());
    assert!(LinearScale::from_values(Vec::<f64>::new(), ValueScaleTuning::default()).is_err());
    assert!(BandScale::new(0, 0.0, 10.0).is_err());
    assert!(PlotArea::from_viewport(Viewport::new(0, 100), PlotMargins::default()).is_err());
}

#[test]
fn ticks_cover_the_domain_inclusively() {
    let scale = LinearScale::new(0.0, 5.0).expect("valid scale");
    assert_eq!(scale.ticks(5), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn projections_are_deterministic() {
    let plot = PlotArea::from_viewport(
        Viewport::new(500, 300),
        PlotMargins {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        },
    )
    .expect("plot");
    let bands = BandScale::new(2, plot.left, plot.right()).expect("bands");
    let values = LinearScale::new(0.0, 10.0).expect("values");

    let bars = project_category_bars(&[10.0, 5.0], bands, values, plot, 0.5).expect("bars");
    assert_relative_eq!(bars[0].x_center, 125.0);
    assert_relative_eq!(bars[0].x_left, 62.5);
    assert_relative_eq!(bars[0].y_top, 0.0);
    assert_relative_eq!(bars[0].y_bottom, 300.0);
    assert_relative_eq!(bars[1].y_top, 150.0);

    let points = project_line_points(&[10.0, 5.0], bands, values, plot).expect("points");
    let segments = segments_from_points(&points);
    assert_eq!(segments.len(), 1);
    assert_relative_eq!(segments[0].x2, 375.0);
    assert_relative_eq!(segments[0].y2, 150.0);
    assert!(segments_from_points(&points[..1]).is_empty());

    let dots = project_scatter_dots(&[(1, 2.5)], bands, values, plot, 4.0).expect("dots");
    assert_relative_eq!(dots[0].center_x, 375.0);
    assert_relative_eq!(dots[0].center_y, 225.0);
    assert!(project_scatter_dots(&[(2, 1.0)], bands, values, plot, 4.0).is_err());
}
