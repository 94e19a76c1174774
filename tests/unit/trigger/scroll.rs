use super::*;

#[test]
fn progress_is_linear_inside_and_clamped_outside() {
    let p = |s| scroll_progress(100.0, 900.0, s).unwrap();
    assert_eq!(p(100.0), 0.0);
    assert_eq!(p(500.0), 0.5);
    assert_eq!(p(900.0), 1.0);
    assert_eq!(p(50.0), 0.0);
    assert_eq!(p(1000.0), 1.0);
}

#[test]
fn empty_region_is_degenerate() {
    assert!(matches!(
        scroll_progress(100.0, 100.0, 100.0),
        Err(MotionError::DegenerateGeometry(_))
    ));
    assert!(scroll_progress(0.0, 10.0, f64::NAN).is_err());
}

#[test]
fn pin_offset_stays_within_region() {
    assert_eq!(pin_offset(100.0, 900.0, 0.0), 0.0);
    assert_eq!(pin_offset(100.0, 900.0, 400.0), 300.0);
    assert_eq!(pin_offset(100.0, 900.0, 5000.0), 800.0);
}

#[test]
fn markers_parse_common_forms() {
    let m: ScrollMarker = "center center".parse().unwrap();
    assert_eq!(m.element, Edge::Center);
    assert_eq!(m.viewport, Edge::Center);
    let m: ScrollMarker = "top 80%".parse().unwrap();
    assert_eq!(m.viewport, Edge::Percent(80.0));
    let m: ScrollMarker = "120px".parse().unwrap();
    assert_eq!(m.element, Edge::Px(120.0));
    assert_eq!(m.viewport, Edge::Top);
    assert!("middle".parse::<ScrollMarker>().is_err());
    assert!("top center bottom".parse::<ScrollMarker>().is_err());

    assert_eq!(
        "+=800 center".parse::<RegionEnd>().unwrap(),
        RegionEnd::Relative(800.0)
    );
    assert!("+=-5".parse::<RegionEnd>().is_err());
}

#[test]
fn geometry_resolves_markers_into_offsets() {
    let g = RegionGeometry {
        element_top: 2000.0,
        element_height: 600.0,
        viewport_height: 800.0,
    };
    // Element center (2300) meets viewport center (400).
    assert_eq!(
        g.resolve_str("center center", "+=800").unwrap(),
        (1900.0, 2700.0)
    );
    // Element top meets viewport center, then element bottom meets viewport center.
    assert_eq!(
        g.resolve_str("top center", "bottom center").unwrap(),
        (1600.0, 2200.0)
    );
    assert!(g.resolve_str("bottom center", "top center").is_err());
}
