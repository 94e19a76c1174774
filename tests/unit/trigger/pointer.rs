use super::*;

fn square() -> Rect {
    Rect::new(0.0, 0.0, 200.0, 200.0)
}

#[test]
fn center_has_no_tilt_and_corners_are_extremal() {
    let scale = TiltScale::Divisor(10.0);
    let c = normalize_pointer(Point::new(100.0, 100.0), square(), scale).unwrap();
    assert_eq!((c.tilt_x, c.tilt_y), (0.0, 0.0));
    assert_eq!((c.x, c.y), (100.0, 100.0));

    let lo = normalize_pointer(Point::new(0.0, 0.0), square(), scale).unwrap();
    let hi = normalize_pointer(Point::new(200.0, 200.0), square(), scale).unwrap();
    assert_eq!((lo.tilt_x, lo.tilt_y), (-10.0, -10.0));
    assert_eq!((hi.tilt_x, hi.tilt_y), (10.0, 10.0));

    for p in [(37.0, 150.0), (199.0, 1.0), (120.0, 80.0)] {
        let s = normalize_pointer(Point::new(p.0, p.1), square(), scale).unwrap();
        assert!(s.tilt_x.abs() <= hi.tilt_x && s.tilt_y.abs() <= hi.tilt_y);
    }
}

#[test]
fn outside_pointer_does_not_overshoot() {
    let s = normalize_pointer(Point::new(-500.0, 900.0), square(), TiltScale::Divisor(10.0)).unwrap();
    assert_eq!((s.tilt_x, s.tilt_y), (-10.0, 10.0));
    assert_eq!(s.x, -500.0);
}

#[test]
fn coordinates_are_relative_to_bounds() {
    let bounds = Rect::new(50.0, 20.0, 150.0, 60.0);
    let s = normalize_pointer(Point::new(75.0, 40.0), bounds, TiltScale::Factor(0.35)).unwrap();
    assert_eq!((s.x, s.y), (25.0, 20.0));
    assert!((s.tilt_x - (-25.0 * 0.35)).abs() < 1e-12);
    assert_eq!(s.tilt_y, 0.0);
}

#[test]
fn normalized_scale_reaches_max_at_edges() {
    let s = normalize_pointer(Point::new(200.0, 0.0), square(), TiltScale::Normalized(10.0)).unwrap();
    assert_eq!((s.tilt_x, s.tilt_y), (10.0, -10.0));
}

#[test]
fn hidden_bounds_are_indeterminate() {
    let hidden = Rect::new(30.0, 30.0, 30.0, 30.0);
    let err = normalize_pointer(Point::new(30.0, 30.0), hidden, TiltScale::Divisor(10.0)).unwrap_err();
    assert!(err.is_transient());
}

#[test]
fn axis_lookup_matches_fields() {
    let s = PointerState {
        x: 1.0,
        y: 2.0,
        tilt_x: 3.0,
        tilt_y: 4.0,
        client_x: 5.0,
        client_y: 6.0,
    };
    assert_eq!(s.axis(PointerAxis::X), 1.0);
    assert_eq!(s.axis(PointerAxis::TiltY), 4.0);
    assert_eq!(s.axis(PointerAxis::ClientY), 6.0);
}

#[test]
fn client_axes_ignore_where_the_bounds_are_scrolled() {
    let page = Rect::new(0.0, -300.0, 800.0, 2700.0);
    let s = normalize_pointer(Point::new(120.0, 40.0), page, TiltScale::Divisor(10.0)).unwrap();
    assert_eq!((s.x, s.y), (120.0, 340.0));
    assert_eq!((s.client_x, s.client_y), (120.0, 40.0));
}
