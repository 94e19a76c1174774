use super::*;

#[test]
fn measurable_rejects_zero_and_non_finite() {
    assert!(measurable(Rect::new(0.0, 0.0, 200.0, 100.0)).is_ok());
    assert!(measurable(Rect::new(10.0, 10.0, 10.0, 50.0)).is_err());
    assert!(measurable(Rect::new(0.0, 0.0, 50.0, 0.0)).is_err());
    assert!(measurable(Rect::new(0.0, 0.0, f64::NAN, 10.0)).is_err());
}

#[test]
fn inclusive_containment_accepts_far_edges() {
    let r = Rect::new(0.0, 0.0, 200.0, 200.0);
    assert!(contains_inclusive(r, Point::new(200.0, 200.0)));
    assert!(!r.contains(Point::new(200.0, 200.0)));
    assert!(!contains_inclusive(r, Point::new(200.1, 0.0)));
}

#[test]
fn element_ids_are_transparent_in_json() {
    let id: ElementId = serde_json::from_str("12").unwrap();
    assert_eq!(id, ElementId(12));
    assert_eq!(id.to_string(), "#12");
}
