use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn out_of_range_input_is_clamped() {
    assert_eq!(Ease::OutQuart.apply(-3.0), 0.0);
    assert_eq!(Ease::OutQuart.apply(7.0), 1.0);
}

#[test]
fn web_library_names_deserialize() {
    let e: Ease = serde_json::from_str("\"power3.out\"").unwrap();
    assert_eq!(e, Ease::OutQuart);
    let e: Ease = serde_json::from_str("\"none\"").unwrap();
    assert_eq!(e, Ease::Linear);
    let e: Ease = serde_json::from_str("\"power1.inOut\"").unwrap();
    assert_eq!(e, Ease::InOutQuad);
    let e: Ease = serde_json::from_str("\"OutCubic\"").unwrap();
    assert_eq!(e, Ease::OutCubic);
}
