use super::*;
use crate::animation::property::Property;

const REVEAL: &str = r#"{
    "viewport": { "width": 800, "height": 600 },
    "elements": [
        { "id": 1, "name": "card", "rect": { "x0": 0, "y0": 900, "x1": 400, "y1": 1100 } }
    ],
    "bindings": [
        {
            "trigger": { "kind": "visibility_threshold", "ratio": 0.3, "once": true },
            "timeline": {
                "kind": "timed",
                "steps": [
                    { "from": { "opacity": 0, "y": 50 }, "to": { "opacity": 1, "y": 0 }, "span": 300 }
                ]
            },
            "target": 1
        }
    ],
    "events": [
        { "at_ms": 0, "kind": "scroll", "y": 600 },
        { "at_ms": 0, "kind": "frames", "count": 30 },
        { "at_ms": 1000, "kind": "scroll", "y": 0 },
        { "at_ms": 1000, "kind": "scroll", "y": 600 },
        { "at_ms": 1000, "kind": "frames", "count": 30 }
    ]
}"#;

#[test]
fn geometry_drives_observer_callbacks() {
    let script = Script::from_json_str(REVEAL).unwrap();
    let report = replay(&script, Settings::default()).unwrap();

    let card = ElementId(1);
    let props = &report.final_props[&card];
    assert_eq!(props.get(Property::Opacity), Some(1.0));
    assert_eq!(props.get(Property::Y), Some(0.0));

    // `once`: re-entering the viewport does not restart the reveal.
    let opacity_starts = report
        .writes
        .iter()
        .filter(|w| w.element == card && w.property == Property::Opacity && w.value == 0.0)
        .count();
    assert_eq!(opacity_starts, 1);
    assert_eq!(report.bindings[0].state, BindingState::Active);
    assert_eq!(report.active_subscriptions, 1);
}

#[test]
fn replay_is_deterministic() {
    let script = Script::from_json_str(REVEAL).unwrap();
    let a = replay(&script, Settings::default()).unwrap();
    let b = replay(&script, Settings::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn unmount_and_detach_leave_no_subscriptions() {
    let mut script = Script::from_json_str(REVEAL).unwrap();
    script.events = vec![
        TimedEvent {
            at_ms: 0.0,
            action: ScriptAction::Unmount { binding: 0 },
        },
        TimedEvent {
            at_ms: 5.0,
            action: ScriptAction::Detach {
                element: ElementId(1),
            },
        },
        TimedEvent {
            at_ms: 10.0,
            action: ScriptAction::Scroll { y: 600.0 },
        },
    ];
    let report = replay(&script, Settings::default()).unwrap();
    assert_eq!(report.active_subscriptions, 0);
    assert_eq!(report.bindings[0].state, BindingState::Unbound);
    assert!(report.writes.is_empty());
}

#[test]
fn validation_catches_script_mistakes() {
    let mut script = Script::from_json_str(REVEAL).unwrap();
    script.events.push(TimedEvent {
        at_ms: 10.0,
        action: ScriptAction::Frame,
    });
    let err = script.validate().unwrap_err();
    assert!(err.to_string().contains("non-decreasing"), "{err}");

    let mut script = Script::from_json_str(REVEAL).unwrap();
    script.events = vec![TimedEvent {
        at_ms: 0.0,
        action: ScriptAction::Settle { binding: 3 },
    }];
    assert!(replay(&script, Settings::default()).is_err());

    let mut script = Script::from_json_str(REVEAL).unwrap();
    script.elements.push(script.elements[0].clone());
    assert!(matches!(
        script.validate(),
        Err(MotionError::Configuration(_))
    ));
}

#[test]
fn elements_start_from_their_declared_state() {
    let mut script = Script::from_json_str(REVEAL).unwrap();
    script.elements[0].attached = false;
    script.scroll_y = 250.0;
    let host = script.host();
    assert_eq!(host.scroll_y(), 250.0);
    assert!(!host.is_attached(ElementId(1)));
}
