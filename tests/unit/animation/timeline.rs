use super::*;

fn step(to: Props, span: f64) -> Step {
    Step {
        from: Props::new(),
        to,
        ease: Ease::Linear,
        span,
    }
}

fn clip_steps() -> Vec<Step> {
    vec![
        Step {
            from: Props::new().with(Property::Width, 100.0),
            to: Props::new().with(Property::Width, 500.0),
            ease: Ease::Linear,
            span: 1.0,
        },
        step(Props::new().with(Property::BorderRadius, 0.0), 1.0),
    ]
}

#[test]
fn track_samples_segments_in_order() {
    let track = Track::resolve(&clip_steps(), |p| match p {
        Property::BorderRadius => 24.0,
        other => other.identity(),
    });
    assert_eq!(track.length(), 2.0);

    let start = track.sample(0.0);
    assert_eq!(start.get(Property::Width), Some(100.0));
    assert_eq!(start.get(Property::BorderRadius), Some(24.0));

    let mid = track.sample(0.5);
    assert_eq!(mid.get(Property::Width), Some(300.0));
    assert_eq!(mid.get(Property::BorderRadius), Some(24.0));

    let later = track.sample(1.5);
    assert_eq!(later.get(Property::Width), Some(500.0));
    assert_eq!(later.get(Property::BorderRadius), Some(12.0));

    assert_eq!(track.end_state(), track.sample(99.0));
}

#[test]
fn missing_from_chains_through_previous_steps() {
    let steps = vec![
        step(Props::new().with(Property::X, 10.0), 1.0),
        step(Props::new().with(Property::X, 30.0), 1.0),
    ];
    let track = Track::resolve(&steps, |_| -5.0);
    assert_eq!(track.sample(0.0).get(Property::X), Some(-5.0));
    assert_eq!(track.sample(1.0).get(Property::X), Some(10.0));
    assert_eq!(track.sample(1.5).get(Property::X), Some(20.0));
}

#[test]
fn zero_span_step_is_an_instant_set() {
    let steps = vec![step(Props::new().with(Property::Opacity, 0.0), 0.0)];
    let track = Track::resolve(&steps, Property::identity);
    assert_eq!(track.length(), 0.0);
    assert_eq!(track.sample(0.0).get(Property::Opacity), Some(0.0));
}

#[test]
fn sampling_is_bit_identical_on_repeat() {
    let track = Track::resolve(&clip_steps(), Property::identity);
    for i in 0..=64 {
        let pos = f64::from(i) / 32.0;
        let a = track.sample(pos);
        let b = track.sample(pos);
        for ((pa, va), (pb, vb)) in a.iter().zip(b.iter()) {
            assert_eq!(pa, pb);
            assert_eq!(va.to_bits(), vb.to_bits());
        }
    }
}

#[test]
fn validation_rejects_malformed_timelines() {
    let empty = TimelineSpec::Scrubbed(ScrubbedTimeline {
        steps: vec![],
        smoothing_ms: 0.0,
    });
    assert!(matches!(
        empty.validate(),
        Err(MotionError::Configuration(_))
    ));

    let zero = TimelineSpec::Scrubbed(ScrubbedTimeline {
        steps: vec![step(Props::new().with(Property::Y, 1.0), 0.0)],
        smoothing_ms: 0.0,
    });
    assert!(zero.validate().is_err());

    let looping_instant = TimelineSpec::Timed(TimedTimeline {
        steps: vec![step(Props::new().with(Property::Y, 1.0), 0.0)],
        repeat: Repeat::Loop,
        rest: Props::new(),
        settle_ms: None,
    });
    assert!(looping_instant.validate().is_err());

    let nan = TimelineSpec::Timed(TimedTimeline {
        steps: vec![step(Props::new().with(Property::Y, f64::NAN), 10.0)],
        repeat: Repeat::Once,
        rest: Props::new(),
        settle_ms: None,
    });
    assert!(matches!(nan.validate(), Err(MotionError::Animation(_))));

    let follow = TimelineSpec::Follow(FollowTimeline {
        channels: vec![],
        duration_ms: None,
        ease: None,
        enter: Props::new(),
        rest: Props::new(),
        settle_ms: None,
    });
    assert!(follow.validate().is_err());
}

#[test]
fn timeline_json_is_tagged_by_kind() {
    let json = r#"{
        "kind": "timed",
        "steps": [{ "to": { "scale": 1.2 }, "ease": "power3.out", "span": 300 }],
        "repeat": "ping_pong",
        "rest": { "scale": 1.0 }
    }"#;
    let spec: TimelineSpec = serde_json::from_str(json).unwrap();
    let TimelineSpec::Timed(t) = &spec else {
        panic!("expected timed timeline");
    };
    assert_eq!(t.repeat, Repeat::PingPong);
    assert_eq!(t.steps[0].ease, Ease::OutQuart);
    assert_eq!(t.rest.get(Property::Scale), Some(1.0));
    assert_eq!(spec.kind_name(), "timed");
    spec.validate().unwrap();
}
