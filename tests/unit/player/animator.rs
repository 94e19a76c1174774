use super::*;
use crate::{
    animation::{ease::Ease, ops},
    foundation::core::{Rect, Size},
    host::memory::MemoryHost,
};

const EL: ElementId = ElementId(1);

fn host() -> MemoryHost {
    let mut host = MemoryHost::new(Size::new(800.0, 600.0));
    host.insert(EL, Rect::new(0.0, 0.0, 100.0, 40.0));
    host
}

fn scale_to(v: f64) -> Vec<Step> {
    vec![ops::to(Props::new().with(Property::Scale, v), 300.0, Ease::OutQuart)]
}

#[test]
fn superseding_player_cancels_the_previous_one() {
    let mut host = host();
    let mut animator = Animator::new();

    let a = animator
        .play(&mut host, BindingId(1), EL, &scale_to(1.2), Repeat::Once)
        .unwrap();
    host.advance(100.0);
    animator.tick(&mut host);
    let at_switch = host.value(EL, Property::Scale).unwrap();
    assert!(at_switch > 1.0 && at_switch < 1.2);

    host.advance(50.0);
    let b = animator
        .play(&mut host, BindingId(2), EL, &scale_to(1.0), Repeat::Once)
        .unwrap();
    assert!(!animator.is_running(a));
    assert_eq!(animator.owner(EL, Property::Scale), Some(b));

    let mark = host.writes().len();
    let mut last = f64::INFINITY;
    for _ in 0..30 {
        host.advance(16.0);
        animator.tick(&mut host);
    }
    for w in &host.writes()[mark..] {
        assert!(w.value <= last, "value rose after supersede: {w:?}");
        assert!(w.value <= at_switch);
        last = w.value;
    }
    assert_eq!(host.value(EL, Property::Scale), Some(1.0));
    assert!(!animator.is_busy());
}

#[test]
fn partial_overlap_keeps_the_rest_running() {
    let mut host = host();
    let mut animator = Animator::new();
    let both = vec![ops::to(
        Props::new().with(Property::X, 40.0).with(Property::Scale, 1.5),
        200.0,
        Ease::Linear,
    )];
    let a = animator
        .play(&mut host, BindingId(1), EL, &both, Repeat::Once)
        .unwrap();
    animator
        .play(&mut host, BindingId(1), EL, &scale_to(1.0), Repeat::Once)
        .unwrap();
    assert!(animator.is_running(a));
    assert_eq!(animator.owner(EL, Property::X), Some(a));

    host.advance(400.0);
    animator.tick(&mut host);
    assert_eq!(host.value(EL, Property::X), Some(40.0));
    assert_eq!(host.value(EL, Property::Scale), Some(1.0));
}

#[test]
fn cancel_binding_stops_all_of_its_writes() {
    let mut host = host();
    let mut animator = Animator::new();
    animator
        .play(&mut host, BindingId(7), EL, &scale_to(2.0), Repeat::Loop)
        .unwrap();
    assert_eq!(animator.cancel_binding(BindingId(7)), 1);
    assert_eq!(animator.cancel_binding(BindingId(7)), 0);

    let mark = host.writes().len();
    host.advance(100.0);
    animator.tick(&mut host);
    assert_eq!(host.writes().len(), mark);
}

#[test]
fn detached_target_reports_binding_and_drops_player() {
    let mut host = host();
    let mut animator = Animator::new();
    animator
        .play(&mut host, BindingId(3), EL, &scale_to(2.0), Repeat::Once)
        .unwrap();
    host.detach(EL);
    host.advance(16.0);
    assert_eq!(animator.tick(&mut host), vec![BindingId(3)]);
    assert!(!animator.is_busy());
}

#[test]
fn later_producer_suppresses_an_earlier_scrub() {
    let mut host = host();
    let mut animator = Animator::new();
    let first = animator.producer(BindingId(1), EL, [Property::Scale, Property::X]);
    let second = animator.producer(BindingId(2), EL, [Property::Scale]);
    assert_eq!(animator.owner(EL, Property::Scale), Some(second));
    assert!(animator.is_registered(first));

    let both = Props::new().with(Property::Scale, 1.1).with(Property::X, 4.0);
    assert!(animator.write(&mut host, first, &both).unwrap());
    assert_eq!(host.value(EL, Property::Scale), None);
    assert_eq!(host.value(EL, Property::X), Some(4.0));

    assert!(
        animator
            .write(&mut host, second, &Props::new().with(Property::Scale, 1.5))
            .unwrap()
    );
    let mark = host.writes().len();
    animator.write(&mut host, first, &both).unwrap();
    let scale_writes = host.writes()[mark..]
        .iter()
        .filter(|w| w.property == Property::Scale)
        .count();
    assert_eq!(scale_writes, 0);
    assert_eq!(host.value(EL, Property::Scale), Some(1.5));
}

#[test]
fn displaced_scrub_producer_is_dropped() {
    let mut host = host();
    let mut animator = Animator::new();
    let scrub = animator.producer(BindingId(1), EL, [Property::Scale]);
    let tween = animator
        .play(&mut host, BindingId(2), EL, &scale_to(2.0), Repeat::Once)
        .unwrap();
    assert!(animator.is_running(tween));
    assert!(!animator.is_registered(scrub));

    let mark = host.writes().len();
    let wrote = animator
        .write(&mut host, scrub, &Props::new().with(Property::Scale, 0.5))
        .unwrap();
    assert!(!wrote);
    assert_eq!(host.writes().len(), mark);

    host.advance(400.0);
    animator.tick(&mut host);
    assert_eq!(host.value(EL, Property::Scale), Some(2.0));
    assert!(!animator.write(&mut host, PlayerId(999), &Props::new()).unwrap());
}
