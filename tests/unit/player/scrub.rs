use super::*;
use crate::animation::{ease::Ease, ops};

fn reveal() -> ScrubPlayer {
    ScrubPlayer::new(
        &[ops::from_to(
            Props::new()
                .with(Property::Width, 400.0)
                .with(Property::BorderRadius, 20.0),
            Props::new()
                .with(Property::Width, 1200.0)
                .with(Property::BorderRadius, 0.0),
            1.0,
            Ease::InOutQuad,
        )],
        Property::identity,
    )
}

#[test]
fn repeated_progress_is_bit_identical() {
    let player = reveal();
    for i in 0..=100 {
        let p = f64::from(i) / 100.0;
        let a = player.sample(p);
        let b = player.sample(p);
        assert_eq!(a.len(), b.len());
        for ((_, va), (_, vb)) in a.iter().zip(b.iter()) {
            assert_eq!(va.to_bits(), vb.to_bits(), "progress {p}");
        }
    }
}

#[test]
fn interleaved_progress_does_not_drift() {
    let player = reveal();
    let first = player.sample(0.37);
    for p in [0.9, 0.1, 1.0, 0.0, 0.55] {
        player.sample(p);
    }
    assert_eq!(player.sample(0.37), first);
}

#[test]
fn progress_is_clamped() {
    let player = reveal();
    assert_eq!(player.sample(-1.0), player.sample(0.0));
    assert_eq!(player.sample(4.0), player.sample(1.0));
    assert_eq!(player.sample(f64::NAN), player.sample(0.0));
    assert_eq!(player.sample(1.0).get(Property::Width), Some(1200.0));
}

#[test]
fn smoother_without_lag_is_immediate() {
    let mut s = Smoother::new(0.0, 1e-4);
    assert_eq!(s.retarget(0.2, 0.0), Some(0.2));
    assert_eq!(s.retarget(0.8, 16.0), Some(0.8));
    assert!(s.is_settled());
    assert_eq!(s.advance(32.0), None);
}

#[test]
fn smoother_chases_and_converges() {
    let mut s = Smoother::new(500.0, 1e-4);
    assert_eq!(s.retarget(0.0, 0.0), Some(0.0));
    assert_eq!(s.retarget(1.0, 0.0), None);

    let mut last = 0.0;
    let mut now = 0.0;
    while !s.is_settled() {
        now += 16.0;
        let v = s.advance(now).unwrap();
        assert!(v > last && v <= 1.0);
        last = v;
        assert!(now < 60_000.0, "smoother never converged");
    }
    assert_eq!(s.applied(), Some(1.0));
}
