//! Ready-made bindings for the page's recurring effects.
//!
//! Scroll presets take a [`RegionGeometry`] because their markers (`"center center"`,
//! `"+=800"`) only become offsets once the element has been measured; see [`measure`].

use crate::{
    animation::{
        ease::Ease,
        ops,
        property::{Property, Props},
        timeline::{
            Channel, FollowTimeline, Repeat, ScrubbedTimeline, TimedTimeline, TimelineSpec,
        },
    },
    binding::config::BindingConfig,
    foundation::{
        core::{ElementId, Size},
        error::{MotionError, MotionResult},
    },
    host::Host,
    trigger::{
        pointer::{PointerAxis, TiltScale},
        scroll::RegionGeometry,
        spec::TriggerSpec,
    },
};

/// Scroll geometry of `element` as currently laid out in `host`.
pub fn measure(host: &dyn Host, element: ElementId) -> MotionResult<RegionGeometry> {
    let rect = host
        .rect(element)
        .ok_or(MotionError::DetachedTarget(element))?;
    Ok(RegionGeometry {
        element_top: rect.y0 + host.scroll_y(),
        element_height: rect.height(),
        viewport_height: host.viewport().height,
    })
}

fn channel(property: Property, source: PointerAxis, gain: f64) -> Channel {
    Channel {
        property,
        source,
        gain,
        offset: 0.0,
    }
}

/// Button pulled toward the pointer while hovered, scaled up on enter.
pub fn magnetic_button(bounds: ElementId, button: ElementId, hover_scale: f64) -> BindingConfig {
    BindingConfig::new(
        TriggerSpec::PointerWithin {
            bounds,
            tilt: Some(TiltScale::Factor(0.35)),
        },
        TimelineSpec::Follow(FollowTimeline {
            channels: vec![
                channel(Property::X, PointerAxis::TiltX, 1.0),
                channel(Property::Y, PointerAxis::TiltY, 1.0),
            ],
            duration_ms: Some(200.0),
            ease: Some(Ease::OutQuart),
            enter: Props::new().with(Property::Scale, hover_scale),
            rest: Props::new()
                .with(Property::Scale, 1.0)
                .with(Property::X, 0.0)
                .with(Property::Y, 0.0),
            settle_ms: Some(300.0),
        }),
        button,
    )
}

/// Frame rotating up to ±10° toward the pointer, flat again on leave.
pub fn tilt_frame(frame: ElementId) -> BindingConfig {
    BindingConfig::new(
        TriggerSpec::PointerWithin {
            bounds: frame,
            tilt: Some(TiltScale::Normalized(10.0)),
        },
        TimelineSpec::Follow(FollowTimeline {
            channels: vec![
                channel(Property::RotateY, PointerAxis::TiltX, 1.0),
                channel(Property::RotateX, PointerAxis::TiltY, -1.0),
            ],
            duration_ms: Some(300.0),
            ease: Some(Ease::InOutQuad),
            enter: Props::new(),
            rest: Props::new()
                .with(Property::RotateX, 0.0)
                .with(Property::RotateY, 0.0),
            settle_ms: Some(300.0),
        }),
        frame,
    )
}

/// Dot and ring following the pointer over `page`, the ring lagging behind. Both fade out when
/// the pointer leaves the page.
///
/// Positions are viewport coordinates, so the targets are expected to be fixed to the viewport
/// while `page` may scroll.
pub fn custom_cursor(page: ElementId, dot: ElementId, ring: ElementId) -> [BindingConfig; 2] {
    let follower = |target, duration_ms| {
        BindingConfig::new(
            TriggerSpec::PointerWithin {
                bounds: page,
                tilt: None,
            },
            TimelineSpec::Follow(FollowTimeline {
                channels: vec![
                    channel(Property::X, PointerAxis::ClientX, 1.0),
                    channel(Property::Y, PointerAxis::ClientY, 1.0),
                ],
                duration_ms: Some(duration_ms),
                ease: Some(Ease::OutQuart),
                enter: Props::new()
                    .with(Property::Scale, 1.0)
                    .with(Property::Opacity, 1.0),
                rest: Props::new()
                    .with(Property::Scale, 0.0)
                    .with(Property::Opacity, 0.0),
                settle_ms: Some(300.0),
            }),
            target,
        )
    };
    [follower(dot, 200.0), follower(ring, 500.0)]
}

/// Pinned mask growing to the full viewport while the region `"center center"` → `"+=800"`
/// scrolls by.
pub fn clip_reveal(
    mask: ElementId,
    region: RegionGeometry,
    viewport: Size,
) -> MotionResult<BindingConfig> {
    let (start, end) = region.resolve_str("center center", "+=800 center")?;
    Ok(BindingConfig::new(
        TriggerSpec::ScrollRegion {
            start,
            end,
            pin: true,
        },
        TimelineSpec::Scrubbed(ScrubbedTimeline {
            steps: vec![ops::to(
                Props::new()
                    .with(Property::Width, viewport.width)
                    .with(Property::Height, viewport.height)
                    .with(Property::BorderRadius, 0.0),
                1.0,
                Ease::Linear,
            )],
            smoothing_ms: 500.0,
        }),
        mask,
    ))
}

/// Text drifting up by 30% of its height while it crosses the viewport center.
pub fn text_parallax(text: ElementId, region: RegionGeometry) -> MotionResult<BindingConfig> {
    let (start, end) = region.resolve_str("top center", "bottom center")?;
    Ok(BindingConfig::new(
        TriggerSpec::ScrollRegion {
            start,
            end,
            pin: false,
        },
        TimelineSpec::Scrubbed(ScrubbedTimeline {
            steps: vec![ops::to(
                Props::new().with(Property::Y, -0.3 * region.element_height),
                1.0,
                Ease::Linear,
            )],
            smoothing_ms: 1000.0,
        }),
        text,
    ))
}

fn reveal(target: ElementId, delay_ms: f64) -> BindingConfig {
    BindingConfig::new(
        TriggerSpec::VisibilityThreshold {
            ratio: 0.3,
            once: true,
        },
        TimelineSpec::Timed(TimedTimeline {
            steps: ops::delay(
                vec![ops::from_to(
                    Props::new()
                        .with(Property::Opacity, 0.0)
                        .with(Property::Y, 50.0),
                    Props::new()
                        .with(Property::Opacity, 1.0)
                        .with(Property::Y, 0.0),
                    600.0,
                    Ease::OutCubic,
                )],
                delay_ms,
            ),
            repeat: Repeat::Once,
            rest: Props::new(),
            settle_ms: None,
        }),
        target,
    )
}

/// Fade-and-rise the first time `target` is 30% visible.
pub fn reveal_on_view(target: ElementId) -> BindingConfig {
    reveal(target, 0.0)
}

/// [`reveal_on_view`] for a group, the `i`-th member held hidden for `i * stagger_ms` first.
///
/// Members that enter view together come in one after another.
pub fn stagger_reveal(targets: &[ElementId], stagger_ms: f64) -> Vec<BindingConfig> {
    targets
        .iter()
        .enumerate()
        .map(|(i, &target)| reveal(target, i as f64 * stagger_ms.max(0.0)))
        .collect()
}

/// Tween `target` to `scrolled` once the page is scrolled past `threshold`, back to `rest` when
/// it returns above it.
pub fn scrolled_toggle(
    target: ElementId,
    threshold: f64,
    scrolled: Props,
    rest: Props,
) -> BindingConfig {
    BindingConfig::new(
        TriggerSpec::ScrollRegion {
            start: threshold,
            end: threshold + 1.0,
            pin: false,
        },
        TimelineSpec::Timed(TimedTimeline {
            steps: vec![ops::to(scrolled, 300.0, Ease::OutCubic)],
            repeat: Repeat::Once,
            rest,
            settle_ms: Some(300.0),
        }),
        target,
    )
}

/// Arrow nudging back and forth while its link is hovered.
pub fn hover_nudge(link: ElementId, arrow: ElementId) -> BindingConfig {
    BindingConfig::new(
        TriggerSpec::PointerWithin {
            bounds: link,
            tilt: None,
        },
        TimelineSpec::Timed(TimedTimeline {
            steps: vec![ops::from_to(
                Props::new().with(Property::X, 0.0),
                Props::new().with(Property::X, 5.0),
                600.0,
                Ease::InOutSine,
            )],
            repeat: Repeat::PingPong,
            rest: Props::new().with(Property::X, 0.0),
            settle_ms: Some(200.0),
        }),
        arrow,
    )
}

#[cfg(test)]
#[path = "../tests/unit/presets.rs"]
mod tests;
