//! # motionbind guide
//!
//! This module is a standalone walkthrough of how bindings are built, driven and torn down.
//! If you are looking for copy/paste commands, start with the repository `README.md`.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`TriggerSpec`](crate::TriggerSpec): where progress or pointer coordinates come from
//! - [`TimelineSpec`](crate::TimelineSpec): what gets written, as a function of progress, time or
//!   the pointer
//! - [`BindingConfig`](crate::BindingConfig): one trigger, one timeline, one target element
//! - [`Stage`](crate::Stage): owns the bindings of a page and routes events to them
//! - [`Host`](crate::Host): the document (geometry, scroll, property storage, subscriptions)
//! - [`Animator`](crate::Animator): every running producer of property writes
//!
//! Data flows one way:
//!
//! 1. The host delivers a [`HostEvent`](crate::HostEvent) to [`Stage::dispatch`](crate::Stage::dispatch)
//! 2. Each binding normalizes it (scroll progress, pointer offsets and tilt, visibility edges)
//! 3. The timeline turns the normalized value into property values
//! 4. The animator writes them, after checking the producer still owns each property
//!
//! ---
//!
//! ## Pairing triggers with timelines
//!
//! | trigger \ timeline      | scrubbed                  | timed                        | follow |
//! |-------------------------|---------------------------|------------------------------|--------|
//! | `scroll_region`         | progress through region   | play when region starts      | -      |
//! | `pointer_within`        | -                         | play on enter, rest on leave | yes    |
//! | `visibility_threshold`  | progress = ratio          | play on enter (`once` honored) | -    |
//!
//! Any other pairing is a [`MotionError::Configuration`](crate::MotionError::Configuration) and
//! leaves the binding inert.
//!
//! Timed timelines that repeat (`loop`, `ping_pong`) must list a `rest` value for every property
//! they animate. Deactivating them (pointer leave, visibility exit, scrolling back above a region,
//! [`Stage::settle`](crate::Stage::settle)) plays a short tween that ends exactly at `rest`. A timed
//! scroll timeline with a `rest` state also re-arms, so it plays again on the next pass.
//!
//! ---
//!
//! ## Lifecycle
//!
//! A binding moves through `unbound → subscribing → active → tearing_down → unbound`.
//!
//! - `bind` validates, checks the target is attached and subscribes. Scroll and pointer sources
//!   are live right away; a visibility binding stays `subscribing` until its first observer
//!   callback.
//! - `teardown` unsubscribes, cancels every producer of the binding and drops its live state. A
//!   second call does nothing.
//! - `rebind` is teardown followed by bind under the new config.
//!
//! Events that arrive for a detached target tear the binding down; the cause is kept in
//! [`Stage::error`](crate::Stage::error) instead of being returned to the event source.
//!
//! ---
//!
//! ## Supersede
//!
//! Starting a player claims its properties on its target, and a scrubbed binding claims its
//! properties when it binds. The previous owner of a claimed property loses it on the spot, and a
//! producer left owning nothing is dropped before the new one writes its first frame. Writes are
//! filtered by ownership, so an older scrub never takes a property back. A hover-out tween to `scale: 1` therefore never fights a still
//! running hover-in tween to `scale: 1.2`.
//!
//! ---
//!
//! ## Scroll markers
//!
//! [`RegionGeometry`](crate::RegionGeometry) resolves markers such as `"center center"` (element
//! center meets viewport center) and relative ends such as `"+=800"` into document offsets.
//! [`presets::measure`](crate::presets::measure) reads the geometry from a host.
//!
//! ```
//! use motionbind::RegionGeometry;
//!
//! let region = RegionGeometry {
//!     element_top: 2000.0,
//!     element_height: 400.0,
//!     viewport_height: 800.0,
//! };
//! let (start, end) = region.resolve_str("center center", "+=800").unwrap();
//! assert_eq!((start, end), (1800.0, 2600.0));
//! ```
//!
//! ---
//!
//! ## Process-wide settings
//!
//! Presentation constants (default tilt divisor, follow and settle durations and eases, smoothing
//! epsilon, root margin) live in [`Settings`](crate::Settings). Call [`init`](crate::init) once at
//! startup; [`Stage::new`](crate::Stage::new) copies them. Calling `init` again with different
//! values fails, and there is no global teardown.
//!
//! ---
//!
//! ## Replays
//!
//! A [`Script`](crate::Script) describes a document, the bindings mounted on it and timestamped
//! events. [`replay`](crate::replay) runs it against a [`MemoryHost`](crate::MemoryHost) and
//! returns every property write. The `motionbind replay` command does the same from JSON files.
//!
//! ```
//! use motionbind::{ElementId, Host, HostEvent, MemoryHost, Property, Rect, Settings, Size, Stage};
//!
//! let mut host = MemoryHost::new(Size::new(800.0, 600.0));
//! let (area, button) = (ElementId(1), ElementId(2));
//! host.insert(area, Rect::new(0.0, 0.0, 200.0, 100.0));
//! host.insert(button, Rect::new(20.0, 20.0, 180.0, 80.0));
//!
//! let mut stage = Stage::with_settings(Settings::default());
//! let id = stage.mount(motionbind::presets::magnetic_button(area, button, 1.2), &mut host);
//! stage.dispatch(HostEvent::PointerEnter { element: area }, &mut host);
//! while !stage.is_idle() {
//!     host.advance(16.0);
//!     stage.dispatch(HostEvent::Frame, &mut host);
//! }
//! assert_eq!(host.value(button, Property::Scale), Some(1.2));
//!
//! assert!(stage.unmount(id, &mut host));
//! assert_eq!(host.active_subscriptions(), 0);
//! # let _ = host.now_ms();
//! ```
