//! End-to-end gesture scenarios driven through a recording adapter

use std::rc::Rc;

use inkdrop_core::css::{self, animation, class, property};
use inkdrop_core::{CompletionEvent, CompletionKind, ElementRole, Point, Rect};
use inkdrop_ripple::{
    opacity_duration_ms, press_duration_ms, radius_duration_ms, RippleConfig, RippleFoundation,
    MAX_RIPPLES,
};
use inkdrop_testkit::RecordingAdapter;

const SURFACE: Rect = Rect::new(0.0, 0.0, 100.0, 50.0);

fn foundation(config: RippleConfig) -> (Rc<RecordingAdapter>, RippleFoundation<Rc<RecordingAdapter>>) {
    let adapter = Rc::new(RecordingAdapter::with_surface(SURFACE));
    let ripple = RippleFoundation::new(Rc::clone(&adapter), config);
    (adapter, ripple)
}

#[test]
fn bounded_press_activates_background_only() {
    let (adapter, mut ripple) = foundation(RippleConfig::bounded());
    ripple.on_press_begin(Point::new(0.0, 0.0));

    assert!(adapter.has_class(ElementRole::Background, class::BACKGROUND_ACTIVE));
    // No foreground work on a bounded press
    for slot in 0..MAX_RIPPLES {
        assert!(adapter
            .style(ElementRole::Foreground(slot), property::TRANSFORM)
            .is_none());
        assert!(adapter
            .style(ElementRole::ForegroundCircle(slot), property::TRANSITION)
            .is_none());
    }
}

#[test]
fn unbounded_press_applies_computed_duration_and_delay() {
    let (adapter, mut ripple) = foundation(RippleConfig::unbounded());
    ripple.on_press_begin(Point::new(0.0, 0.0));

    // max radius defaults to sqrt(2) * 100 / 2 ~= 70.71
    assert!((ripple.max_radius() - 70.7107).abs() < 1e-3);
    let transition = adapter
        .style(ElementRole::ForegroundCircle(0), property::TRANSITION)
        .expect("press writes a circle transition");
    assert!(transition.contains("262.8ms"), "got {transition}");
    assert!(transition.contains("80.0ms"), "got {transition}");

    // The circle expands to full scale and fades in
    assert_eq!(
        adapter
            .style(ElementRole::ForegroundCircle(0), property::OPACITY)
            .as_deref(),
        Some("1")
    );
    assert_eq!(
        adapter
            .style(ElementRole::ForegroundCircle(0), property::TRANSFORM)
            .as_deref(),
        Some("scale(1.00)")
    );
    // The foreground was positioned synchronously, then eased to center
    assert!(adapter.forced_layouts(ElementRole::Foreground(0)) > 0);
    assert_eq!(
        adapter
            .style(ElementRole::Foreground(0), property::TRANSFORM)
            .as_deref(),
        Some("translate(0.00px, 0.00px)")
    );
}

#[test]
fn bounded_release_settles_two_thirds_toward_center() {
    let (adapter, mut ripple) = foundation(RippleConfig::bounded());
    ripple.on_press_begin(Point::new(10.0, 10.0));
    ripple.on_press_end(Point::new(10.0, 10.0));

    // origin translate is (-40, -15); the settle point is 2/3 of that
    assert_eq!(
        adapter
            .style(ElementRole::Foreground(0), property::TRANSFORM)
            .as_deref(),
        Some("translate(-26.67px, -10.00px)")
    );
    assert!(adapter.has_class(ElementRole::Foreground(0), class::FOREGROUND_ACTIVE));
    assert!(adapter.forced_layouts(ElementRole::Foreground(0)) > 0);
}

#[test]
fn bounded_release_runs_fill_and_radius_sequences() {
    let (adapter, mut ripple) = foundation(RippleConfig::bounded());
    ripple.on_press_begin(Point::new(10.0, 10.0));
    ripple.on_press_end(Point::new(10.0, 10.0));

    // Background no longer active, fill fade running
    assert!(!adapter.has_class(ElementRole::Background, class::BACKGROUND_ACTIVE));
    assert!(adapter.has_class(ElementRole::Background, class::BACKGROUND_ACTIVE_FILL));
    assert!(adapter.is_watching(ElementRole::Background, CompletionKind::TransitionEnd));

    // Circle growth animation running
    assert!(adapter.has_class(
        ElementRole::ForegroundCircle(0),
        class::FOREGROUND_CIRCLE_RADIUS_IN
    ));
    assert!(adapter.is_watching(
        ElementRole::ForegroundCircle(0),
        CompletionKind::AnimationEnd
    ));

    // Fill fade completes
    let background = adapter.element(ElementRole::Background);
    ripple.handle_completion(&CompletionEvent::transition(background, property::OPACITY));
    assert!(!adapter.has_class(ElementRole::Background, class::BACKGROUND_ACTIVE_FILL));
    assert!(!adapter.is_watching(ElementRole::Background, CompletionKind::TransitionEnd));

    // Radius growth completes: its own class and the foreground active
    // class both come off
    let circle = adapter.element(ElementRole::ForegroundCircle(0));
    ripple.handle_completion(&CompletionEvent::animation(circle, animation::RADIUS_IN));
    assert!(!adapter.has_class(
        ElementRole::ForegroundCircle(0),
        class::FOREGROUND_CIRCLE_RADIUS_IN
    ));
    assert!(!adapter.has_class(ElementRole::Foreground(0), class::FOREGROUND_ACTIVE));
}

#[test]
fn mismatched_completions_do_not_finish_a_release() {
    let (adapter, mut ripple) = foundation(RippleConfig::bounded());
    ripple.on_press_begin(Point::new(10.0, 10.0));
    ripple.on_press_end(Point::new(10.0, 10.0));

    let circle = adapter.element(ElementRole::ForegroundCircle(0));
    // A transition completion on the circle is the wrong kind
    ripple.handle_completion(&CompletionEvent::transition(circle, property::OPACITY));
    // A differently-named animation does not match either
    ripple.handle_completion(&CompletionEvent::animation(circle, "some-other-animation"));

    assert!(adapter.has_class(
        ElementRole::ForegroundCircle(0),
        class::FOREGROUND_CIRCLE_RADIUS_IN
    ));
    assert!(adapter.has_class(ElementRole::Foreground(0), class::FOREGROUND_ACTIVE));
}

#[test]
fn pool_index_advances_only_on_release() {
    let (_, mut ripple) = foundation(RippleConfig::bounded());
    ripple.on_press_begin(Point::new(0.0, 0.0));
    ripple.on_press_begin(Point::new(0.0, 0.0));
    assert_eq!(ripple.fg_index(), 0);

    ripple.on_press_end(Point::new(0.0, 0.0));
    assert_eq!(ripple.fg_index(), 1);
}

#[test]
fn eight_cycles_touch_each_slot_exactly_twice_in_order() {
    let (adapter, mut ripple) = foundation(RippleConfig::bounded());

    let mut touched = Vec::new();
    for _ in 0..8 {
        touched.push(ripple.fg_index());
        ripple.on_press_begin(Point::new(0.0, 0.0));
        ripple.on_press_end(Point::new(0.0, 0.0));
    }
    assert_eq!(touched, vec![0, 1, 2, 3, 0, 1, 2, 3]);

    // Each slot's foreground was positioned (and layout-flushed) exactly
    // twice across the run
    for slot in 0..MAX_RIPPLES {
        assert_eq!(adapter.forced_layouts(ElementRole::Foreground(slot)), 2);
    }
}

#[test]
fn unbounded_cycling_matches_modulo_arithmetic() {
    let (_, mut ripple) = foundation(RippleConfig::unbounded());
    for n in 1..=6u32 {
        ripple.on_press_begin(Point::new(0.0, 0.0));
        ripple.on_press_end(Point::new(0.0, 0.0));
        assert_eq!(ripple.fg_index(), (n % 4) as usize);
    }
}

#[test]
fn max_radius_override_is_returned_exactly_and_bypasses_computation() {
    let (adapter, mut ripple) = foundation(RippleConfig::unbounded());
    ripple.set_max_radius(Some(42.0)).unwrap();
    ripple.on_press_begin(Point::new(0.0, 0.0));

    assert_eq!(ripple.max_radius(), 42.0);
    let transition = adapter
        .style(ElementRole::ForegroundCircle(0), property::TRANSITION)
        .unwrap();
    assert!(transition.contains(&css::ms(press_duration_ms(42.0))));

    // Clearing the override restores the computed value
    ripple.set_max_radius(None).unwrap();
    assert!((ripple.max_radius() - 70.7107).abs() < 1e-3);
}

#[test]
fn layout_is_cached_until_invalidated() {
    let (adapter, mut ripple) = foundation(RippleConfig::unbounded());
    ripple.on_press_begin(Point::new(0.0, 0.0));
    assert!((ripple.max_radius() - 70.7107).abs() < 1e-3);

    // The surface grows, but the cached rect is still used
    adapter.set_rect(ElementRole::Surface, Rect::new(0.0, 0.0, 200.0, 50.0));
    ripple.on_press_end(Point::new(0.0, 0.0));
    ripple.on_press_begin(Point::new(0.0, 0.0));
    assert!((ripple.max_radius() - 70.7107).abs() < 1e-3);

    ripple.invalidate_layout();
    ripple.on_press_begin(Point::new(0.0, 0.0));
    assert!((ripple.max_radius() - std::f32::consts::SQRT_2 * 100.0).abs() < 1e-3);
}

#[test]
fn unbounded_release_after_press_uses_read_opacity_as_progress() {
    let (adapter, mut ripple) = foundation(RippleConfig::unbounded());
    ripple.on_press_begin(Point::new(0.0, 0.0));
    adapter.set_computed(ElementRole::ForegroundCircle(0), property::OPACITY, "0.6");
    ripple.on_press_end(Point::new(0.0, 0.0));

    let max_radius = ripple.max_radius();
    let remaining = max_radius - 0.6 * max_radius;
    let transition = adapter
        .style(ElementRole::ForegroundCircle(0), property::TRANSITION)
        .unwrap();
    assert!(transition.contains(&css::ms(radius_duration_ms(remaining))));
    assert!(transition.contains(&css::ms(opacity_duration_ms(0.6))));

    // Fade-out targets
    assert_eq!(
        adapter
            .style(ElementRole::ForegroundCircle(0), property::OPACITY)
            .as_deref(),
        Some("0")
    );
    assert_eq!(
        adapter
            .style(ElementRole::ForegroundCircle(0), property::TRANSFORM)
            .as_deref(),
        Some("scale(1.00)")
    );

    // Style reset is scheduled at the fade duration
    let timers = adapter.pending_timers();
    assert_eq!(timers.len(), 1);
    assert!((timers[0].1 - opacity_duration_ms(0.6)).abs() < 1e-3);
}

#[test]
fn unbounded_release_without_press_synthesizes_a_fresh_ripple() {
    let (adapter, mut ripple) = foundation(RippleConfig::unbounded());
    // No press, no computed opacity programmed: the read comes back empty
    ripple.on_press_end(Point::new(0.0, 0.0));

    let max_radius = ripple.max_radius();
    let transition = adapter
        .style(ElementRole::ForegroundCircle(0), property::TRANSITION)
        .unwrap();
    assert!(transition.contains(&css::ms(radius_duration_ms(max_radius / 2.0))));
    assert!(transition.contains(&css::ms(opacity_duration_ms(1.0))));

    let timers = adapter.pending_timers();
    assert_eq!(timers.len(), 1);
    assert!((timers[0].1 - 333.3333).abs() < 0.01);

    // The supported programmatic release still advances the pool
    assert_eq!(ripple.fg_index(), 1);
}

#[test]
fn timeout_clears_inline_styles_for_the_released_slot() {
    let (adapter, mut ripple) = foundation(RippleConfig::unbounded());
    ripple.on_press_begin(Point::new(0.0, 0.0));
    adapter.set_computed(ElementRole::ForegroundCircle(0), property::OPACITY, "1");
    ripple.on_press_end(Point::new(0.0, 0.0));

    let (timer, _) = adapter.pending_timers()[0];
    ripple.handle_timeout(timer);

    for role in [ElementRole::Foreground(0), ElementRole::ForegroundCircle(0)] {
        assert!(adapter.style(role, property::TRANSITION).is_none());
        assert!(adapter.style(role, property::TRANSFORM).is_none());
        assert!(adapter.style(role, property::OPACITY).is_none());
        // Layout sizing persists; only animation styles are cleared
        assert!(adapter.style(role, property::WIDTH).is_some());
    }

    // Firing the same timer again is a no-op
    ripple.handle_timeout(timer);
}

#[test]
fn cancel_then_press_matches_a_fresh_surface() {
    let (canceled_adapter, mut canceled) = foundation(RippleConfig::unbounded());
    canceled.on_press_begin(Point::new(5.0, 5.0));
    canceled.cancel_animations();
    canceled.on_press_begin(Point::new(0.0, 0.0));

    let (fresh_adapter, mut fresh) = foundation(RippleConfig::unbounded());
    fresh.on_press_begin(Point::new(0.0, 0.0));

    let roles = [
        ElementRole::Background,
        ElementRole::Foreground(0),
        ElementRole::ForegroundCircle(0),
    ];
    let properties = [
        property::TRANSITION,
        property::TRANSFORM,
        property::OPACITY,
        property::WIDTH,
        property::HEIGHT,
    ];
    for role in roles {
        for prop in properties {
            assert_eq!(
                canceled_adapter.style(role, prop),
                fresh_adapter.style(role, prop),
                "style {prop:?} diverged for {role:?}"
            );
        }
        assert_eq!(canceled_adapter.classes(role), fresh_adapter.classes(role));
    }
}

#[test]
fn cancel_stops_sequences_and_timers() {
    let (adapter, mut ripple) = foundation(RippleConfig::bounded());
    ripple.on_press_begin(Point::new(10.0, 10.0));
    ripple.on_press_end(Point::new(10.0, 10.0));
    ripple.cancel_animations();

    assert!(!adapter.has_class(ElementRole::Background, class::BACKGROUND_ACTIVE));
    assert!(!adapter.has_class(ElementRole::Background, class::BACKGROUND_ACTIVE_FILL));
    assert!(!adapter.is_watching(ElementRole::Background, CompletionKind::TransitionEnd));
    assert!(!adapter.has_class(ElementRole::Foreground(0), class::FOREGROUND_ACTIVE));
    assert!(!adapter.is_watching(
        ElementRole::ForegroundCircle(0),
        CompletionKind::AnimationEnd
    ));

    // Late completions change nothing
    let circle = adapter.element(ElementRole::ForegroundCircle(0));
    ripple.handle_completion(&CompletionEvent::animation(circle, animation::RADIUS_IN));
    assert!(!adapter.has_class(ElementRole::Foreground(0), class::FOREGROUND_ACTIVE));

    // Unbounded reset timers are canceled too
    let (adapter, mut ripple) = foundation(RippleConfig::unbounded());
    ripple.on_press_begin(Point::new(0.0, 0.0));
    adapter.set_computed(ElementRole::ForegroundCircle(0), property::OPACITY, "1");
    ripple.on_press_end(Point::new(0.0, 0.0));
    assert_eq!(adapter.pending_timers().len(), 1);
    ripple.cancel_animations();
    assert!(adapter.pending_timers().is_empty());
}
