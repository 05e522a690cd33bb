//! The press/release orchestration state machine

use smallvec::SmallVec;

use inkdrop_core::css::{self, animation, class, easing, property};
use inkdrop_core::{
    geometry, CompletionEvent, ElementRole, Point, Rect, RenderAdapter, TimerHost, TimerId,
};
use inkdrop_sequence::{AnimationStep, SequenceSignal, Sequencer};

use crate::config::{validate_max_radius, ConfigError, RippleConfig};
use crate::MAX_RIPPLES;

/// Delay before the unbounded press transitions start
pub const PRESS_DELAY_MS: f32 = 80.0;

/// Fraction of the origin offset a bounded release settles at
pub const GRAVITATE_FRACTION: f32 = 2.0 / 3.0;

/// Synthetic circle state for a release with no preceding press
const FRESH_RELEASE_OPACITY: f32 = 1.0;
const FRESH_RELEASE_SCALE: f32 = 0.5;

/// Duration of the unbounded press expansion
pub fn press_duration_ms(max_radius: f32) -> f32 {
    1000.0 * (max_radius / 1024.0).sqrt()
}

/// Duration of the unbounded release's remaining radius growth
pub fn radius_duration_ms(remaining_radius: f32) -> f32 {
    1000.0 * (remaining_radius / 4424.0).sqrt()
}

/// Duration of the unbounded release's opacity fade
pub fn opacity_duration_ms(opacity: f32) -> f32 {
    1000.0 * opacity / 3.0
}

/// A radius-in sequence running against one pool slot's circle
struct CircleRelease {
    slot: usize,
    sequencer: Sequencer,
}

/// A scheduled style reset for one pool slot
struct PendingReset {
    slot: usize,
    timer: TimerId,
}

/// Press/release orchestrator for one ripple surface
///
/// Owns the injected adapter and all engine-side animation state: the cached
/// surface layout, the foreground pool index, in-flight release sequences,
/// and pending style-reset timers. The host forwards pointer gestures to
/// [`on_press_begin`](Self::on_press_begin) /
/// [`on_press_end`](Self::on_press_end), delivers completion events to
/// [`handle_completion`](Self::handle_completion), and fires scheduled timers
/// through [`handle_timeout`](Self::handle_timeout).
pub struct RippleFoundation<A: RenderAdapter + TimerHost> {
    adapter: A,
    bounded: bool,
    max_radius_override: Option<f32>,
    laid_out: bool,
    rect: Rect,
    max_radius: f32,
    fg_index: usize,
    background_release: Option<Sequencer>,
    circle_releases: SmallVec<[CircleRelease; MAX_RIPPLES]>,
    pending_resets: SmallVec<[PendingReset; MAX_RIPPLES]>,
}

impl<A: RenderAdapter + TimerHost> RippleFoundation<A> {
    pub fn new(adapter: A, config: RippleConfig) -> Self {
        Self {
            adapter,
            bounded: config.bounded,
            max_radius_override: config.max_radius,
            laid_out: false,
            rect: Rect::default(),
            max_radius: config.max_radius.unwrap_or(0.0),
            fg_index: 0,
            background_release: None,
            circle_releases: SmallVec::new(),
            pending_resets: SmallVec::new(),
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    /// Pool slot the next press/release pair will use
    pub fn fg_index(&self) -> usize {
        self.fg_index
    }

    /// The effective max radius (override, or computed once laid out)
    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    /// Override the computed max radius, or clear the override with `None`
    ///
    /// An override takes effect immediately and bypasses the bounding-box
    /// computation until cleared.
    pub fn set_max_radius(&mut self, max_radius: Option<f32>) -> Result<(), ConfigError> {
        if let Some(radius) = max_radius {
            validate_max_radius(radius)?;
        }
        self.max_radius_override = max_radius;
        self.max_radius = match max_radius {
            Some(radius) => radius,
            None if self.laid_out => geometry::max_radius(self.rect),
            None => 0.0,
        };
        Ok(())
    }

    /// Drop the cached layout; the next gesture re-measures the surface
    pub fn invalidate_layout(&mut self) {
        self.laid_out = false;
    }

    /// Begin a press gesture at a surface-relative point
    ///
    /// Activates the background. Unbounded surfaces additionally position
    /// the current foreground at the touch origin and start the expanding
    /// press transitions; bounded surfaces start no foreground work until
    /// release.
    pub fn on_press_begin(&mut self, point: Point) {
        self.ensure_layout();
        let background = self.adapter.resolve(ElementRole::Background);
        self.adapter.add_class(background, class::BACKGROUND_ACTIVE);
        tracing::debug!(x = point.x, y = point.y, slot = self.fg_index, "press begin");
        if self.bounded {
            return;
        }

        let translate = geometry::origin_translate(point, self.rect);
        let fg = self.adapter.resolve(ElementRole::Foreground(self.fg_index));
        let circle = self
            .adapter
            .resolve(ElementRole::ForegroundCircle(self.fg_index));

        // Commit the origin position before attaching transitions, so the
        // gravitate below animates from the touch point instead of snapping.
        self.adapter
            .set_style(fg, property::TRANSFORM, &css::translate(translate));
        self.adapter.force_layout(fg);

        let duration = press_duration_ms(self.max_radius);
        let circle_transition = format!(
            "{}, {}",
            css::transition_entry(
                property::TRANSFORM,
                duration,
                easing::EASE_OUT,
                Some(PRESS_DELAY_MS)
            ),
            css::transition_entry(
                property::OPACITY,
                duration,
                easing::LINEAR,
                Some(PRESS_DELAY_MS)
            ),
        );
        self.adapter.set_styles(
            circle,
            &[
                (property::TRANSITION, circle_transition.as_str()),
                (property::OPACITY, "1"),
                (property::TRANSFORM, css::scale(1.0).as_str()),
            ],
        );
        let fg_transition = css::transition_entry(
            property::TRANSFORM,
            duration,
            easing::EASE_OUT,
            Some(PRESS_DELAY_MS),
        );
        self.adapter.set_styles(
            fg,
            &[
                (property::TRANSITION, fg_transition.as_str()),
                (property::TRANSFORM, css::translate(Point::ZERO).as_str()),
            ],
        );
    }

    /// End a press gesture at a surface-relative point
    ///
    /// Deactivates the background, starts the release animation for the
    /// current slot, and advances the pool index - always, even while the
    /// release visuals are still in flight (the recycling policy).
    pub fn on_press_end(&mut self, point: Point) {
        self.ensure_layout();
        let background = self.adapter.resolve(ElementRole::Background);
        self.adapter
            .remove_class(background, class::BACKGROUND_ACTIVE);
        let slot = self.fg_index;
        tracing::debug!(
            x = point.x,
            y = point.y,
            slot,
            bounded = self.bounded,
            "press end"
        );
        if self.bounded {
            self.release_bounded(point, slot);
        } else {
            self.release_unbounded(slot);
        }
        self.fg_index = (self.fg_index + 1) % MAX_RIPPLES;
    }

    /// Deliver a completion event reported by the host
    ///
    /// Routes the event to the in-flight release sequences. A finished
    /// radius-in sequence removes its slot's foreground active class.
    pub fn handle_completion(&mut self, event: &CompletionEvent) {
        let adapter = &self.adapter;
        if let Some(fill) = self.background_release.as_mut() {
            if fill.handle_completion(adapter, event) == SequenceSignal::Finished {
                self.background_release = None;
            }
        }

        let mut finished = None;
        for (index, release) in self.circle_releases.iter_mut().enumerate() {
            if release.sequencer.handle_completion(adapter, event) == SequenceSignal::Finished {
                finished = Some(index);
                break;
            }
        }
        if let Some(index) = finished {
            let slot = self.circle_releases.remove(index).slot;
            let fg = self.adapter.resolve(ElementRole::Foreground(slot));
            self.adapter.remove_class(fg, class::FOREGROUND_ACTIVE);
        }
    }

    /// Fire a timer previously scheduled through the host
    ///
    /// Clears the inline transition/transform/opacity styles of the slot the
    /// timer was scheduled for. Unknown timers are ignored.
    pub fn handle_timeout(&mut self, timer: TimerId) {
        if let Some(position) = self.pending_resets.iter().position(|r| r.timer == timer) {
            let slot = self.pending_resets.remove(position).slot;
            tracing::trace!(slot, "release fade elapsed, clearing inline styles");
            self.reset_slot_styles(slot);
        }
    }

    /// Abandon all in-flight animations (pointer left the surface)
    ///
    /// Deactivates the background, stops release sequences, cancels pending
    /// reset timers, and clears the current slot's inline styles. A fresh
    /// press afterwards behaves exactly like a press on an untouched
    /// surface. Cancellation is cooperative: a transition the host's CSS
    /// engine already committed can only be stopped by removing the styles
    /// driving it.
    pub fn cancel_animations(&mut self) {
        tracing::debug!(slot = self.fg_index, "canceling in-flight animations");
        let background = self.adapter.resolve(ElementRole::Background);
        self.adapter
            .remove_class(background, class::BACKGROUND_ACTIVE);
        if let Some(mut fill) = self.background_release.take() {
            fill.stop(&self.adapter);
        }
        for mut release in self.circle_releases.drain(..) {
            release.sequencer.stop(&self.adapter);
            let fg = self.adapter.resolve(ElementRole::Foreground(release.slot));
            self.adapter.remove_class(fg, class::FOREGROUND_ACTIVE);
        }
        for reset in self.pending_resets.drain(..) {
            self.adapter.cancel(reset.timer);
        }
        self.reset_slot_styles(self.fg_index);
    }

    /// Measure and cache the surface layout, at most once unless invalidated
    fn ensure_layout(&mut self) {
        if self.laid_out {
            return;
        }
        let surface = self.adapter.resolve(ElementRole::Surface);
        self.rect = self.adapter.bounding_rect(surface);
        self.max_radius = self
            .max_radius_override
            .unwrap_or_else(|| geometry::max_radius(self.rect));

        // Size each pooled layer to the largest surface dimension, the
        // smallest box the scale-to-1 circle can grow within.
        let size = css::px(self.rect.width.max(self.rect.height));
        for slot in 0..MAX_RIPPLES {
            for role in [
                ElementRole::Foreground(slot),
                ElementRole::ForegroundCircle(slot),
            ] {
                let element = self.adapter.resolve(role);
                self.adapter.set_styles(
                    element,
                    &[
                        (property::WIDTH, size.as_str()),
                        (property::HEIGHT, size.as_str()),
                    ],
                );
            }
        }
        self.laid_out = true;
        tracing::debug!(
            width = self.rect.width,
            height = self.rect.height,
            max_radius = self.max_radius,
            "surface laid out"
        );
    }

    fn release_bounded(&mut self, point: Point, slot: usize) {
        let background = self.adapter.resolve(ElementRole::Background);
        let fg = self.adapter.resolve(ElementRole::Foreground(slot));
        let circle = self.adapter.resolve(ElementRole::ForegroundCircle(slot));

        let mut fill = Sequencer::new(
            background,
            vec![AnimationStep::transition_property(
                class::BACKGROUND_ACTIVE_FILL,
                property::OPACITY,
            )],
        );
        fill.start(&self.adapter)
            .expect("fill sequence has a step");
        self.background_release = Some(fill);

        let translate = geometry::origin_translate(point, self.rect);
        self.adapter
            .set_style(fg, property::TRANSFORM, &css::translate(translate));
        self.adapter.force_layout(fg);
        self.adapter.add_class(fg, class::FOREGROUND_ACTIVE);
        // The active class's stylesheet transition carries the ease; only
        // the settle target is written inline.
        let settle = geometry::gravitate(translate, GRAVITATE_FRACTION);
        self.adapter
            .set_style(fg, property::TRANSFORM, &css::translate(settle));

        let mut radius_in = Sequencer::new(
            circle,
            vec![AnimationStep::animation(
                class::FOREGROUND_CIRCLE_RADIUS_IN,
                animation::RADIUS_IN,
            )],
        );
        radius_in
            .start(&self.adapter)
            .expect("radius-in sequence has a step");
        self.circle_releases.push(CircleRelease {
            slot,
            sequencer: radius_in,
        });
    }

    fn release_unbounded(&mut self, slot: usize) {
        let circle = self.adapter.resolve(ElementRole::ForegroundCircle(slot));

        let read = self.adapter.computed_value(circle, property::OPACITY);
        let opacity = read.trim().parse::<f32>().unwrap_or(0.0);
        // A release with no preceding press reads opacity 0; treat it as a
        // fresh half-grown ripple rather than animating nothing.
        let (opacity, scale) = if opacity == 0.0 {
            self.adapter.set_styles(
                circle,
                &[
                    (property::OPACITY, "1"),
                    (property::TRANSFORM, css::scale(FRESH_RELEASE_SCALE).as_str()),
                ],
            );
            (FRESH_RELEASE_OPACITY, FRESH_RELEASE_SCALE)
        } else {
            // The press drives opacity and scale 0 -> 1 in lockstep, so the
            // computed opacity doubles as the growth progress.
            (opacity, opacity)
        };

        let remaining = self.max_radius - scale * self.max_radius;
        let radius_duration = radius_duration_ms(remaining);
        let opacity_duration = opacity_duration_ms(opacity);
        let transition = format!(
            "{}, {}",
            css::transition_entry(property::TRANSFORM, radius_duration, easing::EASE_OUT, None),
            css::transition_entry(property::OPACITY, opacity_duration, easing::LINEAR, None),
        );
        self.adapter.set_styles(
            circle,
            &[
                (property::TRANSITION, transition.as_str()),
                (property::TRANSFORM, css::scale(1.0).as_str()),
                (property::OPACITY, "0"),
            ],
        );

        // The fade deadline is known analytically; reset on a timer instead
        // of waiting for a completion event.
        let timer = self.adapter.schedule(opacity_duration);
        self.pending_resets.push(PendingReset { slot, timer });
    }

    fn reset_slot_styles(&self, slot: usize) {
        for role in [
            ElementRole::Foreground(slot),
            ElementRole::ForegroundCircle(slot),
        ] {
            let element = self.adapter.resolve(role);
            self.adapter.set_styles(
                element,
                &[
                    (property::TRANSITION, ""),
                    (property::TRANSFORM, ""),
                    (property::OPACITY, ""),
                ],
            );
        }
    }
}
