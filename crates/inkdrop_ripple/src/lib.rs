//! Inkdrop Ripple State Machine
//!
//! Coordinates layered visual feedback for press-and-release gestures: a
//! shared background layer marks the surface as pressed, and a fixed pool of
//! [`MAX_RIPPLES`] foreground layers (recycled round-robin) carries the
//! expanding ripple visuals.
//!
//! Two modes:
//!
//! - **Bounded**: the ripple is clipped to the surface. A press only
//!   activates the background; the release runs a two-phase expand/gravitate
//!   animation driven by class-based sequences.
//! - **Unbounded**: the ripple may grow past the surface's edges (compact
//!   controls). The press starts an expanding foreground immediately; the
//!   release finishes the growth and fades out on analytically-computed
//!   transition durations, resetting styles on a host timer.
//!
//! The engine is single-threaded and event-driven: it re-synchronizes with
//! the host only through delivered completion events
//! ([`RippleFoundation::handle_completion`]) and elapsed timers
//! ([`RippleFoundation::handle_timeout`]). Overlapping gestures are allowed
//! to reuse a pool slot whose previous animation is still in flight; the
//! index always advances on release.

pub mod config;
pub mod foundation;

pub use config::{ConfigError, RippleConfig};
pub use foundation::{
    opacity_duration_ms, press_duration_ms, radius_duration_ms, RippleFoundation,
    GRAVITATE_FRACTION, PRESS_DELAY_MS,
};

/// Size of the recycled foreground layer pool
pub const MAX_RIPPLES: usize = 4;
