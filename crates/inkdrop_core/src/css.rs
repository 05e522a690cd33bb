//! CSS vocabulary and style-string formatting
//!
//! The engine's entire visual output is class toggles and inline style
//! strings; the names and formatting live here so adapters, stylesheets, and
//! tests agree on one vocabulary.

use crate::geometry::Point;

/// CSS classes the engine toggles
pub mod class {
    /// Background layer is active (surface pressed)
    pub const BACKGROUND_ACTIVE: &str = "ink-background--active";
    /// Background fill fade run on a bounded release
    pub const BACKGROUND_ACTIVE_FILL: &str = "ink-background--active-fill";
    /// Foreground layer is active (release animation in flight)
    pub const FOREGROUND_ACTIVE: &str = "ink-foreground--active";
    /// Drives the circle's radius-in growth animation
    pub const FOREGROUND_CIRCLE_RADIUS_IN: &str = "ink-foreground-circle--radius-in";
}

/// Keyframe animation names the engine waits on
pub mod animation {
    /// Bounded-release circle growth
    pub const RADIUS_IN: &str = "ink-radius-in";
}

/// Style properties the engine writes or matches transitions against
pub mod property {
    pub const OPACITY: &str = "opacity";
    pub const TRANSFORM: &str = "transform";
    pub const TRANSITION: &str = "transition";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
}

/// Timing functions
pub mod easing {
    /// Material deceleration curve
    pub const EASE_OUT: &str = "cubic-bezier(0, 0, 0.2, 1)";
    pub const LINEAR: &str = "linear";
}

/// Format a millisecond duration (0.1 ms precision)
pub fn ms(duration_ms: f32) -> String {
    format!("{duration_ms:.1}ms")
}

/// Format a pixel length
pub fn px(length: f32) -> String {
    format!("{length:.0}px")
}

/// Format one entry of a `transition` shorthand
pub fn transition_entry(
    property: &str,
    duration_ms: f32,
    timing: &str,
    delay_ms: Option<f32>,
) -> String {
    match delay_ms {
        Some(delay) => format!("{property} {} {timing} {}", ms(duration_ms), ms(delay)),
        None => format!("{property} {} {timing}", ms(duration_ms)),
    }
}

/// Format a 2D translate transform
pub fn translate(offset: Point) -> String {
    format!("translate({:.2}px, {:.2}px)", offset.x, offset.y)
}

/// Format a uniform scale transform
pub fn scale(factor: f32) -> String {
    format!("scale({factor:.2})")
}
