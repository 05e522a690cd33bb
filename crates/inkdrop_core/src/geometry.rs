//! Surface-relative geometry for ripple placement
//!
//! All functions are pure arithmetic. Inputs are not validated; whatever the
//! host hands in propagates through unchanged.

use crate::events::PointerEvent;

/// A 2D point or offset in surface coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin / zero offset
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A bounding rectangle as reported by the host render tree
///
/// `left`/`top` are viewport-relative, matching what a layout query returns.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Center of the rectangle in surface coordinates
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Translate a surface-relative touch point to be relative to the surface
/// center.
pub fn origin_translate(point: Point, rect: Rect) -> Point {
    Point::new(point.x - rect.width / 2.0, point.y - rect.height / 2.0)
}

/// Maximum radius a ripple needs to cover the surface from any origin:
/// the diagonal half-length of the bounding box.
pub fn max_radius(rect: Rect) -> f32 {
    std::f32::consts::SQRT_2 * rect.width.max(rect.height) / 2.0
}

/// Scale a center-relative offset toward the center.
///
/// `fraction` is the portion of the original offset that remains: 2/3 yields
/// the settle point of a bounded release, 0 collapses to the center.
pub fn gravitate(translate: Point, fraction: f32) -> Point {
    Point::new(translate.x * fraction, translate.y * fraction)
}

/// Convert a pointer event's page coordinates to surface-relative
/// coordinates.
///
/// The surface's document offset is its viewport rect origin plus the page
/// scroll offset. Touch events read the first entry of the touch list; an
/// empty touch list normalizes to the surface's document origin.
pub fn normalize_pointer(event: &PointerEvent, rect: Rect, scroll: Point) -> Point {
    let doc_left = rect.left + scroll.x;
    let doc_top = rect.top + scroll.y;
    let (page_x, page_y) = event.page_position().unwrap_or((doc_left, doc_top));
    Point::new(page_x - doc_left, page_y - doc_top)
}
