//! The render adapter contract
//!
//! The ripple engine is host-agnostic: it manipulates a render tree only
//! through the [`RenderAdapter`] capability trait, injected at construction.
//! Elements are identified by opaque [`ElementId`] handles that the host
//! resolves from logical [`ElementRole`]s.
//!
//! Completion interest is registered by (element, event kind); the host
//! delivers matching [`CompletionEvent`]s back into the engine's
//! `handle_completion` entry points. The engine deregisters interest
//! explicitly. No closures cross the adapter boundary.
//!
//! All adapter methods take `&self`: a render tree behaves like shared state,
//! and concrete adapters are expected to use interior mutability.

use std::rc::Rc;

use slotmap::new_key_type;

use crate::events::CompletionKind;
use crate::geometry::Rect;

new_key_type! {
    /// Opaque handle to a host render element
    pub struct ElementId;
    /// Opaque handle to a scheduled host timer
    pub struct TimerId;
}

impl ElementId {
    /// Convert to raw u64 for storage outside slotmap-keyed collections
    pub fn to_raw(self) -> u64 {
        self.0.as_ffi()
    }

    /// Reconstruct from raw u64
    ///
    /// The raw value must have been created by `to_raw()` on a valid
    /// `ElementId`.
    pub fn from_raw(raw: u64) -> Self {
        ElementId::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Logical parts of a ripple surface
///
/// The shared background layer indicates the surface is pressed; the four
/// foreground layers (each wrapping an inner circle) are recycled round-robin
/// across presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// The interactive surface the ripple is attached to
    Surface,
    /// The shared background fill layer
    Background,
    /// A pooled foreground layer, by slot index
    Foreground(usize),
    /// The inner circle of a pooled foreground layer
    ForegroundCircle(usize),
}

/// Capability set the engine drives a host render tree through
pub trait RenderAdapter {
    /// Resolve a logical role to an element handle
    fn resolve(&self, role: ElementRole) -> ElementId;

    /// Bounding rectangle of an element (viewport-relative origin)
    fn bounding_rect(&self, element: ElementId) -> Rect;

    /// Write one inline style property. An empty value clears the property.
    fn set_style(&self, element: ElementId, property: &str, value: &str);

    /// Write several inline style properties in program order
    fn set_styles(&self, element: ElementId, styles: &[(&str, &str)]) {
        for (property, value) in styles {
            self.set_style(element, property, value);
        }
    }

    /// Read a layout-triggering property, flushing pending style writes
    fn force_layout(&self, element: ElementId) -> f32;

    /// Add a CSS class
    fn add_class(&self, element: ElementId, class: &str);

    /// Remove a CSS class
    fn remove_class(&self, element: ElementId, class: &str);

    /// Read a computed style value (style recalc, not layout)
    fn computed_value(&self, element: ElementId, property: &str) -> String;

    /// Register interest in completion events of `kind` on `element`
    fn watch_completion(&self, element: ElementId, kind: CompletionKind);

    /// Deregister interest in completion events of `kind` on `element`
    fn unwatch_completion(&self, element: ElementId, kind: CompletionKind);
}

/// Deferred-callback capability of the host
///
/// Used when a deadline is known analytically and no completion event is
/// needed. The host calls the engine's `handle_timeout` when the delay
/// elapses; cancellation is cooperative.
pub trait TimerHost {
    /// Schedule a callback after `delay_ms` milliseconds
    fn schedule(&self, delay_ms: f32) -> TimerId;

    /// Cancel a scheduled callback
    fn cancel(&self, timer: TimerId);
}

impl<A: RenderAdapter + ?Sized> RenderAdapter for &A {
    fn resolve(&self, role: ElementRole) -> ElementId {
        (**self).resolve(role)
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        (**self).bounding_rect(element)
    }

    fn set_style(&self, element: ElementId, property: &str, value: &str) {
        (**self).set_style(element, property, value);
    }

    fn force_layout(&self, element: ElementId) -> f32 {
        (**self).force_layout(element)
    }

    fn add_class(&self, element: ElementId, class: &str) {
        (**self).add_class(element, class);
    }

    fn remove_class(&self, element: ElementId, class: &str) {
        (**self).remove_class(element, class);
    }

    fn computed_value(&self, element: ElementId, property: &str) -> String {
        (**self).computed_value(element, property)
    }

    fn watch_completion(&self, element: ElementId, kind: CompletionKind) {
        (**self).watch_completion(element, kind);
    }

    fn unwatch_completion(&self, element: ElementId, kind: CompletionKind) {
        (**self).unwatch_completion(element, kind);
    }
}

impl<A: RenderAdapter + ?Sized> RenderAdapter for Rc<A> {
    fn resolve(&self, role: ElementRole) -> ElementId {
        (**self).resolve(role)
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        (**self).bounding_rect(element)
    }

    fn set_style(&self, element: ElementId, property: &str, value: &str) {
        (**self).set_style(element, property, value);
    }

    fn force_layout(&self, element: ElementId) -> f32 {
        (**self).force_layout(element)
    }

    fn add_class(&self, element: ElementId, class: &str) {
        (**self).add_class(element, class);
    }

    fn remove_class(&self, element: ElementId, class: &str) {
        (**self).remove_class(element, class);
    }

    fn computed_value(&self, element: ElementId, property: &str) -> String {
        (**self).computed_value(element, property)
    }

    fn watch_completion(&self, element: ElementId, kind: CompletionKind) {
        (**self).watch_completion(element, kind);
    }

    fn unwatch_completion(&self, element: ElementId, kind: CompletionKind) {
        (**self).unwatch_completion(element, kind);
    }
}

impl<T: TimerHost + ?Sized> TimerHost for &T {
    fn schedule(&self, delay_ms: f32) -> TimerId {
        (**self).schedule(delay_ms)
    }

    fn cancel(&self, timer: TimerId) {
        (**self).cancel(timer);
    }
}

impl<T: TimerHost + ?Sized> TimerHost for Rc<T> {
    fn schedule(&self, delay_ms: f32) -> TimerId {
        (**self).schedule(delay_ms)
    }

    fn cancel(&self, timer: TimerId) {
        (**self).cancel(timer);
    }
}
