//! Pointer input and style-completion event types

use smallvec::SmallVec;

use crate::adapter::ElementId;

/// A single touch contact with page coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    /// X position in document coordinates
    pub page_x: f32,
    /// Y position in document coordinates
    pub page_y: f32,
}

/// Pointer input driving a press/release gesture
///
/// Carries page (document) coordinates; the geometry module translates these
/// to surface-relative coordinates.
#[derive(Clone, Debug)]
pub enum PointerEvent {
    /// Mouse or generic pointer input
    Mouse {
        /// X position in document coordinates
        page_x: f32,
        /// Y position in document coordinates
        page_y: f32,
    },
    /// Touch input with the active touch list
    Touch {
        /// Active touches; the first entry drives the ripple
        touches: SmallVec<[TouchPoint; 2]>,
    },
}

impl PointerEvent {
    /// Page coordinates of the driving contact
    ///
    /// Returns `None` for a touch event with an empty touch list.
    pub fn page_position(&self) -> Option<(f32, f32)> {
        match self {
            PointerEvent::Mouse { page_x, page_y } => Some((*page_x, *page_y)),
            PointerEvent::Touch { touches } => {
                touches.first().map(|touch| (touch.page_x, touch.page_y))
            }
        }
    }
}

/// The kind of style-completion event a host can report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    /// A CSS transition finished (`transitionend`)
    TransitionEnd,
    /// A CSS keyframe animation finished (`animationend`)
    AnimationEnd,
}

/// A completion event delivered by the host
///
/// For transitions, `name` is the CSS property that finished interpolating;
/// for animations it is the keyframe animation name.
#[derive(Clone, Debug)]
pub struct CompletionEvent {
    /// The element the completion fired on
    pub element: ElementId,
    /// Transition or animation completion
    pub kind: CompletionKind,
    /// Reported property or animation name
    pub name: String,
}

impl CompletionEvent {
    /// A `transitionend` for the given property
    pub fn transition(element: ElementId, property: impl Into<String>) -> Self {
        Self {
            element,
            kind: CompletionKind::TransitionEnd,
            name: property.into(),
        }
    }

    /// An `animationend` for the given animation name
    pub fn animation(element: ElementId, name: impl Into<String>) -> Self {
        Self {
            element,
            kind: CompletionKind::AnimationEnd,
            name: name.into(),
        }
    }
}
