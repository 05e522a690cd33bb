//! Inkdrop Core Primitives
//!
//! This crate provides the foundational pieces shared by the inkdrop ripple
//! engine:
//!
//! - **Geometry**: surface-relative touch math and ripple radius computation
//! - **Render Adapter**: the capability trait the engine drives a host
//!   render tree through, plus opaque element/timer handles
//! - **Events**: pointer input and transition/animation completion events
//! - **CSS Vocabulary**: the class, property, and animation names the engine
//!   writes, with style-string formatting helpers
//!
//! The engine never owns render elements. A host resolves logical
//! [`ElementRole`]s to opaque [`ElementId`]s, the engine writes classes and
//! inline styles through the adapter, and the host delivers
//! [`CompletionEvent`]s and timer callbacks back into the engine.
//!
//! # Example
//!
//! ```ignore
//! use inkdrop_core::{geometry, Point, Rect};
//!
//! let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
//! let translate = geometry::origin_translate(Point::new(10.0, 10.0), rect);
//! assert_eq!(translate, Point::new(-40.0, -15.0));
//! ```

pub mod adapter;
pub mod css;
pub mod events;
pub mod geometry;

pub use adapter::{ElementId, ElementRole, RenderAdapter, TimerHost, TimerId};
pub use events::{CompletionEvent, CompletionKind, PointerEvent, TouchPoint};
pub use geometry::{Point, Rect};
