//! Inkdrop Test Kit
//!
//! A recording implementation of [`RenderAdapter`] and [`TimerHost`] for
//! driving the ripple engine without a real render tree. Every class toggle,
//! style write, layout flush, completion watch, and scheduled timer is
//! recorded and can be asserted on; computed style values are programmable.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use inkdrop_testkit::RecordingAdapter;
//!
//! let adapter = Rc::new(RecordingAdapter::with_surface(Rect::new(0.0, 0.0, 100.0, 50.0)));
//! let mut ripple = RippleFoundation::new(Rc::clone(&adapter), RippleConfig::bounded());
//! ripple.on_press_begin(Point::new(0.0, 0.0));
//! assert!(adapter.has_class(ElementRole::Background, class::BACKGROUND_ACTIVE));
//! ```

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use inkdrop_core::{
    CompletionKind, ElementId, ElementRole, Rect, RenderAdapter, TimerHost, TimerId,
};

/// Recorded state of one render element
#[derive(Default)]
struct ElementRecord {
    classes: Vec<String>,
    styles: FxHashMap<String, String>,
    computed: FxHashMap<String, String>,
    watches: Vec<CompletionKind>,
    rect: Rect,
    forced_layouts: u32,
}

/// Recorded state of one scheduled timer
struct TimerRecord {
    delay_ms: f32,
    canceled: bool,
}

#[derive(Default)]
struct Inner {
    elements: SlotMap<ElementId, ElementRecord>,
    roles: FxHashMap<ElementRole, ElementId>,
    timers: SlotMap<TimerId, TimerRecord>,
}

impl Inner {
    fn element(&mut self, role: ElementRole) -> ElementId {
        if let Some(&id) = self.roles.get(&role) {
            return id;
        }
        let id = self.elements.insert(ElementRecord::default());
        self.roles.insert(role, id);
        id
    }
}

/// A render adapter that records everything the engine does to it
///
/// Elements are allocated lazily on first `resolve`. All recorded state is
/// behind a `RefCell`, so the adapter can be shared via `Rc` between the
/// engine and the asserting test.
#[derive(Default)]
pub struct RecordingAdapter {
    inner: RefCell<Inner>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an adapter whose surface reports the given bounding rect
    pub fn with_surface(rect: Rect) -> Self {
        let adapter = Self::new();
        adapter.set_rect(ElementRole::Surface, rect);
        adapter
    }

    /// Set the bounding rect an element reports
    pub fn set_rect(&self, role: ElementRole, rect: Rect) {
        let mut inner = self.inner.borrow_mut();
        let id = inner.element(role);
        inner.elements[id].rect = rect;
    }

    /// Program the computed value an element reports for a property
    pub fn set_computed(&self, role: ElementRole, property: &str, value: &str) {
        let mut inner = self.inner.borrow_mut();
        let id = inner.element(role);
        inner.elements[id]
            .computed
            .insert(property.to_string(), value.to_string());
    }

    /// The element handle for a role (allocating it if needed)
    pub fn element(&self, role: ElementRole) -> ElementId {
        self.inner.borrow_mut().element(role)
    }

    /// Current classes on an element, in addition order
    pub fn classes(&self, role: ElementRole) -> Vec<String> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.element(role);
        inner.elements[id].classes.clone()
    }

    /// Whether an element currently carries a class
    pub fn has_class(&self, role: ElementRole, class: &str) -> bool {
        self.classes(role).iter().any(|c| c == class)
    }

    /// Current inline style value for a property, if set
    pub fn style(&self, role: ElementRole, property: &str) -> Option<String> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.element(role);
        inner.elements[id].styles.get(property).cloned()
    }

    /// Whether an element has no inline styles at all
    pub fn styles_empty(&self, role: ElementRole) -> bool {
        let mut inner = self.inner.borrow_mut();
        let id = inner.element(role);
        inner.elements[id].styles.is_empty()
    }

    /// Whether the engine is currently watching completions of `kind`
    pub fn is_watching(&self, role: ElementRole, kind: CompletionKind) -> bool {
        let mut inner = self.inner.borrow_mut();
        let id = inner.element(role);
        inner.elements[id].watches.contains(&kind)
    }

    /// How many times the engine forced a layout flush on an element
    pub fn forced_layouts(&self, role: ElementRole) -> u32 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.element(role);
        inner.elements[id].forced_layouts
    }

    /// Scheduled timers that have not been canceled, with their delays
    pub fn pending_timers(&self) -> Vec<(TimerId, f32)> {
        self.inner
            .borrow()
            .timers
            .iter()
            .filter(|(_, t)| !t.canceled)
            .map(|(id, t)| (id, t.delay_ms))
            .collect()
    }

    /// Whether a timer has been canceled
    pub fn is_canceled(&self, timer: TimerId) -> bool {
        self.inner
            .borrow()
            .timers
            .get(timer)
            .is_some_and(|t| t.canceled)
    }
}

impl RenderAdapter for RecordingAdapter {
    fn resolve(&self, role: ElementRole) -> ElementId {
        self.inner.borrow_mut().element(role)
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.inner.borrow().elements[element].rect
    }

    fn set_style(&self, element: ElementId, property: &str, value: &str) {
        let mut inner = self.inner.borrow_mut();
        let styles = &mut inner.elements[element].styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    fn force_layout(&self, element: ElementId) -> f32 {
        let mut inner = self.inner.borrow_mut();
        let record = &mut inner.elements[element];
        record.forced_layouts += 1;
        record.rect.width
    }

    fn add_class(&self, element: ElementId, class: &str) {
        let mut inner = self.inner.borrow_mut();
        let classes = &mut inner.elements[element].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, element: ElementId, class: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.elements[element].classes.retain(|c| c != class);
    }

    fn computed_value(&self, element: ElementId, property: &str) -> String {
        self.inner.borrow().elements[element]
            .computed
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    fn watch_completion(&self, element: ElementId, kind: CompletionKind) {
        let mut inner = self.inner.borrow_mut();
        let watches = &mut inner.elements[element].watches;
        if !watches.contains(&kind) {
            watches.push(kind);
        }
    }

    fn unwatch_completion(&self, element: ElementId, kind: CompletionKind) {
        let mut inner = self.inner.borrow_mut();
        inner.elements[element].watches.retain(|k| *k != kind);
    }
}

impl TimerHost for RecordingAdapter {
    fn schedule(&self, delay_ms: f32) -> TimerId {
        self.inner.borrow_mut().timers.insert(TimerRecord {
            delay_ms,
            canceled: false,
        })
    }

    fn cancel(&self, timer: TimerId) {
        if let Some(record) = self.inner.borrow_mut().timers.get_mut(timer) {
            record.canceled = true;
        }
    }
}
