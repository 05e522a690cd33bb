//! The sequence state machine

use thiserror::Error;

use inkdrop_core::{CompletionEvent, CompletionKind, ElementId, RenderAdapter};

/// Errors from sequence operations
#[derive(Error, Debug)]
pub enum SequenceError {
    /// A sequence must contain at least one step
    #[error("cannot start a sequence with no steps")]
    Empty,
}

/// How a step recognizes its completion event
#[derive(Clone, Debug, PartialEq)]
pub enum StepMatcher {
    /// A `transitionend`, optionally for one specific CSS property
    ///
    /// With no property declared, any transition completion on the element
    /// is accepted.
    Transition(Option<String>),
    /// An `animationend` for a specific keyframe animation name
    Animation(String),
}

impl StepMatcher {
    /// The completion kind this matcher listens for
    pub fn kind(&self) -> CompletionKind {
        match self {
            StepMatcher::Transition(_) => CompletionKind::TransitionEnd,
            StepMatcher::Animation(_) => CompletionKind::AnimationEnd,
        }
    }

    fn accepts(&self, event: &CompletionEvent) -> bool {
        match (self, event.kind) {
            (StepMatcher::Transition(None), CompletionKind::TransitionEnd) => true,
            (StepMatcher::Transition(Some(property)), CompletionKind::TransitionEnd) => {
                *property == event.name
            }
            (StepMatcher::Animation(name), CompletionKind::AnimationEnd) => *name == event.name,
            _ => false,
        }
    }
}

/// One step of a sequence: a class to add and the completion that resolves it
#[derive(Clone, Debug)]
pub struct AnimationStep {
    pub class: String,
    pub matcher: StepMatcher,
}

impl AnimationStep {
    /// A transition-driven step resolved by any `transitionend`
    pub fn transition(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            matcher: StepMatcher::Transition(None),
        }
    }

    /// A transition-driven step resolved only by the given CSS property
    pub fn transition_property(class: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            matcher: StepMatcher::Transition(Some(property.into())),
        }
    }

    /// An animation-driven step resolved by the given animation name
    pub fn animation(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            matcher: StepMatcher::Animation(name.into()),
        }
    }
}

/// Sequencer lifecycle states
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceState {
    /// Never started (or freshly constructed)
    Idle,
    /// Step `i` is waiting for its completion event
    Running(usize),
    /// All steps resolved
    Completed,
    /// Stopped mid-run; no further steps execute
    Canceled,
}

/// What [`Sequencer::handle_completion`] did with a delivered event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceSignal {
    /// The event did not match the current step (or nothing is running)
    Ignored,
    /// The current step resolved and the next step was entered
    Advanced,
    /// The final step resolved; the sequence is complete
    Finished,
}

/// Runs an ordered chain of class-driven animations on one element
///
/// Entering a step adds its class and registers completion interest for the
/// step's event kind; resolving a step removes its own class and deregisters
/// before the next step is entered. The optional `on_finish` callback fires
/// exactly once, only on reaching [`SequenceState::Completed`] - never after
/// [`Sequencer::stop`].
pub struct Sequencer {
    element: ElementId,
    steps: Vec<AnimationStep>,
    state: SequenceState,
    on_finish: Option<Box<dyn FnOnce()>>,
}

impl Sequencer {
    pub fn new(element: ElementId, steps: Vec<AnimationStep>) -> Self {
        Self {
            element,
            steps,
            state: SequenceState::Idle,
            on_finish: None,
        }
    }

    /// Attach a completion callback (fires once, on completion only)
    pub fn with_on_finish(mut self, on_finish: impl FnOnce() + 'static) -> Self {
        self.on_finish = Some(Box::new(on_finish));
        self
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SequenceState::Running(_))
    }

    /// Start the chain at step 0
    ///
    /// A `Completed` or `Canceled` sequencer starts a fresh run (a consumed
    /// `on_finish` is not restored). Starting while `Running` cancels the
    /// in-flight run first.
    pub fn start<A: RenderAdapter>(&mut self, adapter: &A) -> Result<(), SequenceError> {
        if self.steps.is_empty() {
            return Err(SequenceError::Empty);
        }
        if self.is_running() {
            self.stop(adapter);
        }
        self.state = SequenceState::Running(0);
        self.enter_step(adapter, 0);
        Ok(())
    }

    /// Deliver a completion event reported by the host
    ///
    /// An event is accepted only if the element matches, the event kind
    /// matches the current step, and the reported property/animation name
    /// satisfies the step's matcher. Anything else is ignored - completions
    /// for later steps never advance the chain early.
    pub fn handle_completion<A: RenderAdapter>(
        &mut self,
        adapter: &A,
        event: &CompletionEvent,
    ) -> SequenceSignal {
        let SequenceState::Running(index) = self.state else {
            return SequenceSignal::Ignored;
        };
        if event.element != self.element || !self.steps[index].matcher.accepts(event) {
            return SequenceSignal::Ignored;
        }

        self.exit_step(adapter, index);
        if index + 1 < self.steps.len() {
            self.state = SequenceState::Running(index + 1);
            self.enter_step(adapter, index + 1);
            SequenceSignal::Advanced
        } else {
            self.state = SequenceState::Completed;
            tracing::debug!(steps = self.steps.len(), "sequence completed");
            if let Some(on_finish) = self.on_finish.take() {
                on_finish();
            }
            SequenceSignal::Finished
        }
    }

    /// Cancel the chain
    ///
    /// During `Running`, removes the current step's class, deregisters its
    /// listener, and moves to `Canceled`; `on_finish` will never fire, even
    /// if matching completion events arrive later. No-op in any other state.
    pub fn stop<A: RenderAdapter>(&mut self, adapter: &A) {
        if let SequenceState::Running(index) = self.state {
            self.exit_step(adapter, index);
            self.state = SequenceState::Canceled;
            tracing::debug!(step = index, "sequence canceled");
        }
    }

    fn enter_step<A: RenderAdapter>(&self, adapter: &A, index: usize) {
        let step = &self.steps[index];
        tracing::trace!(step = index, class = %step.class, "entering sequence step");
        adapter.add_class(self.element, &step.class);
        adapter.watch_completion(self.element, step.matcher.kind());
    }

    fn exit_step<A: RenderAdapter>(&self, adapter: &A, index: usize) {
        let step = &self.steps[index];
        adapter.remove_class(self.element, &step.class);
        adapter.unwatch_completion(self.element, step.matcher.kind());
    }
}

impl std::fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("element", &self.element)
            .field("steps", &self.steps)
            .field("state", &self.state)
            .field("on_finish", &self.on_finish.is_some())
            .finish()
    }
}
