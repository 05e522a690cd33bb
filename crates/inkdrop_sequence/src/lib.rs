//! Inkdrop Sequential Animation Controller
//!
//! Runs an ordered chain of class-driven CSS transitions/animations on one
//! element, advancing a step only after the host reports the matching
//! completion event for that step, with single-point cancellation.
//!
//! The controller never blocks and never polls: entering a step adds the
//! step's class and registers completion interest through the render adapter;
//! the host delivers [`CompletionEvent`](inkdrop_core::CompletionEvent)s into
//! [`Sequencer::handle_completion`],
//! which advances the machine or ignores the event. If a completion event
//! never arrives, the chain stalls at that step; [`Sequencer::stop`] is the
//! only recovery path.
//!
//! # Example
//!
//! ```ignore
//! let mut sequencer = Sequencer::new(
//!     background,
//!     vec![AnimationStep::transition_property(class::BACKGROUND_ACTIVE_FILL, property::OPACITY)],
//! );
//! sequencer.start(&adapter)?;
//! // ... later, from the host's event dispatch:
//! let signal = sequencer.handle_completion(&adapter, &event);
//! ```

mod sequencer;

pub use sequencer::{
    AnimationStep, SequenceError, SequenceSignal, SequenceState, Sequencer, StepMatcher,
};
