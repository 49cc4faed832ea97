//! Property animation.
//!
//! The [`Animator`] owns live tweens and advances them once per tick against
//! anything implementing [`AnimationTargets`]. Targets are addressed by
//! [`ComponentId`] rather than by reference, so a target can be destroyed
//! mid-animation; the animator notices on its next tick and drops the tween.
//!
//! ```text
//! Tween ──animate──▶ Animator ──update──▶ AnimationTargets::set_property
//!                       │
//! Sequence ─run────────┘ (steps start when the previous step joined)
//! ```

mod animator;
mod clock;
mod sequence;
mod transition;

use crate::widget::ComponentId;

pub use animator::{Advance, Animation, AnimationId, Animator, OnComplete, Tween, DEFAULT_DURATION};
pub use clock::{Clock, ManualClock, SystemClock};
pub use sequence::{Sequence, SequenceId, Step};
pub use transition::{pop_in_sequence, pulse_sequence, rubber_band_sequence, shake_sequence, Transition};

/// Numeric properties the animator can read and write by name.
pub trait AnimationTargets {
    /// False once `target` has been destroyed.
    fn is_alive(&self, target: ComponentId) -> bool;

    /// Current value, `None` if the target does not expose `property`.
    fn get_property(&self, target: ComponentId, property: &str) -> Option<f32>;

    /// Writes a value. Returns false (and writes nothing) if the target does
    /// not expose `property`.
    fn set_property(&mut self, target: ComponentId, property: &str, value: f32) -> bool;
}
