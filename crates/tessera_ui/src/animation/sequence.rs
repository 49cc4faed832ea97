//! Timed step sequences.
//!
//! A [`Sequence`] is plain data: an ordered list of steps, each tweening a
//! set of properties with shared timing. The [`super::Animator`] runs it and
//! starts each step only after every tween of the previous step finished.

use crate::easing::Easing;
use crate::widget::ComponentId;

use super::animator::{AnimationId, OnComplete};

/// Handle to a running sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceId(pub(crate) u64);

/// One step: tween every listed property to its value, together.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// `(property, end value)` pairs.
    pub properties: Vec<(String, f32)>,
    /// Step duration in seconds.
    pub duration: f64,
    /// Easing shared by the step's tweens.
    pub easing: Easing,
}

impl Step {
    /// Creates a step.
    #[must_use]
    pub fn new(properties: &[(&str, f32)], duration: f64, easing: Easing) -> Self {
        Self {
            properties: properties.iter().map(|&(p, v)| (p.to_owned(), v)).collect(),
            duration,
            easing,
        }
    }
}

/// Ordered steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    steps: Vec<Step>,
}

impl Sequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    #[must_use]
    pub fn then(mut self, properties: &[(&str, f32)], duration: f64, easing: Easing) -> Self {
        self.steps.push(Step::new(properties, duration, easing));
        self
    }

    /// The steps, in order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Total duration if every step runs back to back.
    #[must_use]
    pub fn total_duration(&self) -> f64 {
        self.steps.iter().map(|step| step.duration).sum()
    }

    pub(crate) fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

/// A sequence the animator is running.
pub(crate) struct SequenceRun {
    pub(crate) id: SequenceId,
    pub(crate) target: ComponentId,
    pub(crate) steps: Vec<Step>,
    /// Index of the running step.
    pub(crate) current: usize,
    /// Tweens of the running step.
    pub(crate) pending: Vec<AnimationId>,
    pub(crate) on_complete: Option<OnComplete>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let sequence = Sequence::new()
            .then(&[("x", 10.0)], 0.1, Easing::InOutCubic)
            .then(&[("x", -10.0), ("y", 2.0)], 0.2, Easing::OutCubic);

        assert_eq!(sequence.steps().len(), 2);
        assert_eq!(sequence.steps()[1].properties[1], ("y".to_owned(), 2.0));
        assert!((sequence.total_duration() - 0.3).abs() < 1e-9);
    }
}
