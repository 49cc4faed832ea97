//! Property tweens and the animator that advances them.

use std::fmt;
use std::mem;

use crate::easing::Easing;
use crate::widget::ComponentId;

use super::clock::{Clock, SystemClock};
use super::sequence::{Sequence, SequenceId, SequenceRun, Step};
use super::AnimationTargets;

/// Duration used when a tween does not set one (seconds).
pub const DEFAULT_DURATION: f64 = 1.0;

/// Completion callback. Receives the animator so it can schedule follow-ups.
pub type OnComplete = Box<dyn FnOnce(&mut Animator, &mut dyn AnimationTargets)>;

/// Handle to a registered animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

/// Outcome of one [`Animation::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Already complete; nothing was written.
    NotRunning,
    /// Value written, more to go.
    Running,
    /// Final value written; this call completed the animation.
    Finished,
    /// The target no longer exists; nothing was written.
    TargetGone,
}

/// Parameters for [`Animator::animate`].
pub struct Tween {
    property: String,
    to: f32,
    duration: f64,
    easing: Easing,
    on_complete: Option<OnComplete>,
}

impl Tween {
    /// Tween `property` to `to` over [`DEFAULT_DURATION`] with the default easing.
    #[must_use]
    pub fn new(property: impl Into<String>, to: f32) -> Self {
        Self {
            property: property.into(),
            to,
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
            on_complete: None,
        }
    }

    /// Sets the duration in seconds.
    #[must_use]
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    /// Sets the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }

    /// Sets the completion callback.
    #[must_use]
    pub fn on_complete<F>(self, callback: F) -> Self
    where
        F: FnOnce(&mut Animator, &mut dyn AnimationTargets) + 'static,
    {
        self.on_complete_boxed(Some(Box::new(callback)))
    }

    /// Sets or clears an already boxed completion callback.
    #[must_use]
    pub fn on_complete_boxed(mut self, callback: Option<OnComplete>) -> Self {
        self.on_complete = callback;
        self
    }
}

/// One property tween on one target.
pub struct Animation {
    id: AnimationId,
    target: ComponentId,
    property: String,
    start_value: f32,
    end_value: f32,
    duration: f64,
    easing: Easing,
    on_complete: Option<OnComplete>,
    start_time: f64,
    complete: bool,
}

impl Animation {
    /// Handle.
    #[must_use]
    pub fn id(&self) -> AnimationId {
        self.id
    }

    /// Animated node.
    #[must_use]
    pub fn target(&self) -> ComponentId {
        self.target
    }

    /// Animated property.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Value at progress 0.
    #[must_use]
    pub fn start_value(&self) -> f32 {
        self.start_value
    }

    /// Value at progress 1.
    #[must_use]
    pub fn end_value(&self) -> f32 {
        self.end_value
    }

    /// Duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Easing curve.
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Clock time the animation counts from.
    #[must_use]
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// True once the final value has been written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Linear progress at `now`, clamped to `[0, 1]`. Zero durations are
    /// immediately complete.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn progress_at(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0) as f32
    }

    /// Writes the eased value for `now` into the target.
    ///
    /// A target without the property is left alone; the animation still
    /// completes on schedule. Reports [`Advance::Finished`] exactly once.
    pub fn advance(&mut self, now: f64, targets: &mut dyn AnimationTargets) -> Advance {
        if self.complete {
            return Advance::NotRunning;
        }
        if !targets.is_alive(self.target) {
            return Advance::TargetGone;
        }

        let progress = self.progress_at(now);
        let eased = self.easing.apply(progress);
        let value = self.start_value + (self.end_value - self.start_value) * eased;
        targets.set_property(self.target, &self.property, value);

        if progress >= 1.0 {
            self.complete = true;
            Advance::Finished
        } else {
            Advance::Running
        }
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("property", &self.property)
            .field("start_value", &self.start_value)
            .field("end_value", &self.end_value)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("start_time", &self.start_time)
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}

/// Owns the live tweens and sequences and advances them once per tick.
///
/// Targets are referenced by [`ComponentId`]; every tick checks liveness and
/// silently drops animations whose target is gone.
pub struct Animator {
    animations: Vec<Animation>,
    sequences: Vec<SequenceRun>,
    clock: Box<dyn Clock>,
    paused_at: Option<f64>,
    next_id: u64,
    /// Set while `update` has the lists taken out.
    updating: bool,
    cancel_all: bool,
    cancelled_targets: Vec<ComponentId>,
}

impl Animator {
    /// Creates an animator on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }

    /// Creates an animator on the given clock.
    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            animations: Vec::with_capacity(64),
            sequences: Vec::new(),
            clock: Box::new(clock),
            paused_at: None,
            next_id: 1,
            updating: false,
            cancel_all: false,
            cancelled_targets: Vec::new(),
        }
    }

    /// Current clock time.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Starts tweening a property from its current value (0 if missing).
    ///
    /// Nothing is written until the next [`Animator::update`].
    pub fn animate(&mut self, targets: &dyn AnimationTargets, target: ComponentId, tween: Tween) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;

        let start_value = targets.get_property(target, &tween.property).unwrap_or(0.0);
        self.animations.push(Animation {
            id,
            target,
            property: tween.property,
            start_value,
            end_value: tween.to,
            duration: tween.duration,
            easing: tween.easing,
            on_complete: tween.on_complete,
            start_time: self.clock.now(),
            complete: false,
        });
        id
    }

    /// Starts one tween per `(property, to)` pair with shared timing.
    ///
    /// `on_complete` is attached to the last pair only. With equal durations
    /// that is also the last to finish; for a real join use
    /// [`Animator::run_sequence`].
    pub fn animate_multiple(
        &mut self,
        targets: &dyn AnimationTargets,
        target: ComponentId,
        properties: &[(&str, f32)],
        duration: f64,
        easing: Easing,
        on_complete: Option<OnComplete>,
    ) -> Vec<AnimationId> {
        let mut on_complete = on_complete;
        let last = properties.len().saturating_sub(1);
        properties
            .iter()
            .enumerate()
            .map(|(i, &(property, to))| {
                let callback = if i == last { on_complete.take() } else { None };
                let tween = Tween::new(property, to)
                    .duration(duration)
                    .easing(easing)
                    .on_complete_boxed(callback);
                self.animate(targets, target, tween)
            })
            .collect()
    }

    /// Runs a sequence of steps on one target.
    ///
    /// Each step starts once every tween of the previous step has finished.
    /// `on_complete` fires after the last step.
    pub fn run_sequence(
        &mut self,
        targets: &dyn AnimationTargets,
        target: ComponentId,
        sequence: Sequence,
        on_complete: Option<OnComplete>,
    ) -> SequenceId {
        let id = SequenceId(self.next_id);
        self.next_id += 1;

        let steps = sequence.into_steps();
        let pending = match steps.first() {
            Some(step) => self.start_step(targets, target, step),
            None => Vec::new(),
        };
        self.sequences.push(SequenceRun {
            id,
            target,
            steps,
            current: 0,
            pending,
            on_complete,
        });
        id
    }

    /// Index of the step a sequence is running, `None` once it finished or
    /// was stopped.
    #[must_use]
    pub fn sequence_step(&self, id: SequenceId) -> Option<usize> {
        self.sequences.iter().find(|run| run.id == id).map(|run| run.current)
    }

    /// Advances every animation, fires completion callbacks, and steps
    /// sequences. Returns the number of animations that finished.
    ///
    /// Animations scheduled by callbacks during this call are first advanced
    /// on the next call. No-op while paused.
    pub fn update(&mut self, targets: &mut dyn AnimationTargets) -> usize {
        if self.paused_at.is_some() {
            return 0;
        }
        let now = self.clock.now();
        self.updating = true;

        let mut finished = 0;
        let mut kept = Vec::with_capacity(self.animations.len());
        for mut animation in mem::take(&mut self.animations) {
            if self.is_cancelled(animation.target) {
                continue;
            }
            match animation.advance(now, targets) {
                Advance::Running => kept.push(animation),
                Advance::Finished => {
                    finished += 1;
                    tracing::debug!("animation {}.{} finished", animation.target, animation.property);
                    if let Some(callback) = animation.on_complete.take() {
                        callback(self, targets);
                    }
                }
                Advance::TargetGone => {
                    tracing::debug!("dropped animation {}.{}: target gone", animation.target, animation.property);
                }
                Advance::NotRunning => {}
            }
        }
        kept.retain(|animation| !self.is_cancelled(animation.target));
        kept.append(&mut self.animations);
        self.animations = kept;
        self.clear_cancellations();

        self.step_sequences(targets);
        self.clear_cancellations();
        self.updating = false;
        finished
    }

    /// Drops every animation and sequence without firing callbacks.
    pub fn stop_all(&mut self) {
        self.animations.clear();
        self.sequences.clear();
        if self.updating {
            self.cancel_all = true;
        }
    }

    /// Drops every animation and sequence on `target` without firing callbacks.
    pub fn stop_animations_for_target(&mut self, target: ComponentId) {
        self.animations.retain(|animation| animation.target != target);
        self.sequences.retain(|run| run.target != target);
        if self.updating {
            self.cancelled_targets.push(target);
        }
    }

    /// Freezes all animations.
    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(self.clock.now());
        }
    }

    /// Unfreezes, shifting every start time so progress continues from where
    /// it was when paused.
    pub fn resume(&mut self) {
        let Some(paused_at) = self.paused_at.take() else {
            return;
        };
        let now = self.clock.now();
        for animation in &mut self.animations {
            let elapsed = (paused_at - animation.start_time).min(animation.duration).max(0.0);
            animation.start_time = now - elapsed;
        }
    }

    /// True while paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Number of live animations.
    #[must_use]
    pub fn active_animation_count(&self) -> usize {
        self.animations.len()
    }

    /// True if `target` (or just its `property`) is being animated.
    #[must_use]
    pub fn is_animating(&self, target: ComponentId, property: Option<&str>) -> bool {
        self.animations
            .iter()
            .any(|a| a.target == target && property.map_or(true, |p| a.property == p))
    }

    /// A live animation.
    #[must_use]
    pub fn animation(&self, id: AnimationId) -> Option<&Animation> {
        self.animations.iter().find(|a| a.id == id)
    }

    /// Fades opacity to 1.
    pub fn fade_in(&mut self, targets: &dyn AnimationTargets, target: ComponentId, duration: f64) -> AnimationId {
        let tween = Tween::new("opacity", 1.0).duration(duration).easing(Easing::OutCubic);
        self.animate(targets, target, tween)
    }

    /// Fades opacity to 0.
    pub fn fade_out(&mut self, targets: &dyn AnimationTargets, target: ComponentId, duration: f64) -> AnimationId {
        let tween = Tween::new("opacity", 0.0).duration(duration).easing(Easing::InCubic);
        self.animate(targets, target, tween)
    }

    /// Moves the target `distance` left, then slides it back.
    pub fn slide_in_left(
        &mut self,
        targets: &mut dyn AnimationTargets,
        target: ComponentId,
        distance: f32,
        duration: f64,
    ) -> AnimationId {
        self.slide_x_from(targets, target, -distance, duration)
    }

    /// Moves the target `distance` right, then slides it back.
    pub fn slide_in_right(
        &mut self,
        targets: &mut dyn AnimationTargets,
        target: ComponentId,
        distance: f32,
        duration: f64,
    ) -> AnimationId {
        self.slide_x_from(targets, target, distance, duration)
    }

    /// Scales both axes to 1.
    pub fn scale_in(&mut self, targets: &dyn AnimationTargets, target: ComponentId, duration: f64) -> Vec<AnimationId> {
        self.animate_multiple(
            targets,
            target,
            &[("scale_x", 1.0), ("scale_y", 1.0)],
            duration,
            Easing::OutCubic,
            None,
        )
    }

    /// Scales both axes to 0.
    pub fn scale_out(&mut self, targets: &dyn AnimationTargets, target: ComponentId, duration: f64) -> Vec<AnimationId> {
        self.animate_multiple(
            targets,
            target,
            &[("scale_x", 0.0), ("scale_y", 0.0)],
            duration,
            Easing::InCubic,
            None,
        )
    }

    /// Tweens `y` to its own value along the bounce curve.
    pub fn bounce(&mut self, targets: &dyn AnimationTargets, target: ComponentId, duration: f64) -> AnimationId {
        let y = targets.get_property(target, "y").unwrap_or(0.0);
        let tween = Tween::new("y", y).duration(duration).easing(Easing::OutBounce);
        self.animate(targets, target, tween)
    }

    /// Scales up to `scale` over half the duration, then back to 1 from the
    /// first half's completion callback.
    pub fn pulse(
        &mut self,
        targets: &dyn AnimationTargets,
        target: ComponentId,
        scale: f32,
        duration: f64,
    ) -> Vec<AnimationId> {
        let half = duration * 0.5;
        let back: OnComplete = Box::new(move |animator: &mut Animator, targets: &mut dyn AnimationTargets| {
            animator.animate_multiple(
                &*targets,
                target,
                &[("scale_x", 1.0), ("scale_y", 1.0)],
                half,
                Easing::OutCubic,
                None,
            );
        });
        self.animate_multiple(
            targets,
            target,
            &[("scale_x", scale), ("scale_y", scale)],
            half,
            Easing::InCubic,
            Some(back),
        )
    }

    fn slide_x_from(
        &mut self,
        targets: &mut dyn AnimationTargets,
        target: ComponentId,
        offset: f32,
        duration: f64,
    ) -> AnimationId {
        let rest = targets.get_property(target, "x").unwrap_or(0.0);
        targets.set_property(target, "x", rest + offset);
        let tween = Tween::new("x", rest).duration(duration).easing(Easing::OutCubic);
        self.animate(&*targets, target, tween)
    }

    fn start_step(&mut self, targets: &dyn AnimationTargets, target: ComponentId, step: &Step) -> Vec<AnimationId> {
        step.properties
            .iter()
            .map(|(property, to)| {
                let tween = Tween::new(property.as_str(), *to)
                    .duration(step.duration)
                    .easing(step.easing);
                self.animate(targets, target, tween)
            })
            .collect()
    }

    /// Moves every sequence whose current step has fully finished on to its
    /// next step, or completes it.
    fn step_sequences(&mut self, targets: &mut dyn AnimationTargets) {
        for mut run in mem::take(&mut self.sequences) {
            if self.is_cancelled(run.target) {
                continue;
            }
            if !targets.is_alive(run.target) {
                tracing::debug!("dropped sequence on {}: target gone", run.target);
                continue;
            }
            let waiting = run
                .pending
                .iter()
                .any(|id| self.animations.iter().any(|a| a.id == *id));
            if waiting {
                self.sequences.push(run);
                continue;
            }

            run.current += 1;
            if let Some(step) = run.steps.get(run.current) {
                run.pending = self.start_step(&*targets, run.target, step);
                tracing::debug!("sequence on {} entered step {}", run.target, run.current);
                self.sequences.push(run);
            } else {
                tracing::debug!("sequence on {} complete", run.target);
                if let Some(callback) = run.on_complete.take() {
                    callback(self, targets);
                }
            }
        }
    }

    fn is_cancelled(&self, target: ComponentId) -> bool {
        self.cancel_all || self.cancelled_targets.contains(&target)
    }

    fn clear_cancellations(&mut self) {
        self.cancel_all = false;
        self.cancelled_targets.clear();
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}
