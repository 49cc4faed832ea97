//! Named transition recipes.
//!
//! Single-tween recipes go straight to [`Animator::animate`]. Compound ones
//! (pop-in, shake, pulse, rubber band) are [`Sequence`]s, so a caller can ask
//! which step is running.

use crate::easing::Easing;
use crate::widget::ComponentId;

use super::animator::{AnimationId, Animator, OnComplete, Tween};
use super::sequence::{Sequence, SequenceId};
use super::AnimationTargets;

/// Offset used by slides when the target has no size.
const DEFAULT_SLIDE_EXTENT: f32 = 100.0;
/// Length of each shake step (seconds).
const SHAKE_STEP: f64 = 0.1;
/// Length of the pop-in fade (seconds).
const POP_FADE: f64 = 0.1;

/// Scale up with a bounce, then fade in.
#[must_use]
pub fn pop_in_sequence(duration: f64) -> Sequence {
    Sequence::new()
        .then(&[("scale_x", 1.0), ("scale_y", 1.0)], duration, Easing::OutBounce)
        .then(&[("opacity", 1.0)], POP_FADE, Easing::OutCubic)
}

/// Right, left, then back to `origin_x`.
#[must_use]
pub fn shake_sequence(origin_x: f32, intensity: f32) -> Sequence {
    Sequence::new()
        .then(&[("x", origin_x + intensity)], SHAKE_STEP, Easing::InOutCubic)
        .then(&[("x", origin_x - intensity)], SHAKE_STEP, Easing::InOutCubic)
        .then(&[("x", origin_x)], SHAKE_STEP, Easing::OutCubic)
}

/// Scale to `scale` and back, each half taking half the duration.
#[must_use]
pub fn pulse_sequence(scale: f32, duration: f64) -> Sequence {
    Sequence::new()
        .then(&[("scale_x", scale), ("scale_y", scale)], duration * 0.5, Easing::InCubic)
        .then(&[("scale_x", 1.0), ("scale_y", 1.0)], duration * 0.5, Easing::OutCubic)
}

/// Squash and stretch that settles back to scale 1.
#[must_use]
pub fn rubber_band_sequence(duration: f64) -> Sequence {
    Sequence::new()
        .then(&[("scale_x", 1.25), ("scale_y", 0.75)], duration * 0.3, Easing::InOutCubic)
        .then(&[("scale_x", 0.95), ("scale_y", 1.05)], duration * 0.2, Easing::InOutCubic)
        .then(&[("scale_x", 1.05), ("scale_y", 0.95)], duration * 0.1, Easing::InOutCubic)
        .then(&[("scale_x", 1.0), ("scale_y", 1.0)], duration * 0.1, Easing::OutCubic)
}

/// Applies recipes through an animator to a set of targets.
pub struct Transition<'a> {
    animator: &'a mut Animator,
    targets: &'a mut dyn AnimationTargets,
}

impl<'a> Transition<'a> {
    /// Binds an animator to the targets it will animate.
    pub fn new(animator: &'a mut Animator, targets: &'a mut dyn AnimationTargets) -> Self {
        Self { animator, targets }
    }

    /// Starts just off the left edge (by the target's width) and slides to
    /// the current x.
    pub fn slide_in_from_left(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> AnimationId {
        let width = self.read(target, "width", DEFAULT_SLIDE_EXTENT);
        self.slide_in(target, "x", -width, duration, on_complete)
    }

    /// Starts off the right edge and slides to the current x.
    pub fn slide_in_from_right(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> AnimationId {
        let width = self.read(target, "width", DEFAULT_SLIDE_EXTENT);
        self.slide_in(target, "x", width, duration, on_complete)
    }

    /// Starts above (by the target's height) and slides to the current y.
    pub fn slide_in_from_top(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> AnimationId {
        let height = self.read(target, "height", DEFAULT_SLIDE_EXTENT);
        self.slide_in(target, "y", -height, duration, on_complete)
    }

    /// Starts below and slides to the current y.
    pub fn slide_in_from_bottom(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> AnimationId {
        let height = self.read(target, "height", DEFAULT_SLIDE_EXTENT);
        self.slide_in(target, "y", height, duration, on_complete)
    }

    /// Slides left by the target's width.
    pub fn slide_out_to_left(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> AnimationId {
        let x = self.read(target, "x", 0.0);
        let width = self.read(target, "width", DEFAULT_SLIDE_EXTENT);
        self.tween(target, Tween::new("x", x - width), duration, Easing::InCubic, on_complete)
    }

    /// Slides right by the target's width.
    pub fn slide_out_to_right(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> AnimationId {
        let x = self.read(target, "x", 0.0);
        let width = self.read(target, "width", DEFAULT_SLIDE_EXTENT);
        self.tween(target, Tween::new("x", x + width), duration, Easing::InCubic, on_complete)
    }

    /// Sets opacity to 0 and fades to 1.
    pub fn fade_in(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> AnimationId {
        self.targets.set_property(target, "opacity", 0.0);
        self.tween(target, Tween::new("opacity", 1.0), duration, Easing::OutCubic, on_complete)
    }

    /// Fades opacity to 0.
    pub fn fade_out(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> AnimationId {
        self.tween(target, Tween::new("opacity", 0.0), duration, Easing::InCubic, on_complete)
    }

    /// Collapses to scale 0 and grows to 1.
    pub fn scale_in(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> Vec<AnimationId> {
        self.targets.set_property(target, "scale_x", 0.0);
        self.targets.set_property(target, "scale_y", 0.0);
        self.animator.animate_multiple(
            &*self.targets,
            target,
            &[("scale_x", 1.0), ("scale_y", 1.0)],
            duration,
            Easing::OutCubic,
            on_complete,
        )
    }

    /// Shrinks to scale 0.
    pub fn scale_out(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> Vec<AnimationId> {
        self.animator.animate_multiple(
            &*self.targets,
            target,
            &[("scale_x", 0.0), ("scale_y", 0.0)],
            duration,
            Easing::InCubic,
            on_complete,
        )
    }

    /// Hides the target, bounces its scale up, then fades it in.
    pub fn pop_in(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> SequenceId {
        for property in ["scale_x", "scale_y", "opacity"] {
            self.targets.set_property(target, property, 0.0);
        }
        self.animator
            .run_sequence(&*self.targets, target, pop_in_sequence(duration), on_complete)
    }

    /// Tilts 90 degrees about x and flips flat.
    pub fn flip_in_x(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> AnimationId {
        self.rotate_from(target, "rotation_x", 90.0, duration, on_complete)
    }

    /// Tilts 90 degrees about y and flips flat.
    pub fn flip_in_y(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> AnimationId {
        self.rotate_from(target, "rotation_y", 90.0, duration, on_complete)
    }

    /// Rotates in from `angle` degrees.
    pub fn rotate_in(
        &mut self,
        target: ComponentId,
        angle: f32,
        duration: f64,
        on_complete: Option<OnComplete>,
    ) -> AnimationId {
        self.rotate_from(target, "rotation", angle, duration, on_complete)
    }

    /// Shakes horizontally around the current x.
    pub fn shake(&mut self, target: ComponentId, intensity: f32, on_complete: Option<OnComplete>) -> SequenceId {
        let x = self.read(target, "x", 0.0);
        self.animator
            .run_sequence(&*self.targets, target, shake_sequence(x, intensity), on_complete)
    }

    /// Scales up to `scale` and back.
    pub fn pulse(&mut self, target: ComponentId, scale: f32, duration: f64, on_complete: Option<OnComplete>) -> SequenceId {
        self.animator
            .run_sequence(&*self.targets, target, pulse_sequence(scale, duration), on_complete)
    }

    /// Squash-and-stretch wobble.
    pub fn rubber_band(&mut self, target: ComponentId, duration: f64, on_complete: Option<OnComplete>) -> SequenceId {
        self.animator
            .run_sequence(&*self.targets, target, rubber_band_sequence(duration), on_complete)
    }

    fn read(&self, target: ComponentId, property: &str, default: f32) -> f32 {
        self.targets.get_property(target, property).unwrap_or(default)
    }

    fn slide_in(
        &mut self,
        target: ComponentId,
        property: &str,
        offset: f32,
        duration: f64,
        on_complete: Option<OnComplete>,
    ) -> AnimationId {
        let origin = self.read(target, property, 0.0);
        self.targets.set_property(target, property, origin + offset);
        self.tween(target, Tween::new(property, origin), duration, Easing::OutCubic, on_complete)
    }

    fn rotate_from(
        &mut self,
        target: ComponentId,
        property: &str,
        angle: f32,
        duration: f64,
        on_complete: Option<OnComplete>,
    ) -> AnimationId {
        self.targets.set_property(target, property, angle);
        self.tween(target, Tween::new(property, 0.0), duration, Easing::OutCubic, on_complete)
    }

    fn tween(
        &mut self,
        target: ComponentId,
        tween: Tween,
        duration: f64,
        easing: Easing,
        on_complete: Option<OnComplete>,
    ) -> AnimationId {
        let tween = tween.duration(duration).easing(easing).on_complete_boxed(on_complete);
        self.animator.animate(&*self.targets, target, tween)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ManualClock;
    use crate::layout::Rect;
    use crate::render::DrawBackend;
    use crate::widget::{Component, ComponentTree, Node};

    struct Blank;

    impl Component for Blank {
        fn render(&self, _node: &Node, _backend: &mut dyn DrawBackend) {}
    }

    fn setup() -> (ComponentTree, ComponentId, Animator, ManualClock) {
        let mut tree = ComponentTree::new();
        let id = tree.create(Blank);
        tree.set_bounds(id, Rect::new(40.0, 10.0, 200.0, 50.0));
        let clock = ManualClock::new();
        (tree, id, Animator::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_slide_in_from_left_uses_width() {
        let (mut tree, id, mut animator, clock) = setup();
        Transition::new(&mut animator, &mut tree).slide_in_from_left(id, 0.3, None);
        assert_eq!(tree.bounds(id).map(|r| r.x), Some(-160.0));

        clock.advance(0.3);
        animator.update(&mut tree);
        assert_eq!(tree.bounds(id).map(|r| r.x), Some(40.0));
    }

    #[test]
    fn test_slide_out_to_right() {
        let (mut tree, id, mut animator, clock) = setup();
        Transition::new(&mut animator, &mut tree).slide_out_to_right(id, 0.3, None);

        clock.advance(0.3);
        animator.update(&mut tree);
        assert_eq!(tree.bounds(id).map(|r| r.x), Some(240.0));
    }

    #[test]
    fn test_fade_in_resets_opacity() {
        let (mut tree, id, mut animator, _clock) = setup();
        Transition::new(&mut animator, &mut tree).fade_in(id, 0.3, None);
        assert_eq!(tree.node(id).map(|n| n.visual().opacity), Some(0.0));
    }

    #[test]
    fn test_rotate_in_starts_at_angle() {
        let (mut tree, id, mut animator, clock) = setup();
        Transition::new(&mut animator, &mut tree).rotate_in(id, 180.0, 0.5, None);
        assert_eq!(tree.node(id).map(|n| n.visual().rotation), Some(180.0));

        clock.advance(0.5);
        animator.update(&mut tree);
        assert_eq!(tree.node(id).map(|n| n.visual().rotation), Some(0.0));
    }

    #[test]
    fn test_shake_steps_through_and_returns() {
        let (mut tree, id, mut animator, clock) = setup();
        let seq = Transition::new(&mut animator, &mut tree).shake(id, 10.0, None);
        assert_eq!(animator.sequence_step(seq), Some(0));

        clock.advance(0.1);
        animator.update(&mut tree);
        assert_eq!(tree.bounds(id).map(|r| r.x), Some(50.0));
        assert_eq!(animator.sequence_step(seq), Some(1));

        clock.advance(0.1);
        animator.update(&mut tree);
        assert_eq!(tree.bounds(id).map(|r| r.x), Some(30.0));
        assert_eq!(animator.sequence_step(seq), Some(2));

        clock.advance(0.1);
        animator.update(&mut tree);
        assert_eq!(tree.bounds(id).map(|r| r.x), Some(40.0));
        assert_eq!(animator.sequence_step(seq), None);
    }

    #[test]
    fn test_rubber_band_shape() {
        let steps = rubber_band_sequence(1.0);
        let scales: Vec<_> = steps.steps().iter().map(|s| (s.properties[0].1, s.properties[1].1)).collect();
        assert_eq!(scales, vec![(1.25, 0.75), (0.95, 1.05), (1.05, 0.95), (1.0, 1.0)]);
        assert!((steps.total_duration() - 0.7).abs() < 1e-9);
    }
}
