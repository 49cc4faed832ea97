//! # Animation Integration Test
//!
//! Drives the animator against a real tree on a manual clock.

use std::cell::Cell;
use std::rc::Rc;

use tessera_ui::animation::{AnimationTargets, Animator, ManualClock, Sequence, Transition, Tween};
use tessera_ui::widget::Container;
use tessera_ui::{ComponentTree, Easing, Rect};

fn setup() -> (ComponentTree, Animator, ManualClock) {
    let clock = ManualClock::new();
    let animator = Animator::with_clock(clock.clone());
    (ComponentTree::new(), animator, clock)
}

fn close(a: Option<f32>, b: f32) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-4)
}

#[test]
fn test_pause_resume_keeps_progress() {
    let (mut tree, mut animator, clock) = setup();
    let id = tree.create(Container);
    animator.animate(&tree, id, Tween::new("x", 100.0).duration(1.0).easing(Easing::Linear));

    clock.advance(0.25);
    animator.update(&mut tree);
    assert!(close(tree.get_property(id, "x"), 25.0));

    animator.pause();
    clock.advance(10.0);
    assert_eq!(animator.update(&mut tree), 0);
    assert!(close(tree.get_property(id, "x"), 25.0));

    animator.resume();
    clock.advance(0.25);
    animator.update(&mut tree);
    assert!(close(tree.get_property(id, "x"), 50.0));
}

#[test]
fn test_target_destroyed_mid_animation() {
    let (mut tree, mut animator, clock) = setup();
    let id = tree.create(Container);
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    animator.animate(
        &tree,
        id,
        Tween::new("opacity", 0.0)
            .duration(1.0)
            .on_complete(move |_, _| flag.set(true)),
    );

    tree.destroy(id).unwrap();
    clock.advance(2.0);
    assert_eq!(animator.update(&mut tree), 0);
    assert_eq!(animator.active_animation_count(), 0);
    assert!(!fired.get());
}

#[test]
fn test_callback_chains_next_tick() {
    let (mut tree, mut animator, clock) = setup();
    let id = tree.create(Container);
    animator.animate(
        &tree,
        id,
        Tween::new("x", 10.0)
            .duration(0.5)
            .easing(Easing::Linear)
            .on_complete(move |animator, targets| {
                animator.animate(&*targets, id, Tween::new("y", 20.0).duration(0.5).easing(Easing::Linear));
            }),
    );

    clock.advance(1.0);
    assert_eq!(animator.update(&mut tree), 1);
    assert!(animator.is_animating(id, Some("y")));
    assert_eq!(tree.get_property(id, "y"), Some(0.0));

    clock.advance(0.5);
    animator.update(&mut tree);
    assert!(close(tree.get_property(id, "y"), 20.0));
}

#[test]
fn test_stop_from_callback_cancels_sibling() {
    let (mut tree, mut animator, clock) = setup();
    let a = tree.create(Container);
    let b = tree.create(Container);
    animator.animate(
        &tree,
        a,
        Tween::new("x", 1.0).duration(0.1).on_complete(move |animator, _| {
            animator.stop_animations_for_target(b);
        }),
    );
    animator.animate(&tree, b, Tween::new("x", 100.0).duration(1.0).easing(Easing::Linear));

    clock.advance(0.5);
    animator.update(&mut tree);
    assert!(!animator.is_animating(b, None));
    assert_eq!(animator.active_animation_count(), 0);
}

#[test]
fn test_animate_multiple_fires_once() {
    let (mut tree, mut animator, clock) = setup();
    let id = tree.create(Container);
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    let ids = animator.animate_multiple(
        &tree,
        id,
        &[("x", 10.0), ("y", 20.0), ("width", 30.0)],
        0.5,
        Easing::OutQuad,
        Some(Box::new(move |_: &mut Animator, _: &mut dyn AnimationTargets| counter.set(counter.get() + 1))),
    );
    assert_eq!(ids.len(), 3);

    clock.advance(0.5);
    assert_eq!(animator.update(&mut tree), 3);
    assert_eq!(count.get(), 1);
    assert_eq!(tree.bounds(id), Some(Rect::new(10.0, 20.0, 30.0, 0.0)));
}

#[test]
fn test_sequence_waits_for_slowest_tween() {
    let (mut tree, mut animator, clock) = setup();
    let id = tree.create(Container);
    let done = Rc::new(Cell::new(false));
    let flag = Rc::clone(&done);
    let sequence = Sequence::new()
        .then(&[("x", 10.0)], 0.2, Easing::Linear)
        .then(&[("y", 10.0)], 0.2, Easing::Linear);
    let seq = animator.run_sequence(&tree, id, sequence, Some(Box::new(move |_: &mut Animator, _: &mut dyn AnimationTargets| {
        flag.set(true);
    })));
    assert_eq!(animator.sequence_step(seq), Some(0));

    clock.advance(0.2);
    animator.update(&mut tree);
    assert_eq!(animator.sequence_step(seq), Some(1));
    assert_eq!(tree.get_property(id, "y"), Some(0.0));

    clock.advance(0.2);
    animator.update(&mut tree);
    assert_eq!(animator.sequence_step(seq), None);
    assert!(done.get());
    assert!(close(tree.get_property(id, "y"), 10.0));
}

#[test]
fn test_transition_pulse_returns_to_rest() {
    let (mut tree, mut animator, clock) = setup();
    let id = tree.create(Container);
    let seq = Transition::new(&mut animator, &mut tree).pulse(id, 1.2, 0.4, None);

    clock.advance(0.2);
    animator.update(&mut tree);
    assert!(close(tree.get_property(id, "scale_x"), 1.2));

    clock.advance(0.2);
    animator.update(&mut tree);
    assert!(close(tree.get_property(id, "scale_x"), 1.0));
    assert_eq!(animator.sequence_step(seq), None);
}
