//! # Frame Benchmark
//!
//! Layout arrangement and a full animate/update/render pass over a grid of
//! widgets.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tessera_ui::animation::{Animator, ManualClock, Tween};
use tessera_ui::widget::{Button, Grid};
use tessera_ui::{render_tree, CommandRecorder, ComponentTree, Easing, FlexLayout, GridLayout, Rect};

const CHILDREN: usize = 1_000;

fn child_boxes() -> Vec<Rect> {
    (0..CHILDREN)
        .map(|i| Rect::new(0.0, 0.0, 10.0 + (i % 7) as f32, 10.0 + (i % 5) as f32))
        .collect()
}

fn bench_flex_arrange(c: &mut Criterion) {
    let children = child_boxes();
    let layout = FlexLayout::row().with_gap(4.0);
    let bounds = Rect::new(0.0, 0.0, 20_000.0, 100.0);

    c.bench_function("flex_row_arrange_1k", |b| {
        b.iter(|| black_box(layout.arrange(bounds, black_box(&children))));
    });
}

fn bench_grid_arrange(c: &mut Criterion) {
    let children = child_boxes();
    let layout = GridLayout::new(25).with_gap(2.0);
    let bounds = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    c.bench_function("grid_arrange_1k", |b| {
        b.iter(|| black_box(layout.arrange(bounds, black_box(&children))));
    });
}

fn bench_frame_tick(c: &mut Criterion) {
    let mut tree = ComponentTree::new();
    let grid = tree.create(Grid::new(25).gap(2.0));
    tree.set_bounds(grid, Rect::new(0.0, 0.0, 1920.0, 1080.0));
    let mut buttons = Vec::with_capacity(CHILDREN);
    for i in 0..CHILDREN {
        let button = tree.create(Button::new(format!("#{i}")));
        if tree.add_child(grid, button).is_ok() {
            buttons.push(button);
        }
    }
    tree.update(grid);

    let clock = ManualClock::new();
    let mut animator = Animator::with_clock(clock.clone());
    let mut recorder = CommandRecorder::new();

    c.bench_function("frame_tick_1k_widgets", |b| {
        b.iter(|| {
            if animator.active_animation_count() == 0 {
                for &button in &buttons {
                    animator.animate(&tree, button, Tween::new("opacity", 0.5).duration(1.0).easing(Easing::InOutQuad));
                }
            }
            clock.advance(0.016);
            animator.update(&mut tree);
            tree.update(grid);
            recorder.begin_frame();
            black_box(render_tree(&tree, grid, &mut recorder))
        });
    });
}

criterion_group!(benches, bench_flex_arrange, bench_grid_arrange, bench_frame_tick);
criterion_main!(benches);
