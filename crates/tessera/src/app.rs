//! # Frame Loop
//!
//! ```text
//! tick:
//! ┌─────────────────────────────────────────────────────────────┐
//! │ 1. ROUTE    drain the input channel                         │
//! │             ├─ Quit   → stop the loop                       │
//! │             ├─ Resize → viewport, root box, relayout        │
//! │             ├─ router callbacks (global)                    │
//! │             └─ pointer dispatch (node handlers, optional)   │
//! │ 2. ANIMATE  advance every tween and sequence                │
//! │ 3. UPDATE   mount hooks, did-update hooks                   │
//! │ 4. RENDER   clear, then draw the tree parents-first         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A property written by an event callback shows up in the same tick's
//! render.

use std::time::Instant;

use tessera_ui::layout::Rect;
use tessera_ui::{
    render_tree, Animator, ComponentId, ComponentTree, DrawBackend, Event, EventRouter, PointerDispatcher,
    SharedContext, TreeError,
};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::events::{event_channel, EventReceiver, EventSender};
use crate::stats::{FrameStats, FrameStatsAccumulator};

/// Everything router callbacks may touch.
pub struct Scene {
    /// The component tree.
    pub tree: ComponentTree,
    /// Running animations.
    pub animator: Animator,
    /// Hover, press and focus tracking for node handlers.
    pub dispatcher: PointerDispatcher,
    root: Option<ComponentId>,
}

impl Scene {
    /// The root component, if one is attached.
    #[must_use]
    pub fn root(&self) -> Option<ComponentId> {
        self.root
    }
}

/// Owns a scene and drives it one tick at a time.
pub struct App {
    config: AppConfig,
    context: SharedContext,
    scene: Scene,
    router: EventRouter<Scene>,
    sender: EventSender,
    receiver: EventReceiver,
    viewport: (f32, f32),
    running: bool,
    frame: u64,
    stats: FrameStatsAccumulator,
}

impl App {
    /// Creates an app from a validated config.
    ///
    /// # Errors
    ///
    /// `Config` if validation fails.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        let (sender, receiver) = event_channel(config.event_capacity);
        let context = config.build_context();
        let viewport = config.viewport();
        let stats = FrameStatsAccumulator::new(config.frame_budget());
        tracing::info!(
            "starting '{}' at {}x{}, {} fps",
            config.title,
            config.width,
            config.height,
            config.target_fps
        );

        Ok(Self {
            config,
            context,
            scene: Scene {
                tree: ComponentTree::new(),
                animator: Animator::new(),
                dispatcher: PointerDispatcher::new(),
                root: None,
            },
            router: EventRouter::new(),
            sender,
            receiver,
            viewport,
            running: true,
            frame: 0,
            stats,
        })
    }

    /// Replaces the animator, e.g. with one on a manual clock.
    #[must_use]
    pub fn with_animator(mut self, animator: Animator) -> Self {
        self.scene.animator = animator;
        self
    }

    /// A handle for pushing input from the windowing layer.
    #[must_use]
    pub fn event_sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// The app-wide context.
    #[must_use]
    pub fn context(&self) -> &SharedContext {
        &self.context
    }

    /// The loaded config.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, mutably.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The global event router.
    pub fn router_mut(&mut self) -> &mut EventRouter<Scene> {
        &mut self.router
    }

    /// Makes `id` the root: it gets the app context (and so does its
    /// subtree) and fills the viewport.
    ///
    /// # Errors
    ///
    /// `Tree(StaleComponent)` if `id` is dead.
    pub fn set_root(&mut self, id: ComponentId) -> AppResult<()> {
        if !self.scene.tree.is_alive(id) {
            return Err(TreeError::StaleComponent(id).into());
        }
        self.scene.tree.set_context(id, &self.context);
        let (width, height) = self.viewport;
        self.scene.tree.set_bounds(id, Rect::new(0.0, 0.0, width, height));
        self.scene.root = Some(id);
        Ok(())
    }

    /// The root component, if one is attached.
    #[must_use]
    pub fn root(&self) -> Option<ComponentId> {
        self.scene.root
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    /// False once a `Quit` event was seen or [`Self::quit`] was called.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stops [`Self::run`] after the current tick.
    pub fn quit(&mut self) {
        if self.running {
            tracing::info!("quitting after frame {}", self.frame);
        }
        self.running = false;
    }

    /// Totals over every tick so far.
    #[must_use]
    pub fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats
    }

    /// Runs one tick: route, animate, update, render.
    ///
    /// # Errors
    ///
    /// `NoRoot` if no live root is attached. Nothing is drained in that case.
    #[allow(clippy::cast_precision_loss)]
    pub fn tick(&mut self, backend: &mut dyn DrawBackend) -> AppResult<FrameStats> {
        let root = self.live_root()?;
        let start = Instant::now();
        let mut stats = FrameStats {
            frame: self.frame,
            ..FrameStats::default()
        };

        self.router.begin_frame();
        for event in self.receiver.drain() {
            self.route(root, &event);
            stats.events_routed += 1;
        }
        let routed = Instant::now();

        let finished = self.scene.animator.update(&mut self.scene.tree);
        let animated = Instant::now();

        // Callbacks may have destroyed the root.
        let root = self.live_root()?;
        self.scene.tree.update(root);
        let updated = Instant::now();

        backend.clear(self.config.background);
        let rendered = render_tree(&self.scene.tree, root, backend);
        let done = Instant::now();

        stats.route_us = micros(routed - start);
        stats.animate_us = micros(animated - routed);
        stats.update_us = micros(updated - animated);
        stats.render_us = micros(done - updated);
        stats.total_us = micros(done - start);
        stats.animations_finished = saturate(finished);
        stats.animations_active = saturate(self.scene.animator.active_animation_count());
        stats.components_rendered = saturate(rendered);

        let budget = self.config.frame_budget();
        if stats.over_budget(budget) {
            tracing::warn!(
                "frame {} exceeded budget: {:.2}ms (target {:.2}ms)",
                stats.frame,
                stats.total_us as f64 / 1000.0,
                budget.as_secs_f64() * 1000.0
            );
        }
        self.stats.record(&stats);
        self.frame += 1;
        Ok(stats)
    }

    /// Ticks until quit, or until `max_frames` ticks have run, sleeping off
    /// whatever is left of each frame's budget.
    ///
    /// # Errors
    ///
    /// Whatever [`Self::tick`] returns.
    pub fn run(&mut self, backend: &mut dyn DrawBackend, max_frames: Option<u64>) -> AppResult<()> {
        let budget = self.config.frame_budget();
        let mut ticks = 0;
        while self.running && max_frames.map_or(true, |max| ticks < max) {
            let start = Instant::now();
            self.tick(backend)?;
            ticks += 1;
            if let Some(rest) = budget.checked_sub(start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
        Ok(())
    }

    fn live_root(&self) -> AppResult<ComponentId> {
        self.scene
            .root
            .filter(|&root| self.scene.tree.is_alive(root))
            .ok_or(AppError::NoRoot)
    }

    fn route(&mut self, root: ComponentId, event: &Event) {
        match *event {
            Event::Quit => self.quit(),
            Event::Resize { width, height } => {
                self.viewport = (width, height);
                self.scene.tree.set_bounds(root, Rect::new(0.0, 0.0, width, height));
                self.scene.tree.relayout(root);
                let mut context = self.context.write();
                context.set_data("viewport_width", width);
                context.set_data("viewport_height", height);
            }
            _ => {}
        }

        self.router.handle_event(event, &mut self.scene);
        if self.config.pointer_dispatch && self.scene.tree.is_alive(root) {
            self.scene.dispatcher.dispatch(&mut self.scene.tree, root, event);
        }
    }
}

fn micros(elapsed: std::time::Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

fn saturate(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
