//! Per-frame timing and counters.

use std::time::Duration;

/// What one tick did and how long each phase took.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame number, starting at 0.
    pub frame: u64,
    /// Whole tick, in microseconds.
    pub total_us: u64,
    /// Event routing, in microseconds.
    pub route_us: u64,
    /// Animator advance, in microseconds.
    pub animate_us: u64,
    /// Tree update pass, in microseconds.
    pub update_us: u64,
    /// Render traversal, in microseconds.
    pub render_us: u64,
    /// Events drained from the input channel.
    pub events_routed: u32,
    /// Animations that finished this tick.
    pub animations_finished: u32,
    /// Animations still running after the tick.
    pub animations_active: u32,
    /// Components drawn.
    pub components_rendered: u32,
}

impl FrameStats {
    /// Whether the tick took longer than `budget`.
    #[must_use]
    pub fn over_budget(&self, budget: Duration) -> bool {
        u128::from(self.total_us) > budget.as_micros()
    }
}

/// Running totals over many frames.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Frames recorded.
    pub frames_recorded: u64,
    /// Sum of tick times.
    pub total_us_sum: u64,
    /// Sum of render times.
    pub render_us_sum: u64,
    /// Fastest tick.
    pub min_frame_us: u64,
    /// Slowest tick.
    pub max_frame_us: u64,
    /// Ticks that exceeded the frame budget.
    pub frames_over_budget: u64,
    /// Events routed across all frames.
    pub events_routed: u64,
    budget: Duration,
}

impl FrameStatsAccumulator {
    /// Creates an empty accumulator counting ticks longer than `budget`.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            frames_recorded: 0,
            total_us_sum: 0,
            render_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
            events_routed: 0,
            budget,
        }
    }

    /// Adds one frame.
    pub fn record(&mut self, stats: &FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.render_us_sum += stats.render_us;
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);
        self.events_routed += u64::from(stats.events_routed);

        if stats.over_budget(self.budget) {
            self.frames_over_budget += 1;
        }
    }

    /// Average tick time in milliseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Average frames per second implied by the tick time.
    #[must_use]
    pub fn avg_fps(&self) -> f64 {
        let avg_ms = self.avg_frame_ms();
        if avg_ms == 0.0 {
            return 0.0;
        }
        1000.0 / avg_ms
    }

    /// Fraction of frames over budget.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.frames_over_budget as f64 / self.frames_recorded as f64
    }
}
