//! # ARBOR Frame Loop
//!
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. BEGIN FRAME                                                      │
//! │    └─ Measure wall-clock delta, clamp to max_frame_delta            │
//! │                                                                     │
//! │ 2. UPDATE (Scene::update)                                           │
//! │    ├─ Snapshot shared gesture state                                 │
//! │    └─ foliage → ornaments → polaroids → camera                      │
//! │                                                                     │
//! │ 3. SUBMIT (Scene::submit)                                           │
//! │    └─ Hand buffers to the render backend                            │
//! │                                                                     │
//! │ 4. END FRAME                                                        │
//! │    └─ Record timing, warn on over-budget frames                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::{Duration, Instant};

use arbor_rendering::RenderBackend;

use crate::config::FrameConfig;
use crate::scene::Scene;

/// Target frame time for 60 FPS.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// Timing for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Frame number.
    pub frame: u64,
    /// Animation delta fed to the scene, seconds.
    pub delta: f32,
    /// Total frame time in microseconds.
    pub total_us: u64,
    /// Update time in microseconds.
    pub update_us: u64,
    /// Submit time in microseconds.
    pub submit_us: u64,
}

/// Drives a [`Scene`] one frame at a time.
pub struct FrameLoop {
    config: FrameConfig,
    budget: Duration,
    frame_count: u64,
    last_frame_time: Instant,
    stats_accumulator: FrameStatsAccumulator,
}

impl FrameLoop {
    /// Creates a frame loop.
    #[must_use]
    pub fn new(config: FrameConfig) -> Self {
        let budget = Duration::from_secs_f64(1.0 / f64::from(config.target_fps.max(1)));
        Self {
            config,
            budget,
            frame_count: 0,
            last_frame_time: Instant::now(),
            stats_accumulator: FrameStatsAccumulator::with_budget(budget),
        }
    }

    /// Clamps a raw delta so a stall never becomes one giant step.
    #[must_use]
    pub fn clamp_delta(&self, raw: f32) -> f32 {
        raw.clamp(0.0, self.config.max_frame_delta)
    }

    /// Runs one frame using the wall-clock time since the previous frame.
    pub fn step(&mut self, scene: &mut Scene, backend: &mut dyn RenderBackend) -> FrameStats {
        let now = Instant::now();
        let raw = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.run_frame(scene, backend, raw)
    }

    /// Runs one frame with a caller-supplied delta (simulated time).
    pub fn step_with_delta(
        &mut self,
        scene: &mut Scene,
        backend: &mut dyn RenderBackend,
        raw_delta: f32,
    ) -> FrameStats {
        self.last_frame_time = Instant::now();
        self.run_frame(scene, backend, raw_delta)
    }

    fn run_frame(&mut self, scene: &mut Scene, backend: &mut dyn RenderBackend, raw: f32) -> FrameStats {
        let delta = self.clamp_delta(raw);
        if raw > delta {
            self.stats_accumulator.record_clamp();
        }

        let start = Instant::now();
        let ctx = scene.update(delta);
        let updated = Instant::now();
        scene.submit(&ctx, backend);
        let done = Instant::now();

        let stats = FrameStats {
            frame: self.frame_count,
            delta,
            total_us: micros(done - start),
            update_us: micros(updated - start),
            submit_us: micros(done - updated),
        };
        self.end_frame(stats);
        stats
    }

    fn end_frame(&mut self, stats: FrameStats) {
        self.frame_count += 1;
        self.stats_accumulator.record(stats);

        if self.config.enable_timing_logs && stats.total_us > micros(self.budget) {
            let total_ms = stats.total_us as f64 / 1000.0;
            let budget_ms = self.budget.as_secs_f64() * 1000.0;
            tracing::warn!(frame = stats.frame, total_ms, budget_ms, "frame exceeded budget");
        }
    }

    /// Returns the current frame count.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the accumulated statistics.
    #[must_use]
    pub fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats_accumulator
    }
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

/// Accumulator for frame statistics.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Sum of total frame times.
    pub total_us_sum: u64,
    /// Sum of update times.
    pub update_us_sum: u64,
    /// Sum of submit times.
    pub submit_us_sum: u64,
    /// Min frame time.
    pub min_frame_us: u64,
    /// Max frame time.
    pub max_frame_us: u64,
    /// Frames that exceeded budget.
    pub frames_over_budget: u64,
    /// Frames whose delta was clamped.
    pub frames_clamped: u64,
    /// Per-frame budget in microseconds.
    pub budget_us: u64,
    /// Sum of animation deltas, seconds.
    pub simulated_secs: f64,
}

impl FrameStatsAccumulator {
    /// Creates an accumulator measured against 60 FPS.
    #[must_use]
    pub fn new() -> Self {
        Self::with_budget(TARGET_FRAME_TIME)
    }

    /// Creates an accumulator measured against `budget`.
    #[must_use]
    pub fn with_budget(budget: Duration) -> Self {
        Self {
            frames_recorded: 0,
            total_us_sum: 0,
            update_us_sum: 0,
            submit_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
            frames_clamped: 0,
            budget_us: micros(budget),
            simulated_secs: 0.0,
        }
    }

    /// Records a frame's statistics.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.update_us_sum += stats.update_us;
        self.submit_us_sum += stats.submit_us;
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);
        self.simulated_secs += f64::from(stats.delta);

        if stats.total_us > self.budget_us {
            self.frames_over_budget += 1;
        }
    }

    /// Counts a frame whose raw delta exceeded the clamp.
    pub fn record_clamp(&mut self) {
        self.frames_clamped += 1;
    }

    /// Returns average frame time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Returns average FPS.
    #[must_use]
    pub fn avg_fps(&self) -> f64 {
        let avg_ms = self.avg_frame_ms();
        if avg_ms <= 0.0 {
            return 0.0;
        }
        1000.0 / avg_ms
    }

    /// Returns the fraction of frames over budget.
    #[must_use]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.frames_over_budget as f64 / self.frames_recorded as f64
    }

    /// Prints a summary of the statistics.
    pub fn print_summary(&self) {
        let min_us = if self.frames_recorded == 0 { 0 } else { self.min_frame_us };
        println!("╔══════════════════════════════════════════════════════════════════╗");
        println!("║                    FRAME STATISTICS SUMMARY                      ║");
        println!("╚══════════════════════════════════════════════════════════════════╝");
        println!();
        println!("┌─ TIMING ─────────────────────────────────────────────────────────┐");
        println!("│ Frames Recorded:    {}", self.frames_recorded);
        println!("│ Simulated Time:     {:.2} s", self.simulated_secs);
        println!("│ Average Frame:      {:.3} ms ({:.1} FPS)", self.avg_frame_ms(), self.avg_fps());
        println!("│ Min Frame:          {:.3} ms", min_us as f64 / 1000.0);
        println!("│ Max Frame:          {:.3} ms", self.max_frame_us as f64 / 1000.0);
        println!("└──────────────────────────────────────────────────────────────────┘");
        println!();
        println!("┌─ BUDGET ─────────────────────────────────────────────────────────┐");
        println!("│ Target:             {:.3} ms", self.budget_us as f64 / 1000.0);
        println!(
            "│ Over Budget:        {} frames ({:.1}%)",
            self.frames_over_budget,
            self.over_budget_ratio() * 100.0
        );
        println!("│ Clamped Deltas:     {}", self.frames_clamped);
        println!("└──────────────────────────────────────────────────────────────────┘");

        if self.frames_recorded > 0 {
            let frames = self.frames_recorded as f64;
            println!();
            println!("┌─ BREAKDOWN ──────────────────────────────────────────────────────┐");
            println!("│ Update:             {:.3} ms", self.update_us_sum as f64 / frames / 1000.0);
            println!("│ Submit:             {:.3} ms", self.submit_us_sum as f64 / frames / 1000.0);
            println!("└──────────────────────────────────────────────────────────────────┘");
        }
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArborConfig;
    use arbor_rendering::FrameRecorder;
    use arbor_shared::{PhotoLibrary, SharedTreeState};
    use std::sync::Arc;

    fn scene() -> Scene {
        let mut config = ArborConfig {
            seed: Some(5),
            ..ArborConfig::default()
        };
        config.foliage.count = 100;
        Scene::new(&config, Arc::new(SharedTreeState::new()), Arc::new(PhotoLibrary::new()))
    }

    #[test]
    fn test_delta_is_clamped() {
        let frame_loop = FrameLoop::new(FrameConfig::default());
        assert_eq!(frame_loop.clamp_delta(0.016), 0.016);
        assert_eq!(frame_loop.clamp_delta(3.0), 0.1);
        assert_eq!(frame_loop.clamp_delta(-1.0), 0.0);
    }

    #[test]
    fn test_frame_cycle() {
        let mut frame_loop = FrameLoop::new(FrameConfig::default());
        let mut scene = scene();
        let mut rec = FrameRecorder::new();

        let stats = frame_loop.step_with_delta(&mut scene, &mut rec, 5.0);
        assert_eq!(stats.frame, 0);
        assert_eq!(stats.delta, 0.1);
        assert!(stats.total_us >= stats.update_us);
        assert_eq!(frame_loop.stats().frames_clamped, 1);

        let _ = frame_loop.step(&mut scene, &mut rec);
        assert_eq!(frame_loop.frame_count(), 2);
        assert_eq!(frame_loop.stats().frames_recorded, 2);
        assert_eq!(rec.frames, 2);
    }

    #[test]
    fn test_stats_accumulator() {
        let mut acc = FrameStatsAccumulator::new();

        for i in 0..100 {
            acc.record(FrameStats {
                frame: i,
                delta: 1.0 / 60.0,
                total_us: 10_000 + (i * 100),
                update_us: 8000,
                submit_us: 2000,
            });
        }

        assert_eq!(acc.frames_recorded, 100);
        assert!(acc.avg_fps() > 50.0);
        assert!(acc.avg_fps() < 100.0);
        // 16_700 and up
        assert_eq!(acc.frames_over_budget, 33);
        assert!((acc.simulated_secs - 100.0 / 60.0).abs() < 1e-4);
    }
}
