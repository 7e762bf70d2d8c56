//! The shared animation state: the only coupling between gesture input and
//! the animators.
//!
//! ```text
//! Gesture thread ──apply_sample()──> [SharedTreeState] ──snapshot()──> Frame loop
//!   (single writer)                    lock-free cells      (readers, once per frame)
//! ```
//!
//! ## Single-writer rule
//!
//! Only the gesture-sample handler calls [`SharedTreeState::apply_sample`].
//! Everything else reads through [`SharedTreeState::snapshot`]. Each field is
//! its own atomic cell: latest value wins per field, and a snapshot may mix
//! fields from two consecutive samples. Animators tolerate that.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Exponential smoothing factor applied to hand position per sample.
pub const HAND_SMOOTHING: f32 = 0.1;

/// One reading from the gesture recognizer.
///
/// `chaos` is 0 (closed hand / no hand) or 1 (open hand). It is consumed
/// as-is: out-of-range values are not rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    /// Target chaos level.
    pub chaos: f32,
    /// Hand x in `[-1, 1]`.
    pub x: f32,
    /// Hand y in `[-1, 1]`.
    pub y: f32,
    /// Whether a hand was in view.
    pub detected: bool,
}

impl GestureSample {
    /// Sample for a frame in which no hand was found.
    pub const NO_HAND: Self = Self {
        chaos: 0.0,
        x: 0.0,
        y: 0.0,
        detected: false,
    };

    /// Sample for a hand at `(x, y)`, open or closed.
    #[must_use]
    pub fn hand(open: bool, x: f32, y: f32) -> Self {
        Self {
            chaos: if open { 1.0 } else { 0.0 },
            x,
            y,
            detected: true,
        }
    }
}

/// Plain copy of the shared state, taken once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeState {
    /// Target blend, 0 = formed, 1 = dispersed.
    pub chaos_level: f32,
    /// Smoothed hand position.
    pub hand_position: Vec2,
    /// Whether a hand is currently detected.
    pub hand_present: bool,
}

impl TreeState {
    /// Applies one gesture sample in place.
    ///
    /// Chaos level and presence are taken verbatim; hand position moves
    /// `smoothing` of the way toward the sample.
    pub fn apply(&mut self, sample: &GestureSample, smoothing: f32) {
        self.chaos_level = sample.chaos;
        self.hand_position.x += (sample.x - self.hand_position.x) * smoothing;
        self.hand_position.y += (sample.y - self.hand_position.y) * smoothing;
        self.hand_present = sample.detected;
    }
}

/// Process-wide animation state shared between the gesture thread and the
/// frame loop. See the module docs for the single-writer rule.
#[derive(Debug)]
pub struct SharedTreeState {
    chaos_level: AtomicU32,
    hand_x: AtomicU32,
    hand_y: AtomicU32,
    hand_present: AtomicBool,
    smoothing: f32,
    /// Samples applied so far.
    samples: AtomicU64,
}

impl SharedTreeState {
    /// Creates the state at rest: formed tree, no hand.
    #[must_use]
    pub fn new() -> Self {
        Self::with_smoothing(HAND_SMOOTHING)
    }

    /// Creates the state with a custom hand-position smoothing factor.
    #[must_use]
    pub fn with_smoothing(smoothing: f32) -> Self {
        Self {
            chaos_level: AtomicU32::new(0.0_f32.to_bits()),
            hand_x: AtomicU32::new(0.0_f32.to_bits()),
            hand_y: AtomicU32::new(0.0_f32.to_bits()),
            hand_present: AtomicBool::new(false),
            smoothing,
            samples: AtomicU64::new(0),
        }
    }

    /// Writes one gesture sample. Gesture-sample handler only.
    pub fn apply_sample(&self, sample: &GestureSample) {
        // Single writer: reading our own previous hand position is race-free.
        let mut state = self.snapshot();
        state.apply(sample, self.smoothing);

        self.chaos_level.store(state.chaos_level.to_bits(), Ordering::Release);
        self.hand_x.store(state.hand_position.x.to_bits(), Ordering::Release);
        self.hand_y.store(state.hand_position.y.to_bits(), Ordering::Release);
        self.hand_present.store(state.hand_present, Ordering::Release);
        self.samples.fetch_add(1, Ordering::Relaxed);
    }

    /// Reads the latest value of every field.
    #[must_use]
    pub fn snapshot(&self) -> TreeState {
        TreeState {
            chaos_level: f32::from_bits(self.chaos_level.load(Ordering::Acquire)),
            hand_position: Vec2::new(
                f32::from_bits(self.hand_x.load(Ordering::Acquire)),
                f32::from_bits(self.hand_y.load(Ordering::Acquire)),
            ),
            hand_present: self.hand_present.load(Ordering::Acquire),
        }
    }

    /// Number of samples applied since creation.
    #[must_use]
    pub fn sample_count(&self) -> u64 {
        self.samples.load(Ordering::Relaxed)
    }
}

impl Default for SharedTreeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_defaults_when_no_samples() {
        let state = SharedTreeState::new();
        let snap = state.snapshot();
        assert_eq!(snap.chaos_level, 0.0);
        assert!(!snap.hand_present);
        assert_eq!(snap.hand_position, Vec2::ZERO);
        assert_eq!(state.sample_count(), 0);
    }

    #[test]
    fn test_hand_position_smoothing() {
        let state = SharedTreeState::new();
        state.apply_sample(&GestureSample::hand(true, 1.0, -1.0));
        let snap = state.snapshot();
        assert!((snap.hand_position.x - 0.1).abs() < 1e-6);
        assert!((snap.hand_position.y + 0.1).abs() < 1e-6);
        assert_eq!(snap.chaos_level, 1.0);
        assert!(snap.hand_present);

        state.apply_sample(&GestureSample::hand(true, 1.0, -1.0));
        let snap = state.snapshot();
        assert!((snap.hand_position.x - 0.19).abs() < 1e-6);
    }

    #[test]
    fn test_chaos_is_binary_passthrough() {
        let state = SharedTreeState::new();
        state.apply_sample(&GestureSample::hand(true, 0.0, 0.0));
        assert_eq!(state.snapshot().chaos_level, 1.0);
        state.apply_sample(&GestureSample::NO_HAND);
        assert_eq!(state.snapshot().chaos_level, 0.0);
        assert!(!state.snapshot().hand_present);
    }

    #[test]
    fn test_out_of_range_propagates() {
        let state = SharedTreeState::with_smoothing(1.0);
        state.apply_sample(&GestureSample { chaos: 2.5, x: 3.0, y: -4.0, detected: true });
        let snap = state.snapshot();
        assert_eq!(snap.chaos_level, 2.5);
        assert_eq!(snap.hand_position, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_writer_thread_reader_thread() {
        let state = Arc::new(SharedTreeState::new());
        let writer = {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for _ in 0..1000 {
                    state.apply_sample(&GestureSample::hand(true, 0.5, 0.5));
                }
            })
        };
        for _ in 0..1000 {
            let snap = state.snapshot();
            assert!(snap.hand_position.x >= 0.0 && snap.hand_position.x <= 0.5);
        }
        writer.join().unwrap();
        assert_eq!(state.sample_count(), 1000);
        assert!((state.snapshot().hand_position.x - 0.5).abs() < 1e-3);
    }
}
