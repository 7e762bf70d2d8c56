//! Gesture controller: polls a [`HandTracker`] on its own thread and writes
//! samples into the shared animation state.
//!
//! ```text
//! ┌────────────┐ poll  ┌────────────┐ classify ┌──────────────────┐
//! │ HandTracker│──────>│ controller │─────────>│ SharedTreeState  │──> frame loop
//! └────────────┘       │  thread    │          └──────────────────┘
//!                      │            │──status──> crossbeam channel ──> UI text
//!                      └────────────┘
//!                          ^ stop (crossbeam channel, doubles as poll pacing)
//! ```
//!
//! The controller thread is the single writer of the shared state.
//! Stopping is positive: the thread is signalled, joined, and the tracker's
//! `shutdown` releases the camera before the thread exits.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use arbor_shared::SharedTreeState;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use serde::{Deserialize, Serialize};

use crate::error::GestureError;
use crate::landmarks::{GestureClassifier, HandLandmarks};
use crate::tracker::{HandTracker, TrackerFrame};

/// Lifecycle and presence updates, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureStatus {
    /// Tracker initialization started.
    Loading,
    /// Tracker is up and polling.
    Ready,
    /// A hand came into view.
    HandFound,
    /// The hand left the view.
    HandLost,
    /// The tracker failed; the scene keeps its last state.
    Failed(String),
    /// Polling ended and the device was released.
    Stopped,
}

/// Controller settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Time between tracker polls, milliseconds.
    pub poll_interval_ms: u64,
    /// Openness classifier.
    pub classifier: GestureClassifier,
    /// Status messages buffered before new ones are dropped.
    pub status_capacity: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 33,
            classifier: GestureClassifier::default(),
            status_capacity: 64,
        }
    }
}

impl ControllerConfig {
    /// Poll interval as a duration.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Counters from one controller run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    /// Tracker polls performed.
    pub polls: u64,
    /// Samples written to the shared state.
    pub samples: u64,
    /// Polls that found no new camera frame.
    pub stale_frames: u64,
    /// Status messages dropped because the channel was full.
    pub dropped_status: u64,
}

/// Handle to a running controller thread.
pub struct GestureController {
    stop_tx: Option<Sender<()>>,
    status_rx: Receiver<GestureStatus>,
    handle: Option<JoinHandle<ControllerStats>>,
}

impl GestureController {
    /// Starts polling `tracker` on a new thread.
    #[must_use]
    pub fn spawn<T: HandTracker>(tracker: T, state: Arc<SharedTreeState>, config: ControllerConfig) -> Self {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let (status_tx, status_rx) = bounded(config.status_capacity.max(1));

        let handle = thread::Builder::new()
            .name("arbor-gesture".into())
            .spawn(move || Worker::new(state, config, status_tx).run(tracker, &stop_rx));

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::warn!("failed to spawn gesture thread: {err}");
                None
            }
        };

        Self {
            stop_tx: Some(stop_tx),
            status_rx,
            handle,
        }
    }

    /// Status receiver. Non-blocking consumers should use `try_iter`.
    #[must_use]
    pub fn status(&self) -> &Receiver<GestureStatus> {
        &self.status_rx
    }

    /// Drains every status message received so far.
    #[must_use]
    pub fn drain_status(&self) -> Vec<GestureStatus> {
        self.status_rx.try_iter().collect()
    }

    /// True while the polling thread is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops polling, waits for the thread and returns its counters.
    pub fn stop(mut self) -> ControllerStats {
        self.shutdown()
    }

    fn shutdown(&mut self) -> ControllerStats {
        if let Some(tx) = self.stop_tx.take() {
            // Full or disconnected both mean the worker is already stopping.
            let _ = tx.try_send(());
        }
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or_else(|_| {
                tracing::warn!("gesture thread panicked");
                ControllerStats::default()
            }),
            None => ControllerStats::default(),
        }
    }
}

impl Drop for GestureController {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

struct Worker {
    state: Arc<SharedTreeState>,
    config: ControllerConfig,
    status_tx: Sender<GestureStatus>,
    stats: ControllerStats,
    hand_in_view: bool,
}

impl Worker {
    fn new(state: Arc<SharedTreeState>, config: ControllerConfig, status_tx: Sender<GestureStatus>) -> Self {
        Self {
            state,
            config,
            status_tx,
            stats: ControllerStats::default(),
            hand_in_view: false,
        }
    }

    fn run<T: HandTracker>(mut self, mut tracker: T, stop_rx: &Receiver<()>) -> ControllerStats {
        self.emit(GestureStatus::Loading);
        if let Err(err) = tracker.init() {
            tracing::warn!("hand tracker failed to start: {err}");
            self.emit(GestureStatus::Failed(err.to_string()));
            tracker.shutdown();
            self.emit(GestureStatus::Stopped);
            return self.stats;
        }
        tracing::info!(interval_ms = self.config.poll_interval_ms, "gesture controller started");
        self.emit(GestureStatus::Ready);

        let interval = self.config.poll_interval();
        loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }

            self.stats.polls += 1;
            match tracker.poll() {
                Ok(TrackerFrame::Stale) => self.stats.stale_frames += 1,
                Ok(TrackerFrame::NoHand) => self.publish(None),
                Ok(TrackerFrame::Hand(hand)) => self.publish(Some(&hand)),
                Err(GestureError::ScriptExhausted) => {
                    tracing::info!("gesture script finished");
                    break;
                }
                Err(err) => {
                    tracing::warn!("hand tracker failed: {err}");
                    self.emit(GestureStatus::Failed(err.to_string()));
                    break;
                }
            }
        }

        tracker.shutdown();
        tracing::info!(samples = self.stats.samples, "gesture controller stopped");
        self.emit(GestureStatus::Stopped);
        self.stats
    }

    fn publish(&mut self, hand: Option<&HandLandmarks>) {
        let sample = self.config.classifier.classify(hand);
        self.state.apply_sample(&sample);
        self.stats.samples += 1;

        if sample.detected != self.hand_in_view {
            self.hand_in_view = sample.detected;
            self.emit(if sample.detected { GestureStatus::HandFound } else { GestureStatus::HandLost });
        }
    }

    fn emit(&mut self, status: GestureStatus) {
        match self.status_tx.try_send(status) {
            Ok(()) | Err(TrySendError::Disconnected(_)) => {}
            Err(TrySendError::Full(_)) => self.stats.dropped_status += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{ScriptPose, ScriptStep, ScriptedTracker};
    use std::sync::atomic::Ordering;
    use std::time::Instant;

    fn fast() -> ControllerConfig {
        ControllerConfig {
            poll_interval_ms: 1,
            ..ControllerConfig::default()
        }
    }

    fn wait_for(mut cond: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !cond() {
            assert!(Instant::now() < deadline, "timed out");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_open_hand_sets_chaos() {
        let state = Arc::new(SharedTreeState::new());
        let tracker = ScriptedTracker::new(vec![ScriptStep::new(
            1000,
            ScriptPose::Hand { open: true, x: 1.0, y: -1.0 },
        )]);
        let released = tracker.released_flag();
        let controller = GestureController::spawn(tracker, Arc::clone(&state), fast());

        wait_for(|| state.sample_count() >= 50);
        let snap = state.snapshot();
        assert_eq!(snap.chaos_level, 1.0);
        assert!(snap.hand_present);
        assert!(snap.hand_position.x > 0.9);

        let stats = controller.stop();
        assert!(stats.samples >= 50);
        assert!(released.load(Ordering::Acquire));
    }

    #[test]
    fn test_status_sequence() {
        let state = Arc::new(SharedTreeState::new());
        let tracker = ScriptedTracker::new(vec![
            ScriptStep::new(2, ScriptPose::Hand { open: false, x: 0.0, y: 0.0 }),
            ScriptStep::new(2, ScriptPose::Stale),
            ScriptStep::new(2, ScriptPose::NoHand),
        ]);
        let controller = GestureController::spawn(tracker, Arc::clone(&state), fast());
        wait_for(|| !controller.is_running());

        let statuses = controller.drain_status();
        assert_eq!(
            statuses,
            vec![
                GestureStatus::Loading,
                GestureStatus::Ready,
                GestureStatus::HandFound,
                GestureStatus::HandLost,
                GestureStatus::Stopped,
            ]
        );
        let stats = controller.stop();
        assert_eq!(stats.samples, 4);
        assert_eq!(stats.stale_frames, 2);
        assert!(!state.snapshot().hand_present);
    }

    #[test]
    fn test_init_failure_leaves_state_alone() {
        let state = Arc::new(SharedTreeState::new());
        let tracker = ScriptedTracker::demo(5).failing(GestureError::CameraDenied);
        let released = tracker.released_flag();
        let controller = GestureController::spawn(tracker, Arc::clone(&state), fast());
        wait_for(|| !controller.is_running());

        let statuses = controller.drain_status();
        assert_eq!(statuses[0], GestureStatus::Loading);
        assert_eq!(statuses[1], GestureStatus::Failed("camera access denied".into()));
        assert_eq!(statuses[2], GestureStatus::Stopped);
        assert_eq!(state.sample_count(), 0);
        assert_eq!(state.snapshot().chaos_level, 0.0);
        assert!(released.load(Ordering::Acquire));
    }

    #[test]
    fn test_drop_stops_thread() {
        let state = Arc::new(SharedTreeState::new());
        let tracker = ScriptedTracker::demo(3);
        let released = tracker.released_flag();
        {
            let _controller = GestureController::spawn(tracker, Arc::clone(&state), fast());
            wait_for(|| state.sample_count() > 0);
        }
        assert!(released.load(Ordering::Acquire));
        let count = state.sample_count();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(state.sample_count(), count);
    }
}
