//! The hand tracker seam.
//!
//! A tracker owns the camera and the landmark model. The controller polls it
//! from its own thread; the tracker decides whether a new camera frame has
//! arrived since the last poll.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GestureError, GestureResult};
use crate::landmarks::HandLandmarks;

/// What one poll of the tracker produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerFrame {
    /// No new camera frame since the last poll. Produces no sample.
    Stale,
    /// New frame, no hand in it.
    NoHand,
    /// New frame with the first detected hand.
    Hand(HandLandmarks),
}

/// Anything that can turn camera frames into hand landmarks.
pub trait HandTracker: Send + 'static {
    /// Loads the model and opens the camera.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be initialized or camera access
    /// is refused.
    fn init(&mut self) -> GestureResult<()>;

    /// Runs detection on the latest camera frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the device fails mid-session.
    fn poll(&mut self) -> GestureResult<TrackerFrame>;

    /// Releases the camera and model. Called exactly once when polling ends.
    fn shutdown(&mut self) {}
}

/// One step of a scripted session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pose", rename_all = "snake_case")]
pub enum ScriptPose {
    /// Camera frame without a hand.
    NoHand,
    /// A hand at `(x, y)` in `[-1, 1]`.
    Hand {
        /// Open palm or fist.
        open: bool,
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// No new camera frame.
    Stale,
}

/// A pose held for a number of polls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Polls this pose is held for.
    pub polls: u32,
    /// The pose.
    #[serde(flatten)]
    pub pose: ScriptPose,
}

impl ScriptStep {
    /// Creates a step.
    #[must_use]
    pub const fn new(polls: u32, pose: ScriptPose) -> Self {
        Self { polls, pose }
    }
}

/// Reach of a synthetic open hand.
const OPEN_REACH: f32 = 0.4;

/// Reach of a synthetic fist.
const CLOSED_REACH: f32 = 0.12;

/// Deterministic tracker replaying a script. Stands in for a webcam.
#[derive(Debug, Clone)]
pub struct ScriptedTracker {
    steps: Vec<ScriptStep>,
    looping: bool,
    step: usize,
    held: u32,
    init_error: Option<GestureError>,
    released: Arc<AtomicBool>,
}

impl ScriptedTracker {
    /// Creates a tracker that plays `steps` once.
    #[must_use]
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            steps,
            looping: false,
            step: 0,
            held: 0,
            init_error: None,
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replays the script forever.
    #[must_use]
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Makes `init` fail with `error`.
    #[must_use]
    pub fn failing(mut self, error: GestureError) -> Self {
        self.init_error = Some(error);
        self
    }

    /// Flag set once `shutdown` has released the "device".
    #[must_use]
    pub fn released_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.released)
    }

    /// Open hand, then fist, then no hand, looping: a short demo session.
    #[must_use]
    pub fn demo(polls_per_pose: u32) -> Self {
        Self::new(vec![
            ScriptStep::new(polls_per_pose, ScriptPose::NoHand),
            ScriptStep::new(polls_per_pose, ScriptPose::Hand { open: true, x: 0.4, y: -0.2 }),
            ScriptStep::new(polls_per_pose, ScriptPose::Hand { open: false, x: -0.3, y: 0.3 }),
        ])
        .looping()
    }

    fn next_pose(&mut self) -> Option<ScriptPose> {
        loop {
            if self.step >= self.steps.len() {
                if !self.looping || self.steps.is_empty() {
                    return None;
                }
                self.step = 0;
            }
            let current = self.steps[self.step];
            if self.held < current.polls {
                self.held += 1;
                return Some(current.pose);
            }
            self.step += 1;
            self.held = 0;
        }
    }
}

impl HandTracker for ScriptedTracker {
    fn init(&mut self) -> GestureResult<()> {
        match self.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn poll(&mut self) -> GestureResult<TrackerFrame> {
        let pose = self.next_pose().ok_or(GestureError::ScriptExhausted)?;
        Ok(match pose {
            ScriptPose::Stale => TrackerFrame::Stale,
            ScriptPose::NoHand => TrackerFrame::NoHand,
            ScriptPose::Hand { open, x, y } => {
                let reach = if open { OPEN_REACH } else { CLOSED_REACH };
                TrackerFrame::Hand(HandLandmarks::synthetic(x, y, reach))
            }
        })
    }

    fn shutdown(&mut self) {
        self.released.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_plays_in_order() {
        let mut t = ScriptedTracker::new(vec![
            ScriptStep::new(2, ScriptPose::NoHand),
            ScriptStep::new(1, ScriptPose::Stale),
        ]);
        t.init().unwrap();
        assert_eq!(t.poll().unwrap(), TrackerFrame::NoHand);
        assert_eq!(t.poll().unwrap(), TrackerFrame::NoHand);
        assert_eq!(t.poll().unwrap(), TrackerFrame::Stale);
        assert_eq!(t.poll(), Err(GestureError::ScriptExhausted));
    }

    #[test]
    fn test_script_loops() {
        let mut t = ScriptedTracker::new(vec![ScriptStep::new(1, ScriptPose::NoHand)]).looping();
        for _ in 0..10 {
            assert_eq!(t.poll().unwrap(), TrackerFrame::NoHand);
        }
    }

    #[test]
    fn test_empty_looping_script_ends() {
        let mut t = ScriptedTracker::new(Vec::new()).looping();
        assert_eq!(t.poll(), Err(GestureError::ScriptExhausted));
    }

    #[test]
    fn test_failing_init() {
        let mut t = ScriptedTracker::demo(1).failing(GestureError::CameraDenied);
        assert_eq!(t.init(), Err(GestureError::CameraDenied));
    }

    #[test]
    fn test_open_and_closed_reach() {
        let mut t = ScriptedTracker::new(vec![
            ScriptStep::new(1, ScriptPose::Hand { open: true, x: 0.0, y: 0.0 }),
            ScriptStep::new(1, ScriptPose::Hand { open: false, x: 0.0, y: 0.0 }),
        ]);
        let TrackerFrame::Hand(open) = t.poll().unwrap() else { panic!("expected hand") };
        let TrackerFrame::Hand(fist) = t.poll().unwrap() else { panic!("expected hand") };
        assert!(open.openness() > 0.3);
        assert!(fist.openness() < 0.3);
    }

    #[test]
    fn test_shutdown_releases() {
        let mut t = ScriptedTracker::demo(1);
        let flag = t.released_flag();
        assert!(!flag.load(Ordering::Acquire));
        t.shutdown();
        assert!(flag.load(Ordering::Acquire));
    }
}
