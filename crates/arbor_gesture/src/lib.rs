//! # ARBOR Gesture
//!
//! Turns a hand tracker into `{chaos, x, y, detected}` samples written into
//! the shared animation state.
//!
//! ## Core Components
//!
//! - `GestureClassifier`: landmarks → binary open/closed sample
//! - `HandTracker`: seam for the camera + landmark model
//! - `ScriptedTracker`: deterministic stand-in for a webcam
//! - `GestureController`: polling thread with positive cancellation
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use arbor_gesture::{ControllerConfig, GestureController, ScriptedTracker};
//! use arbor_shared::SharedTreeState;
//!
//! let state = Arc::new(SharedTreeState::new());
//! let controller = GestureController::spawn(
//!     ScriptedTracker::demo(30),
//!     Arc::clone(&state),
//!     ControllerConfig::default(),
//! );
//! // ... render frames reading state.snapshot() ...
//! let stats = controller.stop();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod controller;
pub mod error;
pub mod landmarks;
pub mod tracker;

pub use controller::{ControllerConfig, ControllerStats, GestureController, GestureStatus};
pub use error::{GestureError, GestureResult};
pub use landmarks::{GestureClassifier, HandLandmarks, Landmark, LANDMARK_COUNT, OPEN_THRESHOLD};
pub use tracker::{HandTracker, ScriptPose, ScriptStep, ScriptedTracker, TrackerFrame};
