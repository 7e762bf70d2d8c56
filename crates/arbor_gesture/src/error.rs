//! # Gesture Error Types
//!
//! Everything that can go wrong on the tracker side. None of these ever
//! reach the animation core: the controller reports them as status and the
//! scene keeps animating on the last known state.

use thiserror::Error;

/// Errors raised by a hand tracker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GestureError {
    /// The landmark model could not be loaded or initialized.
    #[error("could not initialize gesture recognition: {0}")]
    ModelInit(String),

    /// The user refused camera access.
    #[error("camera access denied")]
    CameraDenied,

    /// The camera disappeared mid-session.
    #[error("camera device lost: {0}")]
    DeviceLost(String),

    /// A scripted tracker ran past its last keyframe.
    #[error("gesture script exhausted")]
    ScriptExhausted,
}

/// Result type for tracker operations.
pub type GestureResult<T> = Result<T, GestureError>;
