//! # ARBOR
//!
//! A particle tree that morphs between a formed cone and a dispersed cloud,
//! driven by hand gestures.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   samples   ┌──────────────────┐  snapshot  ┌─────────┐
//! │ gesture      │────────────>│ SharedTreeState  │───────────>│  Scene  │──> RenderBackend
//! │ controller   │  (atomics)  └──────────────────┘  per tick  └─────────┘
//! │ (own thread) │                                                  ^
//! └──────────────┘                                      FrameLoop ──┘
//! ```
//!
//! ## Crates
//!
//! - `arbor_shared`: math, cone/sphere generators, shared state, photos
//! - `arbor_rendering`: population animators, camera, render contract
//! - `arbor_gesture`: landmark classifier, tracker seam, controller
//! - `arbor`: config, scene composition, frame loop (this crate)

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod frame_loop;
pub mod scene;

pub use config::{ArborConfig, FrameConfig, GestureConfig};
pub use error::{ArborError, ArborResult};
pub use frame_loop::{FrameLoop, FrameStats, FrameStatsAccumulator, TARGET_FRAME_TIME};
pub use scene::Scene;

/// Shared types.
pub use arbor_shared as shared;

/// Population animators and the render contract.
pub use arbor_rendering as rendering;

/// Gesture input.
pub use arbor_gesture as gesture;
