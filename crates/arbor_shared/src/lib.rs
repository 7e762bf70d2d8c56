//! # ARBOR Shared
//!
//! Common types used by the gesture side and the animation side.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on rendering or device crates. If you need
//! buffer layouts or backend traits, put them in `arbor_rendering`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod geometry;
pub mod math;
pub mod palette;
pub mod photos;
pub mod state;

pub use geometry::{cone_point, cone_point_exact, sphere_point, CONE_JITTER, CONE_SPIRAL_WINDING};
pub use math::{damping_factor, lerp, Vec2, Vec3};
pub use photos::{PhotoLibrary, DEFAULT_PHOTOS};
pub use state::{GestureSample, SharedTreeState, TreeState, HAND_SMOOTHING};
