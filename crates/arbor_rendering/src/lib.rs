//! # ARBOR Rendering
//!
//! Per-frame animators for the three populations plus the camera rig, and
//! the contract they hand their buffers to.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        ONE FRAME                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  TreeState snapshot ─┬─> FoliageField  (shared blend, 2·dt)  │
//! │                      ├─> OrnamentField (shared blend, 3·dt)  │
//! │                      ├─> PolaroidField (per-panel, 2·dt)     │
//! │                      └─> CameraRig     (position, 2·dt)      │
//! │                               ↓                              │
//! │                  RenderBackend (Pod buffers)                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - Populations are built once; buffers are rewritten in place
//! - No allocations in the frame path

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod backend;
pub mod camera;
pub mod easing;
pub mod foliage;
pub mod frame;
pub mod instance;
pub mod ornaments;
pub mod polaroids;

pub use backend::{FrameRecorder, RenderBackend};
pub use camera::{AssemblySpin, CameraParams, CameraPose, CameraRig, ViewAngles};
pub use easing::DampedValue;
pub use foliage::{attenuated_size, FoliageField, FoliageParams, FoliagePoint};
pub use frame::{FrameContext, FrameSystem};
pub use instance::{FoliageUniforms, OrnamentInstance, PanelInstance, PanelLayer, PointVertex, PANEL_LAYERS};
pub use ornaments::{Finish, Ornament, OrnamentField, OrnamentParams};
pub use polaroids::{GroupFloat, GroupTransform, PhotoPanel, PolaroidField, PolaroidParams};
