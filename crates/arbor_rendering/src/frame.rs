//! Per-frame context and the system seam every animator implements.

use arbor_shared::TreeState;

use crate::backend::RenderBackend;

/// Everything an animator may read during one frame.
///
/// Built once per tick by the scene. `state` is a single snapshot of the
/// shared animation state, so every system in a frame sees the same input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameContext {
    /// Frame number.
    pub frame: u64,
    /// Seconds since the previous frame (already clamped).
    pub delta: f32,
    /// Seconds since the scene started.
    pub elapsed: f32,
    /// Shared animation state for this frame.
    pub state: TreeState,
    /// Rotation of the whole assembly about +Y, radians.
    pub assembly_yaw: f32,
}

/// A per-frame update callback with its render submission.
///
/// The scene owns an explicit ordered list of these and calls `update` on
/// each once per tick, then `submit` on each in the same order.
pub trait FrameSystem {
    /// Short name for logs and stats.
    fn label(&self) -> &'static str;

    /// Advances this system by one frame.
    fn update(&mut self, ctx: &FrameContext);

    /// Hands this frame's buffers to the backend.
    fn submit(&self, backend: &mut dyn RenderBackend);
}
