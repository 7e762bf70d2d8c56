//! Camera rig and assembly spin.
//!
//! The rig reads the same frame snapshot as the populations:
//! - hand present: pitch = `hand.y * 0.5`, yaw = `-hand.x * 0.5` (mirrored feed)
//! - hand absent: slow idle oscillation
//!
//! Position eases toward `(base_x + yaw * 5, base_y + pitch * 2, z)` and the
//! camera always looks at a fixed point. Independently, the whole assembly
//! spins slowly about +Y.

use arbor_shared::{damping_factor, lerp, TreeState, Vec3};
use serde::{Deserialize, Serialize};

use crate::backend::RenderBackend;
use crate::frame::{FrameContext, FrameSystem};

/// Camera rig parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    /// Camera position before the first frame.
    pub initial_position: Vec3,
    /// Fixed look-at point.
    pub look_at: Vec3,
    /// Resting x of the eased position.
    pub base_x: f32,
    /// Resting y of the eased position.
    pub base_y: f32,
    /// Position units per radian of yaw.
    pub yaw_travel: f32,
    /// Position units per radian of pitch.
    pub pitch_travel: f32,
    /// Hand position to angle gain.
    pub hand_gain: f32,
    /// Position easing rate per second.
    pub ease_rate: f32,
    /// Assembly spin, radians per second.
    pub spin_rate: f32,
    /// Vertical field of view, degrees (for backends).
    pub fov_degrees: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            initial_position: Vec3::new(0.0, 4.0, 25.0),
            look_at: Vec3::new(0.0, 5.0, 0.0),
            base_x: 10.0,
            base_y: 4.0,
            yaw_travel: 5.0,
            pitch_travel: 2.0,
            hand_gain: 0.5,
            ease_rate: 2.0,
            spin_rate: 0.1,
            fov_degrees: 45.0,
        }
    }
}

/// Target view angles derived from the shared state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewAngles {
    /// Rotation about the horizontal axis, radians.
    pub pitch: f32,
    /// Rotation about the vertical axis, radians.
    pub yaw: f32,
}

impl ViewAngles {
    /// Target angles for a frame.
    #[must_use]
    pub fn target(state: &TreeState, elapsed: f32, hand_gain: f32) -> Self {
        if state.hand_present {
            Self {
                pitch: state.hand_position.y * hand_gain,
                yaw: -state.hand_position.x * hand_gain,
            }
        } else {
            Self {
                pitch: (elapsed * 0.2).sin() * 0.1,
                yaw: (elapsed * 0.1).cos() * 0.2,
            }
        }
    }
}

/// Where the camera is and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position.
    pub position: Vec3,
    /// Look-at point.
    pub look_at: Vec3,
    /// Vertical field of view, degrees.
    pub fov_degrees: f32,
}

impl CameraPose {
    /// Unit view direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalize_or_zero()
    }

    /// Distance along the view direction, used for sprite attenuation.
    #[must_use]
    pub fn view_depth(&self, point: Vec3) -> f32 {
        (point - self.position).dot(self.forward())
    }
}

/// Smoothed camera controller.
#[derive(Debug, Clone)]
pub struct CameraRig {
    params: CameraParams,
    position: Vec3,
    target: ViewAngles,
}

impl CameraRig {
    /// Creates the rig at its initial position.
    #[must_use]
    pub fn new(params: CameraParams) -> Self {
        Self {
            position: params.initial_position,
            target: ViewAngles::default(),
            params,
        }
    }

    /// Recomputes the target and eases the position one frame.
    pub fn advance(&mut self, state: &TreeState, dt: f32, elapsed: f32) {
        self.target = ViewAngles::target(state, elapsed, self.params.hand_gain);
        let damp = damping_factor(self.params.ease_rate, dt);
        let goal_x = self.params.base_x + self.target.yaw * self.params.yaw_travel;
        let goal_y = self.params.base_y + self.target.pitch * self.params.pitch_travel;
        self.position.x = lerp(self.position.x, goal_x, damp);
        self.position.y = lerp(self.position.y, goal_y, damp);
    }

    /// Target angles from the last frame.
    #[must_use]
    pub fn target(&self) -> ViewAngles {
        self.target
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            look_at: self.params.look_at,
            fov_degrees: self.params.fov_degrees,
        }
    }
}

impl FrameSystem for CameraRig {
    fn label(&self) -> &'static str {
        "camera"
    }

    fn update(&mut self, ctx: &FrameContext) {
        self.advance(&ctx.state, ctx.delta, ctx.elapsed);
    }

    fn submit(&self, backend: &mut dyn RenderBackend) {
        backend.set_camera(&self.pose());
    }
}

/// Slow constant spin of the whole assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblySpin {
    rate: f32,
    yaw: f32,
}

impl AssemblySpin {
    /// Creates a spin at `rate` radians per second.
    #[must_use]
    pub const fn new(rate: f32) -> Self {
        Self { rate, yaw: 0.0 }
    }

    /// Advances one frame and returns the new yaw, wrapped to `[0, 2π)`.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.yaw = (self.yaw + self.rate * dt).rem_euclid(std::f32::consts::TAU);
        self.yaw
    }

    /// Current yaw.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }
}
