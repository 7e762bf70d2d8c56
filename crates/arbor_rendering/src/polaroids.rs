//! Photo panel field: 16 polaroid-style cards spiralling around the tree.
//!
//! Unlike foliage and ornaments, every panel eases its own blend. All
//! panels start together so they track closely, but each one is its own
//! easing instance. Panels always turn to face a fixed reference point near
//! the camera's start position (not the live camera), with a slow roll
//! wobble layered on top.
//!
//! When the photo list changes the positions and photo bindings are
//! regenerated, but each panel keeps its blend and phase so a dispersed
//! tree stays dispersed.

use arbor_shared::{cone_point, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::backend::RenderBackend;
use crate::easing::DampedValue;
use crate::frame::{FrameContext, FrameSystem};
use crate::instance::PanelInstance;

/// Blend below which panels float gently in place.
pub const FLOAT_THRESHOLD: f32 = 0.1;

/// Build parameters for the photo panel field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolaroidParams {
    /// Number of panels, independent of the number of photos.
    pub count: usize,
    /// Cone height for the spiral.
    pub height: f32,
    /// Cone base radius for the spiral.
    pub radius: f32,
    /// Distance panels are pushed out from the cone surface.
    pub push_out: f32,
    /// Dispersed position = formed position times this.
    pub dispersal_scale: f32,
    /// Half-width of the per-axis dispersal jitter.
    pub dispersal_jitter: f32,
    /// Per-panel blend easing rate per second.
    pub ease_rate: f32,
    /// Point every panel turns to face.
    pub facing_point: Vec3,
    /// Amplitude of the formed-state vertical float.
    pub float_amplitude: f32,
    /// Amplitude of the roll wobble, radians.
    pub roll_amplitude: f32,
    /// Whole-group float.
    pub group_float: GroupFloat,
}

impl Default for PolaroidParams {
    fn default() -> Self {
        Self {
            count: 16,
            height: 14.0,
            radius: 7.0,
            push_out: 0.8,
            dispersal_scale: 3.0,
            dispersal_jitter: 7.5,
            ease_rate: 2.0,
            facing_point: Vec3::new(0.0, 4.0, 25.0),
            float_amplitude: 0.05,
            roll_amplitude: 0.05,
            group_float: GroupFloat::default(),
        }
    }
}

/// Gentle float applied to the panel group as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupFloat {
    /// Oscillation speed.
    pub speed: f32,
    /// Scales the tilt.
    pub rotation_intensity: f32,
    /// Scales the vertical bob.
    pub float_intensity: f32,
}

impl Default for GroupFloat {
    fn default() -> Self {
        Self {
            speed: 2.0,
            rotation_intensity: 0.5,
            float_intensity: 0.5,
        }
    }
}

/// Offset and tilt of the panel group for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupTransform {
    /// Vertical offset.
    pub offset_y: f32,
    /// Euler tilt in radians.
    pub tilt: [f32; 3],
}

impl GroupTransform {
    /// Maps a point from panel space into the group's parent space.
    ///
    /// Tilt is an XYZ Euler rotation: Z is applied first, then Y, then X.
    #[must_use]
    pub fn apply(&self, point: Vec3) -> Vec3 {
        let [x, y, z] = self.tilt;
        let mut out = point.rotate_z(z).rotate_y(y).rotate_x(x);
        out.y += self.offset_y;
        out
    }

    /// Maps a direction from the parent space back into panel space.
    #[must_use]
    pub fn unapply_direction(&self, dir: Vec3) -> Vec3 {
        let [x, y, z] = self.tilt;
        dir.rotate_x(-x).rotate_y(-y).rotate_z(-z)
    }
}

impl GroupFloat {
    /// Group transform at `time` seconds (already including the phase offset).
    #[must_use]
    pub fn sample(&self, time: f32) -> GroupTransform {
        let arg = time / 4.0 * self.speed;
        let (sin, cos) = arg.sin_cos();
        GroupTransform {
            offset_y: sin / 10.0 * self.float_intensity,
            tilt: [
                cos / 8.0 * self.rotation_intensity,
                sin / 8.0 * self.rotation_intensity,
                sin / 20.0 * self.rotation_intensity,
            ],
        }
    }
}

/// One photo panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoPanel {
    /// Position at chaos 0.
    pub formed: Vec3,
    /// Position at chaos 1.
    pub dispersed: Vec3,
    /// Index into the photo list.
    pub photo_index: usize,
    /// Random phase in `[0, 100)` for float and roll.
    pub phase: f32,
    blend: DampedValue,
}

impl PhotoPanel {
    /// This panel's own blend.
    #[must_use]
    pub fn blend(&self) -> f32 {
        self.blend.value()
    }
}

/// Formed position of panel `index` out of `count`.
///
/// Panels run down the spiral from near the apex, then get pushed out along
/// their own radial direction so they float clear of the needles.
#[must_use]
pub fn formed_position<R: Rng + ?Sized>(params: &PolaroidParams, index: usize, rng: &mut R) -> Vec3 {
    let t = 0.1 + index as f32 / (params.count + 2) as f32;
    let pos = cone_point(rng, params.height, params.radius, 1.0 - t);
    pos + pos.normalize_or_zero() * params.push_out
}

fn sample_panel<R: Rng + ?Sized>(
    params: &PolaroidParams,
    index: usize,
    photo_count: usize,
    rng: &mut R,
) -> PhotoPanel {
    let formed = formed_position(params, index, rng);
    let jitter = Vec3::new(
        (rng.gen::<f32>() - 0.5) * params.dispersal_jitter * 2.0,
        (rng.gen::<f32>() - 0.5) * params.dispersal_jitter * 2.0,
        (rng.gen::<f32>() - 0.5) * params.dispersal_jitter * 2.0,
    );
    PhotoPanel {
        formed,
        dispersed: formed * params.dispersal_scale + jitter,
        photo_index: if photo_count == 0 { 0 } else { index % photo_count },
        phase: rng.gen::<f32>() * 100.0,
        blend: DampedValue::new(0.0, params.ease_rate),
    }
}

fn panel_instance(index: usize, panel: &PhotoPanel) -> PanelInstance {
    let pos = panel.formed.lerp(panel.dispersed, panel.blend.value());
    PanelInstance {
        position_roll: [pos.x, pos.y, pos.z, 0.0],
        facing: [0.0, 0.0, 1.0, 0.0],
        photo_index: u32::try_from(panel.photo_index).unwrap_or(u32::MAX),
        panel_index: u32::try_from(index).unwrap_or(u32::MAX),
        _pad: [0; 2],
    }
}

/// The photo panel population.
#[derive(Debug, Clone)]
pub struct PolaroidField {
    params: PolaroidParams,
    panels: Vec<PhotoPanel>,
    photos: Vec<String>,
    group_phase: f32,
    group: GroupTransform,
    instances: Vec<PanelInstance>,
}

impl PolaroidField {
    /// Builds the population for a photo list.
    ///
    /// `photos` must be the effective list (defaults already substituted).
    /// Panels cycle through it by index modulo its length.
    #[must_use]
    pub fn build<R: Rng + ?Sized>(params: PolaroidParams, photos: Vec<String>, rng: &mut R) -> Self {
        let panels: Vec<PhotoPanel> = (0..params.count)
            .map(|i| sample_panel(&params, i, photos.len(), rng))
            .collect();
        let instances = panels.iter().enumerate().map(|(i, p)| panel_instance(i, p)).collect();

        tracing::debug!(panels = panels.len(), photos = photos.len(), "photo panels built");

        Self {
            group_phase: rng.gen::<f32>() * 10_000.0,
            params,
            panels,
            photos,
            group: GroupTransform::default(),
            instances,
        }
    }

    /// Regenerates positions and photo bindings for a new photo list.
    ///
    /// Panel `i` keeps the blend and phase of the old panel `i`, and the
    /// group float keeps its phase, so nothing jumps back to the cone.
    /// Panels beyond the old population start formed.
    pub fn rebuild<R: Rng + ?Sized>(&mut self, photos: Vec<String>, rng: &mut R) {
        let panels: Vec<PhotoPanel> = (0..self.params.count)
            .map(|i| {
                let mut panel = sample_panel(&self.params, i, photos.len(), rng);
                if let Some(old) = self.panels.get(i) {
                    panel.blend = old.blend;
                    panel.phase = old.phase;
                }
                panel
            })
            .collect();

        self.instances = panels.iter().enumerate().map(|(i, p)| panel_instance(i, p)).collect();
        self.panels = panels;
        self.photos = photos;
        tracing::debug!(panels = self.panels.len(), photos = self.photos.len(), "photo panels rebound");
    }

    /// Advances every panel.
    ///
    /// `assembly_yaw` is the current spin of the whole assembly. Facing is
    /// computed in world space through the group float and the spin, then
    /// carried back into panel space.
    pub fn advance(&mut self, chaos_target: f32, dt: f32, elapsed: f32, assembly_yaw: f32) {
        self.group = self.params.group_float.sample(elapsed + self.group_phase);
        let facing_point = self.params.facing_point;

        for (instance, panel) in self.instances.iter_mut().zip(self.panels.iter_mut()) {
            let blend = panel.blend.update(chaos_target, dt);
            let mut pos = panel.formed.lerp(panel.dispersed, blend);
            if blend < FLOAT_THRESHOLD {
                pos.y += (elapsed + panel.phase).sin() * self.params.float_amplitude;
            }

            let world = self.group.apply(pos).rotate_y(assembly_yaw);
            let facing = self
                .group
                .unapply_direction((facing_point - world).rotate_y(-assembly_yaw))
                .normalize_or_zero();
            let roll = (elapsed * 0.5 + panel.phase).sin() * self.params.roll_amplitude;

            instance.position_roll = [pos.x, pos.y, pos.z, roll];
            instance.facing = [facing.x, facing.y, facing.z, 0.0];
        }
    }

    /// Panels in build order.
    #[must_use]
    pub fn panels(&self) -> &[PhotoPanel] {
        &self.panels
    }

    /// The photo list the panels index into.
    #[must_use]
    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    /// Photo shown by panel `index`.
    #[must_use]
    pub fn photo_for(&self, index: usize) -> Option<&str> {
        let panel = self.panels.get(index)?;
        self.photos.get(panel.photo_index).map(String::as_str)
    }

    /// Group float for the current frame.
    #[must_use]
    pub fn group(&self) -> GroupTransform {
        self.group
    }

    /// Instance buffer for the current frame.
    #[must_use]
    pub fn instances(&self) -> &[PanelInstance] {
        &self.instances
    }

    /// Mean blend across panels.
    #[must_use]
    pub fn mean_blend(&self) -> f32 {
        if self.panels.is_empty() {
            return 0.0;
        }
        self.panels.iter().map(PhotoPanel::blend).sum::<f32>() / self.panels.len() as f32
    }

    /// Number of panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// True if there are no panels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Build parameters.
    #[must_use]
    pub fn params(&self) -> &PolaroidParams {
        &self.params
    }
}

impl FrameSystem for PolaroidField {
    fn label(&self) -> &'static str {
        "polaroids"
    }

    fn update(&mut self, ctx: &FrameContext) {
        self.advance(ctx.state.chaos_level, ctx.delta, ctx.elapsed, ctx.assembly_yaw);
    }

    fn submit(&self, backend: &mut dyn RenderBackend) {
        backend.draw_panels(&self.group, &self.instances, &self.photos);
    }
}
