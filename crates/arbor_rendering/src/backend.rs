//! The render backend contract.
//!
//! A backend receives, once per frame and in schedule order, the camera and
//! every population's buffers. It owns lighting, blending, bloom and the
//! rest of the post chain; nothing here knows about them.
//!
//! [`FrameRecorder`] is a headless backend that keeps the last frame's data
//! and running upload totals. Used by tests and the headless binary.
//! At the end of each frame it resolves the on-screen sprite size of every
//! foliage point against that frame's camera, the way a point shader would.

use arbor_shared::Vec3;
use bytemuck::cast_slice;

use crate::camera::CameraPose;
use crate::foliage::attenuated_size;
use crate::frame::FrameContext;
use crate::instance::{FoliageUniforms, OrnamentInstance, PanelInstance, PointVertex};
use crate::polaroids::GroupTransform;

/// Consumer of per-frame buffers.
pub trait RenderBackend {
    /// Called before any submission in a frame.
    fn begin_frame(&mut self, _ctx: &FrameContext) {}

    /// Camera for this frame.
    fn set_camera(&mut self, pose: &CameraPose);

    /// Foliage points, drawn as additive, size-attenuated round sprites.
    fn draw_foliage(&mut self, uniforms: &FoliageUniforms, points: &[PointVertex]);

    /// Ornament instances.
    fn draw_ornaments(&mut self, instances: &[OrnamentInstance]);

    /// Photo panels; `photos` is the list `photo_index` points into.
    fn draw_panels(&mut self, group: &GroupTransform, panels: &[PanelInstance], photos: &[String]);

    /// Called after every submission in a frame.
    fn end_frame(&mut self) {}
}

/// Backend that records what it was given.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    /// Frames completed.
    pub frames: u64,
    /// Context of the last frame.
    pub last_context: FrameContext,
    /// Last camera pose.
    pub camera: Option<CameraPose>,
    /// Last foliage uniforms.
    pub foliage_uniforms: FoliageUniforms,
    /// Last foliage points.
    pub foliage: Vec<PointVertex>,
    /// Attenuated sprite size of each foliage point, in pixels.
    pub sprite_sizes: Vec<f32>,
    /// Last ornament instances.
    pub ornaments: Vec<OrnamentInstance>,
    /// Last panel group transform.
    pub panel_group: GroupTransform,
    /// Last panel instances.
    pub panels: Vec<PanelInstance>,
    /// Photo list submitted with the last panels.
    pub photos: Vec<String>,
    /// Total bytes that would have been uploaded.
    pub bytes_uploaded: u64,
    /// Submissions in the current frame, in order.
    pub submissions: Vec<&'static str>,
}

impl FrameRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves sprite sizes for the recorded foliage with the recorded
    /// camera. Points are in assembly space and spun by the frame's yaw.
    fn attenuate_sprites(&mut self) {
        self.sprite_sizes.clear();
        let Some(pose) = self.camera else {
            return;
        };
        let yaw = self.last_context.assembly_yaw;
        self.sprite_sizes.extend(self.foliage.iter().map(|v| {
            let [x, y, z, base] = v.position_size;
            let world = Vec3::new(x, y, z).rotate_y(yaw);
            attenuated_size(base, pose.view_depth(world))
        }));
    }

    fn record_upload<T: bytemuck::Pod>(&mut self, data: &[T]) {
        let bytes: &[u8] = cast_slice(data);
        self.bytes_uploaded += bytes.len() as u64;
    }
}

impl RenderBackend for FrameRecorder {
    fn begin_frame(&mut self, ctx: &FrameContext) {
        self.last_context = *ctx;
        self.submissions.clear();
    }

    fn set_camera(&mut self, pose: &CameraPose) {
        self.camera = Some(*pose);
        self.submissions.push("camera");
    }

    fn draw_foliage(&mut self, uniforms: &FoliageUniforms, points: &[PointVertex]) {
        self.foliage_uniforms = *uniforms;
        self.foliage.clear();
        self.foliage.extend_from_slice(points);
        self.record_upload(points);
        self.record_upload(std::slice::from_ref(uniforms));
        self.submissions.push("foliage");
    }

    fn draw_ornaments(&mut self, instances: &[OrnamentInstance]) {
        self.ornaments.clear();
        self.ornaments.extend_from_slice(instances);
        self.record_upload(instances);
        self.submissions.push("ornaments");
    }

    fn draw_panels(&mut self, group: &GroupTransform, panels: &[PanelInstance], photos: &[String]) {
        self.panel_group = *group;
        self.panels.clear();
        self.panels.extend_from_slice(panels);
        if self.photos != photos {
            self.photos = photos.to_vec();
        }
        self.record_upload(panels);
        self.submissions.push("polaroids");
    }

    fn end_frame(&mut self) {
        self.attenuate_sprites();
        self.frames += 1;
    }
}
