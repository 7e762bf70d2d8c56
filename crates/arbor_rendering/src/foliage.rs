//! Foliage field: the 15,000 point sprites that make up the tree body.
//!
//! Architecture:
//! 1. Build: every point gets a formed position on the cone spiral, a
//!    dispersed position inside a ball and one random seed.
//! 2. Frame: one population-wide blend eases toward the chaos level.
//! 3. Frame: every point is transformed on the CPU into `PointVertex`
//!    (same math a vertex shader would run with `FoliageUniforms`).
//!
//! The seed drives size jitter, wind phase and the gold flecks.

use arbor_shared::palette::{FLECK_GOLD, FOLIAGE_BOTTOM, FOLIAGE_TOP};
use arbor_shared::{cone_point, lerp, sphere_point, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::backend::RenderBackend;
use crate::easing::DampedValue;
use crate::frame::{FrameContext, FrameSystem};
use crate::instance::{FoliageUniforms, PointVertex};

/// Blend above which points scatter instead of swaying.
pub const SCATTER_THRESHOLD: f32 = 0.1;

/// Seeds above this value render as gold flecks (about 5%).
pub const FLECK_THRESHOLD: f32 = 0.95;

/// Amplitude of the formed-state wind sway.
const SWAY_AMPLITUDE: f32 = 0.05;

/// Amplitude of the dispersed-state radial noise.
const SCATTER_AMPLITUDE: f32 = 0.5;

/// Build parameters for the foliage field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoliageParams {
    /// Number of points.
    pub count: usize,
    /// Cone height.
    pub height: f32,
    /// Cone base radius.
    pub radius: f32,
    /// Radius of the dispersal ball.
    pub dispersal_radius: f32,
    /// Blend easing rate per second.
    pub ease_rate: f32,
}

impl Default for FoliageParams {
    fn default() -> Self {
        Self {
            count: 15_000,
            height: 15.0,
            radius: 6.0,
            dispersal_radius: 25.0,
            ease_rate: 2.0,
        }
    }
}

/// Immutable per-point data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoliagePoint {
    /// Position at chaos 0.
    pub formed: Vec3,
    /// Position at chaos 1.
    pub dispersed: Vec3,
    /// Uniform random value in `[0, 1)`.
    pub seed: f32,
}

impl FoliagePoint {
    /// Animated position for a blend and scene time.
    #[must_use]
    pub fn position(&self, blend: f32, time: f32) -> Vec3 {
        let mut pos = self.formed.lerp(self.dispersed, blend);
        if blend > SCATTER_THRESHOLD {
            let noise = (time * 2.0 + self.seed * 10.0).sin() * SCATTER_AMPLITUDE;
            pos += pos.normalize_or_zero() * (noise * blend);
        } else {
            pos.x += (time + pos.y).sin() * SWAY_AMPLITUDE;
            pos.z += (time + pos.y).cos() * SWAY_AMPLITUDE;
        }
        pos
    }

    /// Vertical gradient color, or gold for fleck points.
    #[must_use]
    pub fn color(&self, y: f32, gradient_height: f32) -> [f32; 3] {
        if self.seed > FLECK_THRESHOLD {
            return FLECK_GOLD;
        }
        // Not clamped: points above the cone extrapolate like a shader mix.
        let t = y / gradient_height + 0.5;
        [
            lerp(FOLIAGE_BOTTOM[0], FOLIAGE_TOP[0], t),
            lerp(FOLIAGE_BOTTOM[1], FOLIAGE_TOP[1], t),
            lerp(FOLIAGE_BOTTOM[2], FOLIAGE_TOP[2], t),
        ]
    }

    /// Sprite size before view-distance attenuation.
    #[must_use]
    pub fn base_size(&self) -> f32 {
        4.0 + self.seed * 2.0
    }

    /// True for the gold fleck subset.
    #[must_use]
    pub fn is_fleck(&self) -> bool {
        self.seed > FLECK_THRESHOLD
    }
}

/// Sprite size in pixels for a point at `view_depth` units from the camera.
#[must_use]
pub fn attenuated_size(base_size: f32, view_depth: f32) -> f32 {
    base_size * (100.0 / view_depth.max(f32::EPSILON))
}

/// The foliage population.
#[derive(Debug, Clone)]
pub struct FoliageField {
    params: FoliageParams,
    points: Vec<FoliagePoint>,
    blend: DampedValue,
    time: f32,
    vertices: Vec<PointVertex>,
}

impl FoliageField {
    /// Builds the population. Called once per session.
    #[must_use]
    pub fn build<R: Rng + ?Sized>(params: FoliageParams, rng: &mut R) -> Self {
        let points: Vec<FoliagePoint> = (0..params.count)
            .map(|_| {
                let t: f32 = rng.gen();
                FoliagePoint {
                    formed: cone_point(rng, params.height, params.radius, t),
                    dispersed: sphere_point(rng, params.dispersal_radius),
                    seed: rng.gen(),
                }
            })
            .collect();

        tracing::debug!(count = points.len(), "foliage field built");

        let mut field = Self {
            blend: DampedValue::new(0.0, params.ease_rate),
            vertices: vec![PointVertex::default(); points.len()],
            points,
            params,
            time: 0.0,
        };
        field.write_vertices();
        field
    }

    /// Advances the blend toward `chaos_target` and rewrites every vertex.
    pub fn advance(&mut self, chaos_target: f32, dt: f32, elapsed: f32) {
        self.blend.update(chaos_target, dt);
        self.time = elapsed;
        self.write_vertices();
    }

    fn write_vertices(&mut self) {
        let blend = self.blend.value();
        let time = self.time;
        let height = self.params.height;
        for (vertex, point) in self.vertices.iter_mut().zip(&self.points) {
            let pos = point.position(blend, time);
            let color = point.color(pos.y, height);
            vertex.position_size = [pos.x, pos.y, pos.z, point.base_size()];
            vertex.color_seed = [color[0], color[1], color[2], point.seed];
        }
    }

    /// Current population blend.
    #[must_use]
    pub fn blend(&self) -> f32 {
        self.blend.value()
    }

    /// Uniforms for the current frame.
    #[must_use]
    pub fn uniforms(&self) -> FoliageUniforms {
        FoliageUniforms {
            chaos: self.blend.value(),
            time: self.time,
            gradient_height: self.params.height,
            _pad: 0.0,
        }
    }

    /// Per-point immutable data.
    #[must_use]
    pub fn points(&self) -> &[FoliagePoint] {
        &self.points
    }

    /// Transformed vertices for the current frame.
    #[must_use]
    pub fn vertices(&self) -> &[PointVertex] {
        &self.vertices
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the field has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Build parameters.
    #[must_use]
    pub fn params(&self) -> &FoliageParams {
        &self.params
    }
}

impl FrameSystem for FoliageField {
    fn label(&self) -> &'static str {
        "foliage"
    }

    fn update(&mut self, ctx: &FrameContext) {
        self.advance(ctx.state.chaos_level, ctx.delta, ctx.elapsed);
    }

    fn submit(&self, backend: &mut dyn RenderBackend) {
        backend.draw_foliage(&self.uniforms(), &self.vertices);
    }
}
