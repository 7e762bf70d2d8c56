//! Ornament field: 300 instanced baubles hung just outside the foliage.
//!
//! Ornaments ease faster than foliage (rate 3 vs 2), so they burst out
//! ahead of the needles. Colors are chosen at build time and never touched
//! again; only position and rotation are rewritten per frame.

use arbor_shared::palette::{GOLD, RED};
use arbor_shared::{cone_point, sphere_point, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::backend::RenderBackend;
use crate::easing::DampedValue;
use crate::frame::{FrameContext, FrameSystem};
use crate::instance::OrnamentInstance;

/// Blend above which ornaments bob vertically.
pub const BOB_THRESHOLD: f32 = 0.1;

/// Build parameters for the ornament field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrnamentParams {
    /// Number of ornaments.
    pub count: usize,
    /// Cone height.
    pub height: f32,
    /// Cone base radius, a little wider than the foliage.
    pub radius: f32,
    /// Radius of the dispersal ball.
    pub dispersal_radius: f32,
    /// Blend easing rate per second.
    pub ease_rate: f32,
    /// Probability that an ornament is gold rather than red.
    pub gold_share: f32,
}

impl Default for OrnamentParams {
    fn default() -> Self {
        Self {
            count: 300,
            height: 15.0,
            radius: 6.5,
            dispersal_radius: 30.0,
            ease_rate: 3.0,
            gold_share: 0.6,
        }
    }
}

/// Which palette an ornament was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// Gold palette.
    Gold,
    /// Red palette.
    Red,
}

/// Immutable per-ornament data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ornament {
    /// Position at chaos 0.
    pub formed: Vec3,
    /// Position at chaos 1.
    pub dispersed: Vec3,
    /// Palette the color came from.
    pub finish: Finish,
    /// RGB color.
    pub color: [f32; 3],
    /// Uniform scale in `[0.2, 0.5)`.
    pub scale: f32,
    /// Spin rate in `[-1, 1)` radians per second.
    pub rotation_speed: f32,
    /// Bob phase in `[0, 2π)`.
    pub phase: f32,
}

impl Ornament {
    fn sample<R: Rng + ?Sized>(params: &OrnamentParams, rng: &mut R) -> Self {
        let t: f32 = rng.gen();
        let formed = cone_point(rng, params.height, params.radius, t);
        let dispersed = sphere_point(rng, params.dispersal_radius);

        // Independent coin flip per ornament, not a quota.
        let finish = if rng.gen::<f32>() < params.gold_share { Finish::Gold } else { Finish::Red };
        let color = match finish {
            Finish::Gold => GOLD[rng.gen_range(0..GOLD.len())],
            Finish::Red => RED[rng.gen_range(0..RED.len())],
        };

        Self {
            formed,
            dispersed,
            finish,
            color,
            scale: 0.2 + rng.gen::<f32>() * 0.3,
            rotation_speed: (rng.gen::<f32>() - 0.5) * 2.0,
            phase: rng.gen::<f32>() * std::f32::consts::TAU,
        }
    }

    /// Animated position for a blend and scene time.
    #[must_use]
    pub fn position(&self, blend: f32, time: f32) -> Vec3 {
        let mut pos = self.formed.lerp(self.dispersed, blend);
        if blend > BOB_THRESHOLD {
            pos.y += (time + self.phase).sin() * 0.1 * blend;
        }
        pos
    }

    /// Self-rotation about x and y, independent of blend.
    #[must_use]
    pub fn rotation(&self, time: f32) -> [f32; 3] {
        let angle = time * self.rotation_speed;
        [angle, angle, 0.0]
    }
}

/// The ornament population.
#[derive(Debug, Clone)]
pub struct OrnamentField {
    ornaments: Vec<Ornament>,
    blend: DampedValue,
    instances: Vec<OrnamentInstance>,
}

impl OrnamentField {
    /// Builds the population and writes the colors once.
    #[must_use]
    pub fn build<R: Rng + ?Sized>(params: &OrnamentParams, rng: &mut R) -> Self {
        let ornaments: Vec<Ornament> = (0..params.count).map(|_| Ornament::sample(params, rng)).collect();
        let instances = ornaments
            .iter()
            .map(|o| OrnamentInstance {
                position_scale: [o.formed.x, o.formed.y, o.formed.z, o.scale],
                rotation: [0.0; 4],
                color: [o.color[0], o.color[1], o.color[2], 1.0],
            })
            .collect();

        tracing::debug!(count = ornaments.len(), "ornament field built");

        Self {
            ornaments,
            blend: DampedValue::new(0.0, params.ease_rate),
            instances,
        }
    }

    /// Advances the blend toward `chaos_target` and rewrites transforms.
    pub fn advance(&mut self, chaos_target: f32, dt: f32, elapsed: f32) {
        let blend = self.blend.update(chaos_target, dt);
        for (instance, ornament) in self.instances.iter_mut().zip(&self.ornaments) {
            let pos = ornament.position(blend, elapsed);
            let rot = ornament.rotation(elapsed);
            instance.position_scale = [pos.x, pos.y, pos.z, ornament.scale];
            instance.rotation = [rot[0], rot[1], rot[2], 0.0];
        }
    }

    /// Current population blend.
    #[must_use]
    pub fn blend(&self) -> f32 {
        self.blend.value()
    }

    /// Per-ornament immutable data.
    #[must_use]
    pub fn ornaments(&self) -> &[Ornament] {
        &self.ornaments
    }

    /// Instance buffer for the current frame.
    #[must_use]
    pub fn instances(&self) -> &[OrnamentInstance] {
        &self.instances
    }

    /// Number of ornaments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ornaments.len()
    }

    /// True if the field has no ornaments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ornaments.is_empty()
    }
}

impl FrameSystem for OrnamentField {
    fn label(&self) -> &'static str {
        "ornaments"
    }

    fn update(&mut self, ctx: &FrameContext) {
        self.advance(ctx.state.chaos_level, ctx.delta, ctx.elapsed);
    }

    fn submit(&self, backend: &mut dyn RenderBackend) {
        backend.draw_ornaments(&self.instances);
    }
}
