//! # Scene
//!
//! Owns every population and runs them in one explicit order per frame:
//!
//! ```text
//! tick(delta)
//! ├─ photo library changed?  → rebind photo panels (blends kept)
//! ├─ snapshot SharedTreeState (once)
//! ├─ advance assembly spin
//! ├─ update: foliage → ornaments → polaroids → camera
//! └─ submit: same order, bracketed by begin_frame / end_frame
//! ```
//!
//! Every system reads the same snapshot, so a gesture sample arriving
//! mid-frame is picked up by all of them on the next tick.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use arbor_rendering::{
    AssemblySpin, CameraRig, FoliageField, FrameContext, FrameSystem, OrnamentField, PolaroidField,
    RenderBackend,
};
use arbor_shared::{PhotoLibrary, SharedTreeState, TreeState};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::ArborConfig;

/// The composed scene.
pub struct Scene {
    foliage: FoliageField,
    ornaments: OrnamentField,
    polaroids: PolaroidField,
    camera: CameraRig,
    spin: AssemblySpin,
    rng: StdRng,
    seed: u64,
    state: Arc<SharedTreeState>,
    photos: Arc<PhotoLibrary>,
    photo_generation: u64,
    panel_rebuilds: u64,
    frame: u64,
    elapsed: f32,
}

impl Scene {
    /// Builds every population from `config` with its own shared state,
    /// smoothed by `config.gesture.hand_smoothing`.
    ///
    /// Hand the controller [`Scene::shared_state`].
    #[must_use]
    pub fn from_config(config: &ArborConfig, photos: Arc<PhotoLibrary>) -> Self {
        let state = Arc::new(SharedTreeState::with_smoothing(config.gesture.hand_smoothing));
        Self::new(config, state, photos)
    }

    /// Builds every population from `config` around an existing state.
    ///
    /// `state` is written by the gesture controller; `photos` may be
    /// replaced at any time and the panels follow on the next tick.
    #[must_use]
    pub fn new(config: &ArborConfig, state: Arc<SharedTreeState>, photos: Arc<PhotoLibrary>) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        let mut rng = StdRng::seed_from_u64(seed);

        let foliage = FoliageField::build(config.foliage.clone(), &mut rng);
        let ornaments = OrnamentField::build(&config.ornaments, &mut rng);
        let photo_generation = photos.generation();
        let polaroids = PolaroidField::build(config.polaroids.clone(), photos.effective(), &mut rng);

        tracing::info!(
            seed,
            foliage = foliage.len(),
            ornaments = ornaments.len(),
            panels = polaroids.len(),
            "scene built"
        );

        Self {
            foliage,
            ornaments,
            polaroids,
            camera: CameraRig::new(config.camera.clone()),
            spin: AssemblySpin::new(config.camera.spin_rate),
            rng,
            seed,
            state,
            photos,
            photo_generation,
            panel_rebuilds: 0,
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Advances every system by `delta` seconds and submits the frame.
    pub fn tick(&mut self, delta: f32, backend: &mut dyn RenderBackend) -> FrameContext {
        let ctx = self.update(delta);
        self.submit(&ctx, backend);
        ctx
    }

    /// Update half of a tick. `delta` is used as given.
    pub fn update(&mut self, delta: f32) -> FrameContext {
        self.sync_photos();

        self.elapsed += delta;
        let ctx = FrameContext {
            frame: self.frame,
            delta,
            elapsed: self.elapsed,
            state: self.state.snapshot(),
            assembly_yaw: self.spin.advance(delta),
        };

        for system in self.systems_mut() {
            system.update(&ctx);
        }
        self.frame += 1;
        ctx
    }

    /// Submit half of a tick.
    pub fn submit(&self, ctx: &FrameContext, backend: &mut dyn RenderBackend) {
        backend.begin_frame(ctx);
        for system in self.systems() {
            system.submit(backend);
        }
        backend.end_frame();
    }

    /// Systems in update order.
    pub fn systems_mut(&mut self) -> [&mut dyn FrameSystem; 4] {
        [
            &mut self.foliage,
            &mut self.ornaments,
            &mut self.polaroids,
            &mut self.camera,
        ]
    }

    /// Systems in submit order.
    #[must_use]
    pub fn systems(&self) -> [&dyn FrameSystem; 4] {
        [&self.foliage, &self.ornaments, &self.polaroids, &self.camera]
    }

    fn sync_photos(&mut self) {
        let generation = self.photos.generation();
        if generation == self.photo_generation {
            return;
        }
        self.polaroids.rebuild(self.photos.effective(), &mut self.rng);
        self.photo_generation = generation;
        self.panel_rebuilds += 1;
        tracing::debug!(generation, photos = self.polaroids.photos().len(), "photo panels rebuilt");
    }

    /// Foliage population.
    #[must_use]
    pub fn foliage(&self) -> &FoliageField {
        &self.foliage
    }

    /// Ornament population.
    #[must_use]
    pub fn ornaments(&self) -> &OrnamentField {
        &self.ornaments
    }

    /// Photo panel population.
    #[must_use]
    pub fn polaroids(&self) -> &PolaroidField {
        &self.polaroids
    }

    /// Camera rig.
    #[must_use]
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// Current assembly spin, radians.
    #[must_use]
    pub fn assembly_yaw(&self) -> f32 {
        self.spin.yaw()
    }

    /// Seed the populations were built from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Frames ticked so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Scene time, seconds.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Times the photo panels were rebuilt after a library change.
    #[must_use]
    pub fn panel_rebuilds(&self) -> u64 {
        self.panel_rebuilds
    }

    /// Current shared state.
    #[must_use]
    pub fn state(&self) -> TreeState {
        self.state.snapshot()
    }

    /// Shared state handle, for the gesture controller.
    #[must_use]
    pub fn shared_state(&self) -> Arc<SharedTreeState> {
        Arc::clone(&self.state)
    }

    /// Photo library handle.
    #[must_use]
    pub fn photo_library(&self) -> Arc<PhotoLibrary> {
        Arc::clone(&self.photos)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() ^ u64::from(d.subsec_nanos()))
}
