//! End-to-end behaviour of the composed scene under steady gesture input.

use std::sync::Arc;

use arbor::rendering::{FrameRecorder, ViewAngles};
use arbor::shared::{GestureSample, PhotoLibrary, SharedTreeState, Vec3};
use arbor::{ArborConfig, Scene};

const DT: f32 = 1.0 / 60.0;

fn config(seed: u64) -> ArborConfig {
    let mut config = ArborConfig {
        seed: Some(seed),
        ..ArborConfig::default()
    };
    config.foliage.count = 3000;
    config
}

fn scene_with(photos: Vec<String>) -> Scene {
    Scene::new(
        &config(21),
        Arc::new(SharedTreeState::new()),
        Arc::new(PhotoLibrary::with_photos(photos)),
    )
}

fn hold(state: &SharedTreeState, sample: GestureSample, times: usize) {
    for _ in 0..times {
        state.apply_sample(&sample);
    }
}

fn run(scene: &mut Scene, frames: usize) -> FrameRecorder {
    let mut rec = FrameRecorder::new();
    for _ in 0..frames {
        scene.tick(DT, &mut rec);
    }
    rec
}

#[test]
fn camera_targets_center_for_centered_hand() {
    let mut scene = scene_with(Vec::new());
    let state = scene.shared_state();
    hold(&state, GestureSample::hand(false, 0.0, 0.0), 50);
    let _ = run(&mut scene, 600);

    let target = scene.camera().target();
    assert_eq!(target, ViewAngles { pitch: 0.0, yaw: 0.0 });
    let pose = scene.camera().pose();
    assert!((pose.position.x - 10.0).abs() < 0.01);
    assert!((pose.position.y - 4.0).abs() < 0.01);
}

#[test]
fn camera_targets_corner_for_corner_hand() {
    let mut scene = scene_with(Vec::new());
    let state = scene.shared_state();
    // smoothing 0.1 per sample: 300 samples leave ~2e-14 of the gap
    hold(&state, GestureSample::hand(false, 1.0, -1.0), 300);
    let _ = run(&mut scene, 600);

    let target = scene.camera().target();
    assert!((target.yaw + 0.5).abs() < 1e-5, "yaw {}", target.yaw);
    assert!((target.pitch + 0.5).abs() < 1e-5, "pitch {}", target.pitch);

    let pose = scene.camera().pose();
    assert!((pose.position.x - 7.5).abs() < 0.01);
    assert!((pose.position.y - 3.0).abs() < 0.01);
    assert_eq!(pose.look_at, Vec3::new(0.0, 5.0, 0.0));
}

#[test]
fn ornaments_disperse_within_five_seconds() {
    let mut scene = scene_with(Vec::new());
    scene.shared_state().apply_sample(&GestureSample::hand(true, 0.0, 0.0));
    let _ = run(&mut scene, 300);
    assert!(scene.ornaments().blend() > 0.95, "blend {}", scene.ornaments().blend());
}

#[test]
fn blends_rise_monotonically_and_never_overshoot() {
    let mut scene = scene_with(Vec::new());
    scene.shared_state().apply_sample(&GestureSample::hand(true, 0.0, 0.0));

    let mut rec = FrameRecorder::new();
    let mut last = (0.0_f32, 0.0_f32, 0.0_f32);
    for frame in 0..900 {
        // include a few long frames
        let dt = if frame % 100 == 50 { 0.75 } else { DT };
        scene.tick(dt, &mut rec);
        let now = (
            scene.foliage().blend(),
            scene.ornaments().blend(),
            scene.polaroids().mean_blend(),
        );
        assert!(now.0 >= last.0 && now.1 >= last.1 && now.2 >= last.2);
        assert!(now.0 <= 1.0 && now.1 <= 1.0 && now.2 <= 1.0);
        last = now;
    }
    assert!(last.0 > 0.999 && last.1 > 0.999 && last.2 > 0.999);
}

#[test]
fn closing_the_hand_reforms_the_tree() {
    let mut scene = scene_with(Vec::new());
    let state = scene.shared_state();
    state.apply_sample(&GestureSample::hand(true, 0.0, 0.0));
    let _ = run(&mut scene, 300);
    state.apply_sample(&GestureSample::hand(false, 0.0, 0.0));
    let _ = run(&mut scene, 600);
    assert!(scene.foliage().blend() < 0.001);
    assert!(scene.ornaments().blend() < 0.001);
}

#[test]
fn builds_with_different_seeds_share_shape() {
    let a = Scene::new(&config(1), Arc::new(SharedTreeState::new()), Arc::new(PhotoLibrary::new()));
    let b = Scene::new(&config(2), Arc::new(SharedTreeState::new()), Arc::new(PhotoLibrary::new()));

    assert_eq!(a.foliage().len(), b.foliage().len());
    assert_eq!(a.ornaments().len(), b.ornaments().len());
    assert_eq!(a.polaroids().len(), b.polaroids().len());

    let bounds = |scene: &Scene| {
        let mut min = Vec3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Vec3::new(f32::MIN, f32::MIN, f32::MIN);
        for p in scene.foliage().points() {
            min = min.min(p.formed);
            max = max.max(p.formed);
        }
        (min, max)
    };
    let (min_a, max_a) = bounds(&a);
    let (min_b, max_b) = bounds(&b);

    for (lo, hi) in [(min_a, max_a), (min_b, max_b)] {
        assert!(lo.y >= -7.5 && hi.y <= 7.5);
        assert!(lo.x >= -6.5 && hi.x <= 6.5);
        assert!(lo.z >= -6.5 && hi.z <= 6.5);
    }
    assert!((min_a.y - min_b.y).abs() < 0.1);
    assert!((max_a.y - max_b.y).abs() < 0.1);
    assert!((max_a.x - max_b.x).abs() < 0.5);
}

#[test]
fn same_seed_reproduces_population() {
    let a = Scene::new(&config(9), Arc::new(SharedTreeState::new()), Arc::new(PhotoLibrary::new()));
    let b = Scene::new(&config(9), Arc::new(SharedTreeState::new()), Arc::new(PhotoLibrary::new()));
    assert_eq!(a.foliage().points(), b.foliage().points());
}

#[test]
fn eighteen_photos_fill_sixteen_panels() {
    let photos: Vec<String> = (0..18).map(|i| format!("photo-{i}.jpg")).collect();
    let mut scene = scene_with(photos.clone());
    let rec = run(&mut scene, 1);

    assert_eq!(scene.polaroids().len(), 16);
    assert_eq!(rec.panels.len(), 16);
    for i in 0..16 {
        assert_eq!(scene.polaroids().photo_for(i), Some(photos[i].as_str()));
        assert_eq!(rec.panels[i].photo_index as usize, i);
    }
    assert!(rec.panels.iter().all(|p| p.photo_index < 16));
}

#[test]
fn three_photos_repeat_in_order() {
    let photos = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let scene = scene_with(photos);
    let shown: Vec<_> = (0..16).filter_map(|i| scene.polaroids().photo_for(i)).collect();
    let expected: Vec<_> = ["a", "b", "c"].iter().copied().cycle().take(16).collect();
    assert_eq!(shown, expected);
}

#[test]
fn empty_library_uses_default_photos() {
    let scene = scene_with(Vec::new());
    assert_eq!(scene.polaroids().photos().len(), 6);
    assert_eq!(scene.polaroids().len(), 16);
}
