//! # ARBOR Headless
//!
//! Runs the scene against a recording backend with a scripted hand instead
//! of a webcam. Useful for profiling the frame path and checking gesture
//! response without a GPU.
//!
//! ## Usage
//!
//! ```bash
//! arbor_headless --config arbor.toml --seconds 20
//! arbor_headless --fast        # don't pace frames to the wall clock
//! ```

use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arbor::gesture::{GestureController, GestureStatus, ScriptedTracker};
use arbor::rendering::FrameRecorder;
use arbor::shared::PhotoLibrary;
use arbor::{ArborConfig, ArborResult, FrameLoop, Scene};

struct Options {
    config: Option<String>,
    seconds: f32,
    polls_per_pose: u32,
    fast: bool,
}

fn parse_args() -> Option<Options> {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options {
        config: None,
        seconds: 10.0,
        polls_per_pose: 90,
        fast: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    options.config = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--seconds" | "-s" => {
                if i + 1 < args.len() {
                    options.seconds = args[i + 1].parse().unwrap_or(10.0);
                    i += 1;
                }
            }
            "--polls-per-pose" | "-p" => {
                if i + 1 < args.len() {
                    options.polls_per_pose = args[i + 1].parse().unwrap_or(90);
                    i += 1;
                }
            }
            "--fast" | "-f" => options.fast = true,
            "--help" | "-h" => {
                println!("Usage: arbor_headless [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <FILE>          TOML config (default: built-in scene)");
                println!("  -s, --seconds <SECS>         Simulated seconds to run (default: 10)");
                println!("  -p, --polls-per-pose <N>     Tracker polls per scripted pose (default: 90)");
                println!("  -f, --fast                   Run frames back to back");
                println!("  -h, --help                   Show this help");
                return None;
            }
            _ => {}
        }
        i += 1;
    }
    Some(options)
}

fn run(options: &Options) -> ArborResult<()> {
    let config = match &options.config {
        Some(path) => ArborConfig::load(path)?,
        None => ArborConfig::default(),
    };

    let mut scene = Scene::from_config(&config, Arc::new(PhotoLibrary::new()));
    let mut backend = FrameRecorder::new();
    let mut frame_loop = FrameLoop::new(config.frame);

    let controller = GestureController::spawn(
        ScriptedTracker::demo(options.polls_per_pose),
        scene.shared_state(),
        config.gesture.controller(),
    );

    let delta = 1.0 / config.frame.target_fps as f32;
    let frames = (options.seconds / delta).ceil() as u64;
    let budget = Duration::from_secs_f32(delta);

    println!("┌─ SESSION ────────────────────────────────────────────────────────┐");
    println!("│ Seed:               {}", scene.seed());
    println!("│ Foliage:            {} points", scene.foliage().len());
    println!("│ Ornaments:          {}", scene.ornaments().len());
    println!("│ Photo Panels:       {}", scene.polaroids().len());
    println!("│ Frames:             {frames}");
    println!("└──────────────────────────────────────────────────────────────────┘");

    for frame in 0..frames {
        let started = Instant::now();
        let _ = frame_loop.step_with_delta(&mut scene, &mut backend, delta);

        for status in controller.status().try_iter() {
            match status {
                GestureStatus::Failed(msg) => println!("⚠️  gesture input failed: {msg}"),
                other => println!("   [frame {frame:>5}] gesture {other:?}"),
            }
        }

        if frame % u64::from(config.frame.target_fps) == 0 {
            let snap = scene.state();
            println!(
                "   t={:>5.1}s chaos={:.0} foliage={:.3} ornaments={:.3} panels={:.3}",
                scene.elapsed(),
                snap.chaos_level,
                scene.foliage().blend(),
                scene.ornaments().blend(),
                scene.polaroids().mean_blend(),
            );
        }

        if !options.fast {
            if let Some(rest) = budget.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let gesture_stats = controller.stop();

    println!();
    frame_loop.stats().print_summary();
    println!();
    let pose = scene.camera().pose();
    println!("┌─ FINAL STATE ────────────────────────────────────────────────────┐");
    println!("│ Foliage Blend:      {:.3}", scene.foliage().blend());
    println!("│ Ornament Blend:     {:.3}", scene.ornaments().blend());
    println!("│ Panel Blend:        {:.3}", scene.polaroids().mean_blend());
    println!(
        "│ Camera:             ({:.2}, {:.2}, {:.2})",
        pose.position.x, pose.position.y, pose.position.z
    );
    if !backend.sprite_sizes.is_empty() {
        let mean = backend.sprite_sizes.iter().sum::<f32>() / backend.sprite_sizes.len() as f32;
        println!("│ Mean Sprite:        {mean:.2} px");
    }
    println!("│ Gesture Samples:    {}", gesture_stats.samples);
    println!("│ Uploaded:           {:.1} MiB", backend.bytes_uploaded as f64 / (1024.0 * 1024.0));
    println!("└──────────────────────────────────────────────────────────────────┘");
    Ok(())
}

fn main() -> ExitCode {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         ARBOR HEADLESS                                           ║");
    println!("║         SCRIPTED GESTURE SESSION                                 ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let Some(options) = parse_args() else {
        return ExitCode::SUCCESS;
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ {err}");
            ExitCode::FAILURE
        }
    }
}
