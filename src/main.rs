// A Helping Hand: a hand-exercise game on top of the webcam feed.
// What you SEE:
// • Live camera is always the base image.
// • Hold a digit key 1..7 to show a gesture (simulated hand tracker):
//   the goal text, its badge, the decoration and your score appear.
// • Match the goal gesture to score a point and get a new goal.
// • ESC quits.

mod assets;
mod camera;
mod capture;
mod compositor;
mod config;
mod draw;
mod error;
mod gesture;
mod progression;
mod recognition;
mod sim;
mod state;
mod types;

use std::sync::Arc;

use assets::AssetCache;
use camera::CameraCapture;
use capture::{CaptureLoop, StopReason};
use clap::Parser;
use config::{Cli, GameConfig};
use draw::Drawer;
use error::Error;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use recognition::RecognitionHandler;
use sim::{PoseSlot, SimulatedHands, SimulatedRecognizer};
use state::GameState;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cfg = GameConfig::from(Cli::parse());

    /* --- Assets first: a missing image aborts before the camera opens. */
    let assets = Arc::new(AssetCache::build(&cfg.asset_dir, &cfg.decoration_file)?);

    /* --- Game state + the callback the recognizer will invoke. */
    let rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let state = Arc::new(GameState::new(cfg.mode, rng));
    info!("{:?} mode, first goal: {}", state.mode(), state.snapshot().goal.label());
    let handler = RecognitionHandler::new(Arc::clone(&state));

    /* --- Camera + window setup ---
       Visual: window opens with live camera feed. */
    let (w, h) = cfg.resolution;
    let mut cam = CameraCapture::new(cfg.camera_index, w, h)?;
    let (w, h) = cam.resolution();
    let pose = PoseSlot::default();
    let mut drawer = Drawer::new("A Helping Hand", w as usize, h as usize)?.with_pose_slot(pose.clone());

    /* --- Recognition engine (simulated) lives exactly as long as the loop. */
    let recognizer = SimulatedRecognizer::spawn(handler, pose.clone(), &cfg.model, cfg.latency);
    let mut game = CaptureLoop::new(Arc::clone(&state), assets, cfg.layout, SimulatedHands::new(pose), recognizer);

    let reason = game.run(&mut cam, &mut drawer)?;
    info!("{} frames sent for recognition", game.timestamp());
    drop(game);

    match reason {
        StopReason::DeviceError(e) => warn!("Stopped: camera error ({e})"),
        other => info!("Stopped: {other:?}"),
    }
    info!("Final score: {}", state.snapshot().score);
    Ok(())
}
