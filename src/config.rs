// Command-line flags and the plain config the rest of the game reads.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::compositor::Layout;
use crate::progression::Mode;
use crate::types::Point;

#[derive(Parser, Debug)]
#[command(name = "helping-hand", about = "Copy the goal hand gesture in front of the camera to score points")]
pub struct Cli {
    /// Pick each new goal at random instead of alternating fist / open palm.
    #[arg(long)]
    pub random: bool,

    /// Directory holding one <Gesture>.png per gesture plus the decoration.
    #[arg(long, default_value = "images")]
    pub assets: PathBuf,

    /// Decorative overlay file, relative to the asset directory.
    #[arg(long, default_value = "Astronaut.png")]
    pub decoration: PathBuf,

    /// Left edge of the decorative overlay on screen.
    #[arg(long, default_value_t = 340)]
    pub decoration_x: i32,

    /// Top edge of the decorative overlay on screen.
    #[arg(long, default_value_t = 40)]
    pub decoration_y: i32,

    /// Camera device index.
    #[arg(long, default_value_t = 0)]
    pub camera: u32,

    /// Requested capture width (the camera may pick the closest it supports).
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Requested capture height.
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Seed for goal selection, for a reproducible session.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Model file for the gesture recognizer.
    #[arg(long, default_value = "gesture_recognizer.task")]
    pub model: PathBuf,

    /// Simulated recognizer processing delay in milliseconds.
    #[arg(long, default_value_t = 40)]
    pub latency_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub mode: Mode,
    pub asset_dir: PathBuf,
    pub decoration_file: PathBuf,
    pub layout: Layout,
    pub camera_index: u32,
    pub resolution: (u32, u32),
    pub seed: Option<u64>,
    pub model: PathBuf,
    pub latency: Duration,
}

impl From<Cli> for GameConfig {
    fn from(cli: Cli) -> Self {
        let layout = Layout { decoration: Point::new(cli.decoration_x, cli.decoration_y), ..Layout::default() };
        Self {
            mode: if cli.random { Mode::Random } else { Mode::Alternating },
            asset_dir: cli.assets,
            decoration_file: cli.decoration,
            layout,
            camera_index: cli.camera,
            resolution: (cli.width, cli.height),
            seed: cli.seed,
            model: cli.model,
            latency: Duration::from_millis(cli.latency_ms),
        }
    }
}
