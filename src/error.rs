// One error type for the whole game.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String), // Grabbing/decoding a frame failed
    #[error("Asset error: cannot load {asset} from {}: {source}", path.display())]
    AssetLoad {
        asset: String, // gesture name or "decoration"
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Recognizer error: {0}")]
    Recognizer(String), // Submitting a frame to the recognition engine failed
}
