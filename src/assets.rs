// Overlay images, loaded once at startup.
// Visual: the gesture badge shown next to the goal text, and the decorative
// character pasted onto the video. Everything here is read-only after `build`,
// so both threads can read it without a lock.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use log::{debug, info};

use crate::error::Error;
use crate::gesture::Gesture;
use crate::types::{BinaryMask, FrameBuffer, OverlayAsset, pack_rgb};

/// Badge resolution (width, height) for every gesture image.
pub const BADGE_SIZE: (u32, u32) = (300, 300);
/// Decorative overlay resolution (width, height).
pub const DECORATION_SIZE: (u32, u32) = (300, 400);
/// Channel values strictly above this become 255 in the mask.
pub const MASK_THRESHOLD: u8 = 1;

pub struct AssetCache {
    badges: HashMap<Gesture, OverlayAsset>,
    decoration: OverlayAsset,
}

impl AssetCache {
    /// Load `<dir>/<Category_Name>.png` for every gesture plus the decorative
    /// image. Fails on the first file that cannot be read, naming it.
    pub fn build(dir: &Path, decoration_file: &Path) -> Result<Self, Error> {
        let mut badges = HashMap::with_capacity(Gesture::ALL.len());
        for gesture in Gesture::ALL {
            let path = dir.join(format!("{}.png", gesture.category_name()));
            let asset = load_overlay(gesture.category_name(), &path, BADGE_SIZE)?;
            debug!("loaded badge {} from {}", gesture, path.display());
            badges.insert(gesture, asset);
        }

        let decoration = load_overlay("decoration", &dir.join(decoration_file), DECORATION_SIZE)?;
        info!("Asset cache ready: {} badges + decoration from {}", badges.len(), dir.display());

        Ok(Self { badges, decoration })
    }

    /// Assemble a cache from already-decoded overlays.
    #[cfg(test)]
    pub fn from_parts(badges: HashMap<Gesture, OverlayAsset>, decoration: OverlayAsset) -> Self {
        Self { badges, decoration }
    }

    pub fn badge(&self, gesture: Gesture) -> Option<&OverlayAsset> {
        self.badges.get(&gesture)
    }

    pub fn decoration(&self) -> &OverlayAsset {
        &self.decoration
    }
}

/// Decode, resize to `size`, and derive the mask.
fn load_overlay(name: &str, path: &Path, size: (u32, u32)) -> Result<OverlayAsset, Error> {
    let decoded = image::open(path).map_err(|source| Error::AssetLoad {
        asset: name.to_string(),
        path: PathBuf::from(path),
        source,
    })?;

    let rgb = decoded.to_rgb8();
    let resized = imageops::resize(&rgb, size.0, size.1, FilterType::Triangle);
    Ok(overlay_from_rgb(&resized))
}

/// Pack an RGB image as 0x00RRGGBB and threshold it into a mask.
pub fn overlay_from_rgb(rgb: &image::RgbImage) -> OverlayAsset {
    let (w, h) = rgb.dimensions();
    let mut pixels = Vec::with_capacity((w as usize) * (h as usize));
    for (_x, _y, pixel) in rgb.enumerate_pixels() {
        pixels.push(pack_rgb(pixel[0], pixel[1], pixel[2]));
    }

    let image = FrameBuffer { width: w as usize, height: h as usize, pixels };
    let mask = threshold_mask(&image);
    OverlayAsset { image, mask }
}

/// Binary threshold: a pixel with any channel above [`MASK_THRESHOLD`]
/// becomes 0x00FFFFFF (every channel set), anything else 0. Same dimensions
/// as the input.
pub fn threshold_mask(image: &FrameBuffer) -> BinaryMask {
    let bits = image.pixels.iter().map(|&px| threshold_pixel(px)).collect();
    BinaryMask { width: image.width, height: image.height, bits }
}

#[inline]
fn threshold_pixel(px: u32) -> u32 {
    let lit = [16, 8, 0].into_iter().any(|shift: u32| ((px >> shift) & 0xFF) as u8 > MASK_THRESHOLD);
    if lit { 0x00_FF_FF_FF } else { 0 }
}
