// Core pixel types shared by the camera, the asset cache and the compositor.

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A frame of one solid color.
    #[cfg(test)]
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }
}

/// Binary overlay mask packed the same way as a [`FrameBuffer`] pixel:
/// each pixel is either 0x00000000 (keep live frame) or 0x00FFFFFF (take overlay).
/// Because of that packing, blending is plain bitwise AND/OR on the u32s.
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryMask {
    pub width: usize,
    pub height: usize,
    pub bits: Vec<u32>,
}

/// An overlay image plus the mask derived from it, both at the resolution of
/// the screen region they get pasted into.
#[derive(Clone, Debug)]
pub struct OverlayAsset {
    pub image: FrameBuffer,
    pub mask: BinaryMask,
}

/// Top-left corner of a region on screen, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pack an RGB triplet as 0x00RRGGBB.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}
