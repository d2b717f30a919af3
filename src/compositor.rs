// Per-frame overlay: goal/score labels plus the masked badge and decoration.
// Visual: a white box with the goal in red at the top, the goal's badge
// pasted below it, the score box at the bottom, and the decorative character
// on the right. Only the render thread calls into here.

use crate::assets::AssetCache;
use crate::draw::{draw_crosshair, draw_text_5x7, fill_rect, text_width};
use crate::gesture::Gesture;
use crate::state::Snapshot;
use crate::types::{FrameBuffer, OverlayAsset, Point};

const LABEL_BG: u32 = 0x00_FF_FF_FF;
const LABEL_FG: u32 = 0x00_FF_00_00;
const HUD_FG: u32 = 0x00_FF_FF_FF;
const HAND_MARK: u32 = 0x00_FF_CC_33;
const LABEL_PAD: i32 = 6;

/// Where each overlay element goes on screen (top-left corners).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub goal_label: Point,
    pub score_label: Point,
    pub badge: Point,
    pub decoration: Point,
    pub text_scale: i32,
}

impl Default for Layout {
    // Tuned for a 640x480 feed: badge at (50,100) is 300x300, decoration 300x400.
    fn default() -> Self {
        Self {
            goal_label: Point::new(10, 20),
            score_label: Point::new(10, 420),
            badge: Point::new(50, 100),
            decoration: Point::new(340, 40),
            text_scale: 2,
        }
    }
}

/// Draw the full game overlay for `snap` into `frame`.
pub fn composite(frame: &mut FrameBuffer, assets: &AssetCache, snap: Snapshot, layout: &Layout) {
    draw_label(frame, layout.goal_label, &format!("Goal gesture: {}", snap.goal.label()), layout.text_scale);
    draw_label(frame, layout.score_label, &format!("Score: {}", snap.score), layout.text_scale);

    if let Some(badge) = assets.badge(snap.goal) {
        blend_masked(frame, layout.badge, badge);
    }
    blend_masked(frame, layout.decoration, assets.decoration());
}

/// Small HUD line listing what the engine saw last.
pub fn draw_recent(frame: &mut FrameBuffer, recent: &[Gesture], at: Point) {
    if recent.is_empty() {
        return;
    }
    let names: Vec<&str> = recent.iter().map(|g| g.label()).collect();
    draw_text_5x7(frame, at.x, at.y, &format!("Seen: {}", names.join(", ")), 1, HUD_FG);
}

/// Mark that a hand is in view.
pub fn mark_hand(frame: &mut FrameBuffer) {
    let (cx, cy) = (frame.width as i32 / 2, frame.height as i32 / 2);
    draw_crosshair(frame, cx, cy, 12, HAND_MARK);
}

/// Opaque box sized to `text`, with the text on top.
fn draw_label(frame: &mut FrameBuffer, at: Point, text: &str, scale: i32) {
    let w = text_width(text, scale) + 2 * LABEL_PAD;
    let h = 7 * scale + 2 * LABEL_PAD;
    fill_rect(frame, at.x, at.y, w, h, LABEL_BG);
    draw_text_5x7(frame, at.x + LABEL_PAD, at.y + LABEL_PAD, text, scale, LABEL_FG);
}

/// Hard cut-and-paste of `overlay` at `origin`: per channel,
/// `dst = (dst & !mask) | (img & mask)`. Parts falling outside the frame are
/// skipped.
pub fn blend_masked(frame: &mut FrameBuffer, origin: Point, overlay: &OverlayAsset) {
    let img = &overlay.image;
    let mask = &overlay.mask;
    debug_assert_eq!((img.width, img.height), (mask.width, mask.height));

    for oy in 0..img.height {
        let fy = origin.y + oy as i32;
        if fy < 0 || fy >= frame.height as i32 {
            continue;
        }
        for ox in 0..img.width {
            let fx = origin.x + ox as i32;
            if fx < 0 || fx >= frame.width as i32 {
                continue;
            }
            let src = oy * img.width + ox;
            let dst = fy as usize * frame.width + fx as usize;
            let m = mask.bits[src];
            frame.pixels[dst] = (frame.pixels[dst] & !m) | (img.pixels[src] & m);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::threshold_mask;
    use crate::types::BinaryMask;
    use std::collections::HashMap;

    const LIVE: u32 = 0x00_11_22_33;
    const OVER: u32 = 0x00_AA_BB_CC;

    /// Overlay whose left half is masked out and right half masked in.
    fn half_mask_overlay(w: usize, h: usize) -> OverlayAsset {
        let image = FrameBuffer::filled(w, h, OVER);
        let bits = (0..w * h).map(|i| if i % w < w / 2 { 0 } else { 0x00_FF_FF_FF }).collect();
        OverlayAsset { image, mask: BinaryMask { width: w, height: h, bits } }
    }

    fn solid_overlay(w: usize, h: usize, color: u32) -> OverlayAsset {
        let image = FrameBuffer::filled(w, h, color);
        let mask = threshold_mask(&image);
        OverlayAsset { image, mask }
    }

    fn cache() -> AssetCache {
        // Distinct color per gesture so the test can tell which badge landed.
        let badges: HashMap<_, _> = Gesture::ALL
            .iter()
            .enumerate()
            .map(|(i, g)| (*g, solid_overlay(300, 300, 0x00_10_20_30 + i as u32 * 0x10)))
            .collect();
        AssetCache::from_parts(badges, solid_overlay(300, 400, 0x00_00_80_00))
    }

    #[test]
    fn mask_selects_overlay_or_live_exactly() {
        let mut frame = FrameBuffer::filled(8, 4, LIVE);
        blend_masked(&mut frame, Point::new(0, 0), &half_mask_overlay(8, 4));
        for y in 0..4 {
            for x in 0..8 {
                let want = if x < 4 { LIVE } else { OVER };
                assert_eq!(frame.pixels[y * 8 + x], want, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn near_black_overlay_pixels_keep_the_live_pixel() {
        let mut frame = FrameBuffer::filled(2, 1, LIVE);
        let mut overlay = solid_overlay(2, 1, 0x00_01_01_01);
        overlay.image.pixels[1] = 0x00_00_00_02;
        overlay.mask = threshold_mask(&overlay.image);
        blend_masked(&mut frame, Point::new(0, 0), &overlay);
        assert_eq!(frame.pixels, vec![LIVE, 0x00_00_00_02]);
    }

    #[test]
    fn overlay_pixel_with_zero_channels_replaces_live_pixel() {
        // Pure red overlay: green and blue must come from the overlay (0),
        // not leak through from the live frame.
        let mut frame = FrameBuffer::filled(2, 1, LIVE);
        let mut overlay = solid_overlay(2, 1, 0x00_C0_00_00);
        overlay.image.pixels[1] = 0;
        overlay.mask = threshold_mask(&overlay.image);
        blend_masked(&mut frame, Point::new(0, 0), &overlay);
        assert_eq!(frame.pixels, vec![0x00_C0_00_00, LIVE]);
    }

    #[test]
    fn overlay_is_clipped_at_frame_edges() {
        let mut frame = FrameBuffer::filled(4, 4, LIVE);
        blend_masked(&mut frame, Point::new(2, -2), &solid_overlay(4, 4, OVER));
        for y in 0..4 {
            for x in 0..4 {
                let want = if x >= 2 && y < 2 { OVER } else { LIVE };
                assert_eq!(frame.pixels[y * 4 + x], want, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn composite_pastes_the_goal_badge_and_decoration() {
        let assets = cache();
        let layout = Layout::default();
        let mut frame = FrameBuffer::filled(640, 480, LIVE);
        composite(&mut frame, &assets, Snapshot { goal: Gesture::Victory, score: 3 }, &layout);

        let at = |p: Point, dx: i32, dy: i32| frame.pixels[(p.y + dy) as usize * 640 + (p.x + dx) as usize];
        let victory = assets.badge(Gesture::Victory).map(|b| b.image.pixels[0]);
        assert_eq!(Some(at(layout.badge, 150, 150)), victory);
        assert_eq!(at(layout.decoration, 200, 200), 0x00_00_80_00);
        // Label boxes are opaque in their padding.
        assert_eq!(at(layout.goal_label, 1, 1), LABEL_BG);
        assert_eq!(at(layout.score_label, 1, 1), LABEL_BG);
        // Untouched corner keeps the live frame.
        assert_eq!(frame.pixels[639], LIVE);
    }

    #[test]
    fn composite_follows_the_goal() {
        let assets = cache();
        let layout = Layout::default();
        let mut a = FrameBuffer::filled(640, 480, LIVE);
        let mut b = a.clone();
        composite(&mut a, &assets, Snapshot { goal: Gesture::ClosedFist, score: 0 }, &layout);
        composite(&mut b, &assets, Snapshot { goal: Gesture::OpenPalm, score: 0 }, &layout);
        let idx = (layout.badge.y + 10) as usize * 640 + (layout.badge.x + 10) as usize;
        assert_ne!(a.pixels[idx], b.pixels[idx]);
    }

    #[test]
    fn recent_line_only_drawn_when_something_was_seen() {
        let mut frame = FrameBuffer::filled(200, 20, 0);
        draw_recent(&mut frame, &[], Point::new(0, 0));
        assert!(frame.pixels.iter().all(|&p| p == 0));
        draw_recent(&mut frame, &[Gesture::ThumbUp], Point::new(0, 0));
        assert!(frame.pixels.iter().any(|&p| p == HUD_FG));
    }
}
