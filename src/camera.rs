// Opens the camera and converts frames into a buffer suitable for the window.
// Visual expectation: each `next_frame()` yields a Vec<u32> where each pixel
// is 0x00RRGGBB, ready to be annotated and pushed to the screen.

use crate::capture::FrameSource;
use crate::error::Error;
use crate::types::{FrameBuffer, pack_rgb};

use log::{info, warn};
// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// A small wrapper around nokhwa::Camera so the capture loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
    released: bool,
}

impl CameraCapture {
    /// Open camera `index` at a target resolution (falls back if not exact).
    /// On success, nothing is shown on screen yet — we just hold an open stream.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );

        // Ask for RGB frames, prioritizing the closest format to our request.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera {index}: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();
        info!("Camera {index} streaming at {}x{}", actual.width(), actual.height());

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
            released: false,
        })
    }

    /// Report the actual resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl FrameSource for CameraCapture {
    /// A live camera has no natural end, so every failure here is a device
    /// error; a released camera reports end of stream.
    fn next_frame(&mut self) -> Result<Option<FrameBuffer>, Error> {
        if self.released {
            return Ok(None);
        }

        // Pull a frame from the camera (this blocks until a new frame is ready).
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let (w, h) = rgb_img.dimensions();
        let mut out = Vec::with_capacity((w as usize) * (h as usize));
        for (_x, _y, pixel) in rgb_img.enumerate_pixels() {
            out.push(pack_rgb(pixel[0], pixel[1], pixel[2]));
        }

        Ok(Some(FrameBuffer {
            width: w as usize,
            height: h as usize,
            pixels: out,
        }))
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        match self.cam.stop_stream() {
            Ok(()) => info!("Camera released"),
            Err(e) => warn!("Camera stop_stream failed: {e}"),
        }
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        self.release();
    }
}
