// The render loop: capture -> detect -> submit -> overlay -> display.
//
// Runs on the main thread only. The recognizer's callbacks land on another
// thread and meet this loop solely through `GameState`.

use std::sync::Arc;

use log::{debug, error, warn};

use crate::assets::AssetCache;
use crate::compositor::{self, Layout};
use crate::error::Error;
use crate::recognition::{GestureRecognizer, HandDetector, Timestamp};
use crate::state::GameState;
use crate::types::{FrameBuffer, Point};

/// Where frames come from (the camera, in the real app).
pub trait FrameSource {
    /// `Ok(None)` means the stream ended; `Err` means the device failed.
    fn next_frame(&mut self) -> Result<Option<FrameBuffer>, Error>;
    /// Give the device back. Called exactly once when the loop stops.
    fn release(&mut self);
}

/// Where finished frames go (the window, in the real app).
pub trait FrameSink {
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Error>;
    /// Exit key pressed or window closed.
    fn exit_requested(&self) -> bool;
}

/// Why the loop stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    ExitRequested,
    DeviceError(String),
}

enum LoopState {
    Running,
    Stopped(StopReason),
}

pub struct CaptureLoop<D, R> {
    state: Arc<GameState>,
    assets: Arc<AssetCache>,
    layout: Layout,
    detector: D,
    recognizer: R,
    timestamp: Timestamp,
}

impl<D: HandDetector, R: GestureRecognizer> CaptureLoop<D, R> {
    pub fn new(state: Arc<GameState>, assets: Arc<AssetCache>, layout: Layout, detector: D, recognizer: R) -> Self {
        Self { state, assets, layout, detector, recognizer, timestamp: 0 }
    }

    /// Next timestamp that will be handed to the recognizer.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Run until the stream ends, the device fails, or exit is requested.
    /// The source is released on every path, including display errors.
    pub fn run<S: FrameSource, K: FrameSink>(&mut self, source: &mut S, sink: &mut K) -> Result<StopReason, Error> {
        let outcome = self.drive(source, sink);
        source.release();
        outcome
    }

    fn drive<S: FrameSource, K: FrameSink>(&mut self, source: &mut S, sink: &mut K) -> Result<StopReason, Error> {
        let mut state = LoopState::Running;
        loop {
            match state {
                LoopState::Running => state = self.step(source, sink)?,
                LoopState::Stopped(reason) => return Ok(reason),
            }
        }
    }

    /// One iteration of the loop.
    fn step<S: FrameSource, K: FrameSink>(&mut self, source: &mut S, sink: &mut K) -> Result<LoopState, Error> {
        /* 1) Grab a fresh live frame. */
        let mut frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => return Ok(LoopState::Stopped(StopReason::EndOfStream)),
            Err(e) => {
                error!("camera failed, stopping: {e}");
                return Ok(LoopState::Stopped(StopReason::DeviceError(e.to_string())));
            }
        };

        /* 2) Hands in view? Hand the frame to the engine and move on. */
        let hands = self.detector.detect(&frame);
        if hands > 0 {
            match self.recognizer.recognize_async(&frame, self.timestamp) {
                Ok(()) => debug!("submitted t={} ({hands} hand(s))", self.timestamp),
                Err(e) => warn!("recognizer rejected t={}: {e}", self.timestamp),
            }
            self.timestamp += 1;

            /* 3) Overlay only on frames with a hand in them. */
            let snap = self.state.snapshot();
            compositor::composite(&mut frame, &self.assets, snap, &self.layout);
            compositor::mark_hand(&mut frame);
            let recent = self.state.last_recognized();
            let hud = Point::new(self.layout.goal_label.x, self.layout.score_label.y - 14);
            compositor::draw_recent(&mut frame, &recent, hud);
        }

        /* 4) Present, then check for the exit key. */
        sink.present(&frame)?;
        if sink.exit_requested() {
            return Ok(LoopState::Stopped(StopReason::ExitRequested));
        }
        Ok(LoopState::Running)
    }
}
