// Keyboard-driven stand-in for the hand tracker and gesture classifier.
//
// Hold a digit key `1`..`7` in the window to "show" the matching gesture.
// The detector then reports one hand, and the recognizer answers on its own
// worker thread after a fixed latency, just like a live-stream engine would.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error, info};

use crate::error::Error;
use crate::gesture::Gesture;
use crate::recognition::{
    Category, GestureRecognizer, HandDetector, HandGestures, RecognitionHandler, RecognitionResult, Timestamp,
};
use crate::types::FrameBuffer;

/// The gesture currently posed, shared between the window and the simulator.
/// Stored as index + 1, with 0 for "no hand".
#[derive(Clone, Default)]
pub struct PoseSlot(Arc<AtomicU8>);

impl PoseSlot {
    pub fn set(&self, pose: Option<Gesture>) {
        let code = pose
            .and_then(|g| Gesture::ALL.iter().position(|x| *x == g))
            .map_or(0, |i| i as u8 + 1);
        self.0.store(code, Ordering::Relaxed);
    }

    pub fn get(&self) -> Option<Gesture> {
        Gesture::from_digit(self.0.load(Ordering::Relaxed) as usize)
    }
}

/// One hand while a pose key is held, none otherwise.
pub struct SimulatedHands {
    pose: PoseSlot,
}

impl SimulatedHands {
    pub fn new(pose: PoseSlot) -> Self {
        Self { pose }
    }
}

impl HandDetector for SimulatedHands {
    fn detect(&mut self, _frame: &FrameBuffer) -> usize {
        usize::from(self.pose.get().is_some())
    }
}

struct Request {
    timestamp: Timestamp,
    pose: Option<Gesture>,
}

/// Answers recognition requests on a worker thread. Dropping it closes the
/// request channel and joins the worker, after which no callback fires.
pub struct SimulatedRecognizer {
    tx: Option<Sender<Request>>,
    worker: Option<JoinHandle<()>>,
    pose: PoseSlot,
}

impl SimulatedRecognizer {
    pub fn spawn(handler: RecognitionHandler, pose: PoseSlot, model: &Path, latency: Duration) -> Self {
        info!("Simulated recognizer (model {} not needed), latency {:?}", model.display(), latency);
        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || serve(rx, handler, latency));
        Self { tx: Some(tx), worker: Some(worker), pose }
    }
}

impl GestureRecognizer for SimulatedRecognizer {
    fn recognize_async(&self, _frame: &FrameBuffer, timestamp: Timestamp) -> Result<(), Error> {
        let tx = self.tx.as_ref().ok_or_else(|| Error::Recognizer("recognizer shut down".into()))?;
        tx.send(Request { timestamp, pose: self.pose.get() })
            .map_err(|_| Error::Recognizer("worker thread has exited".into()))
    }
}

impl Drop for SimulatedRecognizer {
    fn drop(&mut self) {
        drop(self.tx.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("recognizer worker panicked");
            }
        }
    }
}

/// Worker loop: one result per wake-up. When requests pile up faster than
/// the latency allows, only the newest one is answered.
fn serve(rx: Receiver<Request>, handler: RecognitionHandler, latency: Duration) {
    while let Ok(first) = rx.recv() {
        let latest = rx.try_iter().last().unwrap_or(first);
        if !latency.is_zero() {
            thread::sleep(latency);
        }
        let result = latest.pose.map(ranked_result);
        debug!("sim result t={}: {:?}", latest.timestamp, latest.pose);
        handler.on_result(result.as_ref(), latest.timestamp);
    }
}

/// The posed gesture ranked first, the rest trailing with low scores.
fn ranked_result(pose: Gesture) -> RecognitionResult {
    let mut categories = vec![Category { name: pose.category_name().to_string(), score: 0.92 }];
    categories.extend(
        Gesture::ALL
            .iter()
            .filter(|g| **g != pose)
            .enumerate()
            .map(|(i, g)| Category { name: g.category_name().to_string(), score: 0.05 / (i as f32 + 1.0) }),
    );
    RecognitionResult { hands: vec![HandGestures { categories }] }
}
