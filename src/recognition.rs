// Recognition-engine boundary.
//
// The engine is a black box: the render loop hands it a frame and a
// timestamp, and some time later, on the engine's own thread, it calls
// `RecognitionHandler::on_result` with what it saw. Results are expected in
// non-decreasing timestamp order; that is the engine's contract.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::error::Error;
use crate::gesture::Gesture;
use crate::state::GameState;
use crate::types::FrameBuffer;

/// Monotonic request counter owned by the capture loop.
pub type Timestamp = u64;

/// One ranked category for a hand.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub name: String,
    pub score: f32,
}

/// Categories for one detected hand, best first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandGestures {
    pub categories: Vec<Category>,
}

impl HandGestures {
    pub fn top(&self) -> Option<&Category> {
        self.categories.first()
    }
}

/// Payload of one engine callback.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecognitionResult {
    pub hands: Vec<HandGestures>,
}

/// Counts the hands in a frame. Runs on the render thread, synchronously.
pub trait HandDetector {
    fn detect(&mut self, frame: &FrameBuffer) -> usize;
}

/// Asynchronous gesture classifier. `recognize_async` must return without
/// waiting for the result.
pub trait GestureRecognizer {
    fn recognize_async(&self, frame: &FrameBuffer, timestamp: Timestamp) -> Result<(), Error>;
}

/// The engine callback: turns a result payload into game-state updates.
#[derive(Clone)]
pub struct RecognitionHandler {
    state: Arc<GameState>,
}

impl RecognitionHandler {
    pub fn new(state: Arc<GameState>) -> Self {
        Self { state }
    }

    /// Called from the engine's thread. A missing or empty payload means
    /// nothing was recognized: goal and score stay put, and the
    /// last-recognized list is cleared.
    pub fn on_result(&self, result: Option<&RecognitionResult>, timestamp: Timestamp) {
        let recognized = result.map(top_gestures).unwrap_or_default();
        if !recognized.is_empty() {
            debug!("t={timestamp}: recognized {recognized:?}");
        }

        let report = self.state.apply_match(&recognized);
        if report.scored > 0 {
            let after = report.after;
            info!(
                "Match! score {} -> {}, next goal: {}",
                after.score - report.scored,
                after.score,
                after.goal.label()
            );
        }
    }
}

/// Top-ranked gesture of each hand, in delivery order. Hands whose best
/// category is outside the gesture set are dropped.
fn top_gestures(result: &RecognitionResult) -> Vec<Gesture> {
    result
        .hands
        .iter()
        .filter_map(|hand| {
            let top = hand.top()?;
            let gesture = Gesture::from_category(&top.name);
            match gesture {
                Some(g) => debug!("hand: {} ({:.2})", g, top.score),
                None => warn!("engine reported unknown category {:?}; hand skipped", top.name),
            }
            gesture
        })
        .collect()
}
