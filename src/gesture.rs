// The fixed set of gestures the game can ask for.

use std::fmt;

/// One of the seven hand gestures the recognition engine classifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    PointingUp,
    ClosedFist,
    OpenPalm,
    ILoveYou,
    Victory,
    ThumbUp,
    ThumbDown,
}

impl Gesture {
    /// Every gesture, in the order the engine documents them.
    pub const ALL: [Gesture; 7] = [
        Gesture::PointingUp,
        Gesture::ClosedFist,
        Gesture::OpenPalm,
        Gesture::ILoveYou,
        Gesture::Victory,
        Gesture::ThumbUp,
        Gesture::ThumbDown,
    ];

    /// Category name as emitted by the recognition engine. Asset files are
    /// named after it too (`images/Closed_Fist.png`).
    pub fn category_name(self) -> &'static str {
        match self {
            Gesture::PointingUp => "Pointing_Up",
            Gesture::ClosedFist => "Closed_Fist",
            Gesture::OpenPalm => "Open_Palm",
            Gesture::ILoveYou => "ILoveYou",
            Gesture::Victory => "Victory",
            Gesture::ThumbUp => "Thumb_Up",
            Gesture::ThumbDown => "Thumb_Down",
        }
    }

    /// What the participant reads on screen.
    pub fn label(self) -> &'static str {
        match self {
            Gesture::PointingUp => "Point finger",
            Gesture::ClosedFist => "Closed fist",
            Gesture::OpenPalm => "Open hand",
            Gesture::ILoveYou => "I love you",
            Gesture::Victory => "Peace sign",
            Gesture::ThumbUp => "Thumbs up",
            Gesture::ThumbDown => "Thumbs down",
        }
    }

    /// Parse an engine category name. Anything outside the set (the engine
    /// also reports "None") yields `None`.
    pub fn from_category(name: &str) -> Option<Gesture> {
        Gesture::ALL.into_iter().find(|g| g.category_name() == name)
    }

    /// Keyboard digit used to pose this gesture in simulation mode (1..=7).
    pub fn from_digit(digit: usize) -> Option<Gesture> {
        digit.checked_sub(1).and_then(|i| Gesture::ALL.get(i).copied())
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category_name())
    }
}
