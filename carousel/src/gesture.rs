//! Gesture model: input sources, swipe direction, and the press/drag state machine.
//!
//! Touch and mouse drags share one recognizer. A press records the origin;
//! moves update the last coordinate and promote the press to a swipe once it
//! leaves the jitter allowance; a release classifies the net displacement
//! against the commit threshold.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

/// Where a gesture came from. Thresholds and cursor feedback differ per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Finger on a touch screen (coordinates from `screenX`).
    Touch,
    /// Mouse drag (coordinates from `clientX`).
    Pointer,
}

/// Which way a committed swipe navigates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Content dragged leftwards: show the next page.
    Forward,
    /// Content dragged rightwards: show the previous page.
    Backward,
}

/// Active gesture between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// Nothing pressed.
    #[default]
    Idle,
    /// A press is in progress on the track.
    Pressed {
        /// Source of the press.
        source: InputSource,
        /// Horizontal coordinate at press time.
        origin_x: f64,
        /// Horizontal coordinate of the latest move.
        last_x: f64,
        /// Set once movement exceeded the jitter allowance.
        swiping: bool,
    },
}

impl GestureState {
    /// Begin a gesture at `x`.
    #[must_use]
    pub fn press(source: InputSource, x: f64) -> Self {
        Self::Pressed { source, origin_x: x, last_x: x, swiping: false }
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        matches!(self, Self::Pressed { .. })
    }

    /// Whether the current press has been classified as a swipe.
    #[must_use]
    pub fn is_swiping(&self) -> bool {
        matches!(self, Self::Pressed { swiping: true, .. })
    }

    /// Source of the current press, if any.
    #[must_use]
    pub fn source(&self) -> Option<InputSource> {
        match self {
            Self::Pressed { source, .. } => Some(*source),
            Self::Idle => None,
        }
    }

    /// Signed displacement from the origin (negative = dragged left).
    #[must_use]
    pub fn delta(&self) -> f64 {
        match self {
            Self::Pressed { origin_x, last_x, .. } => last_x - origin_x,
            Self::Idle => 0.0,
        }
    }

    /// Signed displacement from the origin to `x`, without recording it.
    #[must_use]
    pub fn delta_to(&self, x: f64) -> f64 {
        match self {
            Self::Pressed { origin_x, .. } => x - origin_x,
            Self::Idle => 0.0,
        }
    }

    /// Record a move to `x`. Returns whether the gesture is now a swipe.
    ///
    /// Once promoted, a press stays a swipe even if it drifts back inside
    /// the jitter allowance.
    pub fn track(&mut self, x: f64, jitter_px: f64) -> bool {
        match self {
            Self::Pressed { origin_x, last_x, swiping, .. } => {
                *last_x = x;
                if (x - *origin_x).abs() > jitter_px {
                    *swiping = true;
                }
                *swiping
            }
            Self::Idle => false,
        }
    }
}

/// Decide whether a released gesture navigates.
///
/// Only swipes whose net displacement strictly exceeds `commit_px` count.
#[must_use]
pub fn classify_release(delta: f64, swiping: bool, commit_px: f64) -> Option<SwipeDirection> {
    if !swiping || delta.abs() <= commit_px {
        return None;
    }
    if delta < 0.0 { Some(SwipeDirection::Forward) } else { Some(SwipeDirection::Backward) }
}
