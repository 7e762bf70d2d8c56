//! Hand landmarks → gesture samples.
//!
//! Landmarks follow the common 21-point hand layout in normalized image
//! coordinates (`[0, 1]`, origin top-left):
//!
//! ```text
//! 0 wrist   4 thumb tip   8 index tip   9 middle MCP
//! 12 middle tip   16 ring tip   20 pinky tip
//! ```
//!
//! The hand center is the midpoint of wrist and middle MCP, remapped to
//! `[-1, 1]`. Openness is the mean fingertip-to-wrist distance; above the
//! threshold the hand is open and the chaos target is exactly 1, otherwise
//! exactly 0, never in between.

use arbor_shared::GestureSample;
use serde::{Deserialize, Serialize};

/// Number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

/// Wrist landmark.
pub const WRIST: usize = 0;

/// Middle-finger MCP joint.
pub const MIDDLE_MCP: usize = 9;

/// Fingertip landmarks, thumb to pinky.
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];

/// Default openness threshold in normalized image units.
pub const OPEN_THRESHOLD: f32 = 0.3;

/// One landmark in normalized image coordinates. `z` is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal, 0 = left edge.
    pub x: f32,
    /// Vertical, 0 = top edge.
    pub y: f32,
    /// Relative depth.
    pub z: f32,
}

impl Landmark {
    /// Creates a landmark in the image plane.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    fn distance_2d(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One detected hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    /// The 21 landmarks.
    pub points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Hand center remapped to `[-1, 1]` on both axes.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        let wrist = self.points[WRIST];
        let mcp = self.points[MIDDLE_MCP];
        let cx = (wrist.x + mcp.x) / 2.0;
        let cy = (wrist.y + mcp.y) / 2.0;
        ((cx - 0.5) * 2.0, (cy - 0.5) * 2.0)
    }

    /// Mean fingertip-to-wrist distance.
    #[must_use]
    pub fn openness(&self) -> f32 {
        let wrist = self.points[WRIST];
        let total: f32 = FINGERTIPS.iter().map(|&i| self.points[i].distance_2d(wrist)).sum();
        total / FINGERTIPS.len() as f32
    }

    /// Synthesizes a plausible hand centered at `(x, y)` in `[-1, 1]`.
    ///
    /// Fingertips fan out above the wrist at `reach`. Used by scripted
    /// trackers and tests.
    #[must_use]
    pub fn synthetic(x: f32, y: f32, reach: f32) -> Self {
        let cx = x / 2.0 + 0.5;
        let cy = y / 2.0 + 0.5;
        let wrist = Landmark::new(cx, cy + 0.05);
        let mut points = [Landmark::new(cx, cy); LANDMARK_COUNT];
        points[WRIST] = wrist;
        points[MIDDLE_MCP] = Landmark::new(cx, cy - 0.05);
        for (k, &tip) in FINGERTIPS.iter().enumerate() {
            let angle = std::f32::consts::PI * (0.2 + 0.15 * k as f32);
            points[tip] = Landmark::new(wrist.x - reach * angle.cos(), wrist.y - reach * angle.sin());
        }
        Self { points }
    }
}

/// Turns tracker output into gesture samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureClassifier {
    /// Openness above which the hand counts as open.
    pub open_threshold: f32,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self {
            open_threshold: OPEN_THRESHOLD,
        }
    }
}

impl GestureClassifier {
    /// Creates a classifier with a custom threshold.
    #[must_use]
    pub const fn new(open_threshold: f32) -> Self {
        Self { open_threshold }
    }

    /// Classifies the first detected hand, or reports no hand.
    #[must_use]
    pub fn classify(&self, hand: Option<&HandLandmarks>) -> GestureSample {
        match hand {
            None => GestureSample::NO_HAND,
            Some(hand) => {
                let (x, y) = hand.center();
                GestureSample::hand(hand.openness() > self.open_threshold, x, y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hand() {
        let sample = GestureClassifier::default().classify(None);
        assert_eq!(sample, GestureSample::NO_HAND);
    }

    #[test]
    fn test_open_and_closed() {
        let c = GestureClassifier::default();
        let open = c.classify(Some(&HandLandmarks::synthetic(0.0, 0.0, 0.4)));
        assert_eq!(open.chaos, 1.0);
        assert!(open.detected);

        let fist = c.classify(Some(&HandLandmarks::synthetic(0.0, 0.0, 0.1)));
        assert_eq!(fist.chaos, 0.0);
        assert!(fist.detected);
    }

    #[test]
    fn test_center_remap() {
        let hand = HandLandmarks::synthetic(0.6, -0.4, 0.2);
        let (x, y) = hand.center();
        assert!((x - 0.6).abs() < 1e-5);
        assert!((y + 0.4).abs() < 1e-5);

        let mut corner = hand;
        corner.points[WRIST] = Landmark::new(0.0, 0.0);
        corner.points[MIDDLE_MCP] = Landmark::new(0.0, 0.0);
        assert_eq!(corner.center(), (-1.0, -1.0));
    }

    #[test]
    fn test_openness_is_mean_tip_distance() {
        let hand = HandLandmarks::synthetic(0.0, 0.0, 0.35);
        assert!((hand.openness() - 0.35).abs() < 1e-5);
    }

    #[test]
    fn test_threshold_is_strict() {
        let hand = HandLandmarks::synthetic(0.0, 0.0, 0.3);
        let c = GestureClassifier::new(hand.openness());
        assert_eq!(c.classify(Some(&hand)).chaos, 0.0);
    }
}
