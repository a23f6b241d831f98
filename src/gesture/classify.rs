//! Per-frame gesture classification
//!
//! Stateless geometry: one frame of landmarks in, one raw symbol out. Raw
//! classifications are noisy frame to frame; `recognizer` owns the
//! debouncing that turns them into a confirmed symbol.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::landmarks::{
    HandFrame, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP,
    RING_TIP, THUMB_IP, THUMB_TIP,
};
use crate::consts::{DIRECTION_DEADZONE, FINGER_EXTENSION_EPS, POINTING_MIN_MAGNITUDE};

/// A recognized gesture symbol. Absence of any gesture is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    Up,
    Down,
    Left,
    Right,
    /// Four or more fingers extended; used for menu actions (pause/restart)
    OpenHand,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::Up => "up",
            Gesture::Down => "down",
            Gesture::Left => "left",
            Gesture::Right => "right",
            Gesture::OpenHand => "open_hand",
        }
    }
}

/// Continuous pointing signal derived from the wrist→index-tip displacement.
///
/// Updated every frame a hand is present, with no debouncing; intended for
/// analog movement while the discrete symbol drives key-like input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointingVector {
    /// Unit direction in play-field space (x mirrored from camera space)
    pub dir: Vec2,
    /// Original displacement length, for callers that want pressure
    pub magnitude: f32,
}

/// Which of the five fingers are extended this frame.
///
/// Non-thumb fingers: tip above the PIP joint (smaller y = raised).
/// Thumb: abduction test on x, insensitive to hand orientation.
pub fn extended_fingers(frame: &HandFrame) -> [bool; 5] {
    let raised = |tip: usize, pip: usize| {
        frame.point(tip).y < frame.point(pip).y - FINGER_EXTENSION_EPS
    };
    let thumb =
        (frame.point(THUMB_TIP).x - frame.point(THUMB_IP).x).abs() > FINGER_EXTENSION_EPS;
    [
        thumb,
        raised(INDEX_TIP, INDEX_PIP),
        raised(MIDDLE_TIP, MIDDLE_PIP),
        raised(RING_TIP, RING_PIP),
        raised(PINKY_TIP, PINKY_PIP),
    ]
}

/// Classify one frame of landmarks into a raw gesture symbol.
///
/// Open hand (4+ fingers) takes priority over pointing; a pointing pose
/// requires the index finger up with at most one other finger raised.
pub fn classify(frame: &HandFrame) -> Option<Gesture> {
    let fingers = extended_fingers(frame);
    let extended_count = fingers.iter().filter(|&&f| f).count();

    if extended_count >= 4 {
        return Some(Gesture::OpenHand);
    }

    let index_extended = fingers[1];
    if index_extended && extended_count <= 2 {
        return Some(pointing_direction(frame.index_tip(), frame.wrist()));
    }

    None
}

/// Dominant-axis direction of the wrist→tip displacement.
///
/// The camera view is mirrored, so x is sign-flipped to make "point right"
/// mean right on screen. Inside the dead zone the tie-break favors the
/// horizontal axis.
pub fn pointing_direction(tip: Vec2, wrist: Vec2) -> Gesture {
    let dx = -(tip.x - wrist.x);
    let dy = tip.y - wrist.y;

    if dx.abs() > DIRECTION_DEADZONE || dy.abs() > DIRECTION_DEADZONE {
        if dx.abs() > dy.abs() {
            if dx > 0.0 { Gesture::Right } else { Gesture::Left }
        } else if dy < 0.0 {
            // Image-space y grows downward
            Gesture::Up
        } else {
            Gesture::Down
        }
    } else if dx > 0.0 {
        Gesture::Right
    } else {
        Gesture::Left
    }
}

/// Unit pointing vector, or `None` when the displacement is below the noise
/// floor. The magnitude guard also keeps the normalize well-defined.
pub fn pointing_vector(tip: Vec2, wrist: Vec2) -> Option<PointingVector> {
    let delta = Vec2::new(-(tip.x - wrist.x), tip.y - wrist.y);
    let magnitude = delta.length();

    if magnitude > POINTING_MIN_MAGNITUDE {
        Some(PointingVector {
            dir: delta / magnitude,
            magnitude,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmarks::{LANDMARK_COUNT, WRIST};

    /// A fist-ish baseline hand: wrist low, all tips below their PIPs.
    fn fist() -> [Vec2; LANDMARK_COUNT] {
        let mut pts = [Vec2::new(0.5, 0.6); LANDMARK_COUNT];
        pts[WRIST] = Vec2::new(0.5, 0.8);
        for (tip, pip) in [
            (INDEX_TIP, INDEX_PIP),
            (MIDDLE_TIP, MIDDLE_PIP),
            (RING_TIP, RING_PIP),
            (PINKY_TIP, PINKY_PIP),
        ] {
            pts[pip] = Vec2::new(0.5, 0.55);
            pts[tip] = Vec2::new(0.5, 0.6); // below pip: curled
        }
        pts[THUMB_IP] = Vec2::new(0.45, 0.6);
        pts[THUMB_TIP] = Vec2::new(0.45, 0.58); // no x spread: tucked
        pts
    }

    fn extend(pts: &mut [Vec2; LANDMARK_COUNT], tip: usize, pip: usize) {
        pts[tip] = Vec2::new(pts[pip].x, pts[pip].y - 0.1);
    }

    fn extend_thumb(pts: &mut [Vec2; LANDMARK_COUNT]) {
        pts[THUMB_TIP] = Vec2::new(pts[THUMB_IP].x - 0.1, pts[THUMB_IP].y);
    }

    #[test]
    fn fist_is_no_gesture() {
        let frame = HandFrame::new(fist());
        assert_eq!(classify(&frame), None);
    }

    #[test]
    fn four_fingers_is_open_hand() {
        let mut pts = fist();
        extend(&mut pts, INDEX_TIP, INDEX_PIP);
        extend(&mut pts, MIDDLE_TIP, MIDDLE_PIP);
        extend(&mut pts, RING_TIP, RING_PIP);
        extend(&mut pts, PINKY_TIP, PINKY_PIP);
        assert_eq!(classify(&HandFrame::new(pts)), Some(Gesture::OpenHand));
    }

    #[test]
    fn open_hand_beats_pointing_regardless_of_direction() {
        let mut pts = fist();
        extend(&mut pts, INDEX_TIP, INDEX_PIP);
        extend(&mut pts, MIDDLE_TIP, MIDDLE_PIP);
        extend(&mut pts, RING_TIP, RING_PIP);
        extend(&mut pts, PINKY_TIP, PINKY_PIP);
        extend_thumb(&mut pts);
        // Index tip far from the wrist would otherwise read as a direction
        pts[INDEX_TIP] = Vec2::new(0.1, 0.2);
        assert_eq!(classify(&HandFrame::new(pts)), Some(Gesture::OpenHand));
    }

    #[test]
    fn index_only_points_somewhere() {
        let mut pts = fist();
        extend(&mut pts, INDEX_TIP, INDEX_PIP);
        let got = classify(&HandFrame::new(pts));
        assert!(matches!(
            got,
            Some(Gesture::Up | Gesture::Down | Gesture::Left | Gesture::Right)
        ));
    }

    #[test]
    fn index_up_is_up() {
        let mut pts = fist();
        extend(&mut pts, INDEX_TIP, INDEX_PIP);
        pts[INDEX_TIP] = Vec2::new(0.5, 0.3); // straight above the wrist
        assert_eq!(classify(&HandFrame::new(pts)), Some(Gesture::Up));
    }

    #[test]
    fn three_fingers_is_no_gesture() {
        let mut pts = fist();
        extend(&mut pts, INDEX_TIP, INDEX_PIP);
        extend(&mut pts, MIDDLE_TIP, MIDDLE_PIP);
        extend(&mut pts, RING_TIP, RING_PIP);
        assert_eq!(classify(&HandFrame::new(pts)), None);
    }

    #[test]
    fn curled_index_with_thumb_is_no_gesture() {
        let mut pts = fist();
        extend_thumb(&mut pts);
        assert_eq!(classify(&HandFrame::new(pts)), None);
    }

    #[test]
    fn direction_picks_dominant_axis() {
        let wrist = Vec2::new(0.5, 0.5);
        // Mirrored x: tip left of wrist in camera space reads as Right
        assert_eq!(pointing_direction(Vec2::new(0.3, 0.45), wrist), Gesture::Right);
        assert_eq!(pointing_direction(Vec2::new(0.7, 0.45), wrist), Gesture::Left);
        assert_eq!(pointing_direction(Vec2::new(0.52, 0.2), wrist), Gesture::Up);
        assert_eq!(pointing_direction(Vec2::new(0.52, 0.8), wrist), Gesture::Down);
    }

    #[test]
    fn direction_deadzone_tie_breaks_horizontal() {
        let wrist = Vec2::new(0.5, 0.5);
        assert_eq!(
            pointing_direction(Vec2::new(0.495, 0.505), wrist),
            Gesture::Right
        );
        assert_eq!(
            pointing_direction(Vec2::new(0.505, 0.505), wrist),
            Gesture::Left
        );
    }

    #[test]
    fn pointing_vector_is_unit_length() {
        let v = pointing_vector(Vec2::new(0.2, 0.3), Vec2::new(0.5, 0.5)).unwrap();
        assert!((v.dir.length() - 1.0).abs() < 1e-5);
        assert!(v.magnitude > POINTING_MIN_MAGNITUDE);
        // Mirrored x, raw y
        assert!(v.dir.x > 0.0);
        assert!(v.dir.y < 0.0);
    }

    #[test]
    fn pointing_vector_rejects_noise() {
        assert!(pointing_vector(Vec2::new(0.505, 0.505), Vec2::new(0.5, 0.5)).is_none());
        assert!(pointing_vector(Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.5)).is_none());
    }
}
