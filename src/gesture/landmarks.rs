//! Hand-landmark input contract
//!
//! The external detector delivers 21 ordered 2D points per detected hand,
//! in normalized [0,1] camera space, indices fixed by the MediaPipe
//! convention. The classifier only ever reads a handful of them.

use glam::Vec2;

/// Points per hand delivered by the detector
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// One frame of hand landmarks.
///
/// Construction validates the point count: a wrong-length array is a
/// contract violation by the detector, so debug builds assert while release
/// builds degrade to "no hand this frame".
#[derive(Debug, Clone, Copy)]
pub struct HandFrame {
    points: [Vec2; LANDMARK_COUNT],
}

impl HandFrame {
    pub fn new(points: [Vec2; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build a frame from a detector-provided slice.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        debug_assert!(
            points.len() == LANDMARK_COUNT,
            "detector delivered {} landmarks, expected {}",
            points.len(),
            LANDMARK_COUNT
        );
        if points.len() != LANDMARK_COUNT {
            log::warn!(
                "ignoring malformed hand frame ({} landmarks)",
                points.len()
            );
            return None;
        }
        let mut arr = [Vec2::ZERO; LANDMARK_COUNT];
        arr.copy_from_slice(points);
        Some(Self { points: arr })
    }

    /// Build a frame from a flat `[x0, y0, x1, y1, ...]` buffer, the shape
    /// the JS detector callback hands across the wasm boundary.
    pub fn from_flat(coords: &[f32]) -> Option<Self> {
        debug_assert!(
            coords.len() == LANDMARK_COUNT * 2,
            "detector delivered {} coords, expected {}",
            coords.len(),
            LANDMARK_COUNT * 2
        );
        if coords.len() != LANDMARK_COUNT * 2 {
            log::warn!("ignoring malformed hand frame ({} coords)", coords.len());
            return None;
        }
        let mut arr = [Vec2::ZERO; LANDMARK_COUNT];
        for (i, p) in arr.iter_mut().enumerate() {
            *p = Vec2::new(coords[2 * i], coords[2 * i + 1]);
        }
        Some(Self { points: arr })
    }

    #[inline]
    pub fn point(&self, index: usize) -> Vec2 {
        self.points[index]
    }

    #[inline]
    pub fn wrist(&self) -> Vec2 {
        self.points[WRIST]
    }

    #[inline]
    pub fn index_tip(&self) -> Vec2 {
        self.points[INDEX_TIP]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_accepts_full_hand() {
        let pts = vec![Vec2::new(0.5, 0.5); LANDMARK_COUNT];
        assert!(HandFrame::from_points(&pts).is_some());
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn from_points_rejects_short_hand() {
        let pts = vec![Vec2::new(0.5, 0.5); 5];
        assert!(HandFrame::from_points(&pts).is_none());
    }

    #[test]
    fn from_flat_round_trips_coordinates() {
        let mut coords = vec![0.0; LANDMARK_COUNT * 2];
        coords[2 * INDEX_TIP] = 0.25;
        coords[2 * INDEX_TIP + 1] = 0.75;
        let frame = HandFrame::from_flat(&coords).unwrap();
        assert_eq!(frame.index_tip(), Vec2::new(0.25, 0.75));
    }
}
