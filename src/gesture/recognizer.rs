//! Gesture stabilization and edge detection
//!
//! Raw per-frame classifications flap when the hand is mid-pose, so a symbol
//! only counts once it fills an entire window of consecutive frames. The
//! recognizer reports the result of each frame as an explicit event instead
//! of firing callbacks; the caller owns dispatch.

use std::collections::VecDeque;

use super::classify::{classify, pointing_vector, Gesture, PointingVector};
use super::landmarks::HandFrame;

/// Outcome of observing one detector frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The confirmed symbol changed this frame. `None` means the previously
    /// held symbol was released (window broke or hand left the view).
    Transition(Option<Gesture>),
    /// The confirmed symbol is unchanged and still held.
    Held(Gesture),
    /// Nothing confirmed and nothing was held.
    Idle,
}

/// Debounces raw classifications into confirmed gestures and tracks the
/// continuous pointing vector alongside.
///
/// The two signals deliberately differ in latency: the discrete symbol waits
/// out the stability window, while the pointing vector updates on every
/// frame a hand is present and is cleared the instant it is not.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    stability_frames: usize,
    history: VecDeque<Option<Gesture>>,
    current: Option<Gesture>,
    pointing: Option<PointingVector>,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_STABILITY_FRAMES)
    }
}

impl GestureRecognizer {
    pub fn new(stability_frames: usize) -> Self {
        let stability_frames = stability_frames.max(1);
        Self {
            stability_frames,
            history: VecDeque::with_capacity(stability_frames),
            current: None,
            pointing: None,
        }
    }

    /// Feed one detector frame; `None` means no hand was detected.
    pub fn observe(&mut self, frame: Option<&HandFrame>) -> GestureEvent {
        let Some(frame) = frame else {
            return self.observe_hand_lost();
        };

        self.pointing = pointing_vector(frame.index_tip(), frame.wrist());

        self.history.push_back(classify(frame));
        if self.history.len() > self.stability_frames {
            self.history.pop_front();
        }

        let stable = self.stable_gesture();
        if stable != self.current {
            self.current = stable;
            GestureEvent::Transition(stable)
        } else {
            match self.current {
                Some(held) => GestureEvent::Held(held),
                None => GestureEvent::Idle,
            }
        }
    }

    /// Hand absent: drop the window and the vector immediately, no
    /// debouncing on loss.
    fn observe_hand_lost(&mut self) -> GestureEvent {
        self.history.clear();
        self.pointing = None;
        if self.current.is_some() {
            self.current = None;
            GestureEvent::Transition(None)
        } else {
            GestureEvent::Idle
        }
    }

    /// The symbol filling the whole window, if any.
    fn stable_gesture(&self) -> Option<Gesture> {
        if self.history.len() < self.stability_frames {
            return None;
        }
        let last = *self.history.back()?;
        if self.history.iter().all(|&g| g == last) {
            last
        } else {
            None
        }
    }

    /// The currently confirmed symbol, if any.
    pub fn current(&self) -> Option<Gesture> {
        self.current
    }

    /// Latest raw pointing vector; `None` when no hand or below the noise
    /// floor.
    pub fn pointing(&self) -> Option<PointingVector> {
        self.pointing
    }

    /// Forget everything without emitting. Called when the camera/detector
    /// stops so stale input cannot leak into ticks after a restart.
    pub fn reset(&mut self) {
        self.history.clear();
        self.current = None;
        self.pointing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmarks::{
        INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP,
        RING_PIP, RING_TIP, THUMB_IP, THUMB_TIP, WRIST,
    };
    use glam::Vec2;

    fn pointing_up_frame() -> HandFrame {
        let mut pts = [Vec2::new(0.5, 0.6); LANDMARK_COUNT];
        pts[WRIST] = Vec2::new(0.5, 0.8);
        for (tip, pip) in [
            (MIDDLE_TIP, MIDDLE_PIP),
            (RING_TIP, RING_PIP),
            (PINKY_TIP, PINKY_PIP),
        ] {
            pts[pip] = Vec2::new(0.5, 0.55);
            pts[tip] = Vec2::new(0.5, 0.6);
        }
        pts[THUMB_IP] = Vec2::new(0.45, 0.6);
        pts[THUMB_TIP] = Vec2::new(0.45, 0.58);
        pts[INDEX_PIP] = Vec2::new(0.5, 0.55);
        pts[INDEX_TIP] = Vec2::new(0.5, 0.3);
        HandFrame::new(pts)
    }

    fn open_hand_frame() -> HandFrame {
        let mut pts = [Vec2::new(0.5, 0.6); LANDMARK_COUNT];
        pts[WRIST] = Vec2::new(0.5, 0.8);
        for (tip, pip) in [
            (INDEX_TIP, INDEX_PIP),
            (MIDDLE_TIP, MIDDLE_PIP),
            (RING_TIP, RING_PIP),
            (PINKY_TIP, PINKY_PIP),
        ] {
            pts[pip] = Vec2::new(0.5, 0.55);
            pts[tip] = Vec2::new(0.5, 0.4);
        }
        pts[THUMB_IP] = Vec2::new(0.45, 0.6);
        pts[THUMB_TIP] = Vec2::new(0.3, 0.6);
        HandFrame::new(pts)
    }

    #[test]
    fn full_window_confirms_exactly_once() {
        let mut rec = GestureRecognizer::new(3);
        let frame = pointing_up_frame();

        assert_eq!(rec.observe(Some(&frame)), GestureEvent::Idle);
        assert_eq!(rec.observe(Some(&frame)), GestureEvent::Idle);
        assert_eq!(
            rec.observe(Some(&frame)),
            GestureEvent::Transition(Some(Gesture::Up))
        );
        // Held, not re-fired
        assert_eq!(rec.observe(Some(&frame)), GestureEvent::Held(Gesture::Up));
        assert_eq!(rec.current(), Some(Gesture::Up));
    }

    #[test]
    fn broken_window_never_confirms() {
        let mut rec = GestureRecognizer::new(3);
        assert_eq!(rec.observe(Some(&pointing_up_frame())), GestureEvent::Idle);
        assert_eq!(rec.observe(Some(&pointing_up_frame())), GestureEvent::Idle);
        // Third frame differs: no transition ever fires for Up
        assert_eq!(rec.observe(Some(&open_hand_frame())), GestureEvent::Idle);
        assert_eq!(rec.current(), None);
    }

    #[test]
    fn symbol_change_releases_then_confirms() {
        let mut rec = GestureRecognizer::new(2);
        let up = pointing_up_frame();
        let open = open_hand_frame();

        rec.observe(Some(&up));
        assert_eq!(rec.observe(Some(&up)), GestureEvent::Transition(Some(Gesture::Up)));
        // Mixed window drops the held symbol...
        assert_eq!(rec.observe(Some(&open)), GestureEvent::Transition(None));
        // ...and a uniform window of the new symbol confirms it
        assert_eq!(
            rec.observe(Some(&open)),
            GestureEvent::Transition(Some(Gesture::OpenHand))
        );
    }

    #[test]
    fn hand_loss_clears_immediately_even_mid_window() {
        let mut rec = GestureRecognizer::new(2);
        let up = pointing_up_frame();
        rec.observe(Some(&up));
        rec.observe(Some(&up));
        assert_eq!(rec.current(), Some(Gesture::Up));
        assert!(rec.pointing().is_some());

        assert_eq!(rec.observe(None), GestureEvent::Transition(None));
        assert_eq!(rec.current(), None);
        assert!(rec.pointing().is_none());

        // Window restarts from scratch: one frame is not enough again
        assert_eq!(rec.observe(Some(&up)), GestureEvent::Idle);
    }

    #[test]
    fn hand_loss_with_nothing_held_is_idle() {
        let mut rec = GestureRecognizer::new(2);
        assert_eq!(rec.observe(None), GestureEvent::Idle);
        rec.observe(Some(&pointing_up_frame()));
        // Held nothing yet, so loss stays silent
        assert_eq!(rec.observe(None), GestureEvent::Idle);
    }

    #[test]
    fn pointing_vector_updates_every_frame_without_debounce() {
        let mut rec = GestureRecognizer::new(3);
        // First frame: no confirmed gesture yet, but the vector is live
        rec.observe(Some(&pointing_up_frame()));
        let v = rec.pointing().unwrap();
        assert!(v.dir.y < 0.0);
        assert_eq!(rec.current(), None);
    }

    #[test]
    fn reset_clears_without_event() {
        let mut rec = GestureRecognizer::new(2);
        let up = pointing_up_frame();
        rec.observe(Some(&up));
        rec.observe(Some(&up));
        rec.reset();
        assert_eq!(rec.current(), None);
        assert!(rec.pointing().is_none());
        // No phantom release on the next hand-absent frame
        assert_eq!(rec.observe(None), GestureEvent::Idle);
    }
}
