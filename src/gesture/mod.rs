//! Hand-gesture recognition
//!
//! Turns a stream of per-frame hand landmarks (from an external detector)
//! into two independent control signals:
//! - a debounced discrete gesture symbol for key-like input and menu actions
//! - a raw continuous pointing vector for analog movement
//!
//! This module has no dependency on the simulation; the driver decides what
//! each signal means in-game.

pub mod classify;
pub mod landmarks;
pub mod recognizer;

pub use classify::{classify, pointing_direction, pointing_vector, Gesture, PointingVector};
pub use landmarks::{HandFrame, LANDMARK_COUNT};
pub use recognizer::{GestureEvent, GestureRecognizer};
