//! Presentation mapping module
//!
//! Pure derivation of the visual intent from a timer snapshot.

pub mod intent;

pub use intent::{map_to_visual_intent, RingColor, StatusClass, VisualIntent, WARNING_THRESHOLD_SECONDS};
