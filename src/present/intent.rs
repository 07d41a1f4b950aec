//! Mapping from timer state to what should be drawn

use crate::state::{TimerState, TimerStatus};

/// Remaining seconds at or below which a running timer is shown as a warning
pub const WARNING_THRESHOLD_SECONDS: u64 = 10;

/// Mutually exclusive status presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    Running,
    Paused,
    Warning,
    Finished,
}

impl StatusClass {
    pub const ALL: [StatusClass; 4] = [
        StatusClass::Running,
        StatusClass::Paused,
        StatusClass::Warning,
        StatusClass::Finished,
    ];

    /// Class name applied to the document
    pub fn as_str(self) -> &'static str {
        match self {
            StatusClass::Running => "running",
            StatusClass::Paused => "paused",
            StatusClass::Warning => "warning",
            StatusClass::Finished => "finished",
        }
    }
}

/// Ring palette keyed by status class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingColor {
    Green,
    Orange,
    Red,
    White,
}

impl RingColor {
    /// RGB components of the palette entry
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            RingColor::Green => (0x4c, 0xaf, 0x50),
            RingColor::Orange => (0xff, 0x98, 0x00),
            RingColor::Red => (0xf4, 0x43, 0x36),
            RingColor::White => (0xff, 0xff, 0xff),
        }
    }
}

/// Derived description of the current frame. Recomputed, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualIntent {
    pub text: String,
    pub status_label: &'static str,
    pub status_class: StatusClass,
    pub flash_text: bool,
    pub ring_color: RingColor,
    pub ring_fraction: f64,
}

/// Human-readable label for a status
pub fn status_label(status: TimerStatus) -> &'static str {
    match status {
        TimerStatus::Running => "Running",
        TimerStatus::Paused => "Paused",
        TimerStatus::Finished => "Time's up!",
    }
}

/// Map a timer snapshot to its visual intent.
///
/// Branches are checked in priority order and the first match wins:
/// finished, running inside the warning window, running, anything else.
pub fn map_to_visual_intent(state: &TimerState) -> VisualIntent {
    let (status_class, ring_color) = match state.status {
        TimerStatus::Finished => (StatusClass::Finished, RingColor::Red),
        TimerStatus::Running
            if state.remaining_seconds > 0
                && state.remaining_seconds <= WARNING_THRESHOLD_SECONDS =>
        {
            (StatusClass::Warning, RingColor::Orange)
        }
        TimerStatus::Running if state.remaining_seconds > 0 => {
            (StatusClass::Running, RingColor::Green)
        }
        // Paused, or running at zero before the peer reports it finished
        _ => (StatusClass::Paused, RingColor::White),
    };

    VisualIntent {
        text: state.display.clone(),
        status_label: status_label(state.status),
        status_class,
        flash_text: status_class == StatusClass::Finished,
        ring_color,
        ring_fraction: ring_fraction(state.progress),
    }
}

/// Convert a percentage into a fill fraction in [0, 1]
pub fn ring_fraction(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    (progress / 100.0).clamp(0.0, 1.0)
}
