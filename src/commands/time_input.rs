//! Parsing of user-entered `MM:SS` times

use std::fmt;

pub const MAX_MINUTES: u32 = 99;
pub const MAX_SECONDS: u32 = 59;

/// Why a custom time entry was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeInputError {
    Format,
    MinutesOutOfRange,
    SecondsOutOfRange,
}

impl fmt::Display for TimeInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeInputError::Format => write!(f, "Invalid format. Please use MM:SS (e.g. 05:30)"),
            TimeInputError::MinutesOutOfRange => {
                write!(f, "Minutes must be between 0 and {}", MAX_MINUTES)
            }
            TimeInputError::SecondsOutOfRange => {
                write!(f, "Seconds must be between 0 and {}", MAX_SECONDS)
            }
        }
    }
}

impl std::error::Error for TimeInputError {}

/// Parse a `MM:SS` string into minutes and seconds
pub fn parse_custom_time(input: &str) -> Result<(u32, u32), TimeInputError> {
    let (minutes, seconds) = input
        .trim()
        .split_once(':')
        .ok_or(TimeInputError::Format)?;

    if !is_digits(minutes) || !is_digits(seconds) || seconds.len() > 2 {
        return Err(TimeInputError::Format);
    }

    // Any digit run too long for u32 is out of range anyway
    let minutes: u32 = minutes.parse().map_err(|_| TimeInputError::MinutesOutOfRange)?;
    let seconds: u32 = seconds.parse().map_err(|_| TimeInputError::SecondsOutOfRange)?;

    if minutes > MAX_MINUTES {
        return Err(TimeInputError::MinutesOutOfRange);
    }
    if seconds > MAX_SECONDS {
        return Err(TimeInputError::SecondsOutOfRange);
    }

    Ok((minutes, seconds))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
