//! Translation of user intents into outbound commands

use tracing::{info, warn};

use super::time_input::{parse_custom_time, TimeInputError};
use crate::channel::{ChannelClient, Command};

/// Seconds added or removed by the arrow keys
pub const ADJUST_STEP_SECONDS: u32 = 10;

/// Anything that can carry a command to the peer
pub trait CommandSink {
    fn send_command(&self, command: Command);
}

impl CommandSink for ChannelClient {
    fn send_command(&self, command: Command) {
        ChannelClient::send_command(self, command)
    }
}

/// A ready-made duration that skips input parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub minutes: u32,
    pub seconds: u32,
}

impl Preset {
    pub fn minutes(minutes: u32) -> Self {
        Self { minutes, seconds: 0 }
    }
}

/// Emits commands through a sink. Only custom time entry is validated here.
#[derive(Debug, Clone)]
pub struct CommandEmitter<S> {
    sink: S,
}

impl<S: CommandSink> CommandEmitter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Send a command as-is
    pub fn emit(&self, command: Command) {
        info!(action = command.action(), "Sending command");
        self.sink.send_command(command);
    }

    pub fn start(&self) {
        self.emit(Command::Start);
    }

    pub fn stop(&self) {
        self.emit(Command::Stop);
    }

    pub fn reset(&self) {
        self.emit(Command::Reset);
    }

    pub fn add_time(&self, seconds: u32) {
        self.emit(Command::AddTime { seconds });
    }

    pub fn subtract_time(&self, seconds: u32) {
        self.emit(Command::SubtractTime { seconds });
    }

    pub fn set_time(&self, minutes: u32, seconds: u32) {
        self.emit(Command::SetTime { minutes, seconds });
    }

    pub fn get_status(&self) {
        self.emit(Command::GetStatus);
    }

    pub fn select_preset(&self, preset: Preset) {
        self.set_time(preset.minutes, preset.seconds);
    }

    /// Validate a user-entered `MM:SS` string and send it.
    ///
    /// Rejected input is never sent.
    pub fn submit_custom_time(&self, input: &str) -> Result<Command, TimeInputError> {
        let (minutes, seconds) = parse_custom_time(input).map_err(|e| {
            warn!(input, "Rejected custom time: {}", e);
            e
        })?;

        let command = Command::SetTime { minutes, seconds };
        self.emit(command.clone());
        Ok(command)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
