//! Wire messages exchanged with the peer
//!
//! Every frame is a JSON text envelope `{"event": ..., "data": ...}`.

use serde::{Deserialize, Serialize};

use crate::state::TimerState;

/// Control command sent upstream; the peer decides whether it is legal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    Start,
    Stop,
    Reset,
    AddTime { seconds: u32 },
    SubtractTime { seconds: u32 },
    SetTime { minutes: u32, seconds: u32 },
    GetStatus,
}

impl Command {
    /// Action name as it appears on the wire
    pub fn action(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Reset => "reset",
            Command::AddTime { .. } => "addTime",
            Command::SubtractTime { .. } => "subtractTime",
            Command::SetTime { .. } => "setTime",
            Command::GetStatus => "getStatus",
        }
    }
}

/// Payload of a peer-reported error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerError {
    pub message: String,
}

/// Events pushed by the peer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    TimerUpdate(TimerState),
    Error(PeerError),
}

/// Events sent to the peer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    Command(Command),
}

impl ServerEvent {
    pub fn decode(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

impl ClientEvent {
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use crate::state::TimerStatus;

    fn encoded(command: Command) -> Value {
        let raw = ClientEvent::Command(command).encode().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_command_envelopes() {
        assert_eq!(
            encoded(Command::Start),
            json!({"event": "command", "data": {"action": "start"}})
        );
        assert_eq!(
            encoded(Command::GetStatus),
            json!({"event": "command", "data": {"action": "getStatus"}})
        );
        assert_eq!(
            encoded(Command::AddTime { seconds: 10 }),
            json!({"event": "command", "data": {"action": "addTime", "seconds": 10}})
        );
        assert_eq!(
            encoded(Command::SubtractTime { seconds: 10 }),
            json!({"event": "command", "data": {"action": "subtractTime", "seconds": 10}})
        );
        assert_eq!(
            encoded(Command::SetTime { minutes: 2, seconds: 30 }),
            json!({"event": "command", "data": {"action": "setTime", "minutes": 2, "seconds": 30}})
        );
    }

    #[test]
    fn test_action_names_match_wire() {
        for command in [
            Command::Start,
            Command::Stop,
            Command::Reset,
            Command::AddTime { seconds: 1 },
            Command::SubtractTime { seconds: 1 },
            Command::SetTime { minutes: 1, seconds: 1 },
            Command::GetStatus,
        ] {
            let action = command.action();
            assert_eq!(encoded(command)["data"]["action"], action);
        }
    }

    #[test]
    fn test_decode_timer_update() {
        let raw = r#"{"event":"timer_update","data":{"status":"RUNNING","remainingSeconds":42,"initialSeconds":60,"display":"00:42","progress":70.0}}"#;
        match ServerEvent::decode(raw).unwrap() {
            ServerEvent::TimerUpdate(state) => {
                assert_eq!(state.status, TimerStatus::Running);
                assert_eq!(state.remaining_seconds, 42);
                assert_eq!(state.display, "00:42");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_decode_error() {
        let raw = r#"{"event":"error","data":{"message":"timer already finished"}}"#;
        assert_eq!(
            ServerEvent::decode(raw).unwrap(),
            ServerEvent::Error(PeerError { message: "timer already finished".to_string() })
        );
    }

    #[test]
    fn test_unknown_event_fails_to_decode() {
        assert!(ServerEvent::decode(r#"{"event":"hello","data":{}}"#).is_err());
        assert!(ServerEvent::decode("not json").is_err());
    }
}
