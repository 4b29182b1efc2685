use serde::{Deserialize, Serialize};

/// Body returned by successful signup and unregister calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Query string shared by the signup and unregister endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantQuery {
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantAction {
    Signup,
    Unregister,
}

impl ParticipantAction {
    pub fn path_segment(self) -> &'static str {
        match self {
            ParticipantAction::Signup => "signup",
            ParticipantAction::Unregister => "unregister",
        }
    }
}
