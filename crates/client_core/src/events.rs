//! User-interface events the board reacts to, and the transient feedback it shows.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    PageLoaded,
    SignupSubmitted,
    RemoveClicked {
        activity: String,
        participant: String,
    },
}

impl BoardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BoardEvent::PageLoaded => "page_loaded",
            BoardEvent::SignupSubmitted => "signup_submitted",
            BoardEvent::RemoveClicked { .. } => "remove_clicked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Failed,
}

impl ActionOutcome {
    pub fn is_applied(self) -> bool {
        self == ActionOutcome::Applied
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn css_class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl UiMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }
}
