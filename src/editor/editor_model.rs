use serde::Serialize;

/// Lifecycle of one authoring cycle.
///
/// `Idle` is both the initial state and the state after a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EditorPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

pub const SAVED_MESSAGE: &str = "Form saved successfully";

/// How overlapping Generate requests are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratePolicy {
    /// Every completion is applied; whichever resolves last wins.
    #[default]
    LastResponseWins,
    /// Completions of anything but the most recently issued request are dropped.
    LatestRequestOnly,
}

/// Issued by `begin_generate`, redeemed by `finish_generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateTicket {
    pub id: u64,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    Applied,
    Failed,
    /// Stale completion ignored under `LatestRequestOnly`.
    Discarded,
}
