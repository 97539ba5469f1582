//! Notification events handed back from mutating actions.
//!
//! Each action produces at most one [`Notification`]. Delivery is the
//! caller's business (a toast, a log line, an HTTP body); nothing here
//! waits for acknowledgement.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Every notification the simulation can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    TransactionSubmitted,
    WorkConfirmed,
    WorkSubmitted,
    RevisionRequested,
    DisputeOpened,
    VoteCast,
    FormSubmitted,
    DownloadStarted,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransactionSubmitted => "transaction_submitted",
            Self::WorkConfirmed => "work_confirmed",
            Self::WorkSubmitted => "work_submitted",
            Self::RevisionRequested => "revision_requested",
            Self::DisputeOpened => "dispute_opened",
            Self::VoteCast => "vote_cast",
            Self::FormSubmitted => "form_submitted",
            Self::DownloadStarted => "download_started",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::TransactionSubmitted => "Transaction Submitted",
            Self::WorkConfirmed => "Work Confirmed",
            Self::WorkSubmitted => "Work Submitted",
            Self::RevisionRequested => "Revision Requested",
            Self::DisputeOpened => "Dispute Opened",
            Self::VoteCast => "Vote Cast!",
            Self::FormSubmitted => "Form Submitted!",
            Self::DownloadStarted => "Download Started",
        }
    }

    /// How long the toast stays on screen.
    pub fn duration_ms(&self) -> u64 {
        match self {
            Self::TransactionSubmitted | Self::DisputeOpened => 4_000,
            _ => 3_000,
        }
    }
}

/// `{title, description, durationMs}` consumed by a transient banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
    pub duration_ms: u64,
}

impl Notification {
    pub fn new(kind: NoticeKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            description: description.into(),
            duration_ms: kind.duration_ms(),
        }
    }
}

/// Log and hand back a notification.
pub(crate) fn emit(kind: NoticeKind, description: impl Into<String>) -> Option<Notification> {
    let notification = Notification::new(kind, description);
    info!(
        kind = notification.kind.as_str(),
        "{}: {}", notification.title, notification.description
    );
    Some(notification)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_follow_kind() {
        assert_eq!(NoticeKind::DisputeOpened.duration_ms(), 4_000);
        assert_eq!(NoticeKind::TransactionSubmitted.duration_ms(), 4_000);
        assert_eq!(NoticeKind::VoteCast.duration_ms(), 3_000);
    }

    #[test]
    fn new_fills_title_from_kind() {
        let n = Notification::new(NoticeKind::VoteCast, "Your vote has been recorded.");
        assert_eq!(n.title, "Vote Cast!");
        assert_eq!(n.duration_ms, 3_000);
        assert_eq!(n.description, "Your vote has been recorded.");
    }
}
