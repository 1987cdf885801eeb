use super::super::domain::{InterviewStatus, PanelistAction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Warning,
    Success,
    Danger,
    Info,
    Muted,
    Unstyled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBadge {
    pub label: String,
    pub tone: BadgeTone,
}

impl StatusBadge {
    fn new(label: impl Into<String>, tone: BadgeTone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }
}

pub fn status_badge(status: &InterviewStatus) -> StatusBadge {
    match status {
        InterviewStatus::Pending => StatusBadge::new("Pending", BadgeTone::Warning),
        InterviewStatus::Confirmed => StatusBadge::new("Confirmed", BadgeTone::Success),
        InterviewStatus::Rejected => StatusBadge::new("Rejected", BadgeTone::Danger),
        InterviewStatus::Completed => StatusBadge::new("Completed", BadgeTone::Info),
        InterviewStatus::InProgress => StatusBadge::new("In Progress", BadgeTone::Info),
        InterviewStatus::Cancelled => StatusBadge::new("Cancelled", BadgeTone::Muted),
        InterviewStatus::Unspecified => StatusBadge::new("Unknown", BadgeTone::Unstyled),
        InterviewStatus::Unrecognized(raw) => StatusBadge::new(raw.clone(), BadgeTone::Unstyled),
    }
}

pub fn action_badge(action: &PanelistAction) -> StatusBadge {
    match action {
        PanelistAction::Pending => StatusBadge::new("Pending", BadgeTone::Warning),
        PanelistAction::Confirmed => StatusBadge::new("Confirmed", BadgeTone::Success),
        PanelistAction::Rejected => StatusBadge::new("Rejected", BadgeTone::Danger),
        PanelistAction::Completed => StatusBadge::new("Completed", BadgeTone::Info),
        PanelistAction::Transferred => StatusBadge::new("Transferred", BadgeTone::Muted),
        PanelistAction::Cancelled => StatusBadge::new("Cancelled", BadgeTone::Muted),
        PanelistAction::NoAction => StatusBadge::new("Awaiting Response", BadgeTone::Muted),
        PanelistAction::Unrecognized(raw) => StatusBadge::new(raw.clone(), BadgeTone::Unstyled),
    }
}
