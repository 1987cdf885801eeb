mod badges;
mod reasons;

pub use badges::{action_badge, status_badge, BadgeTone, StatusBadge};
pub use reasons::{resolve_disabled_reason, DisabledReason};

use super::domain::{InterviewRecord, InterviewStatus, PanelistAction};
use serde::{Deserialize, Serialize};

/// Button groups on the interview-details view that can be enabled or disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Confirm/reject, or accept/decline for invited viewers.
    Respond,
    Meeting,
    Transfer,
    Invite,
}

impl ActionKind {
    pub const fn ordered() -> [Self; 4] {
        [Self::Respond, Self::Meeting, Self::Transfer, Self::Invite]
    }
}

/// Flags consumed by the presentation layer. Recomputed from scratch on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedEligibility {
    pub is_cancelled: bool,
    pub is_invited: bool,
    pub is_meeting_enabled: bool,
    pub has_meeting_link: bool,
    pub is_transfer_allowed: bool,
    pub is_invite_allowed: bool,
    pub are_response_actions_allowed: bool,
}

impl DerivedEligibility {
    /// Whether the button group is usable. Joining additionally needs a link.
    pub fn allows(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Respond => self.are_response_actions_allowed,
            ActionKind::Meeting => self.is_meeting_enabled && self.has_meeting_link,
            ActionKind::Transfer => self.is_transfer_allowed,
            ActionKind::Invite => self.is_invite_allowed,
        }
    }
}

/// Derive every eligibility flag for the viewer of `record`.
///
/// Positive checks compare against known-good variants only, so
/// [`InterviewStatus::Unspecified`], [`InterviewStatus::Unrecognized`] and
/// [`PanelistAction::Unrecognized`] fail closed.
pub fn derive_eligibility(record: &InterviewRecord) -> DerivedEligibility {
    let is_cancelled = record.interview_status == InterviewStatus::Cancelled;
    let is_invited = record.is_invited;

    let is_meeting_enabled = record.interview_status == InterviewStatus::Confirmed
        && !is_cancelled
        && (!is_invited || record.my_action == PanelistAction::Confirmed);

    let has_meeting_link = record
        .meeting_link
        .as_deref()
        .map(|link| !link.trim().is_empty())
        .unwrap_or(false);

    let is_transfer_allowed = record.my_action == PanelistAction::Pending && !is_cancelled;

    let is_invite_allowed = is_meeting_enabled && !is_invited && record.may_invite_others();

    let are_response_actions_allowed = record.my_action.awaits_response() && !is_cancelled;

    DerivedEligibility {
        is_cancelled,
        is_invited,
        is_meeting_enabled,
        has_meeting_link,
        is_transfer_allowed,
        is_invite_allowed,
        are_response_actions_allowed,
    }
}
