use super::super::domain::{InterviewRecord, PanelistAction};
use super::{ActionKind, DerivedEligibility};
use serde::{Deserialize, Serialize};

/// Explanation for a disabled button, surfaced as tooltip or help text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DisabledReason {
    Cancelled,
    NoMeetingLink,
    InvitationNotAccepted,
    MeetingAwaitingConfirmation,
    TransferAfterResponse,
    AlreadyInvited { invited_by: Option<String> },
    InviteAwaitingConfirmation,
    InvitingNotPermitted,
    AlreadyResponded { action: String },
    ResponseStateUnavailable,
}

impl DisabledReason {
    pub const fn code(&self) -> &'static str {
        match self {
            DisabledReason::Cancelled => "cancelled",
            DisabledReason::NoMeetingLink => "no_meeting_link",
            DisabledReason::InvitationNotAccepted => "invitation_not_accepted",
            DisabledReason::MeetingAwaitingConfirmation => "meeting_awaiting_confirmation",
            DisabledReason::TransferAfterResponse => "transfer_after_response",
            DisabledReason::AlreadyInvited { .. } => "already_invited",
            DisabledReason::InviteAwaitingConfirmation => "invite_awaiting_confirmation",
            DisabledReason::InvitingNotPermitted => "inviting_not_permitted",
            DisabledReason::AlreadyResponded { .. } => "already_responded",
            DisabledReason::ResponseStateUnavailable => "response_state_unavailable",
        }
    }

    pub fn message(&self) -> String {
        match self {
            DisabledReason::Cancelled => "interview cancelled, no actions available".to_string(),
            DisabledReason::NoMeetingLink => "no meeting link".to_string(),
            DisabledReason::InvitationNotAccepted => "must accept invitation first".to_string(),
            DisabledReason::MeetingAwaitingConfirmation => {
                "meeting available only once interview is confirmed".to_string()
            }
            DisabledReason::TransferAfterResponse => {
                "transfer only available while your response is still pending".to_string()
            }
            DisabledReason::AlreadyInvited {
                invited_by: Some(inviter),
            } => format!("already invited by {inviter}"),
            DisabledReason::AlreadyInvited { invited_by: None } => "already invited".to_string(),
            DisabledReason::InviteAwaitingConfirmation => {
                "invites available once interview is confirmed".to_string()
            }
            DisabledReason::InvitingNotPermitted => {
                "inviting other interviewers is not permitted".to_string()
            }
            DisabledReason::AlreadyResponded { action } => {
                format!("already responded ({action})")
            }
            DisabledReason::ResponseStateUnavailable => "response state unavailable".to_string(),
        }
    }
}

impl std::fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Explain why `kind` is unavailable, or `None` when it is available.
///
/// Cancellation outranks every other reason. The result never feeds back into
/// eligibility.
pub fn resolve_disabled_reason(
    kind: ActionKind,
    record: &InterviewRecord,
    eligibility: &DerivedEligibility,
) -> Option<DisabledReason> {
    if eligibility.allows(kind) {
        return None;
    }

    if eligibility.is_cancelled {
        return Some(DisabledReason::Cancelled);
    }

    let reason = match kind {
        ActionKind::Meeting => {
            if !eligibility.has_meeting_link {
                DisabledReason::NoMeetingLink
            } else if eligibility.is_invited && record.my_action != PanelistAction::Confirmed {
                DisabledReason::InvitationNotAccepted
            } else {
                DisabledReason::MeetingAwaitingConfirmation
            }
        }
        ActionKind::Transfer => DisabledReason::TransferAfterResponse,
        ActionKind::Invite => {
            if eligibility.is_invited {
                DisabledReason::AlreadyInvited {
                    invited_by: record.invited_by.clone(),
                }
            } else if !eligibility.is_meeting_enabled {
                DisabledReason::InviteAwaitingConfirmation
            } else {
                DisabledReason::InvitingNotPermitted
            }
        }
        ActionKind::Respond => match &record.my_action {
            PanelistAction::Unrecognized(_) => DisabledReason::ResponseStateUnavailable,
            other => DisabledReason::AlreadyResponded {
                action: other.label().to_string(),
            },
        },
    };

    Some(reason)
}
