use serde::{Deserialize, Serialize};

use super::domain::InterviewRecord;
use super::eligibility::{resolve_disabled_reason, ActionKind, DerivedEligibility, DisabledReason};

/// Command requested from the interview-details view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Confirm,
    Reject,
    AcceptInvitation,
    DeclineInvitation,
    Transfer,
    Invite,
    JoinMeeting,
}

impl CommandKind {
    pub const fn label(self) -> &'static str {
        match self {
            CommandKind::Confirm => "confirm",
            CommandKind::Reject => "reject",
            CommandKind::AcceptInvitation => "accept_invitation",
            CommandKind::DeclineInvitation => "decline_invitation",
            CommandKind::Transfer => "transfer",
            CommandKind::Invite => "invite",
            CommandKind::JoinMeeting => "join_meeting",
        }
    }

    /// Button group whose eligibility flag gates this command.
    pub const fn action(self) -> ActionKind {
        match self {
            CommandKind::Confirm
            | CommandKind::Reject
            | CommandKind::AcceptInvitation
            | CommandKind::DeclineInvitation => ActionKind::Respond,
            CommandKind::Transfer => ActionKind::Transfer,
            CommandKind::Invite => ActionKind::Invite,
            CommandKind::JoinMeeting => ActionKind::Meeting,
        }
    }

    /// Commands the viewer would see for a record, in button order.
    pub fn for_viewer(is_invited: bool) -> Vec<Self> {
        let mut kinds = if is_invited {
            vec![CommandKind::AcceptInvitation, CommandKind::DeclineInvitation]
        } else {
            vec![CommandKind::Confirm, CommandKind::Reject]
        };
        kinds.extend([
            CommandKind::Transfer,
            CommandKind::Invite,
            CommandKind::JoinMeeting,
        ]);
        kinds
    }
}

/// Remote endpoint a command resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceOperation {
    ConfirmInterview,
    RejectInterview,
    AcceptInvitation,
    DeclineInvitation,
    TransferInterview,
    InviteInterviewer,
    JoinMeeting,
}

impl ServiceOperation {
    pub const fn label(self) -> &'static str {
        match self {
            ServiceOperation::ConfirmInterview => "confirm_interview",
            ServiceOperation::RejectInterview => "reject_interview",
            ServiceOperation::AcceptInvitation => "accept_invitation",
            ServiceOperation::DeclineInvitation => "decline_invitation",
            ServiceOperation::TransferInterview => "transfer_interview",
            ServiceOperation::InviteInterviewer => "invite_interviewer",
            ServiceOperation::JoinMeeting => "join_meeting",
        }
    }

    /// Operations that change the record and therefore require a re-fetch.
    pub const fn mutates_record(self) -> bool {
        !matches!(self, ServiceOperation::JoinMeeting)
    }
}

impl std::fmt::Display for ServiceOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The one place that decides which backend call a response button issues.
///
/// Invited viewers accept/decline, assigned panelists confirm/reject; the choice
/// depends only on `is_invited`.
pub fn map_command(kind: CommandKind, is_invited: bool) -> ServiceOperation {
    match (kind, is_invited) {
        (CommandKind::Confirm | CommandKind::AcceptInvitation, true) => {
            ServiceOperation::AcceptInvitation
        }
        (CommandKind::Confirm | CommandKind::AcceptInvitation, false) => {
            ServiceOperation::ConfirmInterview
        }
        (CommandKind::Reject | CommandKind::DeclineInvitation, true) => {
            ServiceOperation::DeclineInvitation
        }
        (CommandKind::Reject | CommandKind::DeclineInvitation, false) => {
            ServiceOperation::RejectInterview
        }
        (CommandKind::Transfer, _) => ServiceOperation::TransferInterview,
        (CommandKind::Invite, _) => ServiceOperation::InviteInterviewer,
        (CommandKind::JoinMeeting, _) => ServiceOperation::JoinMeeting,
    }
}

/// Precondition failure raised before any remote call is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDenied {
    pub command: CommandKind,
    pub reason: DisabledReason,
}

impl std::fmt::Display for CommandDenied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not allowed: {}", self.command.label(), self.reason)
    }
}

impl std::error::Error for CommandDenied {}

/// Gate `kind` against the derived flags and pick the backend operation.
pub fn authorize_command(
    kind: CommandKind,
    record: &InterviewRecord,
    eligibility: &DerivedEligibility,
) -> Result<ServiceOperation, CommandDenied> {
    match resolve_disabled_reason(kind.action(), record, eligibility) {
        None => Ok(map_command(kind, eligibility.is_invited)),
        Some(reason) => Err(CommandDenied {
            command: kind,
            reason,
        }),
    }
}

/// Command payload accepted by the service and the HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum InterviewCommand {
    Confirm,
    Reject {
        #[serde(default)]
        reason: Option<String>,
    },
    AcceptInvitation,
    DeclineInvitation {
        #[serde(default)]
        reason: Option<String>,
    },
    Transfer {
        to_interviewer: String,
        #[serde(default)]
        reason: Option<String>,
    },
    Invite {
        email: String,
        #[serde(default)]
        name: Option<String>,
    },
    JoinMeeting,
}

impl InterviewCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            InterviewCommand::Confirm => CommandKind::Confirm,
            InterviewCommand::Reject { .. } => CommandKind::Reject,
            InterviewCommand::AcceptInvitation => CommandKind::AcceptInvitation,
            InterviewCommand::DeclineInvitation { .. } => CommandKind::DeclineInvitation,
            InterviewCommand::Transfer { .. } => CommandKind::Transfer,
            InterviewCommand::Invite { .. } => CommandKind::Invite,
            InterviewCommand::JoinMeeting => CommandKind::JoinMeeting,
        }
    }

    /// Reject malformed payloads before touching the gateway.
    pub fn validate(&self) -> Result<(), InvalidCommand> {
        match self {
            InterviewCommand::Transfer { to_interviewer, .. } if to_interviewer.trim().is_empty() => {
                Err(InvalidCommand::MissingTransferTarget)
            }
            InterviewCommand::Invite { email, .. } if !looks_like_email(email) => {
                Err(InvalidCommand::InvalidInviteeEmail(email.clone()))
            }
            _ => Ok(()),
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCommand {
    #[error("transfer requires a target interviewer")]
    MissingTransferTarget,
    #[error("invitee email '{0}' is not a valid address")]
    InvalidInviteeEmail(String),
}
