use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::commands::{
    authorize_command, CommandDenied, CommandKind, InterviewCommand, InvalidCommand,
    ServiceOperation,
};
use super::domain::{InterviewId, InterviewRecord};
use super::eligibility::{
    action_badge, derive_eligibility, resolve_disabled_reason, status_badge, ActionKind,
    DerivedEligibility, StatusBadge,
};
use super::feedback::FeedbackSummary;
use super::gateway::{GatewayError, InterviewGateway, InviteRequest, MeetingSession, TransferRequest};
use super::normalizer::normalize_record;

/// Service composing the gateway, the eligibility engine, and the command gate.
pub struct InterviewActionService<G> {
    gateway: Arc<G>,
    in_flight: InFlightRegistry,
}

impl<G> InterviewActionService<G>
where
    G: InterviewGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            in_flight: InFlightRegistry::default(),
        }
    }

    /// Load the record and derive everything the details view renders.
    pub fn details(&self, id: &InterviewId) -> Result<InterviewDetails, InterviewServiceError> {
        let record = self.load(id)?;
        Ok(InterviewDetails::from_record(record))
    }

    /// Gate and dispatch a single command, then re-derive from a fresh fetch.
    pub fn execute(
        &self,
        id: &InterviewId,
        command: InterviewCommand,
    ) -> Result<CommandOutcome, InterviewServiceError> {
        command.validate()?;
        let kind = command.kind();

        let _ticket = self
            .in_flight
            .acquire(id)
            .ok_or_else(|| InterviewServiceError::Busy(id.clone()))?;

        let record = self.load(id)?;
        let eligibility = derive_eligibility(&record);
        let operation = match authorize_command(kind, &record, &eligibility) {
            Ok(operation) => operation,
            Err(denied) => {
                info!(
                    interview_id = %id,
                    command = kind.label(),
                    reason = denied.reason.code(),
                    "command denied"
                );
                return Err(denied.into());
            }
        };

        debug!(
            interview_id = %id,
            command = kind.label(),
            operation = operation.label(),
            "dispatching interview command"
        );

        let meeting = self.dispatch(id, operation, command).map_err(|err| {
            warn!(
                interview_id = %id,
                operation = operation.label(),
                error = %err,
                "interview service call failed"
            );
            err
        })?;

        let record = if operation.mutates_record() {
            self.refresh(id, operation)?
        } else {
            record
        };
        let eligibility = derive_eligibility(&record);

        Ok(CommandOutcome {
            interview_id: id.clone(),
            command: kind,
            operation,
            record,
            eligibility,
            meeting,
        })
    }

    fn load(&self, id: &InterviewId) -> Result<InterviewRecord, InterviewServiceError> {
        let raw = self.gateway.fetch(id)?.ok_or(GatewayError::NotFound)?;
        Ok(normalize_record(raw))
    }

    /// Re-read after a successful mutation. A record that vanished was still changed.
    fn refresh(
        &self,
        id: &InterviewId,
        operation: ServiceOperation,
    ) -> Result<InterviewRecord, InterviewServiceError> {
        match self.gateway.fetch(id)? {
            Some(raw) => Ok(normalize_record(raw)),
            None => {
                info!(
                    interview_id = %id,
                    operation = operation.label(),
                    "interview no longer visible after command"
                );
                Err(InterviewServiceError::Withdrawn {
                    id: id.clone(),
                    operation,
                })
            }
        }
    }

    fn dispatch(
        &self,
        id: &InterviewId,
        operation: ServiceOperation,
        command: InterviewCommand,
    ) -> Result<Option<MeetingSession>, GatewayError> {
        let reason = match &command {
            InterviewCommand::Reject { reason } | InterviewCommand::DeclineInvitation { reason } => {
                reason.clone()
            }
            _ => None,
        };

        match operation {
            ServiceOperation::ConfirmInterview => self.gateway.confirm_interview(id)?,
            ServiceOperation::AcceptInvitation => self.gateway.accept_invitation(id)?,
            ServiceOperation::RejectInterview => {
                self.gateway.reject_interview(id, reason.as_deref())?
            }
            ServiceOperation::DeclineInvitation => {
                self.gateway.decline_invitation(id, reason.as_deref())?
            }
            ServiceOperation::TransferInterview => {
                if let InterviewCommand::Transfer {
                    to_interviewer,
                    reason,
                } = command
                {
                    let request = TransferRequest {
                        to_interviewer: to_interviewer.trim().to_string(),
                        reason,
                    };
                    self.gateway.transfer_interview(id, &request)?;
                }
            }
            ServiceOperation::InviteInterviewer => {
                if let InterviewCommand::Invite { email, name } = command {
                    let request = InviteRequest {
                        email: email.trim().to_string(),
                        name,
                    };
                    self.gateway.invite_interviewer(id, &request)?;
                }
            }
            ServiceOperation::JoinMeeting => {
                return self.gateway.join_meeting(id).map(Some);
            }
        }

        Ok(None)
    }
}

/// Tracks interviews with a command in flight so a second one is refused.
#[derive(Debug, Default)]
pub(crate) struct InFlightRegistry {
    active: Arc<Mutex<HashSet<InterviewId>>>,
}

impl InFlightRegistry {
    pub(crate) fn acquire(&self, id: &InterviewId) -> Option<InFlightTicket> {
        let mut guard = match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !guard.insert(id.clone()) {
            return None;
        }
        Some(InFlightTicket {
            active: Arc::clone(&self.active),
            id: id.clone(),
        })
    }
}

/// Releases the interview when dropped.
#[derive(Debug)]
pub(crate) struct InFlightTicket {
    active: Arc<Mutex<HashSet<InterviewId>>>,
    id: InterviewId,
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        let mut guard = match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.remove(&self.id);
    }
}

/// Result of a dispatched command, re-derived from the refreshed record.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    pub interview_id: InterviewId,
    pub command: CommandKind,
    pub operation: ServiceOperation,
    pub record: InterviewRecord,
    pub eligibility: DerivedEligibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting: Option<MeetingSession>,
}

/// Explanation attached to a disabled button group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisabledActionView {
    pub code: &'static str,
    pub message: String,
}

/// Attendee row on the details page.
#[derive(Debug, Clone, Serialize)]
pub struct AttendeeView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub badge: StatusBadge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Everything the interview-details view needs, derived in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewDetails {
    pub interview_id: InterviewId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: StatusBadge,
    pub my_action: StatusBadge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invited_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    pub eligibility: DerivedEligibility,
    pub available_commands: Vec<CommandKind>,
    pub disabled: BTreeMap<ActionKind, DisabledActionView>,
    pub attendees: Vec<AttendeeView>,
    pub feedback: FeedbackSummary,
}

impl InterviewDetails {
    pub fn from_record(record: InterviewRecord) -> Self {
        let eligibility = derive_eligibility(&record);

        let disabled = ActionKind::ordered()
            .into_iter()
            .filter_map(|kind| {
                resolve_disabled_reason(kind, &record, &eligibility).map(|reason| {
                    (
                        kind,
                        DisabledActionView {
                            code: reason.code(),
                            message: reason.message(),
                        },
                    )
                })
            })
            .collect();

        let available_commands = CommandKind::for_viewer(record.is_invited)
            .into_iter()
            .filter(|kind| eligibility.allows(kind.action()))
            .collect();

        let attendees = record
            .attendees
            .iter()
            .map(|attendee| AttendeeView {
                name: attendee.name.clone().or_else(|| attendee.email.clone()),
                badge: action_badge(&attendee.action),
                rating: attendee.rating,
                comments: attendee.comments.clone(),
            })
            .collect();

        Self {
            status: status_badge(&record.interview_status),
            my_action: action_badge(&record.my_action),
            feedback: FeedbackSummary::from_attendees(&record.attendees),
            interview_id: record.id,
            title: record.title,
            scheduled_at: record.scheduled_at,
            invited_by: record.invited_by,
            meeting_link: record.meeting_link,
            eligibility,
            available_commands,
            disabled,
            attendees,
        }
    }
}

/// Error raised by the interview action service.
#[derive(Debug, thiserror::Error)]
pub enum InterviewServiceError {
    #[error(transparent)]
    InvalidCommand(#[from] InvalidCommand),
    #[error(transparent)]
    Denied(#[from] CommandDenied),
    #[error("another command is already in flight for interview {0}")]
    Busy(InterviewId),
    #[error("{operation} applied, but interview {id} is no longer visible")]
    Withdrawn {
        id: InterviewId,
        operation: ServiceOperation,
    },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
