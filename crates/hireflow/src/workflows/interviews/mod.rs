//! Interview action eligibility, command gating, and dispatch.
//!
//! Raw Interview Service payloads are normalized once at the edge into closed
//! enums; eligibility, disabled reasons, and command routing are pure functions
//! of that canonical record and are re-derived after every command.

pub mod commands;
pub mod domain;
pub mod eligibility;
pub mod feedback;
pub mod gateway;
pub mod normalizer;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use commands::{
    authorize_command, map_command, CommandDenied, CommandKind, InterviewCommand,
    InvalidCommand, ServiceOperation,
};
pub use domain::{
    AttendeeEvaluation, CriterionScores, InterviewId, InterviewRecord, InterviewStatus,
    PanelistAction, RawAttendee, RawAttendeeStatus, RawInterviewRecord,
};
pub use eligibility::{
    action_badge, derive_eligibility, resolve_disabled_reason, status_badge, ActionKind,
    BadgeTone, DerivedEligibility, DisabledReason, StatusBadge,
};
pub use feedback::FeedbackSummary;
pub use gateway::{GatewayError, InterviewGateway, InviteRequest, MeetingSession, TransferRequest};
pub use normalizer::{normalize_record, parse_interview_status, parse_panelist_action};
pub use router::interview_router;
pub use service::{
    AttendeeView, CommandOutcome, DisabledActionView, InterviewActionService, InterviewDetails,
    InterviewServiceError,
};
