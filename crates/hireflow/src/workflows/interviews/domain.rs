use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for scheduled interviews.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InterviewId(pub String);

impl InterviewId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Global state of the interview, shared by every panelist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Pending,
    Confirmed,
    Rejected,
    Completed,
    InProgress,
    Cancelled,
    /// The platform sent no status at all.
    Unspecified,
    /// Token the platform sent that this crate does not know. Never satisfies a check.
    Unrecognized(String),
}

impl InterviewStatus {
    pub fn label(&self) -> &str {
        match self {
            InterviewStatus::Pending => "pending",
            InterviewStatus::Confirmed => "confirmed",
            InterviewStatus::Rejected => "rejected",
            InterviewStatus::Completed => "completed",
            InterviewStatus::InProgress => "in_progress",
            InterviewStatus::Cancelled => "cancelled",
            InterviewStatus::Unspecified => "unspecified",
            InterviewStatus::Unrecognized(raw) => raw.as_str(),
        }
    }
}

/// The viewer's personal response, independent from [`InterviewStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelistAction {
    Pending,
    Confirmed,
    Rejected,
    Completed,
    Transferred,
    Cancelled,
    /// An invitation nobody has acted on yet.
    NoAction,
    Unrecognized(String),
}

impl PanelistAction {
    pub fn label(&self) -> &str {
        match self {
            PanelistAction::Pending => "pending",
            PanelistAction::Confirmed => "confirmed",
            PanelistAction::Rejected => "rejected",
            PanelistAction::Completed => "completed",
            PanelistAction::Transferred => "transferred",
            PanelistAction::Cancelled => "cancelled",
            PanelistAction::NoAction => "no_action",
            PanelistAction::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// True while the viewer still owes a confirm/reject (or accept/decline) answer.
    pub fn awaits_response(&self) -> bool {
        matches!(self, PanelistAction::Pending | PanelistAction::NoAction)
    }
}

/// Criterion name to score (0-10) decoded from an attendee's note.
pub type CriterionScores = BTreeMap<String, f32>;

/// One panelist's evaluation of the candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendeeEvaluation {
    pub name: Option<String>,
    pub email: Option<String>,
    pub action: PanelistAction,
    pub comments: Option<String>,
    pub rating: Option<f32>,
    pub note: Option<CriterionScores>,
}

/// Canonical interview instance as seen by one viewer.
///
/// Built once from the wire shape by [`super::normalizer::normalize_record`]; every
/// downstream derivation works on these closed enums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub id: InterviewId,
    pub title: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub interview_status: InterviewStatus,
    pub my_action: PanelistAction,
    pub is_invited: bool,
    pub invited_by: Option<String>,
    pub can_invite_others: Option<bool>,
    pub meeting_link: Option<String>,
    pub attendees: Vec<AttendeeEvaluation>,
}

impl InterviewRecord {
    /// `canInviteOthers` is permissive unless the platform says `false`.
    pub fn may_invite_others(&self) -> bool {
        self.can_invite_others != Some(false)
    }
}

/// Wire representation returned by the Interview Service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInterviewRecord {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub interview_status: Option<String>,
    #[serde(default)]
    pub my_action: Option<String>,
    #[serde(default)]
    pub is_invited: Option<bool>,
    #[serde(default)]
    pub invited_by: Option<String>,
    #[serde(default)]
    pub can_invite_others: Option<bool>,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub attendees: Vec<RawAttendee>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttendee {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<RawAttendeeStatus>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    /// JSON-encoded object of criterion name to score.
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAttendeeStatus {
    #[serde(default)]
    pub action: Option<String>,
}
