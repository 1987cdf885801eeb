use serde::{Deserialize, Serialize};

use super::domain::{InterviewId, RawInterviewRecord};

/// Hand-off request for moving the viewer's seat to another interviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub to_interviewer: String,
    pub reason: Option<String>,
}

/// Additional panelist the viewer wants on the interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteRequest {
    pub email: String,
    pub name: Option<String>,
}

/// Join details negotiated with the meeting provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingSession {
    pub join_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Boundary to the remote Interview Service so the action service can be exercised in isolation.
///
/// Every mutating call returns nothing; callers re-fetch instead of trusting a local patch.
pub trait InterviewGateway: Send + Sync {
    fn fetch(&self, id: &InterviewId) -> Result<Option<RawInterviewRecord>, GatewayError>;
    fn confirm_interview(&self, id: &InterviewId) -> Result<(), GatewayError>;
    fn reject_interview(&self, id: &InterviewId, reason: Option<&str>)
        -> Result<(), GatewayError>;
    fn accept_invitation(&self, id: &InterviewId) -> Result<(), GatewayError>;
    fn decline_invitation(
        &self,
        id: &InterviewId,
        reason: Option<&str>,
    ) -> Result<(), GatewayError>;
    fn transfer_interview(
        &self,
        id: &InterviewId,
        request: &TransferRequest,
    ) -> Result<(), GatewayError>;
    fn invite_interviewer(
        &self,
        id: &InterviewId,
        request: &InviteRequest,
    ) -> Result<(), GatewayError>;
    fn join_meeting(&self, id: &InterviewId) -> Result<MeetingSession, GatewayError>;
}

/// Error enumeration for Interview Service failures. Messages pass through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("interview not found")]
    NotFound,
    #[error("{0}")]
    Rejected(String),
    #[error("interview service unavailable: {0}")]
    Unavailable(String),
}
