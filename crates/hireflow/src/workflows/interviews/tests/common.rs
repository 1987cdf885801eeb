use std::collections::HashMap;
use std::sync::{Arc, Barrier, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::interviews::domain::{
    InterviewId, InterviewRecord, RawAttendee, RawAttendeeStatus, RawInterviewRecord,
};
use crate::workflows::interviews::gateway::{
    GatewayError, InterviewGateway, InviteRequest, MeetingSession, TransferRequest,
};
use crate::workflows::interviews::normalizer::normalize_record;
use crate::workflows::interviews::{interview_router, InterviewActionService};

pub(super) const MEETING_LINK: &str = "https://x/y";

pub(super) fn raw_record(status: &str, my_action: &str, invited: bool) -> RawInterviewRecord {
    RawInterviewRecord {
        id: "int-001".to_string(),
        title: Some("Backend Engineer - Systems Round".to_string()),
        interview_status: Some(status.to_string()),
        my_action: Some(my_action.to_string()),
        is_invited: Some(invited),
        invited_by: if invited {
            Some("Alice".to_string())
        } else {
            None
        },
        ..RawInterviewRecord::default()
    }
}

pub(super) fn record(status: &str, my_action: &str, invited: bool) -> InterviewRecord {
    normalize_record(raw_record(status, my_action, invited))
}

pub(super) fn record_with_link(status: &str, my_action: &str, invited: bool) -> InterviewRecord {
    let mut raw = raw_record(status, my_action, invited);
    raw.meeting_link = Some(MEETING_LINK.to_string());
    normalize_record(raw)
}

pub(super) fn attendee(action: &str, rating: Option<f32>, note: Option<&str>) -> RawAttendee {
    RawAttendee {
        name: Some(format!("Panelist {action}")),
        email: None,
        status: Some(RawAttendeeStatus {
            action: Some(action.to_string()),
        }),
        comments: Some("Solid fundamentals".to_string()),
        rating,
        note: note.map(str::to_string),
    }
}

pub(super) fn interview_id() -> InterviewId {
    InterviewId("int-001".to_string())
}

/// Calls observed by a gateway double, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum GatewayCall {
    Fetch,
    Confirm,
    Reject(Option<String>),
    Accept,
    Decline(Option<String>),
    Transfer(String),
    Invite(String),
    Join,
}

/// Gateway double that applies transitions the way the platform would.
#[derive(Default, Clone)]
pub(super) struct MemoryGateway {
    pub(super) records: Arc<Mutex<HashMap<InterviewId, RawInterviewRecord>>>,
    calls: Arc<Mutex<Vec<GatewayCall>>>,
    /// Drop the record from view once it has been handed to another interviewer.
    pub(super) hide_after_transfer: bool,
}

impl MemoryGateway {
    pub(super) fn with(record: RawInterviewRecord) -> Self {
        let gateway = Self::default();
        gateway
            .records
            .lock()
            .expect("gateway mutex poisoned")
            .insert(InterviewId(record.id.clone()), record);
        gateway
    }

    pub(super) fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub(super) fn mutating_calls(&self) -> Vec<GatewayCall> {
        self.calls()
            .into_iter()
            .filter(|call| *call != GatewayCall::Fetch)
            .collect()
    }

    fn record_call(&self, call: GatewayCall) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }

    fn update(
        &self,
        id: &InterviewId,
        apply: impl FnOnce(&mut RawInterviewRecord),
    ) -> Result<(), GatewayError> {
        let mut guard = self.records.lock().expect("gateway mutex poisoned");
        let record = guard.get_mut(id).ok_or(GatewayError::NotFound)?;
        apply(record);
        Ok(())
    }
}

impl InterviewGateway for MemoryGateway {
    fn fetch(&self, id: &InterviewId) -> Result<Option<RawInterviewRecord>, GatewayError> {
        self.record_call(GatewayCall::Fetch);
        let guard = self.records.lock().expect("gateway mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn confirm_interview(&self, id: &InterviewId) -> Result<(), GatewayError> {
        self.record_call(GatewayCall::Confirm);
        self.update(id, |record| {
            record.my_action = Some("confirmed".to_string());
            record.interview_status = Some("confirmed".to_string());
        })
    }

    fn reject_interview(&self, id: &InterviewId, reason: Option<&str>) -> Result<(), GatewayError> {
        self.record_call(GatewayCall::Reject(reason.map(str::to_string)));
        self.update(id, |record| record.my_action = Some("rejected".to_string()))
    }

    fn accept_invitation(&self, id: &InterviewId) -> Result<(), GatewayError> {
        self.record_call(GatewayCall::Accept);
        self.update(id, |record| record.my_action = Some("confirmed".to_string()))
    }

    fn decline_invitation(
        &self,
        id: &InterviewId,
        reason: Option<&str>,
    ) -> Result<(), GatewayError> {
        self.record_call(GatewayCall::Decline(reason.map(str::to_string)));
        self.update(id, |record| record.my_action = Some("rejected".to_string()))
    }

    fn transfer_interview(
        &self,
        id: &InterviewId,
        request: &TransferRequest,
    ) -> Result<(), GatewayError> {
        self.record_call(GatewayCall::Transfer(request.to_interviewer.clone()));
        self.update(id, |record| {
            record.my_action = Some("transferred".to_string())
        })?;
        if self.hide_after_transfer {
            self.records
                .lock()
                .expect("gateway mutex poisoned")
                .remove(id);
        }
        Ok(())
    }

    fn invite_interviewer(
        &self,
        id: &InterviewId,
        request: &InviteRequest,
    ) -> Result<(), GatewayError> {
        self.record_call(GatewayCall::Invite(request.email.clone()));
        let email = request.email.clone();
        self.update(id, move |record| {
            record.attendees.push(RawAttendee {
                email: Some(email),
                status: Some(RawAttendeeStatus {
                    action: Some("no_action".to_string()),
                }),
                ..RawAttendee::default()
            })
        })
    }

    fn join_meeting(&self, id: &InterviewId) -> Result<MeetingSession, GatewayError> {
        self.record_call(GatewayCall::Join);
        let guard = self.records.lock().expect("gateway mutex poisoned");
        let record = guard.get(id).ok_or(GatewayError::NotFound)?;
        Ok(MeetingSession {
            join_url: record.meeting_link.clone().unwrap_or_default(),
            token: Some("session-token".to_string()),
        })
    }
}

/// Gateway that serves a record but refuses every mutation.
pub(super) struct RejectingGateway {
    pub(super) inner: MemoryGateway,
    pub(super) message: String,
}

impl InterviewGateway for RejectingGateway {
    fn fetch(&self, id: &InterviewId) -> Result<Option<RawInterviewRecord>, GatewayError> {
        self.inner.fetch(id)
    }

    fn confirm_interview(&self, _id: &InterviewId) -> Result<(), GatewayError> {
        Err(GatewayError::Rejected(self.message.clone()))
    }

    fn reject_interview(&self, _id: &InterviewId, _reason: Option<&str>) -> Result<(), GatewayError> {
        Err(GatewayError::Rejected(self.message.clone()))
    }

    fn accept_invitation(&self, _id: &InterviewId) -> Result<(), GatewayError> {
        Err(GatewayError::Rejected(self.message.clone()))
    }

    fn decline_invitation(
        &self,
        _id: &InterviewId,
        _reason: Option<&str>,
    ) -> Result<(), GatewayError> {
        Err(GatewayError::Rejected(self.message.clone()))
    }

    fn transfer_interview(
        &self,
        _id: &InterviewId,
        _request: &TransferRequest,
    ) -> Result<(), GatewayError> {
        Err(GatewayError::Rejected(self.message.clone()))
    }

    fn invite_interviewer(
        &self,
        _id: &InterviewId,
        _request: &InviteRequest,
    ) -> Result<(), GatewayError> {
        Err(GatewayError::Rejected(self.message.clone()))
    }

    fn join_meeting(&self, _id: &InterviewId) -> Result<MeetingSession, GatewayError> {
        Err(GatewayError::Rejected(self.message.clone()))
    }
}

/// Gateway whose `confirm_interview` parks until the test releases it.
pub(super) struct BlockingGateway {
    pub(super) inner: MemoryGateway,
    pub(super) entered: Barrier,
    pub(super) release: Barrier,
}

impl BlockingGateway {
    pub(super) fn new(inner: MemoryGateway) -> Self {
        Self {
            inner,
            entered: Barrier::new(2),
            release: Barrier::new(2),
        }
    }
}

impl InterviewGateway for BlockingGateway {
    fn fetch(&self, id: &InterviewId) -> Result<Option<RawInterviewRecord>, GatewayError> {
        self.inner.fetch(id)
    }

    fn confirm_interview(&self, id: &InterviewId) -> Result<(), GatewayError> {
        self.entered.wait();
        self.release.wait();
        self.inner.confirm_interview(id)
    }

    fn reject_interview(&self, id: &InterviewId, reason: Option<&str>) -> Result<(), GatewayError> {
        self.inner.reject_interview(id, reason)
    }

    fn accept_invitation(&self, id: &InterviewId) -> Result<(), GatewayError> {
        self.inner.accept_invitation(id)
    }

    fn decline_invitation(
        &self,
        id: &InterviewId,
        reason: Option<&str>,
    ) -> Result<(), GatewayError> {
        self.inner.decline_invitation(id, reason)
    }

    fn transfer_interview(
        &self,
        id: &InterviewId,
        request: &TransferRequest,
    ) -> Result<(), GatewayError> {
        self.inner.transfer_interview(id, request)
    }

    fn invite_interviewer(
        &self,
        id: &InterviewId,
        request: &InviteRequest,
    ) -> Result<(), GatewayError> {
        self.inner.invite_interviewer(id, request)
    }

    fn join_meeting(&self, id: &InterviewId) -> Result<MeetingSession, GatewayError> {
        self.inner.join_meeting(id)
    }
}

pub(super) struct UnavailableGateway;

impl InterviewGateway for UnavailableGateway {
    fn fetch(&self, _id: &InterviewId) -> Result<Option<RawInterviewRecord>, GatewayError> {
        Err(GatewayError::Unavailable("connection refused".to_string()))
    }

    fn confirm_interview(&self, _id: &InterviewId) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable("connection refused".to_string()))
    }

    fn reject_interview(&self, _id: &InterviewId, _reason: Option<&str>) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable("connection refused".to_string()))
    }

    fn accept_invitation(&self, _id: &InterviewId) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable("connection refused".to_string()))
    }

    fn decline_invitation(
        &self,
        _id: &InterviewId,
        _reason: Option<&str>,
    ) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable("connection refused".to_string()))
    }

    fn transfer_interview(
        &self,
        _id: &InterviewId,
        _request: &TransferRequest,
    ) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable("connection refused".to_string()))
    }

    fn invite_interviewer(
        &self,
        _id: &InterviewId,
        _request: &InviteRequest,
    ) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable("connection refused".to_string()))
    }

    fn join_meeting(&self, _id: &InterviewId) -> Result<MeetingSession, GatewayError> {
        Err(GatewayError::Unavailable("connection refused".to_string()))
    }
}

pub(super) fn build_service(
    record: RawInterviewRecord,
) -> (InterviewActionService<MemoryGateway>, Arc<MemoryGateway>) {
    let gateway = Arc::new(MemoryGateway::with(record));
    let service = InterviewActionService::new(gateway.clone());
    (service, gateway)
}

pub(super) fn interview_router_with_service(
    service: InterviewActionService<MemoryGateway>,
) -> axum::Router {
    interview_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
