use chrono::{Duration, Utc};
use hireflow::error::AppError;
use hireflow::workflows::interviews::{
    GatewayError, InterviewGateway, InterviewId, InviteRequest, MeetingSession, RawAttendee,
    RawAttendeeStatus, RawInterviewRecord, TransferRequest,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Stand-in for the remote Interview Service, applying transitions to wire records.
#[derive(Default, Clone)]
pub(crate) struct InMemoryInterviewGateway {
    records: Arc<Mutex<HashMap<InterviewId, RawInterviewRecord>>>,
}

impl InMemoryInterviewGateway {
    pub(crate) fn seeded(records: Vec<RawInterviewRecord>) -> Self {
        let gateway = Self::default();
        {
            let mut guard = gateway.lock();
            for record in records {
                guard.insert(InterviewId(record.id.clone()), record);
            }
        }
        gateway
    }

    /// Load wire records from a JSON array on disk.
    pub(crate) fn from_seed_file(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path)?;
        let records: Vec<RawInterviewRecord> = serde_json::from_str(&contents)?;
        info!(path = %path.display(), count = records.len(), "seeded interview gateway");
        Ok(Self::seeded(records))
    }

    pub(crate) fn ids(&self) -> Vec<InterviewId> {
        let mut ids: Vec<InterviewId> = self.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<InterviewId, RawInterviewRecord>> {
        match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn update(
        &self,
        id: &InterviewId,
        apply: impl FnOnce(&mut RawInterviewRecord),
    ) -> Result<(), GatewayError> {
        let mut guard = self.lock();
        let record = guard.get_mut(id).ok_or(GatewayError::NotFound)?;
        apply(record);
        Ok(())
    }
}

impl InterviewGateway for InMemoryInterviewGateway {
    fn fetch(&self, id: &InterviewId) -> Result<Option<RawInterviewRecord>, GatewayError> {
        Ok(self.lock().get(id).cloned())
    }

    fn confirm_interview(&self, id: &InterviewId) -> Result<(), GatewayError> {
        self.update(id, |record| {
            record.my_action = Some("confirmed".to_string());
            record.interview_status = Some("confirmed".to_string());
        })
    }

    fn reject_interview(&self, id: &InterviewId, reason: Option<&str>) -> Result<(), GatewayError> {
        info!(interview_id = %id, reason = reason.unwrap_or("-"), "interview rejected");
        self.update(id, |record| record.my_action = Some("rejected".to_string()))
    }

    fn accept_invitation(&self, id: &InterviewId) -> Result<(), GatewayError> {
        self.update(id, |record| record.my_action = Some("confirmed".to_string()))
    }

    fn decline_invitation(
        &self,
        id: &InterviewId,
        reason: Option<&str>,
    ) -> Result<(), GatewayError> {
        info!(interview_id = %id, reason = reason.unwrap_or("-"), "invitation declined");
        self.update(id, |record| record.my_action = Some("rejected".to_string()))
    }

    fn transfer_interview(
        &self,
        id: &InterviewId,
        request: &TransferRequest,
    ) -> Result<(), GatewayError> {
        if request.to_interviewer.eq_ignore_ascii_case("me") {
            return Err(GatewayError::Rejected(
                "cannot transfer an interview to yourself".to_string(),
            ));
        }
        self.update(id, |record| {
            record.my_action = Some("transferred".to_string())
        })
    }

    fn invite_interviewer(
        &self,
        id: &InterviewId,
        request: &InviteRequest,
    ) -> Result<(), GatewayError> {
        let invitee = request.clone();
        let mut result = Ok(());
        self.update(id, |record| {
            let duplicate = record.attendees.iter().any(|attendee| {
                attendee
                    .email
                    .as_deref()
                    .is_some_and(|email| email.eq_ignore_ascii_case(&invitee.email))
            });
            if duplicate {
                result = Err(GatewayError::Rejected(format!(
                    "{} is already on the panel",
                    invitee.email
                )));
                return;
            }
            record.attendees.push(RawAttendee {
                name: invitee.name,
                email: Some(invitee.email),
                status: Some(RawAttendeeStatus {
                    action: Some("no_action".to_string()),
                }),
                ..RawAttendee::default()
            });
        })?;
        result
    }

    fn join_meeting(&self, id: &InterviewId) -> Result<MeetingSession, GatewayError> {
        let guard = self.lock();
        let record = guard.get(id).ok_or(GatewayError::NotFound)?;
        let link = record
            .meeting_link
            .clone()
            .ok_or_else(|| GatewayError::Rejected("meeting link missing".to_string()))?;
        Ok(MeetingSession {
            join_url: link,
            token: Some(format!("{}-{}", id, Utc::now().timestamp())),
        })
    }
}

/// Records that exercise each branch of the details view.
pub(crate) fn demo_interviews() -> Vec<RawInterviewRecord> {
    let tomorrow = Utc::now() + Duration::days(1);
    let base = |id: &str, status: &str, action: &str| RawInterviewRecord {
        id: id.to_string(),
        title: Some("Senior Rust Engineer - Systems Design".to_string()),
        scheduled_at: Some(tomorrow),
        interview_status: Some(status.to_string()),
        my_action: Some(action.to_string()),
        ..RawInterviewRecord::default()
    };

    let pending = RawInterviewRecord {
        is_invited: Some(false),
        ..base("int-pending", "pending", "pending")
    };

    let invitation = RawInterviewRecord {
        is_invited: Some(true),
        invited_by: Some("Alice".to_string()),
        meeting_link: Some("https://meet.example.com/int-invite".to_string()),
        ..base("int-invite", "confirmed", "no_action")
    };

    let confirmed = RawInterviewRecord {
        is_invited: Some(false),
        can_invite_others: Some(true),
        meeting_link: Some("https://meet.example.com/int-confirmed".to_string()),
        ..base("int-confirmed", "confirmed", "pending")
    };

    let cancelled = base("int-cancelled", "cancelled", "pending");

    let completed = RawInterviewRecord {
        attendees: vec![
            RawAttendee {
                name: Some("Bo Lindqvist".to_string()),
                status: Some(RawAttendeeStatus {
                    action: Some("completed".to_string()),
                }),
                comments: Some("Strong ownership model reasoning".to_string()),
                rating: Some(4.5),
                note: Some(r#"{"coding": 9, "system_design": 7}"#.to_string()),
                ..RawAttendee::default()
            },
            RawAttendee {
                name: Some("Priya Raman".to_string()),
                status: Some(RawAttendeeStatus {
                    action: Some("completed".to_string()),
                }),
                comments: Some("Needs work on async cancellation".to_string()),
                rating: Some(3.5),
                note: Some(r#"{"coding": 7, "system_design": 6}"#.to_string()),
                ..RawAttendee::default()
            },
        ],
        ..base("int-completed", "completed", "completed")
    };

    vec![pending, invitation, confirmed, cancelled, completed]
}
