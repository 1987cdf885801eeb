use tracing::warn;

use super::domain::{
    AttendeeEvaluation, CriterionScores, InterviewId, InterviewRecord, InterviewStatus,
    PanelistAction, RawAttendee, RawInterviewRecord,
};

const MAX_CRITERION_SCORE: f32 = 10.0;

/// Fold casing and separators so `"In Progress"` and `"in-progress"` compare equal.
pub(crate) fn normalize_token(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|ch| match ch {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

pub fn parse_interview_status(raw: Option<&str>) -> InterviewStatus {
    let Some(value) = raw.filter(|value| !value.trim().is_empty()) else {
        return InterviewStatus::Unspecified;
    };

    match normalize_token(value).as_str() {
        "pending" => InterviewStatus::Pending,
        "confirmed" => InterviewStatus::Confirmed,
        "rejected" => InterviewStatus::Rejected,
        "completed" => InterviewStatus::Completed,
        "in_progress" => InterviewStatus::InProgress,
        "cancelled" | "canceled" => InterviewStatus::Cancelled,
        _ => InterviewStatus::Unrecognized(value.trim().to_string()),
    }
}

pub fn parse_panelist_action(raw: Option<&str>) -> PanelistAction {
    let Some(value) = raw.filter(|value| !value.trim().is_empty()) else {
        return PanelistAction::Pending;
    };

    match normalize_token(value).as_str() {
        "pending" => PanelistAction::Pending,
        "confirmed" => PanelistAction::Confirmed,
        "rejected" => PanelistAction::Rejected,
        "completed" => PanelistAction::Completed,
        "transferred" => PanelistAction::Transferred,
        "cancelled" | "canceled" => PanelistAction::Cancelled,
        "no_action" => PanelistAction::NoAction,
        _ => PanelistAction::Unrecognized(value.trim().to_string()),
    }
}

/// Decode an attendee note. Anything but a JSON object of in-range numbers is dropped.
pub(crate) fn parse_criterion_scores(note: &str) -> Option<CriterionScores> {
    if note.trim().is_empty() {
        return None;
    }

    let parsed: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(note) {
        Ok(map) => map,
        Err(err) => {
            warn!(error = %err, "discarding attendee note that is not a JSON object");
            return None;
        }
    };

    let mut scores = CriterionScores::new();
    for (criterion, value) in parsed {
        match value.as_f64().map(|score| score as f32) {
            Some(score) if (0.0..=MAX_CRITERION_SCORE).contains(&score) => {
                scores.insert(criterion, score);
            }
            _ => {
                warn!(%criterion, "discarding out-of-range or non-numeric criterion score");
            }
        }
    }

    if scores.is_empty() {
        None
    } else {
        Some(scores)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn normalize_attendee(raw: RawAttendee) -> AttendeeEvaluation {
    let action = parse_panelist_action(
        raw.status
            .as_ref()
            .and_then(|status| status.action.as_deref()),
    );

    AttendeeEvaluation {
        name: non_blank(raw.name),
        email: non_blank(raw.email),
        action,
        comments: non_blank(raw.comments),
        rating: raw.rating.filter(|rating| rating.is_finite()),
        note: raw.note.as_deref().and_then(parse_criterion_scores),
    }
}

/// Convert the service payload into the canonical record. Never fails.
pub fn normalize_record(raw: RawInterviewRecord) -> InterviewRecord {
    let interview_status = parse_interview_status(raw.interview_status.as_deref());
    let my_action = parse_panelist_action(raw.my_action.as_deref());
    let is_invited = raw.is_invited.unwrap_or(false);

    if let InterviewStatus::Unrecognized(token) = &interview_status {
        warn!(interview_id = %raw.id, %token, "unrecognized interview status");
    }
    if let PanelistAction::Unrecognized(token) = &my_action {
        warn!(interview_id = %raw.id, %token, "unrecognized panelist action");
    }

    InterviewRecord {
        id: InterviewId(raw.id),
        title: non_blank(raw.title),
        scheduled_at: raw.scheduled_at,
        interview_status,
        my_action,
        is_invited,
        invited_by: if is_invited {
            non_blank(raw.invited_by)
        } else {
            None
        },
        can_invite_others: raw.can_invite_others,
        meeting_link: non_blank(raw.meeting_link),
        attendees: raw.attendees.into_iter().map(normalize_attendee).collect(),
    }
}
