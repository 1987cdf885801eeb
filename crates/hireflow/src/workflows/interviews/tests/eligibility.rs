use super::common::*;
use crate::workflows::interviews::domain::{InterviewRecord, InterviewStatus, PanelistAction};
use crate::workflows::interviews::eligibility::{
    action_badge, derive_eligibility, status_badge, ActionKind, BadgeTone,
};
use crate::workflows::interviews::normalizer::normalize_record;

const STATUSES: [&str; 8] = [
    "pending",
    "confirmed",
    "rejected",
    "completed",
    "in_progress",
    "cancelled",
    "rescheduled",
    "",
];

const ACTIONS: [&str; 8] = [
    "pending",
    "confirmed",
    "rejected",
    "completed",
    "transferred",
    "cancelled",
    "no_action",
    "shrug",
];

fn every_record() -> Vec<InterviewRecord> {
    let mut records = Vec::new();
    for status in STATUSES {
        for action in ACTIONS {
            for invited in [false, true] {
                for can_invite in [None, Some(true), Some(false)] {
                    for link in [None, Some(MEETING_LINK)] {
                        let mut raw = raw_record(status, action, invited);
                        raw.can_invite_others = can_invite;
                        raw.meeting_link = link.map(str::to_string);
                        records.push(normalize_record(raw));
                    }
                }
            }
        }
    }
    records
}

#[test]
fn cancellation_disables_every_action() {
    for record in every_record()
        .into_iter()
        .filter(|record| record.interview_status == InterviewStatus::Cancelled)
    {
        let flags = derive_eligibility(&record);
        assert!(flags.is_cancelled);
        assert!(!flags.is_meeting_enabled, "{record:?}");
        assert!(!flags.is_transfer_allowed, "{record:?}");
        assert!(!flags.is_invite_allowed, "{record:?}");
        assert!(!flags.are_response_actions_allowed, "{record:?}");
    }
}

#[test]
fn meeting_follows_status_for_assigned_panelists() {
    for record in every_record()
        .into_iter()
        .filter(|record| record.interview_status != InterviewStatus::Cancelled && !record.is_invited)
    {
        let flags = derive_eligibility(&record);
        assert_eq!(
            flags.is_meeting_enabled,
            record.interview_status == InterviewStatus::Confirmed,
            "{record:?}"
        );
    }
}

#[test]
fn invited_viewers_must_confirm_before_joining() {
    for record in every_record()
        .into_iter()
        .filter(|record| record.interview_status != InterviewStatus::Cancelled && record.is_invited)
    {
        let flags = derive_eligibility(&record);
        assert_eq!(
            flags.is_meeting_enabled,
            record.interview_status == InterviewStatus::Confirmed
                && record.my_action == PanelistAction::Confirmed,
            "{record:?}"
        );
    }
}

#[test]
fn derivation_is_idempotent() {
    for record in every_record() {
        assert_eq!(derive_eligibility(&record), derive_eligibility(&record));
    }
}

#[test]
fn unrecognized_values_never_enable_anything() {
    for record in every_record().into_iter().filter(|record| {
        matches!(
            record.interview_status,
            InterviewStatus::Unrecognized(_) | InterviewStatus::Unspecified
        )
    }) {
        let flags = derive_eligibility(&record);
        assert!(!flags.is_meeting_enabled);
        assert!(!flags.is_invite_allowed);
    }

    for record in every_record()
        .into_iter()
        .filter(|record| matches!(record.my_action, PanelistAction::Unrecognized(_)))
    {
        let flags = derive_eligibility(&record);
        assert!(!flags.is_transfer_allowed);
        assert!(!flags.are_response_actions_allowed);
    }
}

#[test]
fn pending_assigned_panelist_can_respond_and_transfer() {
    let flags = derive_eligibility(&record("pending", "pending", false));

    assert!(flags.are_response_actions_allowed);
    assert!(flags.is_transfer_allowed);
    assert!(!flags.is_meeting_enabled);
    assert!(!flags.is_invite_allowed);
}

#[test]
fn unanswered_invitation_can_respond_but_not_join() {
    let flags = derive_eligibility(&record_with_link("confirmed", "no_action", true));

    assert!(flags.are_response_actions_allowed);
    assert!(!flags.is_meeting_enabled);
    assert!(flags.has_meeting_link);
    assert!(!flags.is_transfer_allowed);
}

#[test]
fn accepted_invitation_can_join_but_not_invite() {
    let flags = derive_eligibility(&record_with_link("confirmed", "confirmed", true));

    assert!(flags.is_meeting_enabled);
    assert!(flags.allows(ActionKind::Meeting));
    assert!(!flags.is_invite_allowed);
}

#[test]
fn confirmed_interview_lets_pending_panelist_invite_and_transfer() {
    let mut raw = raw_record("confirmed", "pending", false);
    raw.can_invite_others = Some(true);
    let flags = derive_eligibility(&normalize_record(raw));

    assert!(flags.is_invite_allowed);
    assert!(flags.is_transfer_allowed);
}

#[test]
fn explicit_false_blocks_invites_but_absence_does_not() {
    let mut raw = raw_record("confirmed", "confirmed", false);
    raw.can_invite_others = Some(false);
    assert!(!derive_eligibility(&normalize_record(raw.clone())).is_invite_allowed);

    raw.can_invite_others = None;
    assert!(derive_eligibility(&normalize_record(raw)).is_invite_allowed);
}

#[test]
fn joining_needs_a_link_even_when_meeting_is_enabled() {
    let flags = derive_eligibility(&record("confirmed", "confirmed", false));
    assert!(flags.is_meeting_enabled);
    assert!(!flags.has_meeting_link);
    assert!(!flags.allows(ActionKind::Meeting));
}

#[test]
fn badges_style_known_values_and_leave_unknown_unstyled() {
    assert_eq!(status_badge(&InterviewStatus::Confirmed).tone, BadgeTone::Success);
    assert_eq!(status_badge(&InterviewStatus::InProgress).label, "In Progress");

    let unknown = status_badge(&InterviewStatus::Unrecognized("On Hold".to_string()));
    assert_eq!(unknown.tone, BadgeTone::Unstyled);
    assert_eq!(unknown.label, "On Hold");

    let missing = status_badge(&InterviewStatus::Unspecified);
    assert_eq!(missing.tone, BadgeTone::Unstyled);
    assert_eq!(missing.label, "Unknown");

    assert_eq!(action_badge(&PanelistAction::Rejected).tone, BadgeTone::Danger);
    assert_eq!(action_badge(&PanelistAction::NoAction).tone, BadgeTone::Muted);
}
