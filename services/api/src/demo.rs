use crate::infra::{demo_interviews, InMemoryInterviewGateway};
use clap::Args;
use hireflow::error::AppError;
use hireflow::workflows::interviews::{
    normalize_record, CommandOutcome, InterviewActionService, InterviewCommand, InterviewDetails,
    InterviewId, InterviewServiceError, RawInterviewRecord,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct InspectArgs {
    /// Path to a JSON file holding one interview record as returned by the platform
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Emit the details view as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only print the details views, skip dispatching commands.
    #[arg(long)]
    pub(crate) read_only: bool,
}

pub(crate) fn run_inspect(args: InspectArgs) -> Result<(), AppError> {
    let contents = std::fs::read_to_string(&args.record)?;
    let raw: RawInterviewRecord = serde_json::from_str(&contents)?;
    let details = InterviewDetails::from_record(normalize_record(raw));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        render_details(&details);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let gateway = Arc::new(InMemoryInterviewGateway::seeded(demo_interviews()));
    let service = InterviewActionService::new(gateway.clone());

    println!("== Interview details ==");
    for id in gateway.ids() {
        let details = service.details(&id)?;
        render_details(&details);
        println!();
    }

    if args.read_only {
        return Ok(());
    }

    println!("== Commands ==");
    let steps = [
        ("int-pending", InterviewCommand::Confirm),
        ("int-pending", InterviewCommand::Confirm),
        ("int-invite", InterviewCommand::JoinMeeting),
        ("int-invite", InterviewCommand::Confirm),
        ("int-invite", InterviewCommand::JoinMeeting),
        (
            "int-confirmed",
            InterviewCommand::Invite {
                email: "dana@example.com".to_string(),
                name: Some("Dana Whitfield".to_string()),
            },
        ),
        (
            "int-confirmed",
            InterviewCommand::Transfer {
                to_interviewer: "eli@example.com".to_string(),
                reason: Some("calendar conflict".to_string()),
            },
        ),
        ("int-cancelled", InterviewCommand::Reject { reason: None }),
    ];

    for (id, command) in steps {
        let id = InterviewId(id.to_string());
        let label = command.kind().label();
        match service.execute(&id, command) {
            Ok(outcome) => render_outcome(&outcome),
            Err(InterviewServiceError::Denied(denied)) => {
                println!("  {id}: {label} denied - {}", denied.reason);
            }
            Err(other) => println!("  {id}: {label} failed - {other}"),
        }
    }

    Ok(())
}

fn flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn render_details(details: &InterviewDetails) {
    println!(
        "{} [{}] {}",
        details.interview_id,
        details.status.label,
        details.title.as_deref().unwrap_or("(untitled)")
    );
    println!("  my response: {}", details.my_action.label);
    if let Some(inviter) = &details.invited_by {
        println!("  invited by: {inviter}");
    }

    let flags = &details.eligibility;
    println!(
        "  respond: {}  meeting: {}  transfer: {}  invite: {}",
        flag(flags.are_response_actions_allowed),
        flag(flags.is_meeting_enabled && flags.has_meeting_link),
        flag(flags.is_transfer_allowed),
        flag(flags.is_invite_allowed),
    );

    for (kind, view) in &details.disabled {
        println!("  - {kind:?}: {}", view.message);
    }

    if details.feedback.attendee_count > 0 {
        if let Some(rating) = details.feedback.average_rating {
            println!("  average rating: {rating:.1}");
        }
        for (criterion, score) in &details.feedback.criterion_averages {
            println!("  {criterion}: {score:.1}/10");
        }
    }
}

fn render_outcome(outcome: &CommandOutcome) {
    println!(
        "  {}: {} -> {} (my response now {})",
        outcome.interview_id,
        outcome.command.label(),
        outcome.operation.label(),
        outcome.record.my_action.label()
    );
    if let Some(meeting) = &outcome.meeting {
        println!("    join at {}", meeting.join_url);
    }
}
