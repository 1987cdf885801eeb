use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::AttendeeEvaluation;

/// Aggregated panel feedback for the vetting report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackSummary {
    pub attendee_count: usize,
    pub responses: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f32>,
    pub criterion_averages: BTreeMap<String, f32>,
}

impl FeedbackSummary {
    pub fn from_attendees(attendees: &[AttendeeEvaluation]) -> Self {
        let mut responses = BTreeMap::new();
        for attendee in attendees {
            *responses
                .entry(attendee.action.label().to_string())
                .or_insert(0) += 1;
        }

        let ratings: Vec<f32> = attendees.iter().filter_map(|a| a.rating).collect();
        let average_rating = mean(&ratings);

        let mut per_criterion: BTreeMap<String, Vec<f32>> = BTreeMap::new();
        for scores in attendees.iter().filter_map(|a| a.note.as_ref()) {
            for (criterion, score) in scores {
                per_criterion
                    .entry(criterion.clone())
                    .or_default()
                    .push(*score);
            }
        }

        let criterion_averages = per_criterion
            .into_iter()
            .filter_map(|(criterion, scores)| mean(&scores).map(|avg| (criterion, avg)))
            .collect();

        Self {
            attendee_count: attendees.len(),
            responses,
            average_rating,
            criterion_averages,
        }
    }
}

fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f32>() / values.len() as f32)
    }
}
