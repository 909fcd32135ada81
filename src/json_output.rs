//! JSON output format for cohort summaries
//!
//! The cohort file is a pretty-printed array with one object per participant.
//! Absent averages serialize as `null`.

use crate::summary::ParticipantSummary;

/// Serialize the cohort summaries as a pretty-printed JSON array
pub fn cohort_to_json(summaries: &[ParticipantSummary]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summaries)
}
