//! Per-participant summary of bootstrap results
//!
//! For every distance and condition the summary holds the mean of the
//! resampled values across all iterations. Iterations that drew a record with
//! no trials for a condition carry no value and do not count toward the mean.

use crate::bootstrap::{BootstrapIteration, Condition};
use crate::pairs::{self, MAX_DISTANCE};
use crate::stats::mean_of_present;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Field name of the participant identifier in cohort output
pub const PARTICIPANT_FIELD: &str = "partNo";

/// Bootstrap averages of one participant
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantSummary {
    pub participant_id: String,
    congruent: [Option<f64>; MAX_DISTANCE as usize],
    incongruent: [Option<f64>; MAX_DISTANCE as usize],
}

impl ParticipantSummary {
    /// Averaged value for `distance` (1-based) and `condition`
    pub fn value(&self, condition: Condition, distance: u8) -> Option<f64> {
        let index = usize::from(distance).checked_sub(1)?;
        let values = match condition {
            Condition::Congruent => &self.congruent,
            Condition::Incongruent => &self.incongruent,
        };
        values.get(index).copied().flatten()
    }

    /// Summary fields in output order: `comp_1, incomp_1, …, comp_8, incomp_8`
    pub fn fields(&self) -> Vec<(String, Option<f64>)> {
        pairs::distances()
            .flat_map(|distance| {
                Condition::ALL.into_iter().map(move |condition| {
                    (
                        field_name(condition, distance),
                        self.value(condition, distance),
                    )
                })
            })
            .collect()
    }
}

/// Output column name for one distance and condition, e.g. `incomp_4`
pub fn field_name(condition: Condition, distance: u8) -> String {
    format!("{}_{}", condition.summary_prefix(), distance)
}

/// All output column names, participant id first
pub fn column_names() -> Vec<String> {
    std::iter::once(PARTICIPANT_FIELD.to_string())
        .chain(pairs::distances().flat_map(|distance| {
            Condition::ALL
                .into_iter()
                .map(move |condition| field_name(condition, distance))
        }))
        .collect()
}

impl Serialize for ParticipantSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.fields();
        let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
        map.serialize_entry(PARTICIPANT_FIELD, &self.participant_id)?;
        for (name, value) in &fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Summarize the bootstrap iterations of one participant
pub fn summarize(
    participant_id: impl Into<String>,
    iterations: &[BootstrapIteration<'_>],
) -> ParticipantSummary {
    let mean_at = |condition: Condition, distance: u8| {
        mean_of_present(
            iterations
                .iter()
                .flat_map(|iteration| iteration.samples(condition))
                .filter(|sample| sample.distance == distance)
                .map(|sample| sample.value),
        )
    };

    let mut congruent = [None; MAX_DISTANCE as usize];
    let mut incongruent = [None; MAX_DISTANCE as usize];
    for (slot, distance) in pairs::distances().enumerate() {
        congruent[slot] = mean_at(Condition::Congruent, distance);
        incongruent[slot] = mean_at(Condition::Incongruent, distance);
    }

    ParticipantSummary {
        participant_id: participant_id.into(),
        congruent,
        incongruent,
    }
}
