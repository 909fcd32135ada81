//! Reaction time aggregation per distance and stimulus pair
//!
//! Turns the raw trial rows of one participant into one [`DistancePairRecord`]
//! per (distance, pair), holding the congruent and incongruent reaction times
//! and their rounded averages.

use crate::pairs::{self, PairKey};
use crate::stats::mean_rounded;

/// One observed trial
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRow {
    /// Pair label as written in the trial log, e.g. `"3_5"`
    pub pair_label: String,
    /// Reaction time in milliseconds; `None` when the cell was not numeric
    pub reaction_time: Option<f64>,
}

impl TrialRow {
    pub fn new(pair_label: impl Into<String>, reaction_time: Option<f64>) -> Self {
        Self {
            pair_label: pair_label.into(),
            reaction_time,
        }
    }
}

/// Reaction times of one stimulus pair at one distance
#[derive(Debug, Clone, PartialEq)]
pub struct DistancePairRecord {
    pub distance: u8,
    /// Forward and reverse labels joined, e.g. `"1_3 && 3_1"`
    pub pair_descriptor: String,
    pub congruent_rts: Vec<f64>,
    pub incongruent_rts: Vec<f64>,
    pub congruent_average: Option<f64>,
    pub incongruent_average: Option<f64>,
}

impl DistancePairRecord {
    /// Collect the reaction times of `pair` from `rows` and compute averages
    pub fn from_rows(pair: &PairKey, rows: &[TrialRow]) -> Self {
        let mut congruent_rts = Vec::new();
        let mut incongruent_rts = Vec::new();

        for row in rows {
            let Some(rt) = row.reaction_time else {
                continue;
            };
            if row.pair_label == pair.forward_label() {
                congruent_rts.push(rt);
            } else if row.pair_label == pair.reverse_label() {
                incongruent_rts.push(rt);
            }
        }

        Self {
            distance: pair.distance(),
            pair_descriptor: pair.descriptor(),
            congruent_average: mean_rounded(&congruent_rts),
            incongruent_average: mean_rounded(&incongruent_rts),
            congruent_rts,
            incongruent_rts,
        }
    }

    /// Forward (congruent) half of the pair descriptor
    pub fn forward_half(&self) -> &str {
        self.descriptor_halves().0
    }

    /// Reverse (incongruent) half of the pair descriptor
    pub fn reverse_half(&self) -> &str {
        self.descriptor_halves().1
    }

    fn descriptor_halves(&self) -> (&str, &str) {
        self.pair_descriptor
            .split_once(pairs::DESCRIPTOR_SEPARATOR)
            .unwrap_or((self.pair_descriptor.as_str(), ""))
    }

    /// Whether any numeric trial backs this record
    pub fn has_trials(&self) -> bool {
        !self.congruent_rts.is_empty() || !self.incongruent_rts.is_empty()
    }
}

/// Aggregate trial rows into records for every distance and pair.
///
/// Records are ordered by distance, then by the lower stimulus index. Rows with
/// labels that match no pair are ignored.
pub fn aggregate(rows: &[TrialRow]) -> Vec<DistancePairRecord> {
    let records: Vec<DistancePairRecord> = pairs::distances()
        .flat_map(pairs::generate)
        .map(|pair| DistancePairRecord::from_rows(&pair, rows))
        .collect();

    tracing::debug!(
        rows = rows.len(),
        records = records.len(),
        with_trials = records.iter().filter(|r| r.has_trials()).count(),
        "aggregated reaction times"
    );

    records
}
