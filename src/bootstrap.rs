//! Bootstrap resampling over distance pair records
//!
//! Each iteration sweeps distances 1..=8 in ascending order and draws one
//! record per distance, uniformly among the records at that distance. A single
//! [`PairDraw`] yields both the congruent and the incongruent sample, so the two
//! halves of one physical pair always travel together.
//!
//! The random source is supplied by the caller. Production runs pass an
//! OS-seeded [`rand::rngs::StdRng`]; tests pass a seeded one.

use crate::aggregate::DistancePairRecord;
use crate::pairs;
use rand::seq::SliceRandom;
use rand::Rng;

/// Default number of bootstrap iterations
pub const DEFAULT_ITERATIONS: usize = 5000;

/// Trial direction within a stimulus pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Congruent,
    Incongruent,
}

impl Condition {
    pub const ALL: [Condition; 2] = [Condition::Congruent, Condition::Incongruent];

    /// Lowercase name used in file and directory names
    pub fn label(self) -> &'static str {
        match self {
            Condition::Congruent => "congruent",
            Condition::Incongruent => "incongruent",
        }
    }

    /// Column name of the source reaction times in detail output
    pub fn rt_column(self) -> &'static str {
        match self {
            Condition::Congruent => "congruent_RT",
            Condition::Incongruent => "incongruent_RT",
        }
    }

    /// Prefix of the per-distance summary fields (`comp_3`, `incomp_3`)
    pub fn summary_prefix(self) -> &'static str {
        match self {
            Condition::Congruent => "comp",
            Condition::Incongruent => "incomp",
        }
    }
}

/// One resampled value for one distance in one iteration
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapSample<'a> {
    pub distance: u8,
    /// Half of the pair descriptor matching the sample's condition
    pub pair_half: &'a str,
    /// Reaction times the drawn average was computed from
    pub source_rts: &'a [f64],
    /// Precomputed average of the drawn record, copied verbatim
    pub value: Option<f64>,
}

/// A single draw of one physical pair
#[derive(Debug, Clone, Copy)]
pub struct PairDraw<'a> {
    record: &'a DistancePairRecord,
}

impl<'a> PairDraw<'a> {
    /// Draw uniformly among `candidates`; `None` when there are none
    pub fn choose<R: Rng + ?Sized>(
        candidates: &[&'a DistancePairRecord],
        rng: &mut R,
    ) -> Option<Self> {
        candidates.choose(rng).map(|&record| Self { record })
    }

    pub fn sample(&self, condition: Condition) -> BootstrapSample<'a> {
        let record = self.record;
        match condition {
            Condition::Congruent => BootstrapSample {
                distance: record.distance,
                pair_half: record.forward_half(),
                source_rts: &record.congruent_rts,
                value: record.congruent_average,
            },
            Condition::Incongruent => BootstrapSample {
                distance: record.distance,
                pair_half: record.reverse_half(),
                source_rts: &record.incongruent_rts,
                value: record.incongruent_average,
            },
        }
    }
}

/// Samples produced by one sweep over all distances
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootstrapIteration<'a> {
    pub congruent: Vec<BootstrapSample<'a>>,
    pub incongruent: Vec<BootstrapSample<'a>>,
}

impl<'a> BootstrapIteration<'a> {
    pub fn samples(&self, condition: Condition) -> &[BootstrapSample<'a>] {
        match condition {
            Condition::Congruent => &self.congruent,
            Condition::Incongruent => &self.incongruent,
        }
    }

    fn push(&mut self, draw: PairDraw<'a>) {
        self.congruent.push(draw.sample(Condition::Congruent));
        self.incongruent.push(draw.sample(Condition::Incongruent));
    }
}

/// Bootstrap resampler with a fixed iteration count
#[derive(Debug, Clone, Copy)]
pub struct BootstrapEngine {
    iterations: usize,
}

impl Default for BootstrapEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl BootstrapEngine {
    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run all iterations over `records`.
    ///
    /// The result has exactly `iterations` entries, in iteration order. A
    /// distance with no records is skipped in every iteration.
    pub fn run<'a, R: Rng + ?Sized>(
        &self,
        records: &'a [DistancePairRecord],
        rng: &mut R,
    ) -> Vec<BootstrapIteration<'a>> {
        let candidates: Vec<Vec<&'a DistancePairRecord>> = pairs::distances()
            .map(|distance| {
                records
                    .iter()
                    .filter(|record| record.distance == distance)
                    .collect()
            })
            .collect();

        for (distance, group) in pairs::distances().zip(&candidates) {
            if group.is_empty() {
                tracing::debug!(distance, "no pair records, distance skipped");
            }
        }

        let results: Vec<BootstrapIteration<'a>> = (0..self.iterations)
            .map(|_| {
                let mut iteration = BootstrapIteration::default();
                for group in &candidates {
                    if let Some(draw) = PairDraw::choose(group, rng) {
                        iteration.push(draw);
                    }
                }
                iteration
            })
            .collect();

        tracing::debug!(
            iterations = self.iterations,
            records = records.len(),
            "bootstrap resampling complete"
        );

        results
    }
}
