//! Stimulus pair generation
//!
//! Stimuli are numbered 1..=9. A pair at distance `d` joins stimulus `i` with
//! stimulus `i + d`; the forward label `"i_{i+d}"` identifies the congruent
//! direction and the reverse label `"{i+d}_i"` the incongruent one.

/// Number of stimulus positions
pub const STIMULUS_COUNT: u8 = 9;

/// Largest distance between two stimuli
pub const MAX_DISTANCE: u8 = STIMULUS_COUNT - 1;

/// Separator between the two halves of a pair descriptor
pub const DESCRIPTOR_SEPARATOR: &str = " && ";

/// All distances in ascending order
pub fn distances() -> impl Iterator<Item = u8> {
    1..=MAX_DISTANCE
}

/// One stimulus pair at a fixed distance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairKey {
    pub low: u8,
    pub high: u8,
    forward: String,
    reverse: String,
}

impl PairKey {
    fn new(low: u8, high: u8) -> Self {
        Self {
            low,
            high,
            forward: format!("{}_{}", low, high),
            reverse: format!("{}_{}", high, low),
        }
    }

    pub fn distance(&self) -> u8 {
        self.high - self.low
    }

    /// Trial label of the congruent direction
    pub fn forward_label(&self) -> &str {
        &self.forward
    }

    /// Trial label of the incongruent direction
    pub fn reverse_label(&self) -> &str {
        &self.reverse
    }

    /// Combined label, e.g. `"1_3 && 3_1"`
    pub fn descriptor(&self) -> String {
        format!("{}{}{}", self.forward, DESCRIPTOR_SEPARATOR, self.reverse)
    }
}

/// Generate every pair at the given distance, ordered by the lower stimulus.
///
/// Distances outside `1..=MAX_DISTANCE` yield no pairs.
pub fn generate(distance: u8) -> Vec<PairKey> {
    if distance == 0 || distance > MAX_DISTANCE {
        return Vec::new();
    }

    (1..=STIMULUS_COUNT - distance)
        .map(|low| PairKey::new(low, low + distance))
        .collect()
}
