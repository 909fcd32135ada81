//! Averaging helpers shared by the aggregator and the summarizer
//!
//! Averages are reported to three decimal places. An empty input has no
//! average: callers get `None` and must carry it through, never a zero.

/// Number of decimal places kept in reported averages
pub const AVERAGE_DECIMALS: i32 = 3;

/// Round to [`AVERAGE_DECIMALS`] places, ties away from zero.
///
/// Values too large to scale carry no fractional digits and are returned as is.
pub fn round_average(value: f64) -> f64 {
    let scale = 10f64.powi(AVERAGE_DECIMALS);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

/// Arithmetic mean rounded to three decimals, `None` when `values` is empty
pub fn mean_rounded(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    let mean = if sum.is_finite() {
        sum / n
    } else {
        // Sum overflowed; scale each term first
        values.iter().map(|v| v / n).sum()
    };
    Some(round_average(mean))
}

/// Mean of the present values only; `None` when nothing is present
pub fn mean_of_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let present: Vec<f64> = values.into_iter().flatten().collect();
    mean_rounded(&present)
}

/// Parse a reaction time cell; anything that is not a finite number is `None`
pub fn parse_reaction_time(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
