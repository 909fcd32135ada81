//! CSV output for bootstrap detail and cohort summaries
//!
//! Absent values are written as empty cells so they stay distinguishable from
//! a legitimate zero.

use crate::bootstrap::{BootstrapIteration, Condition};
use crate::summary::{self, ParticipantSummary};

/// Escape CSV field (handle commas, quotes, newlines)
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Format an optional number; `None` becomes an empty cell
pub fn format_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn format_rt_list(rts: &[f64]) -> String {
    let joined = rts
        .iter()
        .map(|rt| rt.to_string())
        .collect::<Vec<_>>()
        .join(",");
    escape_field(&joined)
}

/// Flattened bootstrap samples of one participant for one condition
#[derive(Debug)]
pub struct DetailCsvOutput<'r, 'a> {
    condition: Condition,
    iterations: &'r [BootstrapIteration<'a>],
}

impl<'r, 'a> DetailCsvOutput<'r, 'a> {
    pub fn new(condition: Condition, iterations: &'r [BootstrapIteration<'a>]) -> Self {
        Self {
            condition,
            iterations,
        }
    }

    fn header(&self) -> String {
        ["iteration", "distance", "pair", self.condition.rt_column(), "value"].join(",")
    }

    /// Generate CSV output as string, one row per sample in iteration order
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.header());
        output.push('\n');

        for (index, iteration) in self.iterations.iter().enumerate() {
            for sample in iteration.samples(self.condition) {
                let fields = [
                    index.to_string(),
                    sample.distance.to_string(),
                    escape_field(sample.pair_half),
                    format_rt_list(sample.source_rts),
                    format_value(sample.value),
                ];
                output.push_str(&fields.join(","));
                output.push('\n');
            }
        }

        output
    }
}

/// Cohort summary table, one row per participant
#[derive(Debug, Default)]
pub struct SummaryCsvOutput {
    rows: Vec<ParticipantSummary>,
}

impl SummaryCsvOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_summary(&mut self, summary: ParticipantSummary) {
        self.rows.push(summary);
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = summary::column_names().join(",");
        output.push('\n');

        for row in &self.rows {
            let mut fields = vec![escape_field(&row.participant_id)];
            fields.extend(row.fields().into_iter().map(|(_, v)| format_value(v)));
            output.push_str(&fields.join(","));
            output.push('\n');
        }

        output
    }
}

impl<'s> FromIterator<&'s ParticipantSummary> for SummaryCsvOutput {
    fn from_iter<I: IntoIterator<Item = &'s ParticipantSummary>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, TrialRow};
    use crate::bootstrap::BootstrapEngine;
    use crate::summary::summarize;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_escape_field_simple() {
        assert_eq!(escape_field("1_2"), "1_2");
    }

    #[test]
    fn test_escape_field_with_comma() {
        assert_eq!(escape_field("500,600"), "\"500,600\"");
    }

    #[test]
    fn test_escape_field_with_quote() {
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(512.25)), "512.25");
        assert_eq!(format_value(Some(0.0)), "0");
        assert_eq!(format_value(None), "");
    }

    #[test]
    fn test_detail_csv() {
        let records = vec![aggregate(&[
            TrialRow::new("1_2", Some(500.0)),
            TrialRow::new("1_2", Some(520.0)),
            TrialRow::new("2_1", Some(600.0)),
        ])
        .remove(0)];
        let mut rng = StdRng::seed_from_u64(21);
        let iterations = BootstrapEngine::new(2).run(&records, &mut rng);

        let congruent = DetailCsvOutput::new(Condition::Congruent, &iterations).to_csv();
        assert_eq!(
            congruent,
            "iteration,distance,pair,congruent_RT,value\n\
             0,1,1_2,\"500,520\",510\n\
             1,1,1_2,\"500,520\",510\n"
        );

        let incongruent = DetailCsvOutput::new(Condition::Incongruent, &iterations).to_csv();
        assert!(incongruent.starts_with("iteration,distance,pair,incongruent_RT,value\n"));
        assert!(incongruent.contains("0,1,2_1,600,600\n"));
    }

    #[test]
    fn test_detail_csv_absent_value() {
        let records = vec![aggregate(&[TrialRow::new("2_1", Some(600.0))]).remove(0)];
        let mut rng = StdRng::seed_from_u64(22);
        let iterations = BootstrapEngine::new(1).run(&records, &mut rng);

        let csv = DetailCsvOutput::new(Condition::Congruent, &iterations).to_csv();
        assert!(csv.ends_with("0,1,1_2,,\n"));
    }

    #[test]
    fn test_summary_csv() {
        let records = vec![aggregate(&[
            TrialRow::new("1_2", Some(500.0)),
            TrialRow::new("2_1", Some(600.0)),
        ])
        .remove(0)];
        let mut rng = StdRng::seed_from_u64(23);
        let iterations = BootstrapEngine::new(1).run(&records, &mut rng);

        let mut output = SummaryCsvOutput::new();
        output.add_summary(summarize("P01", &iterations));
        let csv = output.to_csv();

        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("partNo,comp_1,incomp_1,comp_2"));
        assert!(header.ends_with("comp_8,incomp_8"));
        assert_eq!(lines.next().unwrap(), "P01,500,600,,,,,,,,,,,,,,");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_summary_csv_empty() {
        let csv = SummaryCsvOutput::new().to_csv();
        assert_eq!(csv.lines().count(), 1);
    }
}
