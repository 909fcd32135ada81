//! Participant trial log loading
//!
//! A trial log is a CSV file with a header row. Only the `pairs` and `RT`
//! columns are read; any other columns are ignored. Blank lines are skipped.
//!
//! # Example file content
//! ```csv
//! trial,pairs,RT
//! 1,1_2,512.3
//! 2,2_1,601
//! 3,4_6,timeout
//! ```
//!
//! Cells in the `RT` column that are not finite numbers load as `None` and are
//! left out of every average downstream.

use crate::aggregate::TrialRow;
use crate::error::InputError;
use crate::stats::parse_reaction_time;
use std::path::Path;

/// Column holding the pair label
pub const PAIR_COLUMN: &str = "pairs";

/// Column holding the reaction time in milliseconds
pub const RT_COLUMN: &str = "RT";

/// Load and parse a trial log from disk
pub fn load_trials(path: &Path) -> Result<Vec<TrialRow>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_trials(&content)
}

/// Parse trial log content
pub fn parse_trials(content: &str) -> Result<Vec<TrialRow>, InputError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = split_records(content)?.into_iter();

    let header = records.next().ok_or(InputError::MissingHeader)?;
    let column = |name: &'static str| {
        header
            .iter()
            .position(|field| field.trim() == name)
            .ok_or(InputError::MissingColumn(name))
    };
    let pair_idx = column(PAIR_COLUMN)?;
    let rt_idx = column(RT_COLUMN)?;

    let mut rows = Vec::new();
    for fields in records {
        let label = fields.get(pair_idx).map(|f| f.trim()).unwrap_or_default();
        let reaction_time = fields.get(rt_idx).and_then(|f| parse_reaction_time(f));
        rows.push(TrialRow::new(label, reaction_time));
    }

    let non_numeric = rows.iter().filter(|r| r.reaction_time.is_none()).count();
    if non_numeric > 0 {
        tracing::debug!(non_numeric, "rows without a numeric RT left out of averages");
    }

    Ok(rows)
}

/// Split CSV content into records of fields.
///
/// Quoted fields may span lines. Blank records are skipped. An unterminated
/// quote is reported at the line its record starts on.
fn split_records(content: &str) -> Result<Vec<Vec<String>>, InputError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ('"', false) if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ('\n', true) => {
                line += 1;
                field.push('\n');
            }
            ('\n', false) => {
                fields.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            ('\r', false) => {}
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(InputError::UnterminatedQuote { line: record_line });
    }
    fields.push(field);
    push_record(&mut records, fields);
    Ok(records)
}

fn push_record(records: &mut Vec<Vec<String>>, fields: Vec<String>) {
    let blank = fields.len() == 1 && fields[0].trim().is_empty();
    if !blank {
        records.push(fields);
    }
}
