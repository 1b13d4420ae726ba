// Delimited-text (CSV) reader built on the csv crate
use crate::domain::error::IngestError;
use crate::domain::scalar::{Record, Scalar};
use crate::infrastructure::headers::unique_column_names;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Tried in order; ties go to the earlier one.
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b'\t', b'|', b';'];
const SNIFF_LINES: usize = 10;

/// Parsed table: column names in header order plus typed rows.
pub struct ParsedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

/// Reads a header row followed by data rows, typing each cell dynamically.
///
/// The delimiter is guessed from the first lines. Empty lines are skipped. Short rows omit the missing keys; fields past the
/// header are dropped.
pub fn read_delimited(content: &[u8]) -> Result<ParsedTable, IngestError> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let delimiter = guess_delimiter(content);
    tracing::debug!("Reading delimited text with {:?}", delimiter as char);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let headers = reader.headers().map_err(parse_failure)?.clone();
    if headers.is_empty() {
        return Err(IngestError::EmptyFile);
    }
    let columns = unique_column_names(headers.iter().map(str::to_string));

    let mut rows = Vec::new();
    let mut dropped_fields = 0usize;

    for result in reader.records() {
        let record = result.map_err(parse_failure)?;
        if record.len() == 1 && record.get(0).is_some_and(str::is_empty) {
            continue;
        }

        if record.len() > columns.len() {
            dropped_fields += record.len() - columns.len();
        }

        let row: Record = columns
            .iter()
            .zip(record.iter())
            .map(|(column, raw)| (column.clone(), Scalar::infer(raw)))
            .collect();
        rows.push(row);
    }

    if dropped_fields > 0 {
        tracing::warn!(
            "Dropped {} field(s) beyond the {} header column(s)",
            dropped_fields,
            columns.len()
        );
    }

    Ok(ParsedTable { columns, rows })
}

/// Picks the candidate whose field count is most consistent over the first
/// lines, among those averaging at least two fields per line. Falls back to comma.
fn guess_delimiter(content: &[u8]) -> u8 {
    let lines: Vec<&[u8]> = content
        .split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.is_empty())
        .take(SNIFF_LINES)
        .collect();

    // (delimiter, delta, average field count)
    let mut best: Option<(u8, usize, f64)> = None;

    for delimiter in CANDIDATE_DELIMITERS {
        let counts: Vec<usize> = lines.iter().map(|line| field_count(line, delimiter)).collect();
        if counts.is_empty() {
            break;
        }

        let average = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        if average < 2.0 {
            continue;
        }
        let delta: usize = counts.windows(2).map(|w| w[0].abs_diff(w[1])).sum();

        let better = match best {
            None => true,
            Some((_, best_delta, best_average)) => {
                delta < best_delta || (delta == best_delta && average > best_average)
            }
        };
        if better {
            best = Some((delimiter, delta, average));
        }
    }

    best.map(|(delimiter, _, _)| delimiter).unwrap_or(b',')
}

/// Fields on one line, ignoring delimiters inside double quotes.
fn field_count(line: &[u8], delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 1;
    for &b in line {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}

fn parse_failure(error: csv::Error) -> IngestError {
    IngestError::ParseFailure(error.to_string())
}
