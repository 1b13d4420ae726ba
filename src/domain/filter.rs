// Equality filter evaluation over dataset rows
use super::scalar::{Filters, Record};

/// True when the record satisfies every non-blank filter.
///
/// Comparison is exact scalar equality: `1` (number) never matches `"1"` (text).
pub fn matches(record: &Record, filters: &Filters) -> bool {
    filters
        .iter()
        .filter(|(_, value)| !value.is_blank())
        .all(|(column, value)| record.get(column) == Some(value))
}

/// Order-preserving subsequence of `rows` that pass `filters`.
pub fn apply<'a>(rows: &'a [Record], filters: &Filters) -> Vec<&'a Record> {
    rows.iter().filter(|row| matches(row, filters)).collect()
}
