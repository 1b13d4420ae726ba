// Spreadsheet reader (xlsx/xls) built on calamine
use crate::domain::error::IngestError;
use crate::domain::scalar::{Record, Scalar};
use crate::infrastructure::delimited_reader::ParsedTable;
use crate::infrastructure::headers::unique_column_names;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

const EMPTY_HEADER: &str = "__EMPTY";

/// Reads the first sheet. Its first row names the columns; empty cells become
/// absent keys and rows without any value are skipped.
pub fn read_first_sheet(content: &[u8]) -> Result<ParsedTable, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(content))
        .map_err(|e| IngestError::ParseFailure(e.to_string()))?;

    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Err(IngestError::EmptyFile);
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::ParseFailure(e.to_string()))?;

    let mut cells = range.rows();
    let Some(header_row) = cells.next() else {
        return Err(IngestError::EmptyFile);
    };
    let headers = unique_column_names(header_row.iter().map(header_name));

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::new();

    for row in cells {
        let mut record = Record::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            let Some(value) = cell_value(cell) else {
                continue;
            };
            if !columns.contains(header) {
                columns.push(header.clone());
            }
            record.insert(header.clone(), value);
        }

        if !record.is_empty() {
            rows.push(record);
        }
    }

    tracing::debug!(
        "Read {} row(s) from sheet {:?}",
        rows.len(),
        sheet_name
    );

    Ok(ParsedTable { columns, rows })
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::Empty => EMPTY_HEADER.to_string(),
        other => other.to_string(),
    }
}

/// Typed value for a cell, or `None` when the cell is empty.
fn cell_value(cell: &Data) -> Option<Scalar> {
    match cell {
        Data::Empty => None,
        Data::Int(i) => Some(Scalar::Number(*i as f64)),
        Data::Float(f) => Some(Scalar::Number(*f)),
        Data::Bool(b) => Some(Scalar::Bool(*b)),
        Data::String(s) => Some(Scalar::Text(s.clone())),
        Data::DateTime(dt) => Some(Scalar::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Scalar::Text(s.clone())),
        Data::Error(e) => Some(Scalar::Text(e.to_string())),
    }
}
