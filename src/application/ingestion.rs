// Tabular ingestion - file bytes to a normalized dataset
use crate::domain::dataset::Dataset;
use crate::domain::error::IngestError;
use crate::infrastructure::delimited_reader::{read_delimited, ParsedTable};
use crate::infrastructure::spreadsheet_reader::read_first_sheet;
use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
}

impl SourceFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Result<Self, IngestError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "xlsx" | "xls" => Ok(SourceFormat::Spreadsheet),
            _ => Err(IngestError::UnsupportedFormat(extension)),
        }
    }
}

/// Pure transform from raw content to a dataset. Nothing is registered here.
pub fn ingest(file_name: &str, content: &[u8], format: SourceFormat) -> Result<Dataset, IngestError> {
    let ParsedTable { columns, rows } = match format {
        SourceFormat::Csv => read_delimited(content)?,
        SourceFormat::Spreadsheet => read_first_sheet(content)?,
    };

    Dataset::new(file_name.to_string(), columns, rows)
}

/// Asynchronous ingestion. Resolves exactly once per call; independent calls
/// may be in flight together.
#[async_trait]
pub trait Ingestor: Send + Sync {
    async fn ingest(&self, file_name: String, content: Bytes) -> Result<Dataset, IngestError>;
}

/// Runs parsing on the blocking thread pool so request handling is not stalled.
#[derive(Debug, Clone, Default)]
pub struct BlockingIngestor;

#[async_trait]
impl Ingestor for BlockingIngestor {
    async fn ingest(&self, file_name: String, content: Bytes) -> Result<Dataset, IngestError> {
        let format = SourceFormat::from_file_name(&file_name)?;

        tokio::task::spawn_blocking(move || ingest(&file_name, &content, format))
            .await
            .map_err(|e| IngestError::ParseFailure(format!("ingestion task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scalar::Scalar;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SourceFormat::from_file_name("a.csv"), Ok(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_file_name("Q3.Report.XLSX"), Ok(SourceFormat::Spreadsheet));
        assert_eq!(SourceFormat::from_file_name("old.xls"), Ok(SourceFormat::Spreadsheet));
        assert_eq!(
            SourceFormat::from_file_name("notes.txt"),
            Err(IngestError::UnsupportedFormat("txt".to_string()))
        );
        assert_eq!(
            SourceFormat::from_file_name("README"),
            Err(IngestError::UnsupportedFormat(String::new()))
        );
    }

    #[test]
    fn test_csv_round_trip() {
        let dataset = ingest("ab.csv", b"a,b\n1,x", SourceFormat::Csv).unwrap();
        assert_eq!(dataset.name(), "ab.csv");
        assert_eq!(dataset.columns(), ["a", "b"]);
        assert_eq!(dataset.rows()[0]["a"], Scalar::Number(1.0));
        assert_eq!(dataset.rows()[0]["b"], Scalar::from("x"));
    }

    #[test]
    fn test_non_comma_delimiters() {
        let dataset = ingest("eu.csv", b"region;sales\nEast;10\nWest;20", SourceFormat::Csv).unwrap();
        assert_eq!(dataset.columns(), ["region", "sales"]);
        assert_eq!(dataset.rows()[0]["sales"], Scalar::Number(10.0));

        let dataset = ingest("t.csv", b"a\tb\n1\t2", SourceFormat::Csv).unwrap();
        assert_eq!(dataset.columns(), ["a", "b"]);
    }

    #[test]
    fn test_header_only_is_empty_file() {
        let result = ingest("ab.csv", b"a,b\n", SourceFormat::Csv);
        assert_eq!(result, Err(IngestError::EmptyFile));
    }

    #[tokio::test]
    async fn test_blocking_ingestor_rejects_before_parsing() {
        let result = BlockingIngestor
            .ingest("data.json".to_string(), Bytes::from_static(b"{}"))
            .await;
        assert_eq!(result, Err(IngestError::UnsupportedFormat("json".to_string())));
    }

    #[tokio::test]
    async fn test_concurrent_ingestions_both_complete() {
        let ingestor = BlockingIngestor;
        let first = ingestor.ingest("one.csv".to_string(), Bytes::from_static(b"a\n1"));
        let second = ingestor.ingest("two.csv".to_string(), Bytes::from_static(b"b\n2"));
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.unwrap().name(), "one.csv");
        assert_eq!(second.unwrap().name(), "two.csv");
    }
}
