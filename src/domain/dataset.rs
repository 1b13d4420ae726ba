// Dataset domain model
use super::error::IngestError;
use super::identity::DatasetId;
use super::scalar::Record;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A named, normalized table. Immutable once built; only the registry may re-key it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    id: DatasetId,
    name: String,
    columns: Vec<String>,
    rows: Vec<Record>,
    created_at: DateTime<Utc>,
}

impl Dataset {
    /// Builds a dataset from parsed content.
    ///
    /// Fails with [`IngestError::EmptyFile`] when there are no rows or no columns.
    /// Keys outside `columns` are dropped so every record stays within the column set.
    pub fn new(name: String, columns: Vec<String>, mut rows: Vec<Record>) -> Result<Self, IngestError> {
        if rows.is_empty() || columns.is_empty() {
            return Err(IngestError::EmptyFile);
        }

        for row in &mut rows {
            row.retain(|key, _| columns.contains(key));
        }

        Ok(Self {
            id: DatasetId::new(),
            name,
            columns,
            rows,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> DatasetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub(crate) fn reassign_id(&mut self) {
        self.id = DatasetId::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scalar::Scalar;

    fn record(pairs: &[(&str, Scalar)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_rejects_empty_rows() {
        let result = Dataset::new("a.csv".to_string(), vec!["a".to_string()], vec![]);
        assert_eq!(result, Err(IngestError::EmptyFile));
    }

    #[test]
    fn test_rejects_empty_columns() {
        let result = Dataset::new("a.csv".to_string(), vec![], vec![Record::new()]);
        assert_eq!(result, Err(IngestError::EmptyFile));
    }

    #[test]
    fn test_drops_keys_outside_columns() {
        let rows = vec![record(&[("a", Scalar::Number(1.0)), ("zzz", Scalar::Null)])];
        let dataset = Dataset::new("a.csv".to_string(), vec!["a".to_string()], rows).unwrap();

        assert_eq!(dataset.rows()[0], record(&[("a", Scalar::Number(1.0))]));
        assert!(dataset.has_column("a"));
        assert!(!dataset.has_column("zzz"));
    }
}
