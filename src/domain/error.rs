// Error taxonomy shared by the application layer
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IngestError {
    #[error("file contains no data rows")]
    EmptyFile,
    #[error("unsupported file format: {0:?}")]
    UnsupportedFormat(String),
    #[error("failed to parse file: {0}")]
    ParseFailure(String),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    #[error("dataset not found")]
    DatasetNotFound,
    #[error("dashboard not found")]
    DashboardNotFound,
    #[error("chart not found")]
    ChartNotFound,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("no active dataset selected")]
    NoActiveDataset,
    #[error("no active dashboard selected")]
    NoActiveDashboard,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaletteError {
    #[error("palette {0:?} has no colors")]
    Empty(String),
}
