// Domain layer - Datasets, dashboards, charts and the rules that relate them
pub mod chart;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod identity;
pub mod palette;
pub mod scalar;
