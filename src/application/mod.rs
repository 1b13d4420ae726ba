// Application layer - Use cases over datasets, dashboards and charts
pub mod chart_builder;
pub mod dashboard_registry;
pub mod dataset_registry;
pub mod ingestion;
pub mod render;
pub mod selection;
pub mod session;
