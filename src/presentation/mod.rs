// Presentation layer - HTTP surface over the session
pub mod app_state;
pub mod chart_spec;
pub mod handlers;
