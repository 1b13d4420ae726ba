// Chart configuration builder - snapshots the selection into a new chart
use crate::application::selection::Selection;
use crate::domain::chart::{Chart, ChartKind, Position, Size};
use crate::domain::error::PreconditionError;
use crate::domain::identity::{ChartId, DashboardId};

/// A chart ready to be appended to its target dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltChart {
    pub dashboard_id: DashboardId,
    pub chart: Chart,
}

/// Builds a chart from the current selection.
///
/// Requires an active dataset and an active dashboard. Columns and filters are
/// copied, so later selection changes never reach the returned chart.
pub fn build_chart(kind: ChartKind, selection: &Selection) -> Result<BuiltChart, PreconditionError> {
    let dataset_id = selection.dataset.ok_or(PreconditionError::NoActiveDataset)?;
    let dashboard_id = selection
        .dashboard
        .ok_or(PreconditionError::NoActiveDashboard)?;

    let chart = Chart {
        id: ChartId::new(),
        kind,
        dataset_id,
        columns: selection.columns.clone(),
        filters: selection.filters.clone(),
        color_scheme: selection.color_scheme.clone(),
        title: format!("{} chart", kind),
        size: Size::default(),
        position: Position::default(),
    };

    Ok(BuiltChart { dashboard_id, chart })
}
