// Session context - owns the registries and the selection for one user session
use crate::application::chart_builder::build_chart;
use crate::application::dashboard_registry::DashboardRegistry;
use crate::application::dataset_registry::DatasetRegistry;
use crate::application::render::{resolve, ResolvedChart};
use crate::application::selection::Selection;
use crate::domain::chart::{Chart, ChartKind, ColumnRole};
use crate::domain::dashboard::Dashboard;
use crate::domain::dataset::Dataset;
use crate::domain::error::{LookupError, PreconditionError};
use crate::domain::identity::{ChartId, DashboardId, DatasetId};
use crate::domain::palette::PaletteSet;
use crate::domain::scalar::{Filters, Scalar};

/// All mutable state lives here and changes only through these methods.
#[derive(Debug, Default)]
pub struct Session {
    datasets: DatasetRegistry,
    dashboards: DashboardRegistry,
    palettes: PaletteSet,
    selection: Selection,
}

impl Session {
    pub fn new(palettes: PaletteSet) -> Self {
        Self {
            palettes,
            ..Self::default()
        }
    }

    // Datasets

    /// Registers a freshly ingested dataset and makes it the active one.
    pub fn register_dataset(&mut self, dataset: Dataset) -> DatasetId {
        let id = self.datasets.register(dataset);
        self.selection.dataset = Some(id);
        id
    }

    pub fn datasets(&self) -> &[Dataset] {
        self.datasets.list()
    }

    pub fn dataset(&self, id: DatasetId) -> Result<&Dataset, LookupError> {
        self.datasets.get(id).ok_or(LookupError::DatasetNotFound)
    }

    /// Removes a dataset. Charts that reference it stay in place and resolve
    /// as unresolved from now on.
    pub fn remove_dataset(&mut self, id: DatasetId) -> Option<Dataset> {
        let removed = self.datasets.remove(id)?;

        if self.selection.dataset == Some(id) {
            self.selection.dataset = None;
        }

        let orphaned = self.dashboards.charts_using(id);
        if orphaned > 0 {
            tracing::warn!(
                "Removed dataset {} still referenced by {} chart(s)",
                id,
                orphaned
            );
        }
        Some(removed)
    }

    // Dashboards

    /// Creates a dashboard and makes it the active one.
    pub fn create_dashboard(&mut self, name: Option<String>) -> &Dashboard {
        let id = self.dashboards.create(name).id;
        self.selection.dashboard = Some(id);
        &self.dashboards.list()[self.dashboards.len() - 1]
    }

    pub fn dashboards(&self) -> &[Dashboard] {
        self.dashboards.list()
    }

    pub fn dashboard(&self, id: DashboardId) -> Result<&Dashboard, LookupError> {
        self.dashboards.get(id).ok_or(LookupError::DashboardNotFound)
    }

    pub fn remove_dashboard(&mut self, id: DashboardId) -> Option<Dashboard> {
        let removed = self.dashboards.remove(id)?;
        if self.selection.dashboard == Some(id) {
            self.selection.dashboard = None;
        }
        Some(removed)
    }

    // Selection

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn select_dataset(&mut self, id: DatasetId) -> Result<(), LookupError> {
        self.dataset(id)?;
        self.selection.dataset = Some(id);
        Ok(())
    }

    pub fn select_dashboard(&mut self, id: DashboardId) -> Result<(), LookupError> {
        self.dashboard(id)?;
        self.selection.dashboard = Some(id);
        Ok(())
    }

    pub fn set_column(&mut self, role: ColumnRole, column: Option<String>) {
        self.selection.set_column(role, column);
    }

    pub fn set_filter(&mut self, column: impl Into<String>, value: Scalar) {
        self.selection.set_filter(column, value);
    }

    /// Unknown palette ids are accepted; they fall back to the default at render time.
    pub fn set_color_scheme(&mut self, scheme_id: impl Into<String>) {
        let scheme_id = scheme_id.into();
        if !self.palettes.contains(&scheme_id) {
            tracing::debug!("Unknown palette {:?}, charts will use the default", scheme_id);
        }
        self.selection.color_scheme = scheme_id;
    }

    /// Replaces every filter at once.
    pub fn set_filters(&mut self, filters: Filters) {
        self.selection.filters.clear();
        for (column, value) in filters {
            self.set_filter(column, value);
        }
    }

    pub fn clear_columns_and_filters(&mut self) {
        self.selection.clear_columns_and_filters();
    }

    // Charts

    /// Snapshots the selection into a new chart on the active dashboard.
    pub fn add_chart(&mut self, kind: ChartKind) -> Result<&Chart, PreconditionError> {
        let built = build_chart(kind, &self.selection)?;
        let (dashboard_id, chart_id) = (built.dashboard_id, built.chart.id);

        if !self.dashboards.add_chart(dashboard_id, built.chart) {
            return Err(PreconditionError::NoActiveDashboard);
        }
        self.chart(dashboard_id, chart_id)
            .map_err(|_| PreconditionError::NoActiveDashboard)
    }

    pub fn remove_chart(&mut self, dashboard_id: DashboardId, chart_id: ChartId) -> Option<Chart> {
        self.dashboards.remove_chart(dashboard_id, chart_id)
    }

    pub fn chart(&self, dashboard_id: DashboardId, chart_id: ChartId) -> Result<&Chart, LookupError> {
        self.dashboard(dashboard_id)?
            .chart(chart_id)
            .ok_or(LookupError::ChartNotFound)
    }

    /// Rows and palette for a chart. A chart whose dataset is gone resolves to
    /// no rows and an unresolved state rather than an error.
    pub fn resolve_chart(
        &self,
        dashboard_id: DashboardId,
        chart_id: ChartId,
    ) -> Result<ResolvedChart<'_>, LookupError> {
        let chart = self.chart(dashboard_id, chart_id)?;
        Ok(resolve(chart, &self.datasets, &self.palettes))
    }

    // Palettes

    pub fn palettes(&self) -> &PaletteSet {
        &self.palettes
    }
}
