// Dashboard registry - owns dashboards and their ordered charts
use crate::domain::chart::Chart;
use crate::domain::dashboard::Dashboard;
use crate::domain::identity::{ChartId, DashboardId, DatasetId};

#[derive(Debug, Default)]
pub struct DashboardRegistry {
    dashboards: Vec<Dashboard>,
}

impl DashboardRegistry {
    /// Creates a dashboard. Without a name it is called "Dashboard N", where N
    /// is one more than the number of dashboards that exist right now.
    pub fn create(&mut self, name: Option<String>) -> &Dashboard {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Dashboard {}", self.dashboards.len() + 1));

        let dashboard = Dashboard::new(name);
        tracing::info!("Created dashboard {} ({:?})", dashboard.id, dashboard.name);
        self.dashboards.push(dashboard);
        &self.dashboards[self.dashboards.len() - 1]
    }

    pub fn get(&self, id: DashboardId) -> Option<&Dashboard> {
        self.dashboards.iter().find(|d| d.id == id)
    }

    pub fn list(&self) -> &[Dashboard] {
        &self.dashboards
    }

    pub fn remove(&mut self, id: DashboardId) -> Option<Dashboard> {
        let Some(index) = self.dashboards.iter().position(|d| d.id == id) else {
            tracing::debug!("Ignoring removal of unknown dashboard {}", id);
            return None;
        };
        Some(self.dashboards.remove(index))
    }

    /// Appends to the dashboard's charts. Returns false, changing nothing, when
    /// the dashboard does not exist.
    pub fn add_chart(&mut self, dashboard_id: DashboardId, chart: Chart) -> bool {
        let Some(dashboard) = self.get_mut(dashboard_id) else {
            tracing::debug!("Ignoring chart for unknown dashboard {}", dashboard_id);
            return false;
        };

        tracing::info!(
            "Added {} chart {} to dashboard {}",
            chart.kind,
            chart.id,
            dashboard_id
        );
        dashboard.charts.push(chart);
        true
    }

    /// Removes a chart by id; unknown dashboard or chart ids are a no-op.
    pub fn remove_chart(&mut self, dashboard_id: DashboardId, chart_id: ChartId) -> Option<Chart> {
        let removed = self
            .get_mut(dashboard_id)
            .and_then(|d| d.remove_chart(chart_id));

        match &removed {
            Some(_) => tracing::info!("Removed chart {} from dashboard {}", chart_id, dashboard_id),
            None => tracing::debug!(
                "Ignoring removal of chart {} from dashboard {}",
                chart_id,
                dashboard_id
            ),
        }
        removed
    }

    /// Number of charts across all dashboards that reference the dataset.
    pub fn charts_using(&self, dataset_id: DatasetId) -> usize {
        self.dashboards
            .iter()
            .map(|d| d.charts_using(dataset_id).count())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.dashboards.len()
    }

    fn get_mut(&mut self, id: DashboardId) -> Option<&mut Dashboard> {
        self.dashboards.iter_mut().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartKind, ColumnRoles, Position, Size};
    use crate::domain::dashboard::LayoutMode;
    use crate::domain::scalar::Filters;

    fn chart(dataset_id: DatasetId) -> Chart {
        Chart {
            id: ChartId::new(),
            kind: ChartKind::Line,
            dataset_id,
            columns: ColumnRoles::default(),
            filters: Filters::new(),
            color_scheme: "default".to_string(),
            title: "line chart".to_string(),
            size: Size::default(),
            position: Position::default(),
        }
    }

    #[test]
    fn test_default_names_follow_live_count() {
        let mut registry = DashboardRegistry::default();
        let first = registry.create(None).id;
        assert_eq!(registry.create(None).name, "Dashboard 2");

        registry.remove(first);
        assert_eq!(registry.create(None).name, "Dashboard 2");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_explicit_name_and_layout() {
        let mut registry = DashboardRegistry::default();
        let dashboard = registry.create(Some("Sales".to_string()));
        assert_eq!(dashboard.name, "Sales");
        assert_eq!(dashboard.layout, LayoutMode::Grid);
        assert!(dashboard.charts.is_empty());

        assert_eq!(registry.create(Some("  ".to_string())).name, "Dashboard 2");
    }

    #[test]
    fn test_add_and_remove_charts() {
        let mut registry = DashboardRegistry::default();
        let dashboard_id = registry.create(None).id;
        let dataset_id = DatasetId::new();

        let first = chart(dataset_id);
        let second = chart(dataset_id);
        let (first_id, second_id) = (first.id, second.id);

        assert!(registry.add_chart(dashboard_id, first));
        assert!(registry.add_chart(dashboard_id, second));
        assert_eq!(registry.charts_using(dataset_id), 2);

        assert!(registry.remove_chart(dashboard_id, first_id).is_some());
        let remaining: Vec<ChartId> = registry
            .get(dashboard_id)
            .unwrap()
            .charts
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(remaining, vec![second_id]);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut registry = DashboardRegistry::default();
        let dashboard_id = registry.create(None).id;

        assert!(!registry.add_chart(DashboardId::new(), chart(DatasetId::new())));
        assert!(registry.remove_chart(dashboard_id, ChartId::new()).is_none());
        assert!(registry.remove_chart(DashboardId::new(), ChartId::new()).is_none());
        assert!(registry.remove(DashboardId::new()).is_none());
        assert_eq!(registry.get(dashboard_id).unwrap().charts.len(), 0);
    }
}
