// Dashboard domain model
use super::chart::Chart;
use super::identity::{ChartId, DashboardId, DatasetId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Grid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: DashboardId,
    pub name: String,
    pub charts: Vec<Chart>,
    pub layout: LayoutMode,
    pub created_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn new(name: String) -> Self {
        Self {
            id: DashboardId::new(),
            name,
            charts: Vec::new(),
            layout: LayoutMode::default(),
            created_at: Utc::now(),
        }
    }

    pub fn chart(&self, chart_id: ChartId) -> Option<&Chart> {
        self.charts.iter().find(|c| c.id == chart_id)
    }

    pub fn remove_chart(&mut self, chart_id: ChartId) -> Option<Chart> {
        let index = self.charts.iter().position(|c| c.id == chart_id)?;
        Some(self.charts.remove(index))
    }

    /// Charts pointing at the given dataset.
    pub fn charts_using(&self, dataset_id: DatasetId) -> impl Iterator<Item = &Chart> {
        self.charts.iter().filter(move |c| c.dataset_id == dataset_id)
    }
}
