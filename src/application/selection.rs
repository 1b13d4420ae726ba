// Selection state - the user's current choices, read when a chart is created
use crate::domain::chart::{ColumnRole, ColumnRoles};
use crate::domain::identity::{DashboardId, DatasetId};
use crate::domain::palette::DEFAULT_SCHEME;
use crate::domain::scalar::{Filters, Scalar};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub dataset: Option<DatasetId>,
    pub dashboard: Option<DashboardId>,
    pub columns: ColumnRoles,
    pub filters: Filters,
    pub color_scheme: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            dataset: None,
            dashboard: None,
            columns: ColumnRoles::default(),
            filters: Filters::new(),
            color_scheme: DEFAULT_SCHEME.to_string(),
        }
    }
}

impl Selection {
    pub fn set_column(&mut self, role: ColumnRole, column: Option<String>) {
        self.columns.set(role, column);
    }

    /// A blank value clears the filter on that column.
    pub fn set_filter(&mut self, column: impl Into<String>, value: Scalar) {
        let column = column.into();
        if value.is_blank() {
            self.filters.remove(&column);
        } else {
            self.filters.insert(column, value);
        }
    }

    pub fn clear_columns_and_filters(&mut self) {
        self.columns = ColumnRoles::default();
        self.filters.clear();
    }
}
