// Chart configuration domain model
use super::dataset::Dataset;
use super::identity::{ChartId, DatasetId};
use super::scalar::Filters;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
    Area,
    Radar,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Area => "area",
            ChartKind::Radar => "radar",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which column plays which axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoles {
    pub x: Option<String>,
    pub y: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    #[serde(rename = "x")]
    X,
    #[serde(rename = "y")]
    Y,
    #[serde(rename = "category")]
    Category,
}

impl ColumnRoles {
    pub fn set(&mut self, role: ColumnRole, column: Option<String>) {
        let column = column.filter(|c| !c.is_empty());
        match role {
            ColumnRole::X => self.x = column,
            ColumnRole::Y => self.y = column,
            ColumnRole::Category => self.category = column,
        }
    }

    /// Every assigned column, x first.
    pub fn assigned(&self) -> impl Iterator<Item = &str> {
        [&self.x, &self.y, &self.category]
            .into_iter()
            .filter_map(|c| c.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub id: ChartId,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Weak reference; the dataset may be removed while the chart lives on.
    pub dataset_id: DatasetId,
    pub columns: ColumnRoles,
    pub filters: Filters,
    pub color_scheme: String,
    pub title: String,
    pub size: Size,
    pub position: Position,
}

/// Why a chart cannot be drawn right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnresolvedReason {
    DatasetMissing,
    ColumnsUnset,
    UnknownColumn(String),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::DatasetMissing => f.write_str("the dataset for this chart was removed"),
            UnresolvedReason::ColumnsUnset => f.write_str("choose both an X and a Y column"),
            UnresolvedReason::UnknownColumn(c) => write!(f, "column {:?} is not in the dataset", c),
        }
    }
}

/// Render readiness: Unresolved -> Resolvable -> Rendered, regressing to
/// Unresolved when the dataset disappears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Readiness {
    Unresolved { reason: UnresolvedReason },
    Resolvable,
    Rendered,
}

impl Chart {
    /// Readiness against whatever the dataset registry currently holds.
    pub fn readiness(&self, dataset: Option<&Dataset>) -> Readiness {
        let Some(dataset) = dataset.filter(|d| d.id() == self.dataset_id) else {
            return Readiness::Unresolved {
                reason: UnresolvedReason::DatasetMissing,
            };
        };

        if self.columns.x.is_none() || self.columns.y.is_none() {
            return Readiness::Unresolved {
                reason: UnresolvedReason::ColumnsUnset,
            };
        }

        if let Some(missing) = self.columns.assigned().find(|c| !dataset.has_column(c)) {
            return Readiness::Unresolved {
                reason: UnresolvedReason::UnknownColumn(missing.to_string()),
            };
        }

        Readiness::Resolvable
    }
}
