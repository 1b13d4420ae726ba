// HTTP request handlers
use crate::application::render::render;
use crate::application::selection::Selection;
use crate::domain::chart::{Chart, ChartKind, ColumnRole, ColumnRoles, Readiness};
use crate::domain::dashboard::Dashboard;
use crate::domain::dataset::Dataset;
use crate::domain::identity::{ChartId, DashboardId, DatasetId};
use crate::domain::scalar::Filters;
use crate::infrastructure::http_response::ApiError;
use crate::presentation::app_state::AppState;
use crate::presentation::chart_spec::JsonChartRenderer;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ImportQuery {
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateDashboard {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct AddChart {
    #[serde(rename = "type")]
    pub kind: ChartKind,
}

/// Partial update of the selection; absent fields are left alone.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SelectionUpdate {
    /// Clear columns and filters before applying the rest
    #[serde(default)]
    pub reset: bool,
    pub dataset: Option<DatasetId>,
    pub dashboard: Option<DashboardId>,
    pub columns: Option<ColumnRoles>,
    pub filters: Option<Filters>,
    pub color_scheme: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub id: DatasetId,
    pub name: String,
    pub columns: Vec<String>,
    pub row_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&Dataset> for DatasetSummary {
    fn from(dataset: &Dataset) -> Self {
        Self {
            id: dataset.id(),
            name: dataset.name().to_string(),
            columns: dataset.columns().to_vec(),
            row_count: dataset.rows().len(),
            created_at: dataset.created_at(),
        }
    }
}

#[derive(Serialize)]
pub struct RenderedChart {
    pub readiness: Readiness,
    pub spec: serde_json::Value,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_palettes(State(state): State<Arc<AppState>>) -> Json<BTreeMap<String, Vec<String>>> {
    let session = state.session.lock().await;
    let palettes = session
        .palettes()
        .iter()
        .map(|(id, colors)| (id.to_string(), colors.to_vec()))
        .collect();
    Json(palettes)
}

/// Parse an uploaded file and register it as the active dataset
pub async fn import_dataset(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImportQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<DatasetSummary>), ApiError> {
    let dataset = state
        .ingestor
        .ingest(query.name.clone(), body)
        .await
        .inspect_err(|e| tracing::warn!("Import of {:?} failed: {}", query.name, e))?;

    let mut session = state.session.lock().await;
    let id = session.register_dataset(dataset);
    let summary = DatasetSummary::from(session.dataset(id)?);
    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn list_datasets(State(state): State<Arc<AppState>>) -> Json<Vec<DatasetSummary>> {
    let session = state.session.lock().await;
    Json(session.datasets().iter().map(DatasetSummary::from).collect())
}

pub async fn get_dataset(
    Path(id): Path<DatasetId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dataset>, ApiError> {
    let session = state.session.lock().await;
    Ok(Json(session.dataset(id)?.clone()))
}

pub async fn delete_dataset(
    Path(id): Path<DatasetId>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    state.session.lock().await.remove_dataset(id);
    StatusCode::NO_CONTENT
}

pub async fn create_dashboard(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CreateDashboard>>,
) -> (StatusCode, Json<Dashboard>) {
    let name = body.and_then(|Json(request)| request.name);
    let mut session = state.session.lock().await;
    let dashboard = session.create_dashboard(name).clone();
    (StatusCode::CREATED, Json(dashboard))
}

pub async fn list_dashboards(State(state): State<Arc<AppState>>) -> Json<Vec<Dashboard>> {
    let session = state.session.lock().await;
    Json(session.dashboards().to_vec())
}

pub async fn get_dashboard(
    Path(id): Path<DashboardId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, ApiError> {
    let session = state.session.lock().await;
    Ok(Json(session.dashboard(id)?.clone()))
}

pub async fn delete_dashboard(
    Path(id): Path<DashboardId>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    state.session.lock().await.remove_dashboard(id);
    StatusCode::NO_CONTENT
}

pub async fn get_selection(State(state): State<Arc<AppState>>) -> Json<Selection> {
    let session = state.session.lock().await;
    Json(session.selection().clone())
}

pub async fn update_selection(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SelectionUpdate>,
) -> Result<Json<Selection>, ApiError> {
    let mut session = state.session.lock().await;

    // Validate ids before touching anything
    if let Some(id) = update.dataset {
        session.dataset(id)?;
    }
    if let Some(id) = update.dashboard {
        session.dashboard(id)?;
    }

    if update.reset {
        session.clear_columns_and_filters();
    }
    if let Some(id) = update.dataset {
        session.select_dataset(id)?;
    }
    if let Some(id) = update.dashboard {
        session.select_dashboard(id)?;
    }
    if let Some(columns) = update.columns {
        session.set_column(ColumnRole::X, columns.x);
        session.set_column(ColumnRole::Y, columns.y);
        session.set_column(ColumnRole::Category, columns.category);
    }
    if let Some(filters) = update.filters {
        session.set_filters(filters);
    }
    if let Some(scheme) = update.color_scheme {
        session.set_color_scheme(scheme);
    }

    Ok(Json(session.selection().clone()))
}

/// Add a chart of the given type to the active dashboard from the current selection
pub async fn add_chart(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddChart>,
) -> Result<(StatusCode, Json<Chart>), ApiError> {
    let mut session = state.session.lock().await;
    let chart = session.add_chart(request.kind)?.clone();
    Ok((StatusCode::CREATED, Json(chart)))
}

pub async fn remove_chart(
    Path((dashboard_id, chart_id)): Path<(DashboardId, ChartId)>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    state
        .session
        .lock()
        .await
        .remove_chart(dashboard_id, chart_id);
    StatusCode::NO_CONTENT
}

/// Resolve a chart and describe it for the drawing library
pub async fn render_chart(
    Path((dashboard_id, chart_id)): Path<(DashboardId, ChartId)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RenderedChart>, ApiError> {
    let session = state.session.lock().await;
    let resolved = session.resolve_chart(dashboard_id, chart_id)?;
    let (readiness, spec) = render(&JsonChartRenderer::new(session.palettes()), &resolved);
    Ok(Json(RenderedChart { readiness, spec }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ingestion::BlockingIngestor;
    use crate::application::session::Session;
    use crate::domain::scalar::Scalar;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(Session::default(), Arc::new(BlockingIngestor)))
    }

    async fn import(state: &Arc<AppState>, name: &str, body: &'static [u8]) -> Result<DatasetSummary, ApiError> {
        let query = ImportQuery { name: name.to_string() };
        import_dataset(State(state.clone()), Query(query), Bytes::from_static(body))
            .await
            .map(|(_, Json(summary))| summary)
    }

    #[tokio::test]
    async fn test_import_rejections() {
        let state = state();

        let err = import(&state, "notes.txt", b"a,b\n1,2").await.err().unwrap();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let err = import(&state, "empty.csv", b"a,b\n").await.err().unwrap();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let Json(datasets) = list_datasets(State(state.clone())).await;
        assert!(datasets.is_empty());
    }

    #[tokio::test]
    async fn test_chart_lifecycle() {
        let state = state();
        let summary = import(&state, "sales.csv", b"region,sales\nEast,10\nWest,20\nEast,5")
            .await
            .unwrap();
        assert_eq!(summary.columns, vec!["region", "sales"]);
        assert_eq!(summary.row_count, 3);

        let (status, Json(dashboard)) = create_dashboard(State(state.clone()), None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(dashboard.name, "Dashboard 1");

        let update = SelectionUpdate {
            columns: Some(ColumnRoles {
                x: Some("region".to_string()),
                y: Some("sales".to_string()),
                category: None,
            }),
            filters: Some([("region".to_string(), Scalar::from("East"))].into_iter().collect()),
            ..SelectionUpdate::default()
        };
        let Json(selection) = update_selection(State(state.clone()), Json(update)).await.unwrap();
        assert_eq!(selection.dataset, Some(summary.id));
        assert_eq!(selection.dashboard, Some(dashboard.id));

        let (_, Json(chart)) = add_chart(State(state.clone()), Json(AddChart { kind: ChartKind::Bar }))
            .await
            .unwrap();
        assert_eq!(chart.title, "bar chart");

        let Json(rendered) = render_chart(Path((dashboard.id, chart.id)), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(rendered.readiness, Readiness::Rendered);
        assert_eq!(rendered.spec["series"][0]["points"].as_array().unwrap().len(), 2);

        delete_dataset(Path(summary.id), State(state.clone())).await;
        let Json(rendered) = render_chart(Path((dashboard.id, chart.id)), State(state.clone()))
            .await
            .unwrap();
        assert!(matches!(rendered.readiness, Readiness::Unresolved { .. }));
        assert_eq!(rendered.spec["empty"], true);

        remove_chart(Path((dashboard.id, chart.id)), State(state.clone())).await;
        let Json(dashboard) = get_dashboard(Path(dashboard.id), State(state.clone()))
            .await
            .unwrap();
        assert!(dashboard.charts.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_selection_ids_change_nothing() {
        let state = state();
        let update = SelectionUpdate {
            reset: true,
            dashboard: Some(DashboardId::new()),
            color_scheme: Some("ocean".to_string()),
            ..SelectionUpdate::default()
        };

        let err = update_selection(State(state.clone()), Json(update)).await.err().unwrap();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let Json(selection) = get_selection(State(state.clone())).await;
        assert_eq!(selection.color_scheme, "default");
    }

    #[tokio::test]
    async fn test_add_chart_without_dashboard_conflicts() {
        let state = state();
        import(&state, "a.csv", b"a\n1").await.unwrap();

        let err = add_chart(State(state.clone()), Json(AddChart { kind: ChartKind::Line }))
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }
}
