// Rendering boundary - resolves a chart into rows and colors for a renderer
use crate::application::dataset_registry::DatasetRegistry;
use crate::domain::chart::{Chart, ChartKind, Readiness, UnresolvedReason};
use crate::domain::filter;
use crate::domain::palette::PaletteSet;
use crate::domain::scalar::Record;

/// Everything a renderer needs for one chart.
#[derive(Debug, Clone)]
pub struct ResolvedChart<'a> {
    pub chart: &'a Chart,
    pub readiness: Readiness,
    /// Filtered rows in dataset order; empty when the dataset is gone.
    pub rows: Vec<&'a Record>,
    /// Never empty.
    pub palette: &'a [String],
}

pub fn resolve<'a>(
    chart: &'a Chart,
    datasets: &'a DatasetRegistry,
    palettes: &'a PaletteSet,
) -> ResolvedChart<'a> {
    let dataset = datasets.get(chart.dataset_id);
    let readiness = chart.readiness(dataset);
    let rows = dataset
        .map(|d| filter::apply(d.rows(), &chart.filters))
        .unwrap_or_default();

    ResolvedChart {
        chart,
        readiness,
        rows,
        palette: palettes.resolve(&chart.color_scheme),
    }
}

/// Implemented by the drawing side, once per chart kind.
pub trait ChartRenderer {
    type Output;

    fn line(&self, chart: &ResolvedChart<'_>) -> Self::Output;
    fn bar(&self, chart: &ResolvedChart<'_>) -> Self::Output;
    fn pie(&self, chart: &ResolvedChart<'_>) -> Self::Output;
    fn scatter(&self, chart: &ResolvedChart<'_>) -> Self::Output;
    fn area(&self, chart: &ResolvedChart<'_>) -> Self::Output;
    fn radar(&self, chart: &ResolvedChart<'_>) -> Self::Output;

    /// Explanatory placeholder for charts that cannot be drawn.
    fn empty_state(&self, chart: &Chart, reason: &UnresolvedReason) -> Self::Output;
}

/// Dispatches on the chart kind. Unresolved charts get the empty state and stay
/// unresolved; everything else comes back as rendered.
pub fn render<R: ChartRenderer>(renderer: &R, resolved: &ResolvedChart<'_>) -> (Readiness, R::Output) {
    if let Readiness::Unresolved { reason } = &resolved.readiness {
        return (
            resolved.readiness.clone(),
            renderer.empty_state(resolved.chart, reason),
        );
    }

    let output = match resolved.chart.kind {
        ChartKind::Line => renderer.line(resolved),
        ChartKind::Bar => renderer.bar(resolved),
        ChartKind::Pie => renderer.pie(resolved),
        ChartKind::Scatter => renderer.scatter(resolved),
        ChartKind::Area => renderer.area(resolved),
        ChartKind::Radar => renderer.radar(resolved),
    };

    (Readiness::Rendered, output)
}
