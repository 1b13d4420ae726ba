// JSON chart descriptions handed to the browser-side drawing library
use crate::application::render::{ChartRenderer, ResolvedChart};
use crate::domain::chart::{Chart, UnresolvedReason};
use crate::domain::palette::PaletteSet;
use crate::domain::scalar::{Record, Scalar};
use serde_json::{json, Value};

/// Describes each chart kind as plain JSON: axes, series and colors.
#[derive(Debug, Clone, Copy)]
pub struct JsonChartRenderer<'a> {
    palettes: &'a PaletteSet,
}

impl<'a> JsonChartRenderer<'a> {
    pub fn new(palettes: &'a PaletteSet) -> Self {
        Self { palettes }
    }

    fn color(&self, resolved: &ResolvedChart<'_>, index: usize) -> String {
        self.palettes
            .color_for(&resolved.chart.color_scheme, index)
            .to_string()
    }

    fn cartesian(&self, resolved: &ResolvedChart<'_>, extra: Value) -> Value {
        let chart = resolved.chart;
        let mut spec = resolved_header(resolved);
        spec["x"] = json!(chart.columns.x);
        spec["y"] = json!(chart.columns.y);
        spec["category"] = json!(chart.columns.category);
        spec["series"] = Value::Array(self.series(resolved));
        merge(&mut spec, extra);
        spec
    }

    /// One series per distinct category value in first-seen order, or a single
    /// series named after the Y column. Colors cycle through the palette.
    fn series(&self, resolved: &ResolvedChart<'_>) -> Vec<Value> {
        let chart = resolved.chart;
        let x = chart.columns.x.as_deref().unwrap_or_default();
        let y = chart.columns.y.as_deref().unwrap_or_default();

        let mut groups: Vec<(Value, Vec<Value>)> = Vec::new();
        for row in &resolved.rows {
            let key = match chart.columns.category.as_deref() {
                Some(category) => cell(row, category),
                None => json!(y),
            };
            let point = json!({ "x": cell(row, x), "y": cell(row, y) });

            match groups.iter_mut().find(|(name, _)| *name == key) {
                Some((_, points)) => points.push(point),
                None => groups.push((key, vec![point])),
            }
        }

        groups
            .into_iter()
            .enumerate()
            .map(|(i, (name, points))| {
                json!({
                    "name": name,
                    "color": self.color(resolved, i),
                    "points": points,
                })
            })
            .collect()
    }
}

impl ChartRenderer for JsonChartRenderer<'_> {
    type Output = Value;

    fn line(&self, resolved: &ResolvedChart<'_>) -> Value {
        self.cartesian(resolved, json!({ "curve": "monotone" }))
    }

    fn bar(&self, resolved: &ResolvedChart<'_>) -> Value {
        self.cartesian(resolved, json!({}))
    }

    fn pie(&self, resolved: &ResolvedChart<'_>) -> Value {
        let chart = resolved.chart;
        let label = chart.columns.x.as_deref().unwrap_or_default();
        let value = chart.columns.y.as_deref().unwrap_or_default();

        let slices: Vec<Value> = resolved
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                json!({
                    "label": cell(row, label),
                    "value": cell(row, value),
                    "color": self.color(resolved, i),
                })
            })
            .collect();

        let mut spec = resolved_header(resolved);
        spec["slices"] = Value::Array(slices);
        spec
    }

    fn scatter(&self, resolved: &ResolvedChart<'_>) -> Value {
        self.cartesian(resolved, json!({ "grid": "dashed" }))
    }

    fn area(&self, resolved: &ResolvedChart<'_>) -> Value {
        self.cartesian(resolved, json!({ "curve": "monotone", "fillOpacity": 0.6 }))
    }

    fn radar(&self, resolved: &ResolvedChart<'_>) -> Value {
        self.cartesian(resolved, json!({ "fillOpacity": 0.6 }))
    }

    fn empty_state(&self, chart: &Chart, reason: &UnresolvedReason) -> Value {
        let mut spec = header(chart);
        spec["empty"] = json!(true);
        spec["message"] = json!(reason.to_string());
        spec
    }
}

fn header(chart: &Chart) -> Value {
    json!({
        "id": chart.id,
        "type": chart.kind,
        "title": chart.title,
        "size": chart.size,
    })
}

fn resolved_header(resolved: &ResolvedChart<'_>) -> Value {
    let mut spec = header(resolved.chart);
    spec["palette"] = json!(resolved.palette);
    spec
}

fn merge(spec: &mut Value, extra: Value) {
    if let (Value::Object(target), Value::Object(source)) = (spec, extra) {
        target.extend(source);
    }
}

fn cell(row: &Record, column: &str) -> Value {
    json!(row.get(column).unwrap_or(&Scalar::Null))
}
