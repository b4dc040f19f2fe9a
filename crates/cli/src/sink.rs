//! Terminal render sinks. Each sink owns at most one chart per slot;
//! rendering to an occupied slot replaces the previous chart.

use caseboard_core::chart::{ChartSeries, ChartSlot, RenderSink};

const BAR_WIDTH: usize = 32;
const MAX_LABEL_WIDTH: usize = 24;

fn replace_slot(charts: &mut Vec<(ChartSlot, ChartSeries)>, slot: ChartSlot, series: ChartSeries) {
    charts.retain(|(existing, _)| *existing != slot);
    charts.push((slot, series));
}

fn in_display_order(charts: &[(ChartSlot, ChartSeries)]) -> Vec<(ChartSlot, &ChartSeries)> {
    ChartSlot::ALL
        .iter()
        .filter_map(|slot| {
            charts
                .iter()
                .find(|(existing, _)| existing == slot)
                .map(|(_, series)| (*slot, series))
        })
        .collect()
}

/// Plain-text bar rows, one block per slot.
#[derive(Debug, Default)]
pub struct TextSink {
    charts: Vec<(ChartSlot, ChartSeries)>,
}

impl RenderSink for TextSink {
    fn render(&mut self, slot: ChartSlot, series: ChartSeries) {
        replace_slot(&mut self.charts, slot, series);
    }
}

impl TextSink {
    pub fn into_output(self) -> String {
        let mut blocks = Vec::new();
        for (slot, series) in in_display_order(&self.charts) {
            blocks.push(render_block(slot, series));
        }
        blocks.join("\n\n")
    }
}

fn render_block(slot: ChartSlot, series: &ChartSeries) -> String {
    let mut lines = vec![slot.title().to_string()];

    if series.is_empty() {
        lines.push("  (no data)".to_string());
        return lines.join("\n");
    }

    let label_width = series
        .labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL_WIDTH);
    let max_magnitude = series
        .values
        .iter()
        .filter(|value| value.is_finite())
        .fold(0.0_f64, |acc, value| acc.max(value.abs()));

    for (label, value) in series.labels.iter().zip(&series.values) {
        let bar = bar_for(*value, max_magnitude);
        let mut label = label.clone();
        if label.chars().count() > MAX_LABEL_WIDTH {
            label = label.chars().take(MAX_LABEL_WIDTH - 1).collect();
            label.push('…');
        }
        lines.push(format!(
            "  {label:<label_width$}  {bar:<bar_width$}  {}",
            format_value(*value),
            bar_width = BAR_WIDTH,
        ));
    }

    lines.join("\n")
}

fn bar_for(value: f64, max_magnitude: f64) -> String {
    if !value.is_finite() || value == 0.0 || max_magnitude == 0.0 {
        return String::new();
    }
    let ratio = (value.abs() / max_magnitude).clamp(0.0, 1.0);
    let filled = ((ratio * BAR_WIDTH as f64).round() as usize).max(1);
    "█".repeat(filled)
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

/// One JSON document keyed by slot name, for piping into other tools.
#[derive(Debug, Default)]
pub struct JsonSink {
    charts: Vec<(ChartSlot, ChartSeries)>,
}

impl RenderSink for JsonSink {
    fn render(&mut self, slot: ChartSlot, series: ChartSeries) {
        replace_slot(&mut self.charts, slot, series);
    }
}

impl JsonSink {
    pub fn into_output(self) -> String {
        let mut document = serde_json::Map::new();
        for (slot, series) in in_display_order(&self.charts) {
            let value = serde_json::to_value(series).unwrap_or(serde_json::Value::Null);
            document.insert(slot.as_str().to_string(), value);
        }
        serde_json::to_string_pretty(&serde_json::Value::Object(document))
            .unwrap_or_else(|_| "{}".to_string())
    }
}
