use serde::Serialize;

/// Default segment palette, cycled when a breakdown has more distinct
/// keys than colors.
pub const DEFAULT_PALETTE: [&str; 6] =
    ["#36a2eb", "#ff6384", "#ffce56", "#4bc0c0", "#9966ff", "#ff9f40"];

/// The three fixed chart positions on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    CategoryDonut,
    AgeHistogram,
    ModelCoefficients,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 3] =
        [Self::CategoryDonut, Self::AgeHistogram, Self::ModelCoefficients];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CategoryDonut => "category_donut",
            Self::AgeHistogram => "age_histogram",
            Self::ModelCoefficients => "model_coefficients",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::CategoryDonut => "Cases by category",
            Self::AgeHistogram => "Victim age distribution",
            Self::ModelCoefficients => "Model coefficient importance",
        }
    }
}

impl std::fmt::Display for ChartSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart-ready data: parallel label/value sequences, optionally with one
/// color per label.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

impl ChartSeries {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { labels, values, colors: None }
    }

    pub fn with_colors(mut self, palette: &Palette) -> Self {
        self.colors = Some(palette.cycle(self.labels.len()));
        self
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A fixed color list cycled per segment index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// An empty color list would make cycling undefined, so it falls back
    /// to the default palette.
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors }
    }

    pub fn color(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    pub fn cycle(&self, count: usize) -> Vec<String> {
        (0..count).map(|index| self.color(index).to_string()).collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self { colors: DEFAULT_PALETTE.iter().map(ToString::to_string).collect() }
    }
}

/// Where derived series end up. A sink owns one chart per slot; rendering
/// to an occupied slot must dispose the previous chart and install the new
/// one, never draw both.
pub trait RenderSink {
    fn render(&mut self, slot: ChartSlot, series: ChartSeries);
}

#[cfg(test)]
mod tests {
    use super::{ChartSeries, ChartSlot, Palette, DEFAULT_PALETTE};

    #[test]
    fn palette_cycles_past_its_length() {
        let palette = Palette::new(vec!["#111111".into(), "#222222".into()]);

        assert_eq!(palette.color(0), "#111111");
        assert_eq!(palette.color(1), "#222222");
        assert_eq!(palette.color(2), "#111111");
        assert_eq!(palette.cycle(5).len(), 5);
    }

    #[test]
    fn empty_palette_falls_back_to_default() {
        let palette = Palette::new(Vec::new());
        assert_eq!(palette.color(0), DEFAULT_PALETTE[0]);
    }

    #[test]
    fn series_colors_are_one_per_label() {
        let series = ChartSeries::new(
            vec!["A".into(), "B".into(), "C".into()],
            vec![3.0, 2.0, 1.0],
        )
        .with_colors(&Palette::default());

        assert_eq!(series.colors.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn slots_have_stable_names() {
        let names: Vec<_> = ChartSlot::ALL.iter().map(ChartSlot::as_str).collect();
        assert_eq!(
            names,
            vec!["category_donut", "age_histogram", "model_coefficients"]
        );
    }
}
