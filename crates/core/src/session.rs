//! One loaded dashboard session: the case roster and coefficient map held
//! in memory, with every chart derived from them on demand.
//!
//! Filter changes never refetch. Each derivation is a pure recomputation
//! over the full roster, so rendering the same query twice produces
//! identical series.

use crate::chart::{ChartSeries, ChartSlot, Palette, RenderSink};
use crate::filter::{filter_by_date, DateRange};
use crate::histogram::AgeHistogram;
use crate::rank::rank_coefficients;
use crate::record::{CaseRecord, CoefficientMap, KeyPath, DEFAULT_GROUP_FIELD};
use crate::tally::tally_by;

/// The user-adjustable inputs of a render cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardQuery {
    pub range: DateRange,
    pub group_by: KeyPath,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self { range: DateRange::default(), group_by: KeyPath::new(DEFAULT_GROUP_FIELD) }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionContext {
    records: Vec<CaseRecord>,
    coefficients: CoefficientMap,
}

impl SessionContext {
    pub fn new(records: Vec<CaseRecord>, coefficients: CoefficientMap) -> Self {
        Self { records, coefficients }
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn coefficients(&self) -> &CoefficientMap {
        &self.coefficients
    }

    /// Category breakdown over the date-filtered roster, keys in
    /// first-occurrence order.
    pub fn category_series(&self, query: &DashboardQuery) -> ChartSeries {
        let visible = filter_by_date(&self.records, &query.range);
        let tally = tally_by(visible.iter().copied(), &query.group_by);
        let values = tally.counts().into_iter().map(|count| count as f64).collect();
        ChartSeries::new(tally.labels(), values)
    }

    /// Victim-age histogram over the date-filtered roster.
    pub fn age_series(&self, query: &DashboardQuery) -> ChartSeries {
        let visible = filter_by_date(&self.records, &query.range);
        let histogram = AgeHistogram::build(visible.iter().copied());
        let values = histogram.counts().into_iter().map(|count| count as f64).collect();
        ChartSeries::new(histogram.labels(), values)
    }

    /// Ranked model weights. Independent of the date filter.
    pub fn coefficient_series(&self) -> ChartSeries {
        let ranked = rank_coefficients(&self.coefficients);
        let (labels, values) = ranked.into_iter().map(|c| (c.name, c.weight)).unzip();
        ChartSeries::new(labels, values)
    }

    /// Run the full pipeline for `query` and push all three charts into
    /// `sink`. The date filter runs once, upstream of both the counter and
    /// the binner; a record excluded there is excluded from every chart of
    /// this render cycle.
    pub fn dashboard(&self, query: &DashboardQuery, palette: &Palette, sink: &mut dyn RenderSink) {
        let visible = filter_by_date(&self.records, &query.range);

        let tally = tally_by(visible.iter().copied(), &query.group_by);
        let donut_values = tally.counts().into_iter().map(|count| count as f64).collect();
        sink.render(
            ChartSlot::CategoryDonut,
            ChartSeries::new(tally.labels(), donut_values).with_colors(palette),
        );

        let histogram = AgeHistogram::build(visible.iter().copied());
        let age_values = histogram.counts().into_iter().map(|count| count as f64).collect();
        sink.render(
            ChartSlot::AgeHistogram,
            ChartSeries::new(histogram.labels(), age_values),
        );

        sink.render(ChartSlot::ModelCoefficients, self.coefficient_series());
    }
}
