//! Victim-age histogram with fixed-width decade bins.
//!
//! The covered range is data-driven: it always reaches at least 100 so an
//! empty roster still renders a full default axis, and it stretches to the
//! highest observed age so no valid age ever falls off the end.

use serde_json::Value;

use crate::record::{CaseRecord, KeyPath, AGE_FIELD};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgeBin {
    pub low: u32,
    pub high: u32,
    pub count: u64,
}

impl AgeBin {
    pub fn label(&self) -> String {
        format!("{}-{}", self.low, self.high)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgeHistogram {
    bins: Vec<AgeBin>,
}

impl AgeHistogram {
    pub const BIN_WIDTH: u32 = 10;
    /// Minimum upper edge of the covered range.
    pub const DEFAULT_BOUND: u32 = 100;

    /// Bin the valid victim ages found in `records`. Missing, non-numeric,
    /// non-finite, zero, and negative ages are dropped silently.
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CaseRecord>,
    {
        let age_path = KeyPath::new(AGE_FIELD);
        let ages: Vec<f64> = records
            .into_iter()
            .filter_map(|record| record.resolve(&age_path).and_then(valid_age))
            .collect();

        let max_age = ages.iter().fold(0.0_f64, |acc, &age| acc.max(age));
        let bound = (max_age.ceil() as u32).max(Self::DEFAULT_BOUND);

        let mut bins: Vec<AgeBin> = (1..)
            .step_by(Self::BIN_WIDTH as usize)
            .take_while(|&low| low <= bound)
            .map(|low| AgeBin { low, high: low + Self::BIN_WIDTH - 1, count: 0 })
            .collect();

        for age in ages {
            let index = ((age - 1.0) / f64::from(Self::BIN_WIDTH)).floor() as i64;
            if (0..bins.len() as i64).contains(&index) {
                bins[index as usize].count += 1;
            }
        }

        Self { bins }
    }

    pub fn bins(&self) -> &[AgeBin] {
        &self.bins
    }

    pub fn labels(&self) -> Vec<String> {
        self.bins.iter().map(AgeBin::label).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.bins.iter().map(|bin| bin.count).collect()
    }
}

/// A usable age is a finite number strictly greater than zero. Everything
/// else (strings included) is treated as absent.
fn valid_age(value: &Value) -> Option<f64> {
    value.as_f64().filter(|age| age.is_finite() && *age > 0.0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::AgeHistogram;
    use crate::record::CaseRecord;

    fn victim(age: serde_json::Value) -> CaseRecord {
        match json!({ "victim": { "age": age } }) {
            serde_json::Value::Object(fields) => CaseRecord(fields),
            _ => unreachable!(),
        }
    }

    #[test]
    fn empty_input_still_yields_the_default_axis() {
        let histogram = AgeHistogram::build(&[]);

        assert_eq!(histogram.bins().len(), 10);
        assert_eq!(histogram.labels().first().map(String::as_str), Some("1-10"));
        assert_eq!(
            histogram.labels().last().map(String::as_str),
            Some("91-100")
        );
        assert!(histogram.counts().iter().all(|&count| count == 0));
    }

    #[test]
    fn bound_stretches_to_the_maximum_observed_age() {
        let records = vec![victim(json!(5)), victim(json!(150))];
        let histogram = AgeHistogram::build(&records);

        assert_eq!(histogram.bins().len(), 15);
        assert_eq!(
            histogram.labels().last().map(String::as_str),
            Some("141-150")
        );
        assert_eq!(histogram.counts()[0], 1);
        assert_eq!(histogram.counts()[14], 1);
    }

    #[test]
    fn invalid_ages_are_dropped_without_widening_the_axis() {
        let records = vec![
            victim(json!(-5)),
            victim(json!(0)),
            victim(json!("x")),
            victim(json!(null)),
            victim(json!(30)),
        ];
        let histogram = AgeHistogram::build(&records);

        assert_eq!(histogram.bins().len(), 10);
        assert_eq!(histogram.counts().iter().sum::<u64>(), 1);
        assert_eq!(histogram.counts()[2], 1);
    }

    #[test]
    fn decade_edges_land_in_the_lower_bin() {
        let records = vec![victim(json!(1)), victim(json!(10)), victim(json!(11))];
        let histogram = AgeHistogram::build(&records);

        assert_eq!(histogram.counts()[0], 2);
        assert_eq!(histogram.counts()[1], 1);
    }

    #[test]
    fn records_without_a_victim_are_skipped() {
        let mut no_victim = CaseRecord::default();
        no_victim.0.insert("case_type".into(), json!("Theft"));

        let histogram = AgeHistogram::build(&[no_victim]);
        assert_eq!(histogram.counts().iter().sum::<u64>(), 0);
    }

    #[test]
    fn fractional_ages_below_one_fall_outside_every_bin() {
        let records = vec![victim(json!(0.5)), victim(json!(1.5))];
        let histogram = AgeHistogram::build(&records);

        assert_eq!(histogram.counts().iter().sum::<u64>(), 1);
        assert_eq!(histogram.counts()[0], 1);
    }
}
