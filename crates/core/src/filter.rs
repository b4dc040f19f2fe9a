use chrono::NaiveDate;

use crate::record::CaseRecord;

/// An inclusive date window. Either bound may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Keep the records whose `case_date` falls inside `range`, preserving
/// input order. Records with a missing or unparseable date are always
/// excluded, even when both bounds are open.
pub fn filter_by_date<'a>(records: &'a [CaseRecord], range: &DateRange) -> Vec<&'a CaseRecord> {
    records
        .iter()
        .filter(|record| record.case_date().is_some_and(|date| range.contains(date)))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::{filter_by_date, DateRange};
    use crate::record::CaseRecord;

    fn case(date: &str) -> CaseRecord {
        match json!({ "case_date": date, "case_type": "Theft" }) {
            serde_json::Value::Object(fields) => CaseRecord(fields),
            _ => unreachable!(),
        }
    }

    fn day(text: &str) -> NaiveDate {
        text.parse().expect("test date must parse")
    }

    #[test]
    fn bounds_are_inclusive_on_both_sides() {
        let records = vec![case("2024-01-01"), case("2024-01-15"), case("2024-02-01")];
        let range = DateRange::new(Some(day("2024-01-01")), Some(day("2024-01-31")));

        let kept = filter_by_date(&records, &range);
        let dates: Vec<_> = kept.iter().filter_map(|r| r.case_date()).collect();
        assert_eq!(dates, vec![day("2024-01-01"), day("2024-01-15")]);
    }

    #[test]
    fn open_bounds_leave_that_side_unconstrained() {
        let records = vec![case("2023-06-01"), case("2024-06-01")];

        let from_only = DateRange::new(Some(day("2024-01-01")), None);
        assert_eq!(filter_by_date(&records, &from_only).len(), 1);

        let to_only = DateRange::new(None, Some(day("2023-12-31")));
        assert_eq!(filter_by_date(&records, &to_only).len(), 1);

        assert_eq!(filter_by_date(&records, &DateRange::default()).len(), 2);
    }

    #[test]
    fn missing_or_malformed_dates_fail_closed() {
        let mut bad = case("not-a-date");
        let missing = CaseRecord::default();
        bad.0.insert("victim".into(), json!({ "age": 20 }));

        let records = vec![bad, missing, case("2024-05-05")];
        let kept = filter_by_date(&records, &DateRange::default());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].case_date(), Some(day("2024-05-05")));
    }

    #[test]
    fn output_preserves_input_order() {
        let records = vec![case("2024-03-03"), case("2024-01-01"), case("2024-02-02")];
        let kept = filter_by_date(&records, &DateRange::default());
        let dates: Vec<_> = kept.iter().filter_map(|r| r.case_date()).collect();
        assert_eq!(
            dates,
            vec![day("2024-03-03"), day("2024-01-01"), day("2024-02-02")]
        );
    }
}
