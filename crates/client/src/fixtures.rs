//! Deterministic offline roster for demos and tests. Same shape as the
//! live `/api/casos` payload, fixed values instead of a live database.

use async_trait::async_trait;
use caseboard_core::record::{CaseRecord, CoefficientMap};
use serde_json::{json, Value};

use crate::{ClientError, RecordSource};

/// One fixture case. The optional fields model the gaps real rosters
/// have: cases filed without a registration date or a victim age.
struct FixtureCase {
    date: Option<&'static str>,
    case_type: &'static str,
    location: &'static str,
    ethnicity: &'static str,
    age: Option<u32>,
}

const FIXTURE_CASES: &[FixtureCase] = &[
    FixtureCase {
        date: Some("2024-01-05"),
        case_type: "Theft",
        location: "Central",
        ethnicity: "Mixed",
        age: Some(34),
    },
    FixtureCase {
        date: Some("2024-01-12"),
        case_type: "Robbery",
        location: "District A",
        ethnicity: "White",
        age: Some(27),
    },
    FixtureCase {
        date: Some("2024-01-28"),
        case_type: "Theft",
        location: "District B",
        ethnicity: "Black",
        age: Some(45),
    },
    FixtureCase {
        date: Some("2024-02-03"),
        case_type: "Domestic violence",
        location: "Central",
        ethnicity: "Mixed",
        age: Some(31),
    },
    FixtureCase {
        date: Some("2024-02-14"),
        case_type: "Trafficking",
        location: "Rural Zone",
        ethnicity: "Indigenous",
        age: Some(22),
    },
    FixtureCase {
        date: Some("2024-02-20"),
        case_type: "Theft",
        location: "Central",
        ethnicity: "White",
        age: Some(68),
    },
    FixtureCase {
        date: Some("2024-03-01"),
        case_type: "Robbery",
        location: "District A",
        ethnicity: "Black",
        age: Some(19),
    },
    FixtureCase {
        date: Some("2024-03-09"),
        case_type: "Domestic violence",
        location: "District B",
        ethnicity: "Mixed",
        age: Some(38),
    },
    FixtureCase {
        date: Some("2024-03-17"),
        case_type: "Theft",
        location: "Rural Zone",
        ethnicity: "Asian",
        age: Some(52),
    },
    FixtureCase {
        date: Some("2024-04-02"),
        case_type: "Trafficking",
        location: "District A",
        ethnicity: "Mixed",
        age: Some(29),
    },
    FixtureCase {
        date: Some("2024-04-11"),
        case_type: "Robbery",
        location: "Central",
        ethnicity: "White",
        age: Some(8),
    },
    FixtureCase {
        date: Some("2024-04-23"),
        case_type: "Domestic violence",
        location: "Central",
        ethnicity: "Black",
        age: Some(41),
    },
    FixtureCase {
        date: Some("2024-05-06"),
        case_type: "Theft",
        location: "District B",
        ethnicity: "Mixed",
        age: Some(104),
    },
    FixtureCase {
        date: Some("2024-05-19"),
        case_type: "Robbery",
        location: "Rural Zone",
        ethnicity: "Indigenous",
        age: Some(57),
    },
    // Filed without a date: excluded by every date filter, but its age
    // would still bin if it reached the histogram.
    FixtureCase {
        date: None,
        case_type: "Theft",
        location: "District A",
        ethnicity: "White",
        age: Some(23),
    },
    // Victim age not recorded: counts toward the breakdown, not the bins.
    FixtureCase {
        date: Some("2024-06-01"),
        case_type: "Trafficking",
        location: "District B",
        ethnicity: "Black",
        age: None,
    },
];

impl FixtureCase {
    fn to_record(&self) -> CaseRecord {
        let mut victim = serde_json::Map::new();
        victim.insert("ethnicity".to_string(), json!(self.ethnicity));
        if let Some(age) = self.age {
            victim.insert("age".to_string(), json!(age));
        }

        let mut fields = serde_json::Map::new();
        if let Some(date) = self.date {
            fields.insert("case_date".to_string(), json!(date));
        }
        fields.insert("case_type".to_string(), json!(self.case_type));
        fields.insert("location".to_string(), json!(self.location));
        fields.insert("victim".to_string(), Value::Object(victim));

        CaseRecord(fields)
    }
}

/// Coefficient fixture mirroring the one-hot feature layout the model
/// trains on. One weight is string-encoded on purpose, matching a quirk
/// of the live endpoint.
fn fixture_coefficients() -> CoefficientMap {
    match json!({
        "age": 0.42,
        "ethnicity_White": -0.13,
        "ethnicity_Black": 0.31,
        "ethnicity_Mixed": 0.05,
        "ethnicity_Indigenous": -0.61,
        "ethnicity_Asian": 0.02,
        "location_Central": -0.87,
        "location_District A": 0.54,
        "location_District B": 0.54,
        "location_Rural Zone": "0.08"
    }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FixtureSource;

impl FixtureSource {
    pub fn cases() -> Vec<CaseRecord> {
        FIXTURE_CASES.iter().map(FixtureCase::to_record).collect()
    }

    pub fn coefficients() -> CoefficientMap {
        fixture_coefficients()
    }
}

#[async_trait]
impl RecordSource for FixtureSource {
    async fn fetch_cases(&self) -> Result<Vec<CaseRecord>, ClientError> {
        Ok(Self::cases())
    }

    async fn fetch_coefficients(&self) -> Result<CoefficientMap, ClientError> {
        Ok(Self::coefficients())
    }
}

#[cfg(test)]
mod tests {
    use caseboard_core::filter::{filter_by_date, DateRange};
    use caseboard_core::histogram::AgeHistogram;
    use caseboard_core::record::KeyPath;
    use caseboard_core::tally::tally_by;

    use super::FixtureSource;

    #[test]
    fn roster_covers_every_category() {
        let cases = FixtureSource::cases();
        let tally = tally_by(&cases, &KeyPath::from("case_type"));

        assert_eq!(
            tally.labels(),
            vec![
                "Theft".to_string(),
                "Robbery".to_string(),
                "Domestic violence".to_string(),
                "Trafficking".to_string()
            ]
        );
    }

    #[test]
    fn roster_exercises_the_missing_field_paths() {
        let cases = FixtureSource::cases();

        let dated = filter_by_date(&cases, &DateRange::default());
        assert_eq!(dated.len(), cases.len() - 1);

        let histogram = AgeHistogram::build(&cases);
        let binned: u64 = histogram.counts().iter().sum();
        assert_eq!(binned as usize, cases.len() - 1);
    }

    #[test]
    fn centenarian_case_stretches_the_histogram_axis() {
        let histogram = AgeHistogram::build(&FixtureSource::cases());
        assert_eq!(
            histogram.labels().last().map(String::as_str),
            Some("101-110")
        );
    }

    #[test]
    fn coefficients_include_a_string_encoded_weight() {
        let coefficients = FixtureSource::coefficients();
        assert!(coefficients.get("location_Rural Zone").is_some_and(|v| v.is_string()));
    }
}
