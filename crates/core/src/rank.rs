use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use crate::record::CoefficientMap;

/// A named model weight. The sign is kept even though ranking only looks
/// at the magnitude.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Coefficient {
    pub name: String,
    pub weight: f64,
}

/// Rank coefficients by descending absolute weight. The sort is stable, so
/// equal magnitudes keep the order the model API reported them in.
///
/// Values that cannot be coerced to a number keep their name with a NaN
/// weight and sort after every numeric entry; dropping them would hide a
/// misconfigured model from the chart entirely.
pub fn rank_coefficients(coefficients: &CoefficientMap) -> Vec<Coefficient> {
    let mut ranked: Vec<Coefficient> = coefficients
        .iter()
        .map(|(name, value)| Coefficient { name: name.clone(), weight: coerce_weight(value) })
        .collect();

    ranked.sort_by(|a, b| match (a.weight.is_nan(), b.weight.is_nan()) {
        (false, false) => b.weight.abs().total_cmp(&a.weight.abs()),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    });

    ranked
}

/// The model API serves weights as numbers or numeric strings.
fn coerce_weight(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => text.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::rank_coefficients;
    use crate::record::CoefficientMap;

    fn coefficients(value: serde_json::Value) -> CoefficientMap {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn sorts_by_descending_magnitude_with_signs_preserved() {
        let map = coefficients(json!({ "a": -5, "b": 2, "c": 5, "d": -1 }));
        let ranked = rank_coefficients(&map);

        let names: Vec<_> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "b", "d"]);
        assert_eq!(ranked[0].weight, -5.0);
        assert_eq!(ranked[1].weight, 5.0);
    }

    #[test]
    fn equal_magnitudes_keep_reported_order() {
        let map = coefficients(json!({ "later": 3, "first": -3, "tiny": 0.1 }));
        let ranked = rank_coefficients(&map);

        let names: Vec<_> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["later", "first", "tiny"]);
    }

    #[test]
    fn numeric_strings_are_parsed() {
        let map = coefficients(json!({ "a": "0.25", "b": "-2.5" }));
        let ranked = rank_coefficients(&map);

        assert_eq!(ranked[0].name, "b");
        assert_eq!(ranked[0].weight, -2.5);
        assert_eq!(ranked[1].weight, 0.25);
    }

    #[test]
    fn non_numeric_values_rank_last_in_reported_order() {
        let map = coefficients(json!({ "bad_b": "oops", "good": 1, "bad_a": [1, 2] }));
        let ranked = rank_coefficients(&map);

        let names: Vec<_> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["good", "bad_b", "bad_a"]);
        assert!(ranked[1].weight.is_nan());
        assert!(ranked[2].weight.is_nan());
    }

    #[test]
    fn empty_map_ranks_to_nothing() {
        assert!(rank_coefficients(&CoefficientMap::new()).is_empty());
    }
}
