//! Integration tests for Chauvenet's criterion

use proptest::prelude::*;
use tripoli_outlier::{
    apply_chauvenets_criterion, apply_chauvenets_criterion_with, ChauvenetParameters,
};

const ARR: [f64; 30] = [
    47.3, 50.5, 53.7, 55.8, 55.0, 56.0001, 57.0012345678, 57.004999, 58.153, 58.852, 58.123,
    58.543, 60.415, 60.794, 60.351, 61.751, 61.652, 61.325, 61.587, 61.126, 61.897, 62.543,
    62.258, 62.689, 63.5473, 63.789, 64.369, 67.115, 68.142, 72.368,
];

#[test]
fn test_thirty_value_scenario() {
    let included = vec![true; ARR.len()];
    let mask = apply_chauvenets_criterion(&ARR, &included).unwrap();

    let rejected: Vec<usize> = mask
        .iter()
        .enumerate()
        .filter(|(_, &keep)| !keep)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(rejected, vec![0, 29]);
    assert_eq!(mask.iter().filter(|&&keep| keep).count(), 28);
    // input untouched
    assert!(included.iter().all(|&keep| keep));
}

#[test]
fn test_lower_rejection_probability_keeps_both_tails() {
    // n * p is about 0.32 for 47.3 and 0.44 for 72.368
    let params = ChauvenetParameters {
        rejection_probability: 0.25,
        ..Default::default()
    };
    let mask = apply_chauvenets_criterion_with(&ARR, &[true; 30], &params).unwrap();
    assert!(mask.iter().all(|&keep| keep));
}

#[test]
fn test_parameters_from_json() {
    let params: ChauvenetParameters =
        serde_json::from_str(r#"{ "rejection_probability": 0.4 }"#).unwrap();
    assert_eq!(params.rejection_probability, 0.4);
    assert_eq!(params.required_min_datum_count, 2);
}

fn sample_and_mask() -> impl Strategy<Value = (Vec<f64>, Vec<bool>)> {
    (2usize..60).prop_flat_map(|n| {
        (
            prop::collection::vec(-1.0e3..1.0e3f64, n),
            prop::collection::vec(any::<bool>(), n),
        )
    })
}

proptest! {
    // Property: a pass never re-includes an excluded point
    #[test]
    fn prop_mask_is_monotonic((data, included) in sample_and_mask()) {
        let mask = apply_chauvenets_criterion(&data, &included).unwrap();
        prop_assert_eq!(mask.len(), included.len());
        for (now, was) in mask.iter().zip(&included) {
            prop_assert!(!now || *was);
        }
    }

    // Property: constant data is never pruned
    #[test]
    fn prop_constant_data_unchanged(
        value in -1.0e6..1.0e6f64,
        included in prop::collection::vec(any::<bool>(), 2..40),
    ) {
        let data = vec![value; included.len()];
        let mask = apply_chauvenets_criterion(&data, &included).unwrap();
        prop_assert_eq!(mask, included);
    }
}
