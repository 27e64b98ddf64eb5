use cytostat::math::welch::{welch_t_test, WelchSkip};

#[test]
fn known_values_equal_sizes() {
    let a = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let b = vec![2.0, 3.0, 4.0, 5.0, 6.0];
    let r = welch_t_test(&a, &b).unwrap();
    assert!((r.mean_a - 3.0).abs() < 1e-12);
    assert!((r.mean_b - 4.0).abs() < 1e-12);
    // Equal variances of 2.5 give se = 1, t = -1, df = 8.
    assert!((r.t_statistic + 1.0).abs() < 1e-12);
    assert!((r.degrees_of_freedom - 8.0).abs() < 1e-12);
    // Two-sided p for t = 1 with 8 df.
    assert!((r.p_value - 0.34659).abs() < 1e-4);
}

#[test]
fn label_swap_negates_t_and_preserves_p() {
    let a = vec![40.0, 44.0, 41.0];
    let b = vec![10.0, 12.0, 9.0];
    let ab = welch_t_test(&a, &b).unwrap();
    let ba = welch_t_test(&b, &a).unwrap();
    assert!((ab.t_statistic + ba.t_statistic).abs() < 1e-12);
    assert!((ab.p_value - ba.p_value).abs() < 1e-12);
    assert!(ab.t_statistic > 0.0);
}

#[test]
fn order_invariant_within_groups() {
    let a1 = vec![3.0, 1.0, 2.0];
    let a2 = vec![1.0, 2.0, 3.0];
    let b = vec![5.0, 6.0, 7.0];
    let r1 = welch_t_test(&a1, &b).unwrap();
    let r2 = welch_t_test(&a2, &b).unwrap();
    assert_eq!(r1.t_statistic, r2.t_statistic);
    assert_eq!(r1.p_value, r2.p_value);
}

#[test]
fn single_observation_groups_skip() {
    let err = welch_t_test(&[40.0], &[10.0]).unwrap_err();
    assert_eq!(err, WelchSkip::TooFewObservations);

    let err = welch_t_test(&[40.0, 44.0], &[10.0]).unwrap_err();
    assert_eq!(err, WelchSkip::TooFewObservations);
}

#[test]
fn zero_variance_both_groups_skip() {
    let err = welch_t_test(&[5.0, 5.0], &[5.0, 5.0]).unwrap_err();
    assert_eq!(err, WelchSkip::DegenerateVariance);
}

#[test]
fn one_sided_variance_still_defined() {
    // Only one group degenerate; the pooled standard error is nonzero.
    let r = welch_t_test(&[5.0, 5.0], &[1.0, 3.0]).unwrap();
    assert!(r.t_statistic.is_finite());
    assert!(r.p_value > 0.0 && r.p_value <= 1.0);
}

#[test]
fn fractional_degrees_of_freedom() {
    let a = vec![40.0, 44.0];
    let b = vec![10.0, 12.0];
    let r = welch_t_test(&a, &b).unwrap();
    assert!((r.degrees_of_freedom - 25.0 / 17.0).abs() < 1e-9);
    assert!((r.t_statistic - 31.0 / 5.0f64.sqrt()).abs() < 1e-9);
    assert!(r.p_value > 0.0 && r.p_value < 0.05);
}
