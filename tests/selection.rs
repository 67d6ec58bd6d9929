//! End-to-end selection runs through the public API.

use stepwise_select::config::{Method, RegressionKind, SelectionRequest, Threshold};
use stepwise_select::data_handling::Dataset;
use stepwise_select::error::SelectionError;
use stepwise_select::selection::stepwise::Selector;

/// y tracks x1 almost exactly; x2 is an unrelated alternating column.
fn linear_dataset() -> Dataset {
    let x1: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let x2 = vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
    let e = [0.01, -0.01, 0.02, 0.0, -0.02, 0.01, -0.01, 0.0, 0.02, -0.02];
    let y: Vec<f64> = x1.iter().zip(e.iter()).map(|(x, e)| 2.0 * x + e).collect();
    Dataset::from_columns(vec![
        ("y".to_string(), y),
        ("x1".to_string(), x1),
        ("x2".to_string(), x2),
    ])
    .unwrap()
}

/// Binary response with overlapping classes along x1 and an unrelated x2.
fn logistic_dataset() -> Dataset {
    let base_x = [-2.0, -1.5, -1.0, -0.5, -0.25, 0.25, 0.5, 1.0, 1.5, 2.0];
    let base_y = [0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0];
    let mut x1 = Vec::new();
    let mut y = Vec::new();
    for _ in 0..4 {
        x1.extend_from_slice(&base_x);
        y.extend_from_slice(&base_y);
    }
    // Alternating column whose phase flips between blocks: exactly
    // orthogonal to both y and x1, so it carries no signal.
    let x2: Vec<f64> = (0..x1.len())
        .map(|i| {
            let base = if i % 2 == 0 { 1.0 } else { -1.0 };
            if (i / 10) % 2 == 0 {
                base
            } else {
                -base
            }
        })
        .collect();
    Dataset::from_columns(vec![
        ("y".to_string(), y),
        ("x1".to_string(), x1),
        ("x2".to_string(), x2),
    ])
    .unwrap()
}

// ---------------------------------------------------------------------------
// Core scenarios, all three methods
// ---------------------------------------------------------------------------

#[test]
fn forward_selects_the_correlated_predictor() {
    let data = linear_dataset();
    let req = SelectionRequest::new("y", Method::Forward, RegressionKind::Linear);
    let mut selector = Selector::new(&data, req).unwrap();
    let selected = selector.run().unwrap();
    assert_eq!(selected, vec!["x1".to_string()]);
}

#[test]
fn backward_drops_the_irrelevant_predictor() {
    let data = linear_dataset();
    let req = SelectionRequest::new("y", Method::Backward, RegressionKind::Linear);
    let mut selector = Selector::new(&data, req).unwrap();
    let selected = selector.run().unwrap();
    assert_eq!(selected, vec!["x1".to_string()]);
}

#[test]
fn stepwise_agrees_on_this_dataset() {
    let data = linear_dataset();
    let req = SelectionRequest::new("y", Method::Stepwise, RegressionKind::Linear);
    let mut selector = Selector::new(&data, req).unwrap();
    let selected = selector.run().unwrap();
    assert_eq!(selected, vec!["x1".to_string()]);
}

#[test]
fn logistic_forward_selects_the_informative_predictor() {
    let data = logistic_dataset();
    let req = SelectionRequest::new("y", Method::Forward, RegressionKind::Logistic);
    let mut selector = Selector::new(&data, req).unwrap();
    let selected = selector.run().unwrap();
    assert_eq!(selected[0], "x1");
    assert!(!selected.contains(&"x2".to_string()));
}

// ---------------------------------------------------------------------------
// Forced variables and explicit predictor sets
// ---------------------------------------------------------------------------

#[test]
fn forced_variables_survive_every_method() {
    for method in [Method::Forward, Method::Backward, Method::Stepwise] {
        let data = linear_dataset();
        let mut req = SelectionRequest::new("y", method, RegressionKind::Linear);
        req.x_force = vec!["x2".to_string()];
        let mut selector = Selector::new(&data, req).unwrap();
        let selected = selector.run().unwrap();
        assert!(
            selected.contains(&"x2".to_string()),
            "forced variable dropped by {:?}",
            method
        );
    }
}

#[test]
fn explicit_xnames_restrict_the_candidate_pool() {
    let data = linear_dataset();
    let mut req = SelectionRequest::new("y", Method::Forward, RegressionKind::Linear);
    req.xnames = Some(vec!["x2".to_string()]);
    let mut selector = Selector::new(&data, req).unwrap();
    let selected = selector.run().unwrap();
    // x1 is not a candidate; x2 alone is not significant.
    assert!(selected.is_empty());
}

// ---------------------------------------------------------------------------
// Outcomes and failure propagation
// ---------------------------------------------------------------------------

#[test]
fn empty_selection_is_a_normal_outcome() {
    let data = linear_dataset();
    let mut req = SelectionRequest::new("y", Method::Forward, RegressionKind::Linear);
    // Nothing can beat a zero entry threshold (p-values are compared strictly).
    req.crit_in = Threshold::Probability(0.0);
    let mut selector = Selector::new(&data, req).unwrap();
    let selected = selector.run().unwrap();
    assert!(selected.is_empty());
}

#[test]
fn singular_fit_aborts_the_run() {
    let x1: Vec<f64> = (0..8).map(|i| i as f64).collect();
    let data = Dataset::from_columns(vec![
        ("y".to_string(), x1.iter().map(|v| 2.0 * v + 1.0).collect()),
        ("x1".to_string(), x1.clone()),
        ("x1_copy".to_string(), x1),
    ])
    .unwrap();
    // Backward starts from the full set, whose design matrix is singular.
    let req = SelectionRequest::new("y", Method::Backward, RegressionKind::Linear);
    let mut selector = Selector::new(&data, req).unwrap();
    let err = selector.run().unwrap_err();
    assert!(matches!(err, SelectionError::FitDidNotConverge(_)));
    assert!(selector.selected().is_empty(), "no partial result on failure");
}

#[test]
fn rerun_on_unmutated_data_is_identical() {
    let data = logistic_dataset();
    let req = SelectionRequest::new("y", Method::Stepwise, RegressionKind::Logistic);
    let mut a = Selector::new(&data, req.clone()).unwrap();
    let mut b = Selector::new(&data, req).unwrap();
    assert_eq!(a.run().unwrap(), b.run().unwrap());
}
