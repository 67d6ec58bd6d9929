//! Bidirectional (stepwise) selection on a synthetic logistic dataset,
//! with one variable forced into the model.
//!
//! Run with: cargo run --example stepwise_logistic

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use stepwise_select::config::{Method, RegressionKind, SelectionRequest};
use stepwise_select::data_handling::Dataset;
use stepwise_select::selection::stepwise::Selector;

fn main() -> Result<()> {
    env_logger::init();

    let n = 400;
    let mut rng = StdRng::seed_from_u64(7);

    let noise_col = |rng: &mut StdRng| -> Vec<f64> {
        (0..n).map(|_| 2.0 * rng.gen::<f64>() - 1.0).collect()
    };

    let x1 = noise_col(&mut rng);
    let x2 = noise_col(&mut rng);
    let x3 = noise_col(&mut rng);
    let x4 = noise_col(&mut rng);

    // Class probability driven by x1 and x2 only.
    let y: Vec<f64> = (0..n)
        .map(|i| {
            let eta = 2.0 * x1[i] - 1.5 * x2[i];
            let p = 1.0 / (1.0 + (-eta).exp());
            if rng.gen::<f64>() < p {
                1.0
            } else {
                0.0
            }
        })
        .collect();

    let data = Dataset::from_columns(vec![
        ("y".to_string(), y),
        ("x1".to_string(), x1),
        ("x2".to_string(), x2),
        ("x3".to_string(), x3),
        ("x4".to_string(), x4),
    ])?;

    let mut request = SelectionRequest::new("y", Method::Stepwise, RegressionKind::Logistic);
    request.x_force = vec!["x3".to_string()];
    request.verbose = true;

    let mut selector = Selector::new(&data, request)?;
    let selected = selector.run()?;

    println!("Selected features: {:?}", selected);
    println!("(x3 is forced and stays in regardless of significance)");
    Ok(())
}
