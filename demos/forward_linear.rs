//! Forward selection on a synthetic linear dataset.
//!
//! Run with: cargo run --example forward_linear
//! Set RUST_LOG=info to see the add/remove decisions.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use stepwise_select::config::{Method, RegressionKind, SelectionRequest};
use stepwise_select::data_handling::Dataset;
use stepwise_select::selection::stepwise::Selector;

fn main() -> Result<()> {
    env_logger::init();

    let n = 200;
    let mut rng = StdRng::seed_from_u64(42);

    let noise_col = |rng: &mut StdRng| -> Vec<f64> {
        (0..n).map(|_| rng.gen::<f64>() - 0.5).collect()
    };

    let x1 = noise_col(&mut rng);
    let x2 = noise_col(&mut rng);
    let x3 = noise_col(&mut rng);
    let x4 = noise_col(&mut rng);
    let x5 = noise_col(&mut rng);

    // y depends on x1 and x2 only; x3..x5 are pure noise.
    let y: Vec<f64> = (0..n)
        .map(|i| 1.5 * x1[i] - 2.0 * x2[i] + 0.1 * (rng.gen::<f64>() - 0.5))
        .collect();

    let data = Dataset::from_columns(vec![
        ("y".to_string(), y),
        ("x1".to_string(), x1),
        ("x2".to_string(), x2),
        ("x3".to_string(), x3),
        ("x4".to_string(), x4),
        ("x5".to_string(), x5),
    ])?;

    let mut request = SelectionRequest::new("y", Method::Forward, RegressionKind::Linear);
    request.crit_in = 0.05.into();
    request.crit_out = 0.05.into();
    request.verbose = true;

    let mut selector = Selector::new(&data, request)?;
    let selected = selector.run()?;

    println!("Selected features: {:?}", selected);
    Ok(())
}
