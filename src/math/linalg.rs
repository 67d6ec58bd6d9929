//! Dense linear algebra for the small symmetric systems the engines solve.

use ndarray::{Array1, Array2, Axis};

/// Pivots below this magnitude are treated as zero during elimination.
const PIVOT_EPS: f64 = 1e-12;

/// Prepend a column of ones so every fit carries an intercept term.
///
/// The intercept is always the first column of the design matrix, matching
/// the convention that coefficient 0 is the bias and coefficients `1..` map
/// to the predictors in request order.
pub fn add_intercept(x: &Array2<f64>) -> Array2<f64> {
    let n = x.nrows();
    let ones = Array2::ones((n, 1));
    ndarray::concatenate(Axis(1), &[ones.view(), x.view()])
        .expect("add_intercept: row counts match by construction")
}

/// Invert a square matrix by Gauss-Jordan elimination with partial pivoting.
///
/// Returns `None` when the matrix is singular (a pivot falls below
/// `PIVOT_EPS`), which the engines surface as `FitDidNotConverge`.
pub fn invert(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    if a.ncols() != n {
        return None;
    }

    let mut work = a.clone();
    let mut inv = Array2::eye(n);

    for col in 0..n {
        // Partial pivot: largest magnitude entry on or below the diagonal.
        let mut pivot_row = col;
        let mut pivot_val = work[(col, col)].abs();
        for row in (col + 1)..n {
            let v = work[(row, col)].abs();
            if v > pivot_val {
                pivot_row = row;
                pivot_val = v;
            }
        }
        if !pivot_val.is_finite() || pivot_val < PIVOT_EPS {
            return None;
        }
        if pivot_row != col {
            swap_rows(&mut work, col, pivot_row);
            swap_rows(&mut inv, col, pivot_row);
        }

        let pivot = work[(col, col)];
        for j in 0..n {
            work[(col, j)] /= pivot;
            inv[(col, j)] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = work[(row, col)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                let w = work[(col, j)];
                let i = inv[(col, j)];
                work[(row, j)] -= factor * w;
                inv[(row, j)] -= factor * i;
            }
        }
    }

    Some(inv)
}

fn swap_rows(m: &mut Array2<f64>, a: usize, b: usize) {
    let ncols = m.ncols();
    for j in 0..ncols {
        let tmp = m[(a, j)];
        m[(a, j)] = m[(b, j)];
        m[(b, j)] = tmp;
    }
}

/// Solve `a * x = b` through the inverse. The systems here are tiny
/// (order = number of included predictors + 1), so the extra work over a
/// dedicated solve is irrelevant.
pub fn solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    invert(a).map(|inv| inv.dot(b))
}
