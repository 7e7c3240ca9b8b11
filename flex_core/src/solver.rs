//! Simultaneous-equation solver
//!
//! One general N×N dense solver — Gaussian elimination with partial
//! pivoting, reduced all the way to the identity — covers every system the
//! analyzer produces: 1×1 through 3×3 joint-equilibrium systems for beams
//! and the 3×3/4×4 sway systems for frames. A pivot whose magnitude falls
//! below [`SINGULARITY_TOLERANCE`] means the equilibrium equations are
//! linearly dependent and the run is reported as having no unique
//! solution.

use log::warn;

use crate::errors::{CalcError, CalcResult};

/// Pivot / determinant magnitude below which a system is treated as
/// singular
pub const SINGULARITY_TOLERANCE: f64 = 1e-10;

/// Solve `A · x = b` for `x`.
///
/// `a` is a square coefficient matrix given as rows; `b` the right-hand
/// side. Rows are swapped so the largest-magnitude coefficient in each
/// column pivots.
///
/// # Errors
///
/// [`CalcError::SingularSystem`] when the matrix has no unique solution;
/// [`CalcError::Internal`] when the dimensions disagree.
///
/// # Example
/// ```
/// use flex_core::solver::solve_dense;
///
/// let x = solve_dense(vec![vec![4.0, 1.0], vec![1.0, 4.0]], vec![-10.0, -10.0]).unwrap();
/// assert!((x[0] + 2.0).abs() < 1e-9);
/// assert!((x[1] + 2.0).abs() < 1e-9);
/// ```
pub fn solve_dense(a: Vec<Vec<f64>>, b: Vec<f64>) -> CalcResult<Vec<f64>> {
    let n = a.len();
    if n == 0 || b.len() != n || a.iter().any(|row| row.len() != n) {
        return Err(CalcError::Internal {
            message: format!("malformed system: {} equations, {} constants", n, b.len()),
        });
    }

    // Augmented matrix [A | b]
    let mut m: Vec<Vec<f64>> = a
        .into_iter()
        .zip(b)
        .map(|(mut row, rhs)| {
            row.push(rhs);
            row
        })
        .collect();

    let mut determinant = 1.0;

    for i in 0..n {
        let mut max_row = i;
        for k in (i + 1)..n {
            if m[k][i].abs() > m[max_row][i].abs() {
                max_row = k;
            }
        }
        if max_row != i {
            m.swap(i, max_row);
            determinant = -determinant;
        }

        let pivot = m[i][i];
        determinant *= pivot;
        if pivot.abs() < SINGULARITY_TOLERANCE {
            warn!(
                "equilibrium system is singular (pivot {:.3e} in column {})",
                pivot, i
            );
            return Err(CalcError::singular(
                "the system has no unique solution (determinant is zero)",
            ));
        }

        for j in i..=n {
            m[i][j] /= pivot;
        }
        for k in 0..n {
            if k != i {
                let factor = m[k][i];
                for j in i..=n {
                    m[k][j] -= factor * m[i][j];
                }
            }
        }
    }

    if determinant.abs() < SINGULARITY_TOLERANCE {
        warn!("equilibrium system determinant {:.3e} below tolerance", determinant);
        return Err(CalcError::singular(
            "the system has no unique solution (determinant is zero)",
        ));
    }

    Ok(m.into_iter().map(|row| row[n]).collect())
}
