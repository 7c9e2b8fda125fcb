// The same reconstruction posed as a linear system.
//
// For k points we solve for all coefficients of
//
// f(x) = c_0 * x**(k-1)  +  c_1 * x**(k-2)  +  ...  +  c_(k-1)
//
// so row i of the matrix is [x_i**(k-1), ..., x_i, 1] and the right hand
// side is y_i. Gauss-Jordan elimination with partial pivoting; the last
// unknown is the constant term. Entries are exact rationals, so the answer
// matches Lagrange interpolation bit for bit. Pivoting isn't needed for
// accuracy here, only to pick a non-zero pivot, but it keeps the steps the
// same as the usual floating point presentation.

use num_bigint::BigInt;

use crate::error::{Result, ShareError};
use crate::lagrange::Point;
use crate::rational::Rational;

/// Coefficients of the interpolating polynomial, highest power first.
pub fn solve_coefficients(points: &[Point]) -> Result<Vec<Rational>> {
    let refs: Vec<&Point> = points.iter().collect();
    solve(&refs)
}

/// f(0) of the polynomial through `points`.
pub fn solve_constant_term(points: &[Point]) -> Result<Rational> {
    let refs: Vec<&Point> = points.iter().collect();
    solve_subset(&refs)
}

pub(crate) fn solve_subset(points: &[&Point]) -> Result<Rational> {
    let mut coefficients = solve(points)?;
    coefficients.pop().ok_or(ShareError::NotEnoughShares { have: 0, need: 1 })
}

fn solve(points: &[&Point]) -> Result<Vec<Rational>> {
    let n = points.len();
    let mut matrix: Vec<Vec<Rational>> = points
        .iter()
        .map(|p| {
            let x = BigInt::from(p.x);
            (0..n)
                .map(|j| Rational::from_integer(x.pow((n - 1 - j) as u32)))
                .collect()
        })
        .collect();
    let mut constants: Vec<Rational> =
        points.iter().map(|p| Rational::from_integer(p.y.clone())).collect();

    for pivot in 0..n {
        // row at or below the pivot with the largest entry in this column
        let mut max_row = pivot;
        for row in pivot + 1..n {
            if matrix[row][pivot].abs() > matrix[max_row][pivot].abs() {
                max_row = row;
            }
        }
        if matrix[max_row][pivot].is_zero() {
            // singular: two points share an x
            return Err(ShareError::DivisionByZero);
        }
        matrix.swap(pivot, max_row);
        constants.swap(pivot, max_row);

        // normalise the pivot row
        let pivot_value = matrix[pivot][pivot].clone();
        for col in pivot..n {
            matrix[pivot][col] = matrix[pivot][col].checked_div(&pivot_value)?;
        }
        constants[pivot] = constants[pivot].checked_div(&pivot_value)?;

        // clear this column everywhere else
        let pivot_row = matrix[pivot].clone();
        let pivot_constant = constants[pivot].clone();
        for row in 0..n {
            if row == pivot || matrix[row][pivot].is_zero() {
                continue;
            }
            let factor = matrix[row][pivot].clone();
            for col in pivot..n {
                matrix[row][col] = &matrix[row][col] - &(&factor * &pivot_row[col]);
            }
            constants[row] = &constants[row] - &(&factor * &pivot_constant);
        }
    }
    Ok(constants)
}
