use std::f64::consts::PI;

use ndarray::{Array2, Axis};

use crate::fingerprint::transform::rounding::round_significant;

/// Unnormalized DCT-II of a fixed length with a precomputed cosine table.
///
/// `X[k] = sum_n x[n] * cos(PI / N * (n + 0.5) * k)`
#[derive(Debug, Clone)]
pub struct Dct1d {
    len: usize,
    // Row-major `[k][n]`.
    cosines: Vec<f64>,
}

impl Dct1d {
    pub fn new(len: usize) -> Self {
        let mut cosines = Vec::with_capacity(len * len);
        for k in 0..len {
            for n in 0..len {
                cosines.push((PI / len as f64 * (n as f64 + 0.5) * k as f64).cos());
            }
        }
        Self { len, cosines }
    }

    fn len(&self) -> usize {
        self.len
    }

    pub fn transform(&self, input: &[f64], output: &mut [f64]) {
        debug_assert_eq!(input.len(), self.len);
        debug_assert_eq!(output.len(), self.len);

        for (out, basis) in output.iter_mut().zip(self.cosines.chunks_exact(self.len.max(1))) {
            *out = input.iter().zip(basis).map(|(x, c)| x * c).sum();
        }
    }
}

/// Separable 2-D DCT-II: rows first, then the columns of that result.
///
/// Every coefficient is rounded to `digits` significant digits after each pass.
pub fn dct_2d(matrix: &Array2<f64>, digits: u32) -> Array2<f64> {
    let (rows, cols) = matrix.dim();
    let row_dct = Dct1d::new(cols);
    let col_dct = Dct1d::new(rows);

    let mut row_pass = Array2::zeros((rows, cols));
    transform_lanes(matrix, &mut row_pass, Axis(1), &row_dct, digits);

    let mut col_pass = Array2::zeros((rows, cols));
    transform_lanes(&row_pass, &mut col_pass, Axis(0), &col_dct, digits);

    col_pass
}

fn transform_lanes(input: &Array2<f64>, output: &mut Array2<f64>, axis: Axis, dct: &Dct1d, digits: u32) {
    let mut scratch_in = vec![0.0; dct.len()];
    let mut scratch_out = vec![0.0; dct.len()];

    for (lane_in, mut lane_out) in input.lanes(axis).into_iter().zip(output.lanes_mut(axis)) {
        for (dst, &src) in scratch_in.iter_mut().zip(lane_in.iter()) {
            *dst = src;
        }
        dct.transform(&scratch_in, &mut scratch_out);
        for (dst, &src) in lane_out.iter_mut().zip(scratch_out.iter()) {
            *dst = round_significant(src, digits);
        }
    }
}
